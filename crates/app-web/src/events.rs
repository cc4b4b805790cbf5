use crate::dom;
use crate::overlay;
use crate::WebScene;
use crate::ui;
use app_core::{action_for_key, KeyAction, SimulationContext};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys typed into panel inputs belong to the input, not the shortcuts.
fn target_is_form_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "SELECT"))
        .unwrap_or(false)
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, sim: &SimulationContext<WebScene>) {
    if target_is_form_field(ev) {
        return;
    }
    let action = action_for_key(&ev.key(), &sim.params());
    let Some(action) = action else {
        return;
    };
    ev.prevent_default();
    let Some(document) = dom::window_document() else {
        return;
    };
    match action {
        KeyAction::Change(change) => {
            if sim.apply_logged(change).is_some() {
                let params = sim.params();
                ui::sync(&document, &params);
                overlay::update_hint(&document, &params);
            }
        }
        KeyAction::TogglePanel => ui::toggle(&document),
    }
}

pub fn wire_keydown(sim: Rc<SimulationContext<WebScene>>) {
    if let Some(window) = web::window() {
        dom::listen(&window, "keydown", move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &sim);
        });
    }
}
