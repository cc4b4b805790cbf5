use crate::dom;
use crate::overlay;
use crate::WebScene;
use app_core::{
    BehaviorMode, Control, ControlChange, SimulationContext, SimulationParameters, SliderSpec,
    SLIDERS,
};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const PANEL_ID: &str = "debug-panel";
const BEHAVIOR_SELECT_ID: &str = "ctl-behavior";

const PANEL_STYLE: &str = "position:fixed;top:12px;right:12px;width:240px;padding:10px 12px;\
    color:#cfe7ff;font:12px system-ui;background:rgba(10,14,24,0.85);border-radius:6px;\
    border:1px solid rgba(80,110,150,0.35);";

fn create<T: JsCast>(document: &web::Document, tag: &str) -> anyhow::Result<T> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{tag}>: {:?}", e))?
        .dyn_into::<T>()
        .map_err(|_| anyhow::anyhow!("<{tag}> has unexpected type"))
}

fn append(parent: &web::Node, child: &web::Node) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Build the control panel: one range input per slider plus the effect
/// dropdown. Shape and count sliders commit on release ("change") since each
/// commit rebuilds the particle buffer; the rest follow the drag ("input").
pub fn build(
    document: &web::Document,
    sim: &Rc<SimulationContext<WebScene>>,
    visible: bool,
) -> anyhow::Result<()> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
    let panel: web::HtmlElement = create(document, "div")?;
    panel.set_id(PANEL_ID);
    let _ = panel.set_attribute("style", PANEL_STYLE);

    for spec in SLIDERS.iter() {
        append(&panel, &slider_row(document, sim, spec)?)?;
        if spec.control == Control::RadiusMult {
            append(&panel, &behavior_row(document, sim)?)?;
        }
    }
    append(&body, &panel)?;
    sync(document, &sim.params());
    overlay::set_visible(document, PANEL_ID, visible);
    Ok(())
}

fn slider_row(
    document: &web::Document,
    sim: &Rc<SimulationContext<WebScene>>,
    spec: &'static SliderSpec,
) -> anyhow::Result<web::HtmlElement> {
    let row: web::HtmlElement = create(document, "div")?;
    let label: web::HtmlElement = create(document, "span")?;
    label.set_inner_text(spec.label);
    let _ = label.set_attribute("style", "display:block;margin-top:6px;");

    let input: web::HtmlInputElement = create(document, "input")?;
    input.set_type("range");
    input.set_id(spec.control.element_id());
    input.set_min(&spec.min.to_string());
    input.set_max(&spec.max.to_string());
    input.set_step(&spec.step.to_string());
    let _ = input.set_attribute("style", "width:100%;");

    let control = spec.control;
    let event = if control.regenerates() { "change" } else { "input" };
    let sim = sim.clone();
    let input_for_read = input.clone();
    dom::listen(&input, event, move |_: web::Event| {
        let value = input_for_read.value_as_number();
        if sim.apply_logged(ControlChange::Slider(control, value)).is_some() {
            if let Some(document) = dom::window_document() {
                let params = sim.params();
                sync(&document, &params);
                overlay::update_hint(&document, &params);
            }
        }
    });

    append(&row, &label)?;
    append(&row, &input)?;
    Ok(row)
}

fn behavior_row(
    document: &web::Document,
    sim: &Rc<SimulationContext<WebScene>>,
) -> anyhow::Result<web::HtmlElement> {
    let row: web::HtmlElement = create(document, "div")?;
    let label: web::HtmlElement = create(document, "span")?;
    label.set_inner_text("Effect Type");
    let _ = label.set_attribute("style", "display:block;margin-top:6px;");

    let select: web::HtmlSelectElement = create(document, "select")?;
    select.set_id(BEHAVIOR_SELECT_ID);
    for mode in BehaviorMode::ALL {
        let option: web::HtmlElement = create(document, "option")?;
        let _ = option.set_attribute("value", &mode.wire_code().to_string());
        option.set_inner_text(mode.label());
        append(&select, &option)?;
    }

    let sim = sim.clone();
    let select_for_read = select.clone();
    dom::listen(&select, "change", move |_: web::Event| {
        match select_for_read.value().parse::<BehaviorMode>() {
            Ok(mode) => {
                sim.apply_logged(ControlChange::Behavior(mode));
                if let Some(document) = dom::window_document() {
                    overlay::update_hint(&document, &sim.params());
                }
            }
            Err(e) => log::warn!("[ui] {}", e),
        }
    });

    append(&row, &label)?;
    append(&row, &select)?;
    Ok(row)
}

/// Push parameter values back into the panel after keyboard or config changes.
pub fn sync(document: &web::Document, params: &SimulationParameters) {
    for spec in SLIDERS.iter() {
        if let Some(input) = document
            .get_element_by_id(spec.control.element_id())
            .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        {
            input.set_value_as_number(params.value(spec.control));
        }
    }
    if let Some(select) = document
        .get_element_by_id(BEHAVIOR_SELECT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlSelectElement>().ok())
    {
        select.set_value(&params.behavior.wire_code().to_string());
    }
}

#[inline]
pub fn toggle(document: &web::Document) {
    overlay::toggle(document, PANEL_ID);
}
