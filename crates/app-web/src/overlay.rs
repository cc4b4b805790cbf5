use app_core::SimulationParameters;
use wasm_bindgen::JsCast;
use web_sys as web;

const HINT_ID: &str = "hint-overlay";

/// Create the hint element if the page does not provide one.
pub fn ensure_hint(document: &web::Document) {
    if document.get_element_by_id(HINT_ID).is_some() {
        return;
    }
    let Ok(el) = document.create_element("div") else {
        return;
    };
    el.set_id(HINT_ID);
    let _ = el.set_attribute(
        "style",
        "position:fixed;left:12px;bottom:12px;pointer-events:none;",
    );
    if let Some(body) = document.body() {
        let _ = body.append_child(&el);
    }
}

/// Update the hint overlay with the current effect, count and speed.
pub fn update_hint(document: &web::Document, params: &SimulationParameters) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        let hint_html = format!(
            "<div style='color: #cfe7ff; font: 13px system-ui; background: rgba(10, 14, 24, 0.8); padding: 8px 12px; border-radius: 6px; border: 1px solid rgba(80, 110, 150, 0.35);'>{} • {} particles • speed {:.2}</div>",
            params.behavior,
            params.particle_count.get(),
            params.speed
        );
        el.set_inner_html(&hint_html);
    }
}

#[inline]
pub fn set_visible(document: &web::Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
            let _ = html
                .style()
                .set_property("display", if visible { "" } else { "none" });
        }
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, id: &str) -> bool {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        .and_then(|html| html.style().get_property_value("display").ok())
        .map(|d| d == "none")
        .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document, id: &str) {
    set_visible(document, id, is_hidden(document, id));
}
