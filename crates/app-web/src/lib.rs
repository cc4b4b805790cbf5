#![cfg(target_arch = "wasm32")]
mod dom;
mod events;
mod frame;
mod overlay;
mod ui;

use app_core::render::RenderScene;
use app_core::{SimulationContext, StartupConfig};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub(crate) type WebScene = RenderScene<'static>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let performance = window
        .performance()
        .ok_or_else(|| anyhow::anyhow!("no performance timer"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::wire_canvas_resize(&canvas);

    let config = StartupConfig::from_query(&dom::location_search()).unwrap_or_else(|e| {
        log::warn!("[config] {e}; using defaults");
        StartupConfig::default()
    });

    let instance = wgpu::Instance::default();
    let scene = app_core::render::connect(
        &instance,
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        canvas.width(),
        canvas.height(),
    )
    .await;
    let sim = Rc::new(SimulationContext::new(
        &config,
        scene,
        dom::now_seconds(&performance),
    )?);
    let size = (canvas.width(), canvas.height());
    sim.resize(size.0, size.1);

    ui::build(&document, &sim, config.show_panel)?;
    overlay::ensure_hint(&document);
    overlay::update_hint(&document, &sim.params());
    events::wire_keydown(sim.clone());

    frame::start_loop(frame::FrameContext {
        sim,
        canvas,
        performance,
        last_size: size,
    });
    Ok(())
}
