use crate::dom;
use crate::WebScene;
use app_core::SimulationContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub sim: Rc<SimulationContext<WebScene>>,
    pub canvas: web::HtmlCanvasElement,
    pub performance: web::Performance,
    pub last_size: (u32, u32),
}

impl FrameContext {
    pub fn frame(&mut self) {
        let size = (self.canvas.width(), self.canvas.height());
        if size != self.last_size {
            self.sim.resize(size.0, size.1);
            self.last_size = size;
        }
        let now = dom::now_seconds(&self.performance);
        let rendered = self
            .sim
            .tick(now, |scene, snapshot| scene.render(snapshot, size.0, size.1));
        if let Err(e) = rendered {
            log::error!("render error: {:?}", e);
        }
    }
}

fn request_frame(closure: &Closure<dyn FnMut()>) {
    if let Some(w) = web::window() {
        if let Err(e) = w.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("[frame] requestAnimationFrame failed: {:?}", e);
        }
    }
}

pub fn start_loop(frame_ctx: FrameContext) {
    let frame_ctx = Rc::new(RefCell::new(frame_ctx));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let Some(closure) = tick_clone.borrow().as_ref() {
            request_frame(closure);
        }
    }) as Box<dyn FnMut()>));
    if let Some(closure) = tick.borrow().as_ref() {
        request_frame(closure);
    }
}
