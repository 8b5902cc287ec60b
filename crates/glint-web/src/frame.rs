use crate::dom;
use crate::overlay::DomOverlay;
use crate::render::GpuState;
use glint_core::{Viewer, ViewerClock};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub viewer: Rc<RefCell<Viewer>>,
    pub overlay: Rc<RefCell<DomOverlay>>,
    pub clock: Rc<ViewerClock>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: GpuState<'a>,
}

impl<'a> FrameContext<'a> {
    /// Returns false once the viewer has stopped.
    pub fn frame(&mut self) -> bool {
        let now = self.clock.elapsed();
        let mut viewer = self.viewer.borrow_mut();
        let Some(report) = viewer.tick(now, &mut *self.overlay.borrow_mut()) else {
            return false;
        };
        if report.frame % 600 == 0 {
            log::debug!(
                "[viewer] frame {} hovered={:?} loading={:?}",
                report.frame,
                report.hovered.map(|h| h.id),
                report.loading
            );
        }

        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.gpu.resize_if_needed(w, h);
        let opacity = viewer.loading().overlay_opacity();
        match self.gpu.render(&viewer.scene, &viewer.camera, opacity) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[render] surface lost; resyncing canvas");
                let (w, h) = dom::sync_canvas_backing_size(&self.canvas);
                viewer.on_resize(w, h);
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
        true
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !frame_ctx.borrow_mut().frame() {
            log::info!("[viewer] render loop ended");
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
