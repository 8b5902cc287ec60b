use crate::dom;
use glam::Vec2;
use glint_core::{Viewer, ViewerClock, DRAG_CLICK_SLOP_PX};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
struct PressState {
    down_at: Option<Vec2>,
    last: Vec2,
    dragging: bool,
}

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<Viewer>>,
    pub clock: Rc<ViewerClock>,
}

pub fn wire_input_handlers(w: InputWiring) {
    let press = Rc::new(RefCell::new(PressState::default()));
    wire_pointermove(&w, press.clone());
    wire_pointerdown(&w, press.clone());
    wire_pointerup(&w, press);
    wire_dblclick(&w);
    wire_wheel(&w);
    wire_resize(&w);
    wire_pagehide(&w);
}

fn wire_pointermove(w: &InputWiring, press: Rc<RefCell<PressState>>) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = dom::client_to_canvas_px(&w.canvas, ev.client_x() as f32, ev.client_y() as f32);
        let mut viewer = w.viewer.borrow_mut();
        viewer.on_pointer_move(pos.x, pos.y);

        let mut p = press.borrow_mut();
        let Some(down_at) = p.down_at else {
            return;
        };
        let slop = DRAG_CLICK_SLOP_PX * dom::device_pixel_ratio();
        if !p.dragging && pos.distance(down_at) > slop {
            p.dragging = true;
            log::debug!("[gesture] drag started");
        }
        if p.dragging {
            let delta = pos - p.last;
            viewer.on_pointer_drag(delta.x, delta.y);
        }
        p.last = pos;
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring, press: Rc<RefCell<PressState>>) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = dom::client_to_canvas_px(&w.canvas, ev.client_x() as f32, ev.client_y() as f32);
        *press.borrow_mut() = PressState {
            down_at: Some(pos),
            last: pos,
            dragging: false,
        };
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring, press: Rc<RefCell<PressState>>) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let p = std::mem::take(&mut *press.borrow_mut());
        if p.down_at.is_none() || p.dragging {
            return;
        }
        let pos = dom::client_to_canvas_px(&w.canvas, ev.client_x() as f32, ev.client_y() as f32);
        let mut viewer = w.viewer.borrow_mut();
        if ev.pointer_type() == "touch" {
            // touch has no native dblclick; pair taps ourselves
            if let Some(id) = viewer.on_tap(pos.x, pos.y, w.clock.elapsed()) {
                log::info!("[gesture] double tap locked on {}", id);
            }
        } else if let Some(id) = viewer.on_click(pos.x, pos.y) {
            log::debug!("[pick] clicked {}", id);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_dblclick(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let pos = dom::client_to_canvas_px(&w.canvas, ev.client_x() as f32, ev.client_y() as f32);
        let now = w.clock.elapsed();
        if let Some(id) = w.viewer.borrow_mut().on_double_click(pos.x, pos.y, now) {
            log::info!("[gesture] double click locked on {}", id);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        w.viewer.borrow_mut().on_wheel(ev.delta_y() as f32);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_resize(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (width, height) = dom::sync_canvas_backing_size(&w.canvas);
        w.viewer.borrow_mut().on_resize(width, height);
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pagehide(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move || {
        w.viewer.borrow_mut().stop();
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
