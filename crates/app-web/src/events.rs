//! Scene input wiring. Unlike the page-lifetime button listeners, these
//! closures are retained so `unwire` can actually remove them — stale
//! listeners mutating a torn-down scene are the bug class this module
//! exists to prevent.

use crate::dom;
use app_core::SceneSession;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
struct DragState {
    active: bool,
    last_x: f32,
    last_y: f32,
}

pub struct SceneListeners {
    canvas: web::HtmlCanvasElement,
    click: Option<Closure<dyn FnMut(web::MouseEvent)>>,
    pointer_down: Option<Closure<dyn FnMut(web::PointerEvent)>>,
    pointer_move: Option<Closure<dyn FnMut(web::PointerEvent)>>,
    pointer_up: Option<Closure<dyn FnMut(web::PointerEvent)>>,
    wheel: Option<Closure<dyn FnMut(web::WheelEvent)>>,
    resize: Option<Closure<dyn FnMut()>>,
}

impl SceneListeners {
    pub fn wire(
        canvas: &web::HtmlCanvasElement,
        session: Rc<RefCell<SceneSession>>,
    ) -> Self {
        let drag = Rc::new(RefCell::new(DragState::default()));

        let click = {
            let session = session.clone();
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |ev: web::MouseEvent| {
                let Some(ndc) = click_ndc(&ev, &canvas) else {
                    return;
                };
                session.borrow_mut().handle_click(ndc);
            }) as Box<dyn FnMut(_)>)
        };
        let _ = canvas
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref());

        let pointer_down = {
            let drag = drag.clone();
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |ev: web::PointerEvent| {
                let mut d = drag.borrow_mut();
                d.active = true;
                d.last_x = ev.client_x() as f32;
                d.last_y = ev.client_y() as f32;
                let _ = canvas.set_pointer_capture(ev.pointer_id());
            }) as Box<dyn FnMut(_)>)
        };
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", pointer_down.as_ref().unchecked_ref());

        let pointer_move = {
            let drag = drag.clone();
            let session = session.clone();
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |ev: web::PointerEvent| {
                let mut d = drag.borrow_mut();
                if !d.active {
                    return;
                }
                let rect = canvas.get_bounding_client_rect();
                let (w, h) = (rect.width() as f32, rect.height() as f32);
                if w <= 0.0 || h <= 0.0 {
                    return;
                }
                let x = ev.client_x() as f32;
                let y = ev.client_y() as f32;
                let dx = (x - d.last_x) / w;
                let dy = (y - d.last_y) / h;
                d.last_x = x;
                d.last_y = y;
                session.borrow_mut().pointer_drag(dx, dy);
            }) as Box<dyn FnMut(_)>)
        };
        let _ = canvas
            .add_event_listener_with_callback("pointermove", pointer_move.as_ref().unchecked_ref());

        let pointer_up = {
            let drag = drag.clone();
            Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
                drag.borrow_mut().active = false;
            }) as Box<dyn FnMut(_)>)
        };
        let _ = canvas
            .add_event_listener_with_callback("pointerup", pointer_up.as_ref().unchecked_ref());

        let wheel = {
            let session = session.clone();
            Closure::wrap(Box::new(move |ev: web::WheelEvent| {
                session.borrow_mut().zoom(ev.delta_y() as f32 * 0.01);
                ev.prevent_default();
            }) as Box<dyn FnMut(_)>)
        };
        let _ = canvas.add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref());

        let resize = {
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move || {
                dom::sync_canvas_backing_size(&canvas);
            }) as Box<dyn FnMut()>)
        };
        if let Some(window) = web::window() {
            let _ = window
                .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
        }

        Self {
            canvas: canvas.clone(),
            click: Some(click),
            pointer_down: Some(pointer_down),
            pointer_move: Some(pointer_move),
            pointer_up: Some(pointer_up),
            wheel: Some(wheel),
            resize: Some(resize),
        }
    }

    /// Remove every listener and drop the closures. Idempotent; a second
    /// call finds nothing left to remove.
    pub fn unwire(&mut self) {
        if let Some(c) = self.click.take() {
            let _ = self
                .canvas
                .remove_event_listener_with_callback("click", c.as_ref().unchecked_ref());
        }
        if let Some(c) = self.pointer_down.take() {
            let _ = self
                .canvas
                .remove_event_listener_with_callback("pointerdown", c.as_ref().unchecked_ref());
        }
        if let Some(c) = self.pointer_move.take() {
            let _ = self
                .canvas
                .remove_event_listener_with_callback("pointermove", c.as_ref().unchecked_ref());
        }
        if let Some(c) = self.pointer_up.take() {
            let _ = self
                .canvas
                .remove_event_listener_with_callback("pointerup", c.as_ref().unchecked_ref());
        }
        if let Some(c) = self.wheel.take() {
            let _ = self
                .canvas
                .remove_event_listener_with_callback("wheel", c.as_ref().unchecked_ref());
        }
        if let Some(c) = self.resize.take() {
            if let Some(window) = web::window() {
                let _ = window
                    .remove_event_listener_with_callback("resize", c.as_ref().unchecked_ref());
            }
        }
    }
}

/// Canvas-relative normalized device coordinates for a click, or `None`
/// when the canvas has no layout box yet.
fn click_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    let (w, h) = (rect.width(), rect.height());
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let x = (ev.client_x() as f64 - rect.left()) / w * 2.0 - 1.0;
    let y = -((ev.client_y() as f64 - rect.top()) / h) * 2.0 + 1.0;
    Some(Vec2::new(x as f32, y as f32))
}
