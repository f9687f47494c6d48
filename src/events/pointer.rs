use super::{dispatch, AppHandles};
use crate::core::{PointerState, UiIntent};
use crate::overlay;
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    Vec2::new(
        x_css / w * canvas.width() as f32,
        y_css / h * canvas.height() as f32,
    )
}

/// Mouse, touch and pen all arrive as pointer events; the position is kept
/// current while the button is up so a press starts where the cursor is.
pub fn wire_input_handlers(canvas: &web::HtmlCanvasElement, app: &AppHandles) {
    // stop touch drags from scrolling the page
    _ = canvas.style().set_property("touch-action", "none");
    wire_pointermove(canvas, app);
    wire_pointerdown(canvas, app);
    wire_pointerup(app, "pointerup");
    wire_pointerup(app, "pointercancel");
}

fn wire_pointermove(canvas: &web::HtmlCanvasElement, app: &AppHandles) {
    let app = app.clone();
    let canvas = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = pointer_canvas_px(&ev, &canvas);
        let down = app.sim.borrow().pointer().down;
        dispatch(
            &app,
            UiIntent::Pointer(PointerState {
                x: pos.x,
                y: pos.y,
                down,
            }),
        );
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, app: &AppHandles) {
    let app = app.clone();
    let canvas_for_listener = canvas.clone();
    let canvas = canvas.clone();
    let seen_touch = Rc::new(Cell::new(false));
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.pointer_type() == "touch" && !seen_touch.replace(true) {
            if let Some(document) = canvas.owner_document() {
                overlay::reveal_touch_controls(&document);
            }
            log::info!("[pointer] touch input detected");
        }
        let pos = pointer_canvas_px(&ev, &canvas);
        dispatch(&app, UiIntent::Pointer(PointerState::pressed_at(pos)));
        _ = canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(app: &AppHandles, event: &str) {
    let app = app.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        let mut p = app.sim.borrow().pointer();
        p.down = false;
        dispatch(&app, UiIntent::Pointer(p));
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
