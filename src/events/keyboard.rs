use super::{dispatch, AppHandles};
use crate::core::{intent_for_key, UiIntent};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &AppHandles) {
    // leave typing in the url box alone
    if let Some(target) = ev.target() {
        if target.dyn_ref::<web::HtmlInputElement>().is_some() {
            return;
        }
    }
    let Some(intent) = intent_for_key(&ev.key()) else {
        return;
    };
    if matches!(intent, UiIntent::Step(_) | UiIntent::PlayPause) {
        ev.prevent_default();
    }
    log::debug!("[keys] {:?}", intent);
    dispatch(app, intent);
}

pub fn wire_global_keydown(app: AppHandles) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
