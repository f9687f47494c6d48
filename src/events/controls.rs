use super::{dispatch, load_audio, AppHandles, AUDIO_URL_INPUT_ID};
use crate::core::{Starfield, UiIntent};
use crate::{dom, overlay};
use wasm_bindgen::JsCast;
use web_sys as web;

const CONTROL_SELECTOR: &str = ".control-toggle, .control-button";

fn control_elements(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

/// Wire every `.control-toggle` / `.control-button` by its `value` attribute,
/// plus the audio url loader.
pub fn wire_controls(document: &web::Document, app: &AppHandles) {
    for el in control_elements(document, CONTROL_SELECTOR) {
        let Some(value) = el.get_attribute("value") else {
            continue;
        };
        let intent = match value.parse::<UiIntent>() {
            Ok(i) => i,
            Err(e) => {
                log::warn!("[controls] {}", e);
                continue;
            }
        };
        let app = app.clone();
        dom::add_click_listener(&el, move || dispatch(&app, intent));
    }

    let app_load = app.clone();
    let doc_load = document.clone();
    dom::add_click_listener_by_id(document, "audio-load", move || {
        match dom::input_value(&doc_load, AUDIO_URL_INPUT_ID) {
            Some(url) => {
                load_audio(&app_load, &url);
                sync_toggle_buttons(&doc_load, &app_load.sim.borrow());
            }
            None => log::info!("[audio] no url entered"),
        }
    });
}

/// Reflect the current toggle flags on their buttons.
pub fn sync_toggle_buttons(document: &web::Document, sim: &Starfield) {
    for el in control_elements(document, ".control-toggle") {
        if let Some(Ok(UiIntent::Toggle(t))) = el.get_attribute("value").map(|v| v.parse::<UiIntent>()) {
            overlay::set_toggle_active(&el, sim.toggle_state(t));
        }
    }
}
