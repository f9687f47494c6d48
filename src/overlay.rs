use crate::core::VisualParams;
use wasm_bindgen::JsCast;
use web_sys as web;

const PANEL_ID: &str = "starcontrol";
const HINT_ID: &str = "hint-overlay";

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(PANEL_ID) {
        _ = el.class_list().remove_1("faded");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(PANEL_ID) {
        _ = el.class_list().add_1("faded");
    }
}

/// Fade the control panel out after load and back in while hovered.
pub fn wire_control_panel(document: &web::Document) {
    let Some(panel) = document.get_element_by_id(PANEL_ID) else {
        return;
    };
    hide(document);

    let doc_enter = document.clone();
    let enter = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        show(&doc_enter);
    }) as Box<dyn FnMut()>);
    _ = panel.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref());
    enter.forget();

    let doc_leave = document.clone();
    let leave = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        hide(&doc_leave);
    }) as Box<dyn FnMut()>);
    _ = panel.add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref());
    leave.forget();
}

/// First touch: keep the panel visible and switch it to touch-sized buttons.
pub fn reveal_touch_controls(document: &web::Document) {
    show(document);
    if let Some(el) = document.get_element_by_id(PANEL_ID) {
        _ = el.class_list().add_1("touch");
    }
}

#[inline]
pub fn set_toggle_active(el: &web::Element, active: bool) {
    _ = el.class_list().toggle_with_force("control-active", active);
}

/// Update the status line with the current parameters.
pub fn update_hint(document: &web::Document, params: &VisualParams) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        el.set_text_content(Some(&format!(
            "Stars: {} • Speed: {:.3} • Samples: {}",
            params.star_count, params.speed_factor, params.sample_length
        )));
    }
}
