use crate::core::ClockTime;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    target: &web::EventTarget,
    mut handler: impl FnMut() + 'static,
) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
pub fn add_click_listener_by_id(
    document: &web::Document,
    element_id: &str,
    handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        add_click_listener(&el, handler);
    }
}

/// Match the canvas backing store to its CSS box; returns the new pixel size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = ((rect.width() * dpr) as u32).max(1);
        let h_px = ((rect.height() * dpr) as u32).max(1);
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
    (canvas.width(), canvas.height())
}

/// Current location fragment including the leading `#`, if any.
pub fn location_hash() -> Option<String> {
    let hash = web::window()?.location().hash().ok()?;
    (!hash.is_empty()).then_some(hash)
}

pub fn set_location_hash(fragment: &str) {
    if let Some(w) = web::window() {
        if let Err(e) = w.location().set_hash(fragment) {
            log::warn!("[share] could not set location hash: {:?}", e);
        }
    }
}

/// Read a `data-<key>` attribute from an element.
pub fn data_attribute(el: &web::Element, key: &str) -> Option<String> {
    el.get_attribute(&format!("data-{}", key))
}

pub fn input_value(document: &web::Document, element_id: &str) -> Option<String> {
    let input = document
        .get_element_by_id(element_id)?
        .dyn_into::<web::HtmlInputElement>()
        .ok()?;
    let v = input.value();
    let v = v.trim();
    (!v.is_empty()).then(|| v.to_string())
}

pub fn set_input_value(document: &web::Document, element_id: &str, value: &str) {
    if let Some(input) = document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        input.set_value(value);
    }
}

/// Local wall-clock time from the JS `Date`.
pub fn local_clock() -> ClockTime {
    let now = js_sys::Date::new_0();
    ClockTime {
        hours: now.get_hours(),
        minutes: now.get_minutes(),
        seconds: now.get_seconds(),
    }
}
