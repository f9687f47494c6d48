use crate::audio::WebAudio;
use crate::core::constants::FALLBACK_FRAME_MS;
use crate::core::{LoopMode, Scheduler, Starfield, Surface, UiIntent};
use crate::dom;
use crate::events::controls;
use crate::render::CanvasSurface;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Host scheduler: animation frames when available, else a ~60 Hz timer.
pub struct HostScheduler {
    mode: LoopMode,
}

impl HostScheduler {
    pub fn detect() -> Self {
        let has_raf = web::window()
            .map(|w| {
                js_sys::Reflect::has(&w, &JsValue::from_str("requestAnimationFrame"))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        let mode = if has_raf {
            LoopMode::AnimationFrame
        } else {
            log::warn!("[loop] requestAnimationFrame unavailable; using a fixed-rate timer");
            LoopMode::FixedRate {
                interval_ms: FALLBACK_FRAME_MS,
            }
        };
        Self { mode }
    }
}

impl Scheduler for HostScheduler {
    fn schedule_next(&self, tick: Box<dyn FnOnce()>) {
        let Some(w) = web::window() else {
            return;
        };
        let cb = Closure::once_into_js(move || tick());
        let res = match self.mode {
            LoopMode::AnimationFrame => w.request_animation_frame(cb.unchecked_ref()),
            LoopMode::FixedRate { interval_ms } => w
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.unchecked_ref(),
                    interval_ms,
                ),
        };
        if let Err(e) = res {
            log::error!("[loop] schedule error: {:?}", e);
        }
    }
}

pub struct FrameContext {
    pub sim: Rc<RefCell<Starfield>>,
    pub audio: Option<Rc<RefCell<WebAudio>>>,
    pub surface: CanvasSurface,
    // Set by the window resize listener, consumed on the next frame
    pub queued_resize: Rc<Cell<Option<(u32, u32)>>>,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        if let Some((w, h)) = self.queued_resize.take() {
            self.surface.resize(w, h);
            self.sim.borrow_mut().apply(UiIntent::Resize {
                width: w,
                height: h,
            });
        }

        let mut sim = self.sim.borrow_mut();
        match &self.audio {
            Some(audio) => {
                let mut audio = audio.borrow_mut();
                sim.tick(audio.spectrum());
            }
            None => {
                sim.tick(None);
            }
        }
        if sim.take_modes_changed() {
            // audio flipped trail/colour; keep the buttons honest
            if let Some(document) = dom::window_document() {
                controls::sync_toggle_buttons(&document, &sim);
            }
        }
        sim.draw(&mut self.surface);
        sim.update_color(dom::local_clock(), self.started.elapsed(), &mut self.surface);
    }
}

/// Keep the canvas backing store in step with the window.
pub fn wire_canvas_resize(
    canvas: &web::HtmlCanvasElement,
    queued_resize: Rc<Cell<Option<(u32, u32)>>>,
) {
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        let (w, h) = dom::sync_canvas_backing_size(&canvas_resize);
        queued_resize.set(Some((w, h)));
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
