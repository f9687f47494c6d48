// The simulation core is platform-free; everything else is the wasm front-end.
pub mod core;

#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod overlay;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use web_entry::start;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use crate::audio::{NoteCueEmitter, ToneCueEmitter, WebAudio};
    use crate::core::{
        parse_fragment, start_loop, CueBackend, CueEmitter, SilentCue, Starfield,
        StarfieldConfig, StopHandle, Viewport,
    };
    use crate::events::{self, AppHandles};
    use crate::frame::{self, FrameContext, HostScheduler};
    use crate::render::CanvasSurface;
    use crate::{dom, overlay};
    use instant::Instant;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys as web;

    const CANVAS_ID: &str = "starfield";
    const CONFIG_KEYS: [&str; 6] = ["smoothing", "cues", "trail-style", "bin-reactive", "stars", "speed"];

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("starfield starting");

        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
        Ok(())
    }

    fn read_config(canvas: &web::HtmlCanvasElement) -> StarfieldConfig {
        let attrs: Vec<(&str, String)> = CONFIG_KEYS
            .iter()
            .filter_map(|&k| dom::data_attribute(canvas, k).map(|v| (k, v)))
            .collect();
        let lookup = |key: &str| {
            attrs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
        };
        match StarfieldConfig::from_attributes(lookup) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("[config] {}; using defaults", e);
                StarfieldConfig::default()
            }
        }
    }

    fn build_cue_emitter(backend: CueBackend, audio: Option<&WebAudio>) -> Box<dyn CueEmitter> {
        match (backend, audio) {
            (CueBackend::Tone, Some(a)) => Box::new(ToneCueEmitter::new(a.context().clone())),
            (CueBackend::Note, Some(a)) => Box::new(NoteCueEmitter::new(a.context().clone())),
            _ => Box::new(SilentCue),
        }
    }

    async fn init() -> anyhow::Result<()> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

        let config = read_config(&canvas);
        log::info!(
            "[config] smoothing={:?} cues={:?} trail={:?} bin_reactive={}",
            config.smoothing,
            config.cues,
            config.trail_style,
            config.bin_reactive
        );

        let (w, h) = dom::sync_canvas_backing_size(&canvas);
        let mut sim = Starfield::new(config, Viewport::new(w as f32, h as f32));

        let audio = match WebAudio::new() {
            Ok(a) => Some(a),
            Err(e) => {
                log::warn!(
                    "[audio] Web Audio API not supported ({}); running without audio",
                    e
                );
                None
            }
        };
        sim.set_cue_emitter(build_cue_emitter(sim.config().cues, audio.as_ref()));

        let app = AppHandles {
            sim: Rc::new(RefCell::new(sim)),
            audio: audio.map(|a| Rc::new(RefCell::new(a))),
            stop: StopHandle::new(),
        };

        // A shared link pre-loads its audio and turns reactivity on
        if let Some(hash) = dom::location_hash() {
            match parse_fragment(&hash) {
                Ok(url) => {
                    dom::set_input_value(&document, events::AUDIO_URL_INPUT_ID, &url);
                    events::load_audio(&app, &url);
                }
                Err(e) => log::info!("[share] ignoring fragment: {}", e),
            }
        }

        events::controls::wire_controls(&document, &app);
        events::controls::sync_toggle_buttons(&document, &app.sim.borrow());
        events::pointer::wire_input_handlers(&canvas, &app);
        events::keyboard::wire_global_keydown(app.clone());
        overlay::wire_control_panel(&document);
        overlay::update_hint(&document, app.sim.borrow().params());

        let queued_resize = Rc::new(Cell::new(None));
        frame::wire_canvas_resize(&canvas, queued_resize.clone());

        let mut frame_ctx = FrameContext {
            sim: app.sim.clone(),
            audio: app.audio.clone(),
            surface: CanvasSurface::new(&canvas)?,
            queued_resize,
            started: Instant::now(),
        };
        start_loop(
            Rc::new(HostScheduler::detect()),
            app.stop.clone(),
            move || frame_ctx.frame(),
        );
        Ok(())
    }
}
