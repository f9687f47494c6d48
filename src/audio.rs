use crate::core::constants::ANALYSER_FFT_SIZE;
use crate::core::{midi_to_hz, plan_note, plan_tone, CueEmitter, ExitCue};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Peak gain for a full-velocity note
const NOTE_PEAK_GAIN: f32 = 0.3;

/// Streamed `<audio>` element routed through an analyser.
///
/// The media source node is created on the first `loadeddata`; until then
/// (or after a load error) the source reports not-ready and yields no
/// spectrum.
pub struct WebAudio {
    ctx: web::AudioContext,
    element: web::HtmlAudioElement,
    analyser: web::AnalyserNode,
    source: Rc<RefCell<Option<web::MediaElementAudioSourceNode>>>,
    ready: Rc<Cell<bool>>,
    buf: Vec<u8>,
    url: Option<String>,
}

impl WebAudio {
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let analyser = ctx
            .create_analyser()
            .map_err(|e| anyhow::anyhow!("AnalyserNode error: {:?}", e))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        let bins = analyser.frequency_bin_count() as usize;
        let element =
            web::HtmlAudioElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        element.set_cross_origin(Some("anonymous"));

        let audio = Self {
            ctx,
            element,
            analyser,
            source: Rc::new(RefCell::new(None)),
            ready: Rc::new(Cell::new(false)),
            buf: vec![0; bins],
            url: None,
        };
        audio.wire_media_events();
        Ok(audio)
    }

    fn wire_media_events(&self) {
        let ctx = self.ctx.clone();
        let element = self.element.clone();
        let analyser = self.analyser.clone();
        let source = self.source.clone();
        let ready = self.ready.clone();
        let on_loaded = Closure::wrap(Box::new(move || {
            if source.borrow().is_none() {
                match ctx.create_media_element_source(&element) {
                    Ok(node) => {
                        _ = node.connect_with_audio_node(&analyser);
                        _ = analyser.connect_with_audio_node(&ctx.destination());
                        *source.borrow_mut() = Some(node);
                    }
                    Err(e) => {
                        log::warn!("[audio] media source error: {:?}", e);
                        return;
                    }
                }
            }
            _ = ctx.resume();
            _ = element.play();
            ready.set(true);
            log::info!("[audio] source ready");
        }) as Box<dyn FnMut()>);
        _ = self
            .element
            .add_event_listener_with_callback("loadeddata", on_loaded.as_ref().unchecked_ref());
        on_loaded.forget();

        let ready = self.ready.clone();
        let on_error = Closure::wrap(Box::new(move || {
            ready.set(false);
            log::warn!("[audio] source failed to load; continuing without audio");
        }) as Box<dyn FnMut()>);
        _ = self
            .element
            .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
        on_error.forget();
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    pub fn load(&mut self, url: &str) {
        self.ready.set(false);
        self.element.set_src(url);
        self.element.load();
        self.url = Some(url.to_string());
        log::info!("[audio] loading {}", url);
    }

    pub fn play(&self) {
        _ = self.ctx.resume();
        _ = self.element.play();
    }

    pub fn pause(&self) {
        _ = self.element.pause();
    }

    pub fn is_paused(&self) -> bool {
        self.element.paused()
    }

    /// Current byte magnitudes, or `None` while not ready.
    pub fn spectrum(&mut self) -> Option<&[u8]> {
        if !self.is_ready() {
            return None;
        }
        self.analyser.get_byte_frequency_data(&mut self.buf);
        Some(&self.buf)
    }
}

// Short panned sine with a linear attack/release envelope
fn play_tone(
    ctx: &web::AudioContext,
    frequency_hz: f32,
    peak: f32,
    pan: f32,
    delay_sec: f64,
    duration_sec: f64,
) {
    let Ok(src) = web::OscillatorNode::new(ctx) else {
        return;
    };
    src.set_type(web::OscillatorType::Sine);
    src.frequency().set_value(frequency_hz);
    let Ok(gain) = web::GainNode::new(ctx) else {
        return;
    };
    let Ok(panner) = web::StereoPannerNode::new(ctx) else {
        return;
    };
    panner.pan().set_value(pan);
    gain.gain().set_value(0.0);
    let t0 = ctx.current_time() + 0.005 + delay_sec;
    _ = gain.gain().linear_ramp_to_value_at_time(peak, t0 + 0.01);
    _ = gain.gain().linear_ramp_to_value_at_time(0.0, t0 + duration_sec);
    _ = src.connect_with_audio_node(&gain);
    _ = gain.connect_with_audio_node(&panner);
    _ = panner.connect_with_audio_node(&ctx.destination());
    _ = src.start_with_when(t0);
    _ = src.stop_with_when(t0 + duration_sec + 0.02);
}

/// Synthesized stereo blip per exit.
pub struct ToneCueEmitter {
    ctx: web::AudioContext,
}

impl ToneCueEmitter {
    pub fn new(ctx: web::AudioContext) -> Self {
        Self { ctx }
    }
}

impl CueEmitter for ToneCueEmitter {
    fn trigger_cue(&mut self, cue: &ExitCue) {
        let plan = plan_tone(cue);
        play_tone(
            &self.ctx,
            plan.frequency_hz,
            plan.amplitude,
            plan.pan,
            0.0,
            plan.duration_sec as f64,
        );
    }
}

/// Note-on/note-off pairs rendered as oscillator envelopes, one per note,
/// panned hard to the channel's side.
pub struct NoteCueEmitter {
    ctx: web::AudioContext,
}

impl NoteCueEmitter {
    pub fn new(ctx: web::AudioContext) -> Self {
        Self { ctx }
    }
}

impl CueEmitter for NoteCueEmitter {
    fn trigger_cue(&mut self, cue: &ExitCue) {
        let plan = plan_note(cue);
        let pan = if plan.channel == 0 { -1.0 } else { 1.0 };
        let peak = NOTE_PEAK_GAIN * plan.velocity as f32 / 127.0 / plan.notes.len().max(1) as f32;
        for &note in &plan.notes {
            play_tone(
                &self.ctx,
                midi_to_hz(note as f32),
                peak,
                pan,
                plan.delay_sec as f64,
                plan.duration_sec as f64,
            );
        }
    }
}
