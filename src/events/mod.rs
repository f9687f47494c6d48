use crate::audio::WebAudio;
use crate::core::{format_fragment, StepAction, Starfield, StopHandle, Toggle, UiIntent};
use crate::{dom, overlay};
use std::cell::RefCell;
use std::rc::Rc;

pub mod controls;
pub mod keyboard;
pub mod pointer;

pub const AUDIO_URL_INPUT_ID: &str = "audio-url";

/// Handles shared by every event callback and the frame loop.
#[derive(Clone)]
pub struct AppHandles {
    pub sim: Rc<RefCell<Starfield>>,
    pub audio: Option<Rc<RefCell<WebAudio>>>,
    pub stop: StopHandle,
}

/// Route an intent to the simulation, or handle it here when it needs the
/// host (share link, audio transport, loop stop).
pub fn dispatch(app: &AppHandles, intent: UiIntent) {
    let handled = app.sim.borrow_mut().apply(intent);
    if !handled {
        match intent {
            UiIntent::Step(StepAction::Share) => share(app),
            UiIntent::PlayPause => toggle_playback(app),
            UiIntent::Stop => {
                app.stop.stop();
                log::info!("[loop] stop requested");
            }
            _ => {}
        }
    }
    if matches!(intent, UiIntent::Pointer(_) | UiIntent::Resize { .. }) {
        return;
    }
    if let Some(document) = dom::window_document() {
        let sim = app.sim.borrow();
        overlay::update_hint(&document, sim.params());
        controls::sync_toggle_buttons(&document, &sim);
    }
}

/// Point the audio source at `url` and switch audio-reactive mode on.
pub fn load_audio(app: &AppHandles, url: &str) {
    let Some(audio) = &app.audio else {
        log::warn!("[audio] Web Audio API not supported; ignoring {}", url);
        return;
    };
    audio.borrow_mut().load(url);
    let mut sim = app.sim.borrow_mut();
    sim.attach_audio();
    sim.set_toggle(Toggle::AudioReactive, true);
}

fn share(app: &AppHandles) {
    let url = app
        .audio
        .as_ref()
        .and_then(|a| a.borrow().url().map(str::to_string));
    match url {
        Some(url) => {
            dom::set_location_hash(&format_fragment(&url));
            log::info!("[share] link updated for {}", url);
        }
        None => log::info!("[share] nothing to share; no audio loaded"),
    }
}

fn toggle_playback(app: &AppHandles) {
    if let Some(audio) = &app.audio {
        let audio = audio.borrow();
        if audio.is_paused() {
            audio.play();
        } else {
            audio.pause();
        }
    }
}
