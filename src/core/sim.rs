use crate::core::arbiter::ModeArbiter;
use crate::core::color::{ClockTime, ColorCycle};
use crate::core::config::*;
use crate::core::constants::MIN_STAR_COUNT;
use crate::core::cue::{CueEmitter, SilentCue};
use crate::core::field::ParticleField;
use crate::core::input::{effective_pointer, PointerState};
use crate::core::intent::{StepAction, Toggle, UiIntent};
use crate::core::particle::{StepContext, Viewport};
use crate::core::signal::{AudioSignal, SignalSmoother};
use crate::core::surface::Surface;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Trail and colour flags as the user last set them. The arbiter overrides
/// the live params while audio drives them; these come back afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ManualModes {
    trail_mode: bool,
    color_cycle: bool,
}

/// The simulation context owned by the render loop.
///
/// All mutation goes through `apply` (UI intents) and `tick` (one frame), so
/// a single owner serializes every write to params and the population.
pub struct Starfield {
    config: StarfieldConfig,
    params: VisualParams,
    viewport: Viewport,
    pointer: PointerState,
    synthetic_pointer: Option<PointerState>,
    field: ParticleField,
    smoother: Option<SignalSmoother>,
    arbiter: ModeArbiter,
    color: ColorCycle,
    cues: Box<dyn CueEmitter>,
    rng: StdRng,
    manual: ManualModes,
    arbiter_active: bool,
    modes_changed: bool,
}

impl Starfield {
    /// Unseeded: every session looks different.
    pub fn new(config: StarfieldConfig, viewport: Viewport) -> Self {
        Self::with_rng(config, viewport, StdRng::from_entropy())
    }

    pub fn with_rng(config: StarfieldConfig, viewport: Viewport, rng: StdRng) -> Self {
        let params = VisualParams::from_config(&config);
        let arbiter = ModeArbiter::new(&config.tuning);
        let mut sim = Self {
            config,
            params,
            viewport,
            pointer: PointerState::default(),
            synthetic_pointer: None,
            field: ParticleField::new(),
            smoother: None,
            arbiter,
            color: ColorCycle::new(),
            cues: Box::new(SilentCue),
            rng,
            manual: ManualModes::default(),
            arbiter_active: false,
            modes_changed: false,
        };
        sim.rebuild_field();
        sim
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn params(&self) -> &VisualParams {
        &self.params
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn synthetic_pointer(&self) -> Option<PointerState> {
        self.synthetic_pointer
    }

    /// Smoothed signals, or `None` when no audio source is attached.
    pub fn signal(&self) -> Option<&AudioSignal> {
        self.smoother.as_ref().map(|s| s.signal())
    }

    pub fn has_audio(&self) -> bool {
        self.smoother.is_some()
    }

    /// Bind a smoother for a live audio source. Without this call every
    /// audio-derived path stays off.
    pub fn attach_audio(&mut self) {
        if self.smoother.is_none() {
            self.smoother = Some(SignalSmoother::new(
                self.config.smoothing,
                self.params.sample_length,
                &self.config.tuning,
            ));
            log::info!("[audio] smoother attached ({:?})", self.config.smoothing);
        }
    }

    pub fn set_cue_emitter(&mut self, cues: Box<dyn CueEmitter>) {
        self.cues = cues;
    }

    /// Apply a UI intent. Returns false for intents the host must handle
    /// (share, transport).
    pub fn apply(&mut self, intent: UiIntent) -> bool {
        match intent {
            UiIntent::Toggle(t) => {
                let on = !self.toggle_state(t);
                self.set_toggle(t, on);
            }
            UiIntent::Step(StepAction::MoreStars) => {
                self.set_star_count(step_count_up(self.params.star_count))
            }
            UiIntent::Step(StepAction::FewerStars) => {
                self.set_star_count(step_count_down(self.params.star_count, MIN_STAR_COUNT))
            }
            UiIntent::Step(StepAction::Faster) => {
                self.set_speed_factor(step_speed_up(self.params.speed_factor))
            }
            UiIntent::Step(StepAction::Slower) => {
                self.set_speed_factor(step_speed_down(self.params.speed_factor))
            }
            UiIntent::Step(StepAction::LongerSamples) => {
                self.set_sample_length(step_count_up(self.params.sample_length))
            }
            UiIntent::Step(StepAction::ShorterSamples) => {
                self.set_sample_length(step_count_down(self.params.sample_length, 1))
            }
            UiIntent::Pointer(p) => self.pointer = p,
            UiIntent::Resize { width, height } => self.resize_viewport(width, height),
            UiIntent::Step(StepAction::Share) | UiIntent::PlayPause | UiIntent::Stop => {
                return false
            }
        }
        true
    }

    pub fn toggle_state(&self, t: Toggle) -> bool {
        match t {
            Toggle::Rotation => self.params.rotation_enabled,
            Toggle::AudioReactive => self.params.audio_reactive_enabled,
            Toggle::ColorCycle => self.params.color_cycle_enabled,
            Toggle::TrailMode => self.params.trail_mode_enabled,
            Toggle::Cues => self.params.cues_enabled,
        }
    }

    pub fn set_toggle(&mut self, t: Toggle, on: bool) {
        match t {
            Toggle::Rotation => self.params.rotation_enabled = on,
            Toggle::AudioReactive => {
                self.params.audio_reactive_enabled = on;
                if on && self.smoother.is_none() {
                    log::warn!("[audio] audio-reactive mode enabled without an audio source");
                }
                if !on {
                    self.synthetic_pointer = None;
                    self.release_modes();
                }
            }
            Toggle::ColorCycle => {
                self.params.color_cycle_enabled = on;
                self.manual.color_cycle = on;
            }
            Toggle::TrailMode => {
                self.params.trail_mode_enabled = on;
                self.manual.trail_mode = on;
            }
            Toggle::Cues => self.params.cues_enabled = on,
        }
        log::info!("[controls] {:?} = {}", t, on);
    }

    /// Rebuild the population with `count` fresh stars (clamped to >= 1).
    pub fn set_star_count(&mut self, count: usize) {
        self.params.star_count = count.max(MIN_STAR_COUNT);
        self.rebuild_field();
        log::info!("[controls] star count = {}", self.params.star_count);
    }

    /// Affects stars spawned from now on and pointer steering.
    pub fn set_speed_factor(&mut self, speed: f32) {
        if speed.is_finite() && speed > 0.0 {
            self.params.speed_factor = speed;
            log::info!("[controls] speed factor = {:.4}", speed);
        }
    }

    pub fn set_sample_length(&mut self, n: usize) {
        self.params.sample_length = n.max(1);
        if let Some(s) = &mut self.smoother {
            s.set_sample_length(self.params.sample_length);
        }
        log::info!("[controls] sample length = {}", self.params.sample_length);
    }

    /// New viewport; the origin moves with it, existing stars keep flying.
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width as f32, height as f32);
    }

    /// Advance one frame. `spectrum` is `None` while the audio source is
    /// absent or not ready. Returns how many stars were respawned.
    pub fn tick(&mut self, spectrum: Option<&[u8]>) -> usize {
        let mut reactive_signal = None;
        match (&mut self.smoother, spectrum) {
            (Some(smoother), Some(snapshot)) if self.params.audio_reactive_enabled => {
                let signal = smoother.update(snapshot).clone();
                let decision = self.arbiter.decide(&signal, self.viewport.origin());
                self.synthetic_pointer = decision.synthetic_pointer;
                self.arbiter_active = true;
                if self.arbiter.apply(&decision, &mut self.params) {
                    self.modes_changed = true;
                    log::debug!(
                        "[arbiter] trail={} color={}",
                        decision.trail_mode,
                        decision.color_cycle
                    );
                }
                reactive_signal = Some(signal);
            }
            _ => self.synthetic_pointer = None,
        }
        if reactive_signal.is_none() {
            self.release_modes();
        }

        let pointer = effective_pointer(self.pointer, self.synthetic_pointer);
        let ctx = StepContext::new(
            pointer,
            self.params.speed_factor,
            reactive_signal.as_ref().map(|s| s.intensity_over_time),
            &self.config.tuning,
        );
        let replaced = self.field.update(
            &ctx,
            &self.params,
            &self.viewport,
            self.cues.as_mut(),
            &mut self.rng,
        );

        if let (Some(signal), Some(smoother)) = (&reactive_signal, &self.smoother) {
            if self.config.bin_reactive {
                let tuning = &self.config.tuning;
                self.field.react_to_spectrum(
                    smoother.spectrum(),
                    signal.running_average,
                    tuning.bin_threshold_factor,
                    tuning.bin_growth,
                    tuning.radius_cap,
                );
            }
        }
        replaced
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.field.draw(
            surface,
            self.params.trail_mode_enabled,
            self.config.trail_style,
        );
    }

    /// Background color modulation; the host calls this every frame.
    pub fn update_color(&mut self, clock: ClockTime, now: Duration, surface: &mut dyn Surface) {
        self.color.update(
            self.params.color_cycle_enabled,
            self.params.trail_mode_enabled,
            clock,
            now,
            &self.viewport,
            surface,
        );
    }

    /// True once after the arbiter (or its release) changed the trail or
    /// colour flags, so the host can refresh its toggle buttons.
    pub fn take_modes_changed(&mut self) -> bool {
        std::mem::take(&mut self.modes_changed)
    }

    // Hand trail and colour back to the user's own settings.
    fn release_modes(&mut self) {
        if !self.arbiter_active {
            return;
        }
        self.arbiter_active = false;
        let changed = self.params.trail_mode_enabled != self.manual.trail_mode
            || self.params.color_cycle_enabled != self.manual.color_cycle;
        self.params.trail_mode_enabled = self.manual.trail_mode;
        self.params.color_cycle_enabled = self.manual.color_cycle;
        if changed {
            self.modes_changed = true;
            log::debug!("[arbiter] released; manual modes restored");
        }
    }

    fn rebuild_field(&mut self) {
        self.field.resize(
            self.params.star_count,
            &self.params,
            &self.viewport,
            &mut self.rng,
        );
    }
}
