use crate::core::config::{ReactiveTuning, VisualParams};
use crate::core::input::PointerState;
use crate::core::signal::AudioSignal;
use glam::Vec2;

/// Modes derived from one tick's smoothed audio signals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeDecision {
    /// Forced press at the origin, or `None` to release.
    pub synthetic_pointer: Option<PointerState>,
    pub trail_mode: bool,
    pub color_cycle: bool,
}

/// Maps smoothed audio signals onto rendering modes. Stateless apart from
/// its thresholds.
#[derive(Clone, Debug)]
pub struct ModeArbiter {
    pointer_margin: f32,
    trail_threshold: f32,
    color_threshold: f32,
}

impl ModeArbiter {
    pub fn new(tuning: &ReactiveTuning) -> Self {
        Self {
            pointer_margin: tuning.pointer_emulation_margin,
            trail_threshold: tuning.trail_intensity_threshold,
            color_threshold: tuning.color_mood_threshold,
        }
    }

    pub fn decide(&self, signal: &AudioSignal, origin: Vec2) -> ModeDecision {
        // no baseline yet: a warming-up average would pin every star to the origin
        let burst = signal.running_average > 0.0
            && signal.current_sum > signal.running_average * self.pointer_margin;
        ModeDecision {
            synthetic_pointer: burst.then(|| PointerState::pressed_at(origin)),
            trail_mode: signal.intensity > self.trail_threshold,
            color_cycle: signal.intensity_over_time.abs() > self.color_threshold,
        }
    }

    /// Write the audio-derived toggles; returns true if any flag changed.
    pub fn apply(&self, decision: &ModeDecision, params: &mut VisualParams) -> bool {
        let changed = params.trail_mode_enabled != decision.trail_mode
            || params.color_cycle_enabled != decision.color_cycle;
        params.trail_mode_enabled = decision.trail_mode;
        params.color_cycle_enabled = decision.color_cycle;
        changed
    }
}
