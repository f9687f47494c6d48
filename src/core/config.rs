use crate::core::constants::*;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown {key} value: {value:?}")]
    UnknownValue { key: &'static str, value: String },
    #[error("invalid number for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// How the running average of the spectrum sum is maintained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SmoothingPolicy {
    /// Fixed-size window of per-window averages, with a population stddev.
    #[default]
    SlidingWindow,
    /// Sample-count weighted running mean.
    Exponential,
}

impl FromStr for SmoothingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "window" | "sliding" => Ok(Self::SlidingWindow),
            "exponential" | "ema" => Ok(Self::Exponential),
            other => Err(ConfigError::UnknownValue {
                key: "smoothing",
                value: other.to_string(),
            }),
        }
    }
}

/// Which audio-cue backend handles particle exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CueBackend {
    #[default]
    Tone,
    Note,
    Off,
}

impl FromStr for CueBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tone" => Ok(Self::Tone),
            "note" | "midi" => Ok(Self::Note),
            "off" | "none" => Ok(Self::Off),
            other => Err(ConfigError::UnknownValue {
                key: "cues",
                value: other.to_string(),
            }),
        }
    }
}

/// Shape drawn per star while trail mode is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrailStyle {
    #[default]
    Lines,
    Rects,
}

impl FromStr for TrailStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lines" => Ok(Self::Lines),
            "rects" => Ok(Self::Rects),
            other => Err(ConfigError::UnknownValue {
                key: "trail-style",
                value: other.to_string(),
            }),
        }
    }
}

/// Thresholds and divisors for the audio-reactive paths.
///
/// The visualizer drafts disagreed on several of these, so none is baked in.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactiveTuning {
    pub window_threshold_k: f32,
    pub exponential_threshold: f32,
    pub intensity_divisor: f32,
    pub pointer_emulation_margin: f32,
    pub trail_intensity_threshold: f32,
    pub color_mood_threshold: f32,
    pub pointer_audio_divisor: f32,
    pub pointer_fallback_multiplier: f32,
    pub accel_audio_divisor: f32,
    pub bin_threshold_factor: f32,
    pub bin_growth: f32,
    pub radius_cap: f32,
}

impl Default for ReactiveTuning {
    fn default() -> Self {
        Self {
            window_threshold_k: WINDOW_THRESHOLD_K,
            exponential_threshold: EXPONENTIAL_THRESHOLD,
            intensity_divisor: INTENSITY_DIVISOR,
            pointer_emulation_margin: POINTER_EMULATION_MARGIN,
            trail_intensity_threshold: TRAIL_INTENSITY_THRESHOLD,
            color_mood_threshold: COLOR_MOOD_THRESHOLD,
            pointer_audio_divisor: POINTER_AUDIO_DIVISOR,
            pointer_fallback_multiplier: POINTER_FALLBACK_MULTIPLIER,
            accel_audio_divisor: ACCEL_AUDIO_DIVISOR,
            bin_threshold_factor: BIN_THRESHOLD_FACTOR,
            bin_growth: BIN_GROWTH,
            radius_cap: RADIUS_CAP,
        }
    }
}

/// Construction-time configuration.
///
/// - `smoothing`: running-average policy of the signal smoother
/// - `cues`: audio-cue backend fired on particle exits
/// - `trail_style`: lines or rects while trail mode is on
/// - `bin_reactive`: grow stars whose spectrum bin spikes
/// - `initial_star_count` / `initial_speed_factor`: starting visual params
#[derive(Clone, Debug, PartialEq)]
pub struct StarfieldConfig {
    pub smoothing: SmoothingPolicy,
    pub cues: CueBackend,
    pub trail_style: TrailStyle,
    pub bin_reactive: bool,
    pub initial_star_count: usize,
    pub initial_speed_factor: f32,
    pub sample_length: usize,
    pub tuning: ReactiveTuning,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingPolicy::default(),
            cues: CueBackend::default(),
            trail_style: TrailStyle::default(),
            bin_reactive: true,
            initial_star_count: DEFAULT_STAR_COUNT,
            initial_speed_factor: DEFAULT_SPEED_FACTOR,
            sample_length: DEFAULT_SAMPLE_LENGTH,
            tuning: ReactiveTuning::default(),
        }
    }
}

impl StarfieldConfig {
    /// Build a config from optional string attributes (e.g. `data-*` on the
    /// canvas). Missing keys keep their defaults; the first bad value aborts.
    pub fn from_attributes<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = get("smoothing") {
            cfg.smoothing = v.trim().parse()?;
        }
        if let Some(v) = get("cues") {
            cfg.cues = v.trim().parse()?;
        }
        if let Some(v) = get("trail-style") {
            cfg.trail_style = v.trim().parse()?;
        }
        if let Some(v) = get("bin-reactive") {
            cfg.bin_reactive = match v.trim() {
                "true" | "1" | "on" => true,
                "false" | "0" | "off" => false,
                other => {
                    return Err(ConfigError::UnknownValue {
                        key: "bin-reactive",
                        value: other.to_string(),
                    })
                }
            };
        }
        if let Some(v) = get("stars") {
            let n: usize = v.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: "stars",
                value: v.clone(),
            })?;
            cfg.initial_star_count = n.max(MIN_STAR_COUNT);
        }
        if let Some(v) = get("speed") {
            let s: f32 = v.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: "speed",
                value: v.clone(),
            })?;
            if !(s.is_finite() && s > 0.0) {
                return Err(ConfigError::InvalidNumber {
                    key: "speed",
                    value: v,
                });
            }
            cfg.initial_speed_factor = s;
        }
        Ok(cfg)
    }
}

/// Global visual parameters, written by UI intents and the mode arbiter.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualParams {
    pub rotation_enabled: bool,
    pub star_count: usize,
    pub speed_factor: f32,
    pub audio_reactive_enabled: bool,
    pub color_cycle_enabled: bool,
    pub trail_mode_enabled: bool,
    pub cues_enabled: bool,
    pub sample_length: usize,
}

impl VisualParams {
    pub fn from_config(cfg: &StarfieldConfig) -> Self {
        Self {
            rotation_enabled: false,
            star_count: cfg.initial_star_count.max(MIN_STAR_COUNT),
            speed_factor: cfg.initial_speed_factor,
            audio_reactive_enabled: false,
            color_cycle_enabled: false,
            trail_mode_enabled: false,
            cues_enabled: false,
            sample_length: cfg.sample_length.max(1),
        }
    }
}

impl Default for VisualParams {
    fn default() -> Self {
        Self::from_config(&StarfieldConfig::default())
    }
}

/// One "increase" step for counts: floor(n * ratio), always at least n + 1
/// so small counts cannot get stuck (floor(1 * 1.61) == 1).
///
/// Not the inverse of `step_count_down` in general (64 -> 103 -> 64 happens
/// to round-trip, other values need not).
#[inline]
pub fn step_count_up(n: usize) -> usize {
    ((n as f32 * STEP_RATIO).floor() as usize).max(n + 1)
}

/// One "decrease" step for counts: ceil(n / ratio), at least `min`.
#[inline]
pub fn step_count_down(n: usize, min: usize) -> usize {
    ((n as f32 / STEP_RATIO).ceil() as usize).max(min)
}

#[inline]
pub fn step_speed_up(speed: f32) -> f32 {
    speed * STEP_RATIO
}

#[inline]
pub fn step_speed_down(speed: f32) -> f32 {
    speed / STEP_RATIO
}
