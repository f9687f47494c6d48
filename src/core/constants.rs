/// Simulation and reactive-control tuning constants.
///
/// These are the defaults behind `StarfieldConfig` and `ReactiveTuning`; the
/// front-end may override some of them at construction time.
// Population and speed
pub const DEFAULT_STAR_COUNT: usize = 25;
pub const DEFAULT_SPEED_FACTOR: f32 = 0.1;
pub const STEP_RATIO: f32 = 1.61; // golden-ratio-like growth per UI step
pub const MIN_STAR_COUNT: usize = 1;

// Particle spawn distribution
pub const INITIAL_RADIUS: f32 = 2.0;
pub const SPAWN_DISTANCE_JITTER: f32 = 20.0; // uniform spread around the base distance
pub const SPAWN_DISTANCE_HEIGHT_DIVISOR: f32 = 25.0; // base distance = viewport height / this
pub const SPIRAL_BASE: f32 = 0.025;
pub const SPIRAL_DISTANCE_COEFF: f32 = 0.5;
pub const SPEED_MIN: f32 = 5.0;
pub const SPEED_SPAN: f32 = 10.0;
pub const ACCEL_MIN: f32 = 1.025;
pub const ACCEL_SPAN: f32 = 0.075;
pub const RADIUS_GROWTH_DIVISOR: f32 = 20.0; // slower stars grow less

// Signal smoothing
pub const DEFAULT_SAMPLE_LENGTH: usize = 60; // ticks per window entry, or EMA sample cap
pub const SLIDING_WINDOW_MAX_ENTRIES: usize = 60;
pub const INTENSITY_HIGH: f32 = 100.0;
pub const INTENSITY_LOW: f32 = -100.0;
pub const INTENSITY_DIVISOR: f32 = 2000.0; // slow mood accumulation
pub const WINDOW_THRESHOLD_K: f32 = 0.1; // stddev multiplier above the window mean
pub const EXPONENTIAL_THRESHOLD: f32 = 1.2; // multiplier over the running average

// Mode arbitration
pub const POINTER_EMULATION_MARGIN: f32 = 1.5;
pub const TRAIL_INTENSITY_THRESHOLD: f32 = 99.0;
pub const COLOR_MOOD_THRESHOLD: f32 = 85.0;

// Audio-reactive kinematics
pub const POINTER_AUDIO_DIVISOR: f32 = 15.0;
pub const POINTER_FALLBACK_MULTIPLIER: f32 = 10.0;
pub const ACCEL_AUDIO_DIVISOR: f32 = 2000.0;

// Per-bin reactivity
pub const BIN_THRESHOLD_FACTOR: f32 = 1.2;
pub const BIN_GROWTH: f32 = 1.05;
pub const RADIUS_CAP: f32 = 60.0; // bounds per-star draw cost

// Rendering
pub const TRAIL_FADE_ALPHA: f32 = 0.1;
pub const TRAIL_LINE_WIDTH: f32 = 2.0;
pub const COLOR_CYCLE_INTERVAL_MS: u64 = 1000;

// Host scheduling
pub const FALLBACK_FRAME_MS: i32 = 1000 / 60;

// Audio analysis
pub const ANALYSER_FFT_SIZE: u32 = 64;

// Audio cues
pub const NOTE_RANGE: f32 = 87.0; // piano keys above the lowest note
pub const NOTE_MIN: u8 = 21; // A0
pub const NOTE_MAX: u8 = 108; // C8
pub const NOTE_VELOCITY_SCALE: f32 = 400.0;
pub const NOTE_VELOCITY_MIN: f32 = 50.0;
pub const NOTE_VELOCITY_MAX: f32 = 127.0;
pub const NOTE_DURATION_SEC: f32 = 0.1;
pub const CHORD_DURATION_SEC: f32 = 1.0;
pub const TONE_FREQ_MAX_HZ: f32 = 880.0;
pub const TONE_FREQ_SPAN_HZ: f32 = 660.0;
pub const TONE_AMP_BASE: f32 = 0.05;
pub const TONE_AMP_SPAN: f32 = 0.15;
pub const TONE_DURATION_SEC: f32 = 0.12;
