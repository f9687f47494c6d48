use crate::core::constants::*;
use smallvec::SmallVec;

/// Which half of the viewport (relative to the origin) a star left through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn from_offset(dx: f32) -> Self {
        if dx < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// MIDI-style channel: 0 left speaker, 1 right.
    #[inline]
    pub fn channel(self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Stereo pan position in [-1, 1].
    #[inline]
    pub fn pan(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Everything a backend may want to know about one star leaving the view.
///
/// - `strength`: star size relative to the radius cap, 0..1
/// - `x_ratio`: exit x over viewport width (not clamped)
/// - `exit_count`: replacements since start, this one included
#[derive(Clone, Debug, PartialEq)]
pub struct ExitCue {
    pub serial: usize,
    pub side: Side,
    pub strength: f32,
    pub x_ratio: f32,
    pub exit_count: u64,
    pub star_count: usize,
    pub speed_factor: f32,
}

/// Audio-cue capability, chosen once at construction.
pub trait CueEmitter {
    fn trigger_cue(&mut self, cue: &ExitCue);
}

/// Backend used when cues are off or the host has no audio.
#[derive(Default, Clone, Copy, Debug)]
pub struct SilentCue;

impl CueEmitter for SilentCue {
    fn trigger_cue(&mut self, _cue: &ExitCue) {}
}

#[derive(Clone, Debug, PartialEq)]
pub struct TonePlan {
    pub pan: f32,
    pub frequency_hz: f32,
    pub amplitude: f32,
    pub duration_sec: f32,
}

/// Short panned tone: bigger stars sound lower and louder.
pub fn plan_tone(cue: &ExitCue) -> TonePlan {
    let strength = cue.strength.clamp(0.0, 1.0);
    TonePlan {
        pan: cue.side.pan(),
        frequency_hz: TONE_FREQ_MAX_HZ - TONE_FREQ_SPAN_HZ * strength,
        amplitude: TONE_AMP_BASE + TONE_AMP_SPAN * strength,
        duration_sec: TONE_DURATION_SEC,
    }
}

/// Note-on/note-off request: single note or a chord.
#[derive(Clone, Debug, PartialEq)]
pub struct NotePlan {
    pub channel: u8,
    pub notes: SmallVec<[u8; 7]>,
    pub velocity: u8,
    pub delay_sec: f32,
    pub duration_sec: f32,
}

impl NotePlan {
    #[inline]
    pub fn is_chord(&self) -> bool {
        self.notes.len() > 1
    }
}

// Seven-note voicings per scale degree.
const CHORD_I: [u8; 7] = [48, 52, 55, 60, 64, 67, 72];
const CHORD_II: [u8; 7] = [50, 53, 57, 62, 65, 69, 74];
const CHORD_III: [u8; 7] = [52, 55, 59, 64, 67, 71, 76];
const CHORD_IV: [u8; 7] = [41, 45, 48, 53, 57, 60, 65];
const CHORD_VI: [u8; 7] = [45, 48, 52, 57, 60, 64, 69];
const CHORD_VII: [u8; 7] = [47, 50, 53, 59, 62, 65, 71];

/// I, ii, iii, IV, vi, vii (no V).
pub const CHORD_PROGRESSION: [&[u8; 7]; 6] = [
    &CHORD_I, &CHORD_II, &CHORD_III, &CHORD_IV, &CHORD_VI, &CHORD_VII,
];

/// Pick the note (or, once per full population turnover, a chord) for an exit.
pub fn plan_note(cue: &ExitCue) -> NotePlan {
    let star_count = cue.star_count.max(1) as u64;
    let speed = cue.speed_factor.max(0.0);
    let velocity = (NOTE_VELOCITY_SCALE * speed).clamp(NOTE_VELOCITY_MIN, NOTE_VELOCITY_MAX) as u8;
    let channel = cue.side.channel();

    if cue.exit_count % star_count == 0 {
        let len = CHORD_PROGRESSION.len() as u64;
        let idx = (((cue.exit_count as f64 * 1.1) as u64) ^ len) % (len - 1);
        return NotePlan {
            channel,
            notes: SmallVec::from_slice(CHORD_PROGRESSION[idx as usize]),
            velocity,
            delay_sec: 0.0,
            duration_sec: CHORD_DURATION_SEC,
        };
    }

    let range = NOTE_RANGE * speed.max(1.0);
    let turnover = ((cue.exit_count % star_count) + 1) as f32 / star_count as f32;
    let offset = turnover * range * 0.5 + cue.x_ratio.clamp(0.0, 1.0) * range * 0.5;
    let note = (NOTE_MIN as f32 + offset.floor()).clamp(NOTE_MIN as f32, NOTE_MAX as f32) as u8;
    let mut notes = SmallVec::new();
    notes.push(note);
    NotePlan {
        channel,
        notes,
        velocity,
        delay_sec: 0.0,
        duration_sec: NOTE_DURATION_SEC,
    }
}

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}
