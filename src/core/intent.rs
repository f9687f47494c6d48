use crate::core::input::PointerState;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("unknown control value: {0:?}")]
    UnknownControl(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Rotation,
    AudioReactive,
    ColorCycle,
    TrailMode,
    Cues,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepAction {
    MoreStars,
    FewerStars,
    Faster,
    Slower,
    LongerSamples,
    ShorterSamples,
    Share,
}

/// A user request, produced by DOM controls, keys or pointer events and
/// consumed by the simulation (or, for audio/transport actions, the host).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiIntent {
    Toggle(Toggle),
    Step(StepAction),
    Pointer(PointerState),
    Resize { width: u32, height: u32 },
    PlayPause,
    Stop,
}

impl FromStr for UiIntent {
    type Err = IntentError;

    /// Parse a control's `value` attribute.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let intent = match s {
            "rotation" => UiIntent::Toggle(Toggle::Rotation),
            "audify" => UiIntent::Toggle(Toggle::AudioReactive),
            "colorise" => UiIntent::Toggle(Toggle::ColorCycle),
            "hyperspace" => UiIntent::Toggle(Toggle::TrailMode),
            "cues" => UiIntent::Toggle(Toggle::Cues),
            "starcount-add" => UiIntent::Step(StepAction::MoreStars),
            "starcount-sub" => UiIntent::Step(StepAction::FewerStars),
            "starspeed-add" => UiIntent::Step(StepAction::Faster),
            "starspeed-sub" => UiIntent::Step(StepAction::Slower),
            "samplelength-add" => UiIntent::Step(StepAction::LongerSamples),
            "samplelength-sub" => UiIntent::Step(StepAction::ShorterSamples),
            "share" => UiIntent::Step(StepAction::Share),
            other => return Err(IntentError::UnknownControl(other.to_string())),
        };
        Ok(intent)
    }
}

#[inline]
pub fn intent_for_key(key: &str) -> Option<UiIntent> {
    match key {
        "r" | "R" => Some(UiIntent::Toggle(Toggle::Rotation)),
        "a" | "A" => Some(UiIntent::Toggle(Toggle::AudioReactive)),
        "c" | "C" => Some(UiIntent::Toggle(Toggle::ColorCycle)),
        "h" | "H" => Some(UiIntent::Toggle(Toggle::TrailMode)),
        "m" | "M" => Some(UiIntent::Toggle(Toggle::Cues)),
        "ArrowUp" => Some(UiIntent::Step(StepAction::MoreStars)),
        "ArrowDown" => Some(UiIntent::Step(StepAction::FewerStars)),
        "ArrowRight" => Some(UiIntent::Step(StepAction::Faster)),
        "ArrowLeft" => Some(UiIntent::Step(StepAction::Slower)),
        "]" => Some(UiIntent::Step(StepAction::LongerSamples)),
        "[" => Some(UiIntent::Step(StepAction::ShorterSamples)),
        "s" | "S" => Some(UiIntent::Step(StepAction::Share)),
        " " => Some(UiIntent::PlayPause),
        "Escape" => Some(UiIntent::Stop),
        _ => None,
    }
}
