// Host-side tests for config parsing, UI intents and share links.
use starfield_web::core::*;
use std::collections::HashMap;

fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn count_steps_round_trip_at_64() {
    assert_eq!(step_count_up(64), 103);
    assert_eq!(step_count_down(103, 1), 64);
}

#[test]
fn count_steps_respect_the_minimum() {
    assert_eq!(step_count_down(1, 1), 1);
    assert_eq!(step_count_down(2, 1), 2);
    assert_eq!(step_count_up(1), 2);
    assert_eq!(step_count_up(0), 1);
}

#[test]
fn speed_steps_multiply_and_divide() {
    assert!((step_speed_up(1.0) - 1.61).abs() < 1e-6);
    assert!((step_speed_down(1.61) - 1.0).abs() < 1e-6);
}

#[test]
fn missing_attributes_keep_defaults() {
    let cfg = StarfieldConfig::from_attributes(attrs(&[])).unwrap();
    assert_eq!(cfg, StarfieldConfig::default());
    assert_eq!(cfg.smoothing, SmoothingPolicy::SlidingWindow);
    assert_eq!(cfg.cues, CueBackend::Tone);
    assert!(cfg.bin_reactive);
}

#[test]
fn attributes_override_defaults() {
    let cfg = StarfieldConfig::from_attributes(attrs(&[
        ("smoothing", "ema"),
        ("cues", " midi "),
        ("trail-style", "rects"),
        ("bin-reactive", "off"),
        ("stars", "0"),
        ("speed", "0.25"),
    ]))
    .unwrap();
    assert_eq!(cfg.smoothing, SmoothingPolicy::Exponential);
    assert_eq!(cfg.cues, CueBackend::Note);
    assert_eq!(cfg.trail_style, TrailStyle::Rects);
    assert!(!cfg.bin_reactive);
    assert_eq!(cfg.initial_star_count, 1);
    assert_eq!(cfg.initial_speed_factor, 0.25);
}

#[test]
fn bad_attributes_are_reported() {
    assert_eq!(
        StarfieldConfig::from_attributes(attrs(&[("smoothing", "median")])),
        Err(ConfigError::UnknownValue {
            key: "smoothing",
            value: "median".into()
        })
    );
    assert!(matches!(
        StarfieldConfig::from_attributes(attrs(&[("stars", "many")])),
        Err(ConfigError::InvalidNumber { key: "stars", .. })
    ));
    assert!(matches!(
        StarfieldConfig::from_attributes(attrs(&[("speed", "-1")])),
        Err(ConfigError::InvalidNumber { key: "speed", .. })
    ));
    assert!("loud".parse::<CueBackend>().is_err());
}

#[test]
fn visual_params_start_with_everything_off() {
    let p = VisualParams::default();
    assert_eq!(p.star_count, 25);
    assert_eq!(p.speed_factor, 0.1);
    assert_eq!(p.sample_length, 60);
    assert!(!p.rotation_enabled);
    assert!(!p.audio_reactive_enabled);
    assert!(!p.color_cycle_enabled);
    assert!(!p.trail_mode_enabled);
    assert!(!p.cues_enabled);
}

#[test]
fn control_values_parse_into_intents() {
    let cases = [
        ("rotation", UiIntent::Toggle(Toggle::Rotation)),
        ("audify", UiIntent::Toggle(Toggle::AudioReactive)),
        ("colorise", UiIntent::Toggle(Toggle::ColorCycle)),
        ("hyperspace", UiIntent::Toggle(Toggle::TrailMode)),
        ("cues", UiIntent::Toggle(Toggle::Cues)),
        ("starcount-add", UiIntent::Step(StepAction::MoreStars)),
        ("starcount-sub", UiIntent::Step(StepAction::FewerStars)),
        ("starspeed-add", UiIntent::Step(StepAction::Faster)),
        ("starspeed-sub", UiIntent::Step(StepAction::Slower)),
        ("samplelength-add", UiIntent::Step(StepAction::LongerSamples)),
        ("samplelength-sub", UiIntent::Step(StepAction::ShorterSamples)),
        ("share", UiIntent::Step(StepAction::Share)),
    ];
    for (value, intent) in cases {
        assert_eq!(value.parse::<UiIntent>(), Ok(intent), "{}", value);
    }
    assert_eq!(
        "warp".parse::<UiIntent>(),
        Err(IntentError::UnknownControl("warp".into()))
    );
}

#[test]
fn keys_map_to_intents() {
    assert_eq!(intent_for_key("r"), Some(UiIntent::Toggle(Toggle::Rotation)));
    assert_eq!(intent_for_key("H"), Some(UiIntent::Toggle(Toggle::TrailMode)));
    assert_eq!(
        intent_for_key("ArrowUp"),
        Some(UiIntent::Step(StepAction::MoreStars))
    );
    assert_eq!(
        intent_for_key("["),
        Some(UiIntent::Step(StepAction::ShorterSamples))
    );
    assert_eq!(intent_for_key(" "), Some(UiIntent::PlayPause));
    assert_eq!(intent_for_key("Escape"), Some(UiIntent::Stop));
    assert_eq!(intent_for_key("q"), None);
}

#[test]
fn share_fragment_round_trips_the_url() {
    let url = "https://example.com/stream.mp3";
    let fragment = format_fragment(url);
    assert_eq!(fragment, "!https://example.com/stream.mp3");
    assert_eq!(parse_fragment(&fragment).as_deref(), Ok(url));
    assert_eq!(parse_fragment(&format!("#{}", fragment)).as_deref(), Ok(url));
}

#[test]
fn share_fragment_rejects_malformed_hashes() {
    assert_eq!(parse_fragment("#about"), Err(ShareLinkError::MissingBang));
    assert_eq!(parse_fragment(""), Err(ShareLinkError::MissingBang));
    assert_eq!(parse_fragment("#!"), Err(ShareLinkError::EmptyUrl));
    assert_eq!(parse_fragment("!   "), Err(ShareLinkError::EmptyUrl));
}

#[test]
fn pointer_override_prefers_a_forced_press() {
    let real = PointerState {
        x: 1.0,
        y: 2.0,
        down: false,
    };
    let forced = PointerState::pressed_at(glam::Vec2::new(5.0, 6.0));
    assert_eq!(effective_pointer(real, None), real);
    assert_eq!(effective_pointer(real, Some(forced)), forced);
    let released = PointerState { down: false, ..forced };
    assert_eq!(effective_pointer(real, Some(released)), real);
}
