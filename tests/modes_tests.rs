// Host-side tests for the mode arbiter, color cycling, cue planning and the loop.
mod common;

use common::{ManualScheduler, Op, RecordingSurface};
use glam::Vec2;
use starfield_web::core::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

fn signal(current_sum: f32, running_average: f32, intensity: f32, mood: f32) -> AudioSignal {
    AudioSignal {
        current_sum,
        running_average,
        std_dev: 0.0,
        intensity,
        intensity_over_time: mood,
    }
}

fn cue(exit_count: u64, star_count: usize, x_ratio: f32, side: Side) -> ExitCue {
    ExitCue {
        serial: 0,
        side,
        strength: 0.5,
        x_ratio,
        exit_count,
        star_count,
        speed_factor: 0.1,
    }
}

#[test]
fn arbiter_presses_only_on_a_burst_over_a_baseline() {
    let arbiter = ModeArbiter::new(&ReactiveTuning::default());
    let origin = Vec2::new(400.0, 300.0);

    let d = arbiter.decide(&signal(151.0, 100.0, -100.0, 0.0), origin);
    assert_eq!(d.synthetic_pointer, Some(PointerState::pressed_at(origin)));

    let d = arbiter.decide(&signal(150.0, 100.0, -100.0, 0.0), origin);
    assert_eq!(d.synthetic_pointer, None);

    // no baseline yet
    let d = arbiter.decide(&signal(500.0, 0.0, 100.0, 0.0), origin);
    assert_eq!(d.synthetic_pointer, None);
}

#[test]
fn arbiter_trail_and_color_thresholds() {
    let arbiter = ModeArbiter::new(&ReactiveTuning::default());
    let origin = Vec2::ZERO;
    assert!(arbiter.decide(&signal(0.0, 0.0, 100.0, 0.0), origin).trail_mode);
    assert!(!arbiter.decide(&signal(0.0, 0.0, -100.0, 0.0), origin).trail_mode);
    assert!(arbiter.decide(&signal(0.0, 0.0, 0.0, 86.0), origin).color_cycle);
    assert!(arbiter.decide(&signal(0.0, 0.0, 0.0, -86.0), origin).color_cycle);
    assert!(!arbiter.decide(&signal(0.0, 0.0, 0.0, 85.0), origin).color_cycle);
}

#[test]
fn arbiter_apply_reports_changes() {
    let arbiter = ModeArbiter::new(&ReactiveTuning::default());
    let mut params = VisualParams::default();
    let d = arbiter.decide(&signal(0.0, 0.0, 100.0, 90.0), Vec2::ZERO);
    assert!(arbiter.apply(&d, &mut params));
    assert!(params.trail_mode_enabled && params.color_cycle_enabled);
    assert!(!arbiter.apply(&d, &mut params));
}

#[test]
fn clock_maps_onto_hsl() {
    let noon = ClockTime {
        hours: 12,
        minutes: 30,
        seconds: 15,
    };
    assert_eq!(time_to_hsl(noon), Color::Hsl(90.0, 50.0, 80.0));
    let midnight = ClockTime {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };
    assert_eq!(time_to_hsl(midnight), Color::Hsl(0.0, 0.0, 10.0));
    assert_eq!(
        Color::Hsl(90.0, 50.0, 80.0).to_css(),
        "hsl(90.0, 50.0%, 80.0%)"
    );
    assert_eq!(Color::Rgba(0, 0, 0, 0.1).to_css(), "rgba(0, 0, 0, 0.1)");
}

#[test]
fn color_cycle_is_throttled_and_restores_once() {
    let vp = Viewport::new(80.0, 60.0);
    let clock = ClockTime::default();
    let mut cycle = ColorCycle::new();
    let mut surface = RecordingSurface::default();

    cycle.update(true, false, clock, Duration::ZERO, &vp, &mut surface);
    cycle.update(true, false, clock, Duration::from_millis(500), &vp, &mut surface);
    assert_eq!(surface.ops.len(), 1);

    cycle.update(true, true, clock, Duration::from_millis(1000), &vp, &mut surface);
    assert_eq!(surface.ops.len(), 3);
    assert!(matches!(surface.ops[1], Op::Rect { w, h, .. } if w == 80.0 && h == 60.0));

    cycle.update(false, false, clock, Duration::from_millis(2000), &vp, &mut surface);
    assert_eq!(surface.ops.last(), Some(&Op::Background(None)));
    cycle.update(false, false, clock, Duration::from_millis(3000), &vp, &mut surface);
    assert_eq!(surface.ops.len(), 4);
}

#[test]
fn tone_plan_pans_by_side_and_scales_with_size() {
    let small = plan_tone(&ExitCue {
        strength: 0.0,
        ..cue(1, 25, 0.1, Side::Left)
    });
    let big = plan_tone(&ExitCue {
        strength: 1.0,
        ..cue(1, 25, 0.9, Side::Right)
    });
    assert_eq!(small.pan, -1.0);
    assert_eq!(big.pan, 1.0);
    assert_eq!(small.frequency_hz, 880.0);
    assert_eq!(big.frequency_hz, 220.0);
    assert!(big.amplitude > small.amplitude);
}

#[test]
fn note_plan_plays_a_chord_on_full_turnover() {
    let plan = plan_note(&cue(25, 25, 0.5, Side::Right));
    assert!(plan.is_chord());
    assert_eq!(plan.channel, 1);
    assert_eq!(plan.notes.as_slice(), CHORD_PROGRESSION[4]);
    assert_eq!(plan.duration_sec, 1.0);
}

#[test]
fn note_plan_picks_a_single_note_otherwise() {
    let plan = plan_note(&cue(1, 25, 0.5, Side::Left));
    assert!(!plan.is_chord());
    assert_eq!(plan.channel, 0);
    assert_eq!(plan.notes.as_slice(), &[46u8]);
    assert_eq!(plan.velocity, 50);
    for exit in 1..200u64 {
        for x in [-1.0, 0.0, 0.3, 1.0, 4.0] {
            let p = plan_note(&cue(exit, 7, x, Side::Left));
            assert!(p.notes.iter().all(|&n| (21..=108).contains(&n)));
        }
    }
}

#[test]
fn midi_pitch_conversion() {
    assert!((midi_to_hz(69.0) - 440.0).abs() < 1e-3);
    assert!((midi_to_hz(81.0) - 880.0).abs() < 1e-2);
}

#[test]
fn loop_runs_until_stopped() {
    let scheduler = Rc::new(ManualScheduler::default());
    let stop = StopHandle::new();
    let frames = Rc::new(Cell::new(0));
    let counter = frames.clone();
    start_loop(scheduler.clone(), stop.clone(), move || {
        counter.set(counter.get() + 1)
    });

    assert_eq!(frames.get(), 0);
    for _ in 0..3 {
        assert_eq!(scheduler.run_pending(), 1);
    }
    assert_eq!(frames.get(), 3);

    stop.stop();
    assert!(stop.is_stopped());
    scheduler.run_pending();
    assert_eq!(frames.get(), 3);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn stopped_loop_never_schedules() {
    let scheduler = Rc::new(ManualScheduler::default());
    let stop = StopHandle::new();
    stop.stop();
    start_loop(scheduler.clone(), stop, || panic!("frame after stop"));
    assert_eq!(scheduler.pending(), 0);
}
