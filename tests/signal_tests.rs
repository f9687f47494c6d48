// Host-side tests for the spectrum smoother.
mod common;

use common::{rng, spectrum};
use rand::Rng;
use starfield_web::core::*;

fn window_smoother() -> SignalSmoother {
    SignalSmoother::new(
        SmoothingPolicy::SlidingWindow,
        constants::DEFAULT_SAMPLE_LENGTH,
        &ReactiveTuning::default(),
    )
}

fn exponential_smoother(sample_length: usize) -> SignalSmoother {
    SignalSmoother::new(
        SmoothingPolicy::Exponential,
        sample_length,
        &ReactiveTuning::default(),
    )
}

#[test]
fn intensity_over_time_stays_clamped_for_random_input() {
    let tuning = ReactiveTuning {
        intensity_divisor: 1.0,
        ..ReactiveTuning::default()
    };
    for policy in [SmoothingPolicy::SlidingWindow, SmoothingPolicy::Exponential] {
        let mut smoother = SignalSmoother::new(policy, 4, &tuning);
        let mut r = rng(7);
        for _ in 0..5_000 {
            let len = r.gen_range(1..=64);
            let snap: Vec<u8> = (0..len).map(|_| r.gen()).collect();
            let s = smoother.update(&snap);
            assert!(
                (-100.0..=100.0).contains(&s.intensity_over_time),
                "{:?} escaped the clamp: {}",
                policy,
                s.intensity_over_time
            );
            assert!(s.intensity == 100.0 || s.intensity == -100.0);
        }
    }
}

#[test]
fn silence_reads_quiet_and_drifts_down_to_the_floor() {
    let mut smoother = window_smoother();
    let zeros = spectrum(0, 32);
    let mut prev = 0.0;
    for _ in 0..2_100 {
        let s = smoother.update(&zeros);
        assert_eq!(s.intensity, -100.0);
        assert!(s.intensity_over_time <= prev);
        prev = s.intensity_over_time;
    }
    assert_eq!(smoother.signal().intensity_over_time, -100.0);
    assert_eq!(smoother.signal().running_average, 0.0);
}

#[test]
fn first_silent_tick_steps_by_one_divisor() {
    let mut smoother = window_smoother();
    let s = smoother.update(&spectrum(0, 32));
    assert!((s.intensity_over_time + 0.05).abs() < 1e-6);
}

#[test]
fn alternating_extremes_converge_to_the_midpoint() {
    let mut smoother = window_smoother();
    let quiet = spectrum(0, 32);
    let loud = spectrum(255, 32);
    for i in 0..(60 * 60) {
        smoother.update(if i % 2 == 0 { &quiet } else { &loud });
    }
    let s = smoother.signal();
    assert!((s.running_average - 4080.0).abs() < 1e-3, "{}", s.running_average);
    assert!(s.std_dev.abs() < 1e-3);
}

#[test]
fn window_stddev_reflects_spread_between_entries() {
    // one tick per entry so every snapshot lands in the window
    let mut smoother = SignalSmoother::new(
        SmoothingPolicy::SlidingWindow,
        1,
        &ReactiveTuning::default(),
    );
    smoother.update(&[10]);
    let s = smoother.update(&[30]);
    assert_eq!(s.running_average, 20.0);
    assert_eq!(s.std_dev, 10.0);
    // 30 > 20 + 10 * 0.1
    assert_eq!(s.intensity, 100.0);
}

#[test]
fn window_keeps_at_most_sixty_entries() {
    let mut smoother = SignalSmoother::new(
        SmoothingPolicy::SlidingWindow,
        1,
        &ReactiveTuning::default(),
    );
    for _ in 0..60 {
        smoother.update(&[0]);
    }
    for _ in 0..60 {
        smoother.update(&[100]);
    }
    // the zeros have all been evicted
    assert_eq!(smoother.signal().running_average, 100.0);
    assert_eq!(smoother.signal().std_dev, 0.0);
}

#[test]
fn exponential_average_tracks_a_steady_input() {
    let mut smoother = exponential_smoother(60);
    let steady = spectrum(10, 32);
    for _ in 0..10 {
        smoother.update(&steady);
    }
    let s = smoother.signal();
    assert!((s.running_average - 320.0).abs() < 1e-3);
    assert_eq!(s.std_dev, 0.0);
    assert_eq!(s.intensity, -100.0);

    let s = smoother.update(&spectrum(255, 32));
    assert_eq!(s.current_sum, 8160.0);
    assert_eq!(s.intensity, 100.0);
    let expected = (320.0 * 10.0 + 8160.0) / 11.0;
    assert!((s.running_average - expected).abs() < 1e-2);
}

#[test]
fn exponential_sample_cap_weights_new_input_more() {
    let mut short = exponential_smoother(2);
    let mut long = exponential_smoother(60);
    for _ in 0..20 {
        short.update(&[100]);
        long.update(&[100]);
    }
    let a = short.update(&[200]).running_average;
    let b = long.update(&[200]).running_average;
    assert!(a > b, "short window {} should react faster than {}", a, b);
}

#[test]
fn sample_length_is_clamped_and_reported() {
    let mut smoother = window_smoother();
    smoother.set_sample_length(0);
    assert_eq!(smoother.sample_length(), 1);
    assert_eq!(smoother.policy(), SmoothingPolicy::SlidingWindow);
    assert_eq!(exponential_smoother(5).policy(), SmoothingPolicy::Exponential);
}

#[test]
fn update_keeps_the_latest_snapshot() {
    let mut smoother = window_smoother();
    smoother.update(&[1, 2, 3]);
    smoother.update(&[4, 5]);
    assert_eq!(smoother.spectrum(), &[4, 5]);
    assert_eq!(smoother.signal().current_sum, 9.0);
}
