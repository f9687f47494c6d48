use crate::core::config::{ReactiveTuning, SmoothingPolicy};
use crate::core::constants::{INTENSITY_HIGH, INTENSITY_LOW, SLIDING_WINDOW_MAX_ENTRIES};
use std::collections::VecDeque;

/// Smoothed audio signals read by the field and the mode arbiter.
///
/// - `current_sum`: sum of the latest spectrum snapshot
/// - `running_average`: smoothed estimate of `current_sum`
/// - `std_dev`: population stddev of the window (0 under the exponential policy)
/// - `intensity`: +100 when the snapshot is loud relative to the average, else -100
/// - `intensity_over_time`: slow mood accumulator, always within [-100, 100]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioSignal {
    pub current_sum: f32,
    pub running_average: f32,
    pub std_dev: f32,
    pub intensity: f32,
    pub intensity_over_time: f32,
}

#[derive(Clone, Debug)]
enum PolicyState {
    Window {
        entries: VecDeque<f32>,
        slice_sum: f32,
        slice_samples: usize,
    },
    Exponential {
        samples: usize,
    },
}

/// Converts raw spectrum snapshots into the signals in `AudioSignal`.
///
/// Constructed once per audio source and updated once per tick. Each update
/// is a pure function of the previous state and one snapshot.
#[derive(Clone, Debug)]
pub struct SignalSmoother {
    state: PolicyState,
    sample_length: usize,
    window_threshold_k: f32,
    exponential_threshold: f32,
    intensity_divisor: f32,
    spectrum: Vec<u8>,
    signal: AudioSignal,
}

impl SignalSmoother {
    pub fn new(policy: SmoothingPolicy, sample_length: usize, tuning: &ReactiveTuning) -> Self {
        let state = match policy {
            SmoothingPolicy::SlidingWindow => PolicyState::Window {
                entries: VecDeque::with_capacity(SLIDING_WINDOW_MAX_ENTRIES),
                slice_sum: 0.0,
                slice_samples: 0,
            },
            SmoothingPolicy::Exponential => PolicyState::Exponential { samples: 0 },
        };
        Self {
            state,
            sample_length: sample_length.max(1),
            window_threshold_k: tuning.window_threshold_k,
            exponential_threshold: tuning.exponential_threshold,
            intensity_divisor: tuning.intensity_divisor,
            spectrum: Vec::new(),
            signal: AudioSignal::default(),
        }
    }

    pub fn policy(&self) -> SmoothingPolicy {
        match self.state {
            PolicyState::Window { .. } => SmoothingPolicy::SlidingWindow,
            PolicyState::Exponential { .. } => SmoothingPolicy::Exponential,
        }
    }

    pub fn sample_length(&self) -> usize {
        self.sample_length
    }

    /// Ticks per window entry (window policy) or the sample-count cap
    /// (exponential policy). Takes effect from the next update.
    pub fn set_sample_length(&mut self, n: usize) {
        self.sample_length = n.max(1);
        if let PolicyState::Exponential { samples } = &mut self.state {
            *samples = (*samples).min(self.sample_length);
        }
    }

    pub fn signal(&self) -> &AudioSignal {
        &self.signal
    }

    /// The most recent snapshot passed to `update`.
    pub fn spectrum(&self) -> &[u8] {
        &self.spectrum
    }

    pub fn update(&mut self, snapshot: &[u8]) -> &AudioSignal {
        self.spectrum.clear();
        self.spectrum.extend_from_slice(snapshot);

        let current_sum: f32 = snapshot.iter().map(|&b| b as f32).sum();
        let sample_length = self.sample_length;
        let prev_average = self.signal.running_average;

        let (running_average, std_dev, threshold) = match &mut self.state {
            PolicyState::Window {
                entries,
                slice_sum,
                slice_samples,
            } => {
                *slice_sum += current_sum;
                *slice_samples += 1;
                if *slice_samples >= sample_length {
                    while entries.len() >= SLIDING_WINDOW_MAX_ENTRIES {
                        entries.pop_front();
                    }
                    entries.push_back((*slice_sum / *slice_samples as f32).floor());
                    *slice_sum = 0.0;
                    *slice_samples = 0;
                }
                let (mean, sd) = mean_and_std_dev(entries);
                (mean, sd, mean + sd * self.window_threshold_k)
            }
            PolicyState::Exponential { samples } => {
                let n = *samples as f32;
                let avg = (prev_average * n + current_sum) / (n + 1.0);
                *samples = (*samples + 1).min(sample_length);
                (avg, 0.0, avg * self.exponential_threshold)
            }
        };

        let intensity = if current_sum > threshold {
            INTENSITY_HIGH
        } else {
            INTENSITY_LOW
        };
        let intensity_over_time = (self.signal.intensity_over_time
            + intensity / self.intensity_divisor)
            .clamp(INTENSITY_LOW, INTENSITY_HIGH);

        self.signal = AudioSignal {
            current_sum,
            running_average,
            std_dev,
            intensity,
            intensity_over_time,
        };
        &self.signal
    }
}

fn mean_and_std_dev(entries: &VecDeque<f32>) -> (f32, f32) {
    if entries.is_empty() {
        return (0.0, 0.0);
    }
    let len = entries.len() as f32;
    let mean = entries.iter().sum::<f32>() / len;
    let variance = entries.iter().map(|&x| (x - mean).powi(2)).sum::<f32>() / len;
    (mean, variance.sqrt())
}
