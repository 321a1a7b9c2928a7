// Temporal module - Time-domain feature extraction
//
// Peak picking and envelope decay for a single thump. Decay is measured on
// the raw samples with a one-pole envelope follower, starting at the peak.

/// Length of the decay window following the peak
pub const DECAY_WINDOW_MS: f32 = 300.0;

/// Envelope follower retention per sample: env = env * a + |x| * (1 - a)
pub const ENVELOPE_SMOOTHING: f32 = 0.9;

/// Decay ends when the envelope falls below this fraction of the peak
pub const DECAY_THRESHOLD_RATIO: f32 = 0.3;

/// Samples ignored after the peak before the threshold may trigger
pub const DECAY_HOLDOFF_SAMPLES: usize = 200;

/// Largest absolute sample and where it sits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub amplitude: f32,
    pub index: usize,
}

/// Find the first sample with maximum absolute value
///
/// An empty buffer yields a zero peak at index 0.
pub fn find_peak(samples: &[f32]) -> Peak {
    let mut peak = Peak {
        amplitude: 0.0,
        index: 0,
    };
    for (i, &sample) in samples.iter().enumerate() {
        let magnitude = sample.abs();
        if magnitude > peak.amplitude {
            peak = Peak {
                amplitude: magnitude,
                index: i,
            };
        }
    }
    peak
}

/// Temporal feature computation functions
pub struct TemporalFeatures {
    sample_rate: u32,
}

impl TemporalFeatures {
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// Samples in the post-peak decay window
    pub fn decay_window_samples(&self) -> usize {
        (DECAY_WINDOW_MS * self.sample_rate as f32 / 1000.0) as usize
    }

    /// Envelope decay time in milliseconds
    ///
    /// Follows the envelope over up to 300 ms of raw samples starting at the
    /// peak. Returns the offset at which the envelope first drops below
    /// 30% of the peak, once the 200-sample holdoff has elapsed; if it never
    /// does, returns the length of the (possibly truncated) window.
    pub fn compute_decay_time(&self, samples: &[f32], peak: Peak) -> f32 {
        let start = peak.index.min(samples.len());
        let end = start
            .saturating_add(self.decay_window_samples())
            .min(samples.len());
        let window = &samples[start..end];

        let threshold = DECAY_THRESHOLD_RATIO * peak.amplitude;
        let mut envelope = 0.0f32;
        let mut decay_samples = window.len();

        for (i, &sample) in window.iter().enumerate() {
            envelope = envelope * ENVELOPE_SMOOTHING + sample.abs() * (1.0 - ENVELOPE_SMOOTHING);
            if i >= DECAY_HOLDOFF_SAMPLES && envelope < threshold {
                decay_samples = i;
                break;
            }
        }

        self.samples_to_ms(decay_samples)
    }

    fn samples_to_ms(&self, samples: usize) -> f32 {
        samples as f32 * 1000.0 / self.sample_rate as f32
    }
}
