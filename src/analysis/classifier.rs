// Classifier - threshold-based ripeness verdict and confidence
//
// Both pipelines compare extracted features against caller thresholds:
// - Buffer: ripe iff the dominant frequency lies in [freq_min, freq_max] AND
//   the decay time reaches decay_threshold_ms.
// - Metering: frequency is not measurable, so ripe iff the decay check passes.
//
// Confidence is additive and heuristic, not a probability:
// - Buffer: 0.5, +0.2 frequency ok, +0.3 decay ok, -0.4 if decay < 50 ms
// - Metering: 0.4, +0.2 decay ok, +0.2 if peak > 0.1
// Always clamped to [0, 1].

use crate::analysis::features::BufferFeatures;
use crate::analysis::types::ThresholdSettings;

const BUFFER_BASE_CONFIDENCE: f32 = 0.5;
const FREQUENCY_BONUS: f32 = 0.2;
const DECAY_BONUS: f32 = 0.3;
const FAST_DECAY_PENALTY: f32 = 0.4;

/// Decay shorter than this is penalised regardless of thresholds
pub const FAST_DECAY_MS: f32 = 50.0;

const METERING_BASE_CONFIDENCE: f32 = 0.4;
const METERING_DECAY_BONUS: f32 = 0.2;
const METERING_LOUDNESS_BONUS: f32 = 0.2;

/// Metering peaks above this earn the loudness bonus
pub const METERING_LOUD_PEAK: f32 = 0.1;

/// Outcome of comparing features against thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub is_ripe: bool,
    pub confidence: f32,
    /// None when frequency was not measured (metering input)
    pub frequency_ok: Option<bool>,
    pub decay_ok: bool,
    pub decays_too_fast: bool,
}

/// Classifier applies caller thresholds to extracted features
pub struct Classifier {
    settings: ThresholdSettings,
}

impl Classifier {
    /// Create a classifier for one invocation's settings
    pub fn new(settings: ThresholdSettings) -> Self {
        Self { settings }
    }

    fn frequency_ok(&self, frequency: f32) -> bool {
        frequency >= self.settings.freq_min && frequency <= self.settings.freq_max
    }

    fn decay_ok(&self, decay_time_ms: f32) -> bool {
        decay_time_ms >= self.settings.decay_threshold_ms
    }

    /// Classify features from the PCM pipeline
    pub fn classify_buffer(&self, features: &BufferFeatures) -> Verdict {
        let frequency_ok = self.frequency_ok(features.dominant_frequency);
        let decay_ok = self.decay_ok(features.decay_time_ms);
        let decays_too_fast = features.decay_time_ms < FAST_DECAY_MS;

        let mut confidence = BUFFER_BASE_CONFIDENCE;
        if frequency_ok {
            confidence += FREQUENCY_BONUS;
        }
        if decay_ok {
            confidence += DECAY_BONUS;
        }
        if decays_too_fast {
            confidence -= FAST_DECAY_PENALTY;
        }

        Verdict {
            is_ripe: frequency_ok && decay_ok,
            confidence: confidence.clamp(0.0, 1.0),
            frequency_ok: Some(frequency_ok),
            decay_ok,
            decays_too_fast,
        }
    }

    /// Classify features from the metering pipeline
    ///
    /// Confidence is the plain sum of its terms, at most 0.8.
    pub fn classify_metering(&self, decay_time_ms: f32, peak_amplitude: f32) -> Verdict {
        let decay_ok = self.decay_ok(decay_time_ms);

        let mut confidence = METERING_BASE_CONFIDENCE;
        if decay_ok {
            confidence += METERING_DECAY_BONUS;
        }
        if peak_amplitude > METERING_LOUD_PEAK {
            confidence += METERING_LOUDNESS_BONUS;
        }

        Verdict {
            is_ripe: decay_ok,
            confidence,
            frequency_ok: None,
            decay_ok,
            decays_too_fast: false,
        }
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
