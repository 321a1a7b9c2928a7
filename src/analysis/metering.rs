// Metering pipeline - ripeness from coarse dB readings
//
// Used when the recorder can only report loudness at a fixed polling
// interval. Readings are converted to pseudo-linear amplitude (10^(dB/20)),
// the decay is counted in readings from the peak and scaled by the polling
// interval. Frequency cannot be measured; a fixed estimate is reported and
// left out of the verdict.

use crate::analysis::classifier::Classifier;
use crate::analysis::types::{AnalysisOutcome, AnalysisResult, ThresholdSettings};

/// Nominal recorder polling interval
pub const DEFAULT_POLL_INTERVAL_MS: f32 = 50.0;

/// Converted peaks below this are treated as silence
pub const SILENCE_FLOOR: f32 = 0.001;

/// Frequency reported for metering results (midpoint of a ripe response)
pub const HEURISTIC_FREQUENCY_HZ: f32 = 125.0;

/// Decay ends at the first reading below this fraction of the peak
const DECAY_THRESHOLD_RATIO: f32 = 0.3;

/// Convert a dB reading to pseudo-linear amplitude
pub fn db_to_amplitude(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

/// Append-only series of dB readings collected during capture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeteringSeries {
    readings: Vec<f32>,
}

impl MeteringSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one polled reading
    pub fn push(&mut self, db: f32) {
        self.readings.push(db);
    }

    pub fn readings(&self) -> &[f32] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Peak and decay measured from a metering series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteringFeatures {
    pub peak_amplitude: f32,
    pub peak_index: usize,
    /// Readings from the peak until the first one under 30% of it
    pub decay_readings: usize,
    pub decay_time_ms: f32,
}

/// Result of running the analyzer's extraction over a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeteringExtraction {
    /// Peak under [`SILENCE_FLOOR`]
    Silence { peak_amplitude: f32 },
    Features(MeteringFeatures),
}

/// Analyzer for dB metering series
pub struct MeteringAnalyzer {
    poll_interval_ms: f32,
}

impl Default for MeteringAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL_MS)
    }
}

impl MeteringAnalyzer {
    /// # Arguments
    /// * `poll_interval_ms` - Interval between readings; must match the
    ///   recorder's actual cadence or decay times are meaningless. Values
    ///   that are not finite and positive fall back to
    ///   [`DEFAULT_POLL_INTERVAL_MS`].
    pub fn new(poll_interval_ms: f32) -> Self {
        let poll_interval_ms = if poll_interval_ms.is_finite() && poll_interval_ms > 0.0 {
            poll_interval_ms
        } else {
            log::warn!(
                "[Metering] Invalid poll interval {} ms, using {} ms",
                poll_interval_ms,
                DEFAULT_POLL_INTERVAL_MS
            );
            DEFAULT_POLL_INTERVAL_MS
        };
        Self { poll_interval_ms }
    }

    pub fn poll_interval_ms(&self) -> f32 {
        self.poll_interval_ms
    }

    /// Peak and decay of a series
    pub fn extract(&self, db_readings: &[f32]) -> MeteringExtraction {
        let amplitudes: Vec<f32> = db_readings.iter().map(|&db| db_to_amplitude(db)).collect();

        let mut peak_amplitude = 0.0f32;
        let mut peak_index = 0usize;
        for (i, &amplitude) in amplitudes.iter().enumerate() {
            if amplitude > peak_amplitude {
                peak_amplitude = amplitude;
                peak_index = i;
            }
        }

        if peak_amplitude < SILENCE_FLOOR {
            return MeteringExtraction::Silence { peak_amplitude };
        }

        let threshold = DECAY_THRESHOLD_RATIO * peak_amplitude;
        let decay_readings = amplitudes[peak_index..]
            .iter()
            .position(|&amplitude| amplitude < threshold)
            .unwrap_or(amplitudes.len() - peak_index);

        MeteringExtraction::Features(MeteringFeatures {
            peak_amplitude,
            peak_index,
            decay_readings,
            decay_time_ms: decay_readings as f32 * self.poll_interval_ms,
        })
    }

    /// Run the metering pipeline end to end
    pub fn analyze(&self, db_readings: &[f32], settings: &ThresholdSettings) -> AnalysisResult {
        let features = match self.extract(db_readings) {
            MeteringExtraction::Features(features) => features,
            MeteringExtraction::Silence { peak_amplitude } => {
                log::debug!(
                    "[Metering] Silence: peak {:.6} over {} readings",
                    peak_amplitude,
                    db_readings.len()
                );
                return AnalysisResult::silence(peak_amplitude);
            }
        };

        let verdict = Classifier::new(*settings)
            .classify_metering(features.decay_time_ms, features.peak_amplitude);

        let debug = format!(
            "metering peak={:.3} decay={:.0}ms ({} readings @ {}ms) decayOk={} freq=estimated",
            features.peak_amplitude,
            features.decay_time_ms,
            features.decay_readings,
            self.poll_interval_ms,
            verdict.decay_ok
        );

        AnalysisResult {
            frequency: HEURISTIC_FREQUENCY_HZ,
            amplitude: features.peak_amplitude,
            decay_time_ms: features.decay_time_ms,
            is_ripe: verdict.is_ripe,
            confidence: verdict.confidence,
            debug: Some(debug),
            outcome: AnalysisOutcome::Classified,
        }
    }
}
