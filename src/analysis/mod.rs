// Analysis - thump ripeness estimation
//
// Two pipelines converge on the same `AnalysisResult`:
// - Buffer pipeline: decoded PCM -> peak, windowed band spectrum, decay -> verdict
// - Metering pipeline: polled dB readings -> peak, decay -> verdict (no frequency)
//
// Both are pure and synchronous: no shared state, no retries, no I/O. A weak
// or silent capture is an inconclusive result, not an error.

pub mod classifier;
pub mod features;
pub mod metering;
pub mod types;

pub use classifier::{Classifier, Verdict};
pub use features::{BufferExtraction, BufferFeatureExtractor, BufferFeatures};
pub use metering::{MeteringAnalyzer, MeteringSeries};
pub use types::{AnalysisOutcome, AnalysisResult, ThresholdSettings};

use crate::decoder::{self, DecodeMode, SAMPLE_RATE};
use crate::error::{log_decode_error, DecodeError};

fn warn_on_inconsistent(settings: &ThresholdSettings) {
    if let Err(reason) = settings.validate() {
        log::warn!("[Analysis] Inconsistent thresholds: {}", reason);
    }
}

/// Analyze a mono PCM buffer sampled at 44.1 kHz
///
/// Deterministic: identical samples and settings give identical results.
pub fn analyze_buffer(samples: &[f32], settings: &ThresholdSettings) -> AnalysisResult {
    let _span = tracing::debug_span!("analyze_buffer", samples = samples.len()).entered();
    warn_on_inconsistent(settings);

    let features = match BufferFeatureExtractor::new(SAMPLE_RATE).extract(samples) {
        BufferExtraction::Features(features) => features,
        BufferExtraction::WeakSignal { peak_amplitude } => {
            tracing::debug!(peak_amplitude, "weak signal, skipping spectral analysis");
            return AnalysisResult::weak_signal(peak_amplitude);
        }
    };

    let verdict = Classifier::new(*settings).classify_buffer(&features);

    let mut debug = format!(
        "peak={:.3}@{} freq={:.1}Hz decay={:.1}ms freqOk={} decayOk={}",
        features.peak_amplitude,
        features.peak_index,
        features.dominant_frequency,
        features.decay_time_ms,
        verdict.frequency_ok.unwrap_or(false),
        verdict.decay_ok
    );
    if verdict.decays_too_fast {
        debug.push_str(" decays too fast");
    }

    log::debug!("[Analysis] {}", debug);

    AnalysisResult {
        frequency: features.dominant_frequency,
        amplitude: features.peak_amplitude,
        decay_time_ms: features.decay_time_ms,
        is_ripe: verdict.is_ripe,
        confidence: verdict.confidence,
        debug: Some(debug),
        outcome: AnalysisOutcome::Classified,
    }
}

/// Analyze a dB metering series polled every 50 ms
///
/// Use [`MeteringAnalyzer::new`] directly for a different polling cadence.
pub fn analyze_metering(db_readings: &[f32], settings: &ThresholdSettings) -> AnalysisResult {
    let _span = tracing::debug_span!("analyze_metering", readings = db_readings.len()).entered();
    warn_on_inconsistent(settings);
    MeteringAnalyzer::default().analyze(db_readings, settings)
}

/// Decode WAV bytes and run the buffer pipeline
///
/// Decode failures abort before any spectral work.
pub fn analyze_wav(
    bytes: &[u8],
    mode: DecodeMode,
    settings: &ThresholdSettings,
) -> Result<AnalysisResult, DecodeError> {
    let buffer = decoder::decode(bytes, mode)
        .inspect_err(|err| log_decode_error(err, "analyze_wav"))?;
    Ok(analyze_buffer(buffer.samples(), settings))
}
