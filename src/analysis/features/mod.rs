// FeatureExtractor - DSP feature extraction for a captured thump
//
// Module organization:
// - fft: Hann window and band-limited magnitude spectrum (0-500 Hz)
// - spectral: Dominant frequency inside the 60-200 Hz search band
// - temporal: Peak picking and envelope decay time
// - mod.rs: Coordinator (BufferFeatureExtractor)
//
// Pipeline for one buffer:
// 1. Peak: largest |sample|; below 0.05 the buffer is too weak to analyse
// 2. Window: up to FFT_SIZE samples starting a quarter window before the peak
// 3. Spectrum of the Hann-windowed segment, dominant frequency from it
// 4. Decay time from the raw samples following the peak

pub mod fft;
pub mod spectral;
pub mod temporal;

pub use fft::{apply_hann, hann_window, BandedDft, FftBandEstimator, FFT_SIZE};
pub use temporal::{find_peak, Peak};

use spectral::SpectralFeatures;
use temporal::TemporalFeatures;

/// Peaks below this are reported as a weak signal without further work
pub const WEAK_SIGNAL_FLOOR: f32 = 0.05;

/// Features extracted from a sample buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferFeatures {
    /// Peak absolute sample value
    pub peak_amplitude: f32,
    /// Index of the peak sample
    pub peak_index: usize,
    /// Dominant frequency in Hz (0.0 if nothing in band)
    pub dominant_frequency: f32,
    /// Envelope decay time in milliseconds
    pub decay_time_ms: f32,
}

/// Result of running the extractor over a buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BufferExtraction {
    /// Peak under [`WEAK_SIGNAL_FLOOR`]; nothing else was computed
    WeakSignal { peak_amplitude: f32 },
    Features(BufferFeatures),
}

/// Select the analysis segment around a peak
///
/// Length is `min(len, fft_size)`; the segment starts `length / 4` samples
/// before the peak, shifted to stay inside the buffer.
pub fn peak_window(samples: &[f32], peak_index: usize, fft_size: usize) -> &[f32] {
    let length = samples.len().min(fft_size);
    let start = peak_index
        .saturating_sub(length / 4)
        .min(samples.len() - length);
    &samples[start..start + length]
}

/// BufferFeatureExtractor coordinates the buffer feature pipeline
pub struct BufferFeatureExtractor {
    sample_rate: u32,
    fft_size: usize,
    dft: BandedDft,
    temporal_features: TemporalFeatures,
}

impl BufferFeatureExtractor {
    /// Create a new extractor for the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            fft_size: FFT_SIZE,
            dft: BandedDft::new(sample_rate),
            temporal_features: TemporalFeatures::new(sample_rate),
        }
    }

    /// Extract peak, dominant frequency and decay from a buffer
    pub fn extract(&self, samples: &[f32]) -> BufferExtraction {
        let peak = find_peak(samples);
        if peak.amplitude < WEAK_SIGNAL_FLOOR {
            return BufferExtraction::WeakSignal {
                peak_amplitude: peak.amplitude,
            };
        }

        let segment = apply_hann(peak_window(samples, peak.index, self.fft_size));
        let spectrum = self.dft.magnitude_spectrum(&segment);
        let bin_width = fft::bin_width(self.sample_rate, segment.len());
        let dominant_frequency = SpectralFeatures::new(bin_width).dominant_frequency(&spectrum);

        let decay_time_ms = self.temporal_features.compute_decay_time(samples, peak);

        BufferExtraction::Features(BufferFeatures {
            peak_amplitude: peak.amplitude,
            peak_index: peak.index,
            dominant_frequency,
            decay_time_ms,
        })
    }
}
