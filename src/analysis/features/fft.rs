// FFT module - band-limited magnitude spectrum
//
// Only the 0-500 Hz band matters for a thump, so the default estimator sums the
// DFT directly for those few bins (O(N * max_bin), any N, no padding). The
// rustfft estimator transforms the whole segment and slices the same bins; the
// two agree to floating-point tolerance.

use std::f64::consts::PI;

use rustfft::{num_complex::Complex, FftPlanner};

/// Maximum segment length analysed around the peak
pub const FFT_SIZE: usize = 2048;

/// Upper edge of the computed band
pub const SPECTRUM_MAX_HZ: f64 = 500.0;

/// Hann window of `len` points: 0.5 * (1 - cos(2*pi*i / (len - 1)))
pub fn hann_window(len: usize) -> Vec<f32> {
    if len < 2 {
        return vec![1.0; len];
    }
    let denom = (len - 1) as f64;
    (0..len)
        .map(|i| (0.5 * (1.0 - (2.0 * PI * i as f64 / denom).cos())) as f32)
        .collect()
}

/// Multiply a segment by a Hann window of the same length
pub fn apply_hann(segment: &[f32]) -> Vec<f32> {
    segment
        .iter()
        .zip(hann_window(segment.len()))
        .map(|(&s, w)| s * w)
        .collect()
}

/// Frequency spacing between bins for an `n`-point transform
pub fn bin_width(sample_rate: u32, n: usize) -> f64 {
    sample_rate as f64 / n as f64
}

/// Highest bin index at or below [`SPECTRUM_MAX_HZ`]
pub fn max_band_bin(sample_rate: u32, n: usize) -> usize {
    let max_bin = (SPECTRUM_MAX_HZ / bin_width(sample_rate, n)).floor() as usize;
    max_bin.min(n.saturating_sub(1))
}

/// Direct-summation DFT restricted to the 0-500 Hz band
pub struct BandedDft {
    sample_rate: u32,
}

impl BandedDft {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// Magnitudes for bins `0..=max_band_bin`; empty for empty input
    pub fn magnitude_spectrum(&self, segment: &[f32]) -> Vec<f32> {
        let n = segment.len();
        if n == 0 {
            return Vec::new();
        }

        let max_bin = max_band_bin(self.sample_rate, n);
        (0..=max_bin)
            .map(|k| {
                let mut real = 0.0f64;
                let mut imag = 0.0f64;
                for (i, &x) in segment.iter().enumerate() {
                    // Reduce k*i mod n first so the angle stays small
                    let phase = ((k * i) % n) as f64;
                    let angle = 2.0 * PI * phase / n as f64;
                    real += x as f64 * angle.cos();
                    imag -= x as f64 * angle.sin();
                }
                (real * real + imag * imag).sqrt() as f32
            })
            .collect()
    }
}

/// Full-band rustfft transform sliced to the 0-500 Hz band
pub struct FftBandEstimator {
    planner: FftPlanner<f64>,
    sample_rate: u32,
}

impl FftBandEstimator {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            planner: FftPlanner::new(),
            sample_rate,
        }
    }

    /// Same contract as [`BandedDft::magnitude_spectrum`]
    pub fn magnitude_spectrum(&mut self, segment: &[f32]) -> Vec<f32> {
        let n = segment.len();
        if n == 0 {
            return Vec::new();
        }

        let mut buffer: Vec<Complex<f64>> = segment
            .iter()
            .map(|&x| Complex::new(x as f64, 0.0))
            .collect();

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let max_bin = max_band_bin(self.sample_rate, n);
        buffer[..=max_bin].iter().map(|c| c.norm() as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::SAMPLE_RATE;

    fn sine(frequency: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_hann_window_shape() {
        let window = hann_window(FFT_SIZE);
        assert_eq!(window.len(), FFT_SIZE);
        assert!(window[0].abs() < 1e-6);
        assert!(window[FFT_SIZE - 1].abs() < 1e-6);
        let mid = window[FFT_SIZE / 2];
        assert!(mid > 0.999, "window midpoint {} should be ~1", mid);
        assert_eq!(hann_window(1), vec![1.0]);
        assert!(hann_window(0).is_empty());
    }

    #[test]
    fn test_band_limit() {
        // 44100 / 2048 = 21.53 Hz per bin -> bins 0..=23
        assert_eq!(max_band_bin(SAMPLE_RATE, FFT_SIZE), 23);
        let spectrum = BandedDft::new(SAMPLE_RATE).magnitude_spectrum(&vec![0.1; FFT_SIZE]);
        assert_eq!(spectrum.len(), 24);
    }

    #[test]
    fn test_empty_input() {
        assert!(BandedDft::new(SAMPLE_RATE).magnitude_spectrum(&[]).is_empty());
        assert!(FftBandEstimator::new(SAMPLE_RATE)
            .magnitude_spectrum(&[])
            .is_empty());
    }

    #[test]
    fn test_dc_bin_is_sum() {
        let spectrum = BandedDft::new(SAMPLE_RATE).magnitude_spectrum(&[0.25; 400]);
        assert!((spectrum[0] - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_direct_matches_fft() {
        // Non power of two on purpose
        let segment = apply_hann(&sine(140.0, 1500));
        let direct = BandedDft::new(SAMPLE_RATE).magnitude_spectrum(&segment);
        let fast = FftBandEstimator::new(SAMPLE_RATE).magnitude_spectrum(&segment);

        assert_eq!(direct.len(), fast.len());
        for (k, (a, b)) in direct.iter().zip(fast.iter()).enumerate() {
            assert!(
                (a - b).abs() <= 1e-3 * a.abs().max(1.0),
                "bin {} differs: direct={} fft={}",
                k,
                a,
                b
            );
        }
    }
}
