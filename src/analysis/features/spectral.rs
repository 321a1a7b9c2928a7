// Spectral module - dominant frequency search
//
// A thump on produce resonates low. The dominant frequency is the strongest
// non-DC bin inside a fixed search band, independent of the caller's ripeness
// band so that "outside the band" remains observable.

/// Lower edge of the dominant-frequency search band (Hz)
pub const SEARCH_BAND_MIN_HZ: f64 = 60.0;

/// Upper edge of the dominant-frequency search band (Hz)
pub const SEARCH_BAND_MAX_HZ: f64 = 200.0;

/// Dominant-frequency estimation over a band-limited magnitude spectrum
pub struct SpectralFeatures {
    bin_width: f64,
}

impl SpectralFeatures {
    /// # Arguments
    /// * `bin_width` - Hz per spectrum bin (sample_rate / segment length)
    pub fn new(bin_width: f64) -> Self {
        Self { bin_width }
    }

    /// Frequency of the strongest bin in [60, 200] Hz
    ///
    /// Bin 0 is skipped. Ties keep the lower bin. Returns 0.0 when no bin in
    /// the band has positive magnitude.
    pub fn dominant_frequency(&self, spectrum: &[f32]) -> f32 {
        let mut best_magnitude = 0.0f32;
        let mut best_frequency = 0.0f64;

        for (k, &magnitude) in spectrum.iter().enumerate().skip(1) {
            let frequency = k as f64 * self.bin_width;
            if frequency < SEARCH_BAND_MIN_HZ {
                continue;
            }
            if frequency > SEARCH_BAND_MAX_HZ {
                break;
            }
            if magnitude > best_magnitude {
                best_magnitude = magnitude;
                best_frequency = frequency;
            }
        }

        best_frequency as f32
    }
}
