//! Synthetic thump fixtures for tests, demos and the CLI harness.
//!
//! A real thump is a low body resonance plus a bright surface click that
//! rings down together. The generator mixes a low "body" partial with a
//! 5 kHz "surface" partial under one exponential envelope, so both the
//! spectral and the envelope stages have something realistic to measure.

use std::f32::consts::PI;
use std::io::Cursor;

use serde::{Deserialize, Serialize};

use crate::decoder::SAMPLE_RATE;

/// Frequency of the bright surface partial
const SURFACE_FREQUENCY_HZ: f32 = 5000.0;

/// Share of the peak carried by the body partial
const BODY_MIX: f32 = 0.2;

/// Share of the peak carried by the surface partial
const SURFACE_MIX: f32 = 0.8;

/// Declarative description of a synthetic thump
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticThump {
    /// Body resonance in Hz
    pub frequency_hz: f32,
    /// Exponential time constant of the ring-down in ms
    pub decay_ms: f32,
    /// Total capture length in ms
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f32,
    /// Peak amplitude (reached at sample 0)
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
}

fn default_duration_ms() -> f32 {
    500.0
}

fn default_amplitude() -> f32 {
    0.9
}

impl SyntheticThump {
    pub fn new(frequency_hz: f32, decay_ms: f32) -> Self {
        Self {
            frequency_hz,
            decay_ms,
            duration_ms: default_duration_ms(),
            amplitude: default_amplitude(),
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Render at [`SAMPLE_RATE`]
    pub fn render(&self) -> Vec<f32> {
        let len = (self.duration_ms * SAMPLE_RATE as f32 / 1000.0) as usize;
        let tau = (self.decay_ms / 1000.0 * SAMPLE_RATE as f32).max(f32::MIN_POSITIVE);
        (0..len)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let body = (2.0 * PI * self.frequency_hz * t).cos();
                let surface = (2.0 * PI * SURFACE_FREQUENCY_HZ * t).cos();
                let envelope = (-(i as f32) / tau).exp();
                self.amplitude * envelope * (BODY_MIX * body + SURFACE_MIX * surface)
            })
            .collect()
    }
}

/// Single full-scale sample in a silent buffer
pub fn impulse(len: usize, index: usize) -> Vec<f32> {
    let mut samples = vec![0.0f32; len];
    if let Some(sample) = samples.get_mut(index) {
        *sample = 1.0;
    }
    samples
}

/// Continuous sine at [`SAMPLE_RATE`]
pub fn sine(frequency_hz: f32, amplitude: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            amplitude * (2.0 * PI * frequency_hz * t).sin()
        })
        .collect()
}

/// Encode samples as a mono 16-bit PCM WAV at [`SAMPLE_RATE`]
pub fn encode_wav(samples: &[f32]) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in samples {
            let value = (sample.clamp(-1.0, 1.0) * 32768.0)
                .round()
                .clamp(i16::MIN as f32, i16::MAX as f32) as i16;
            writer.write_sample(value)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}
