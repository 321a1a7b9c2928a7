// WAV decoder - byte stream to mono sample buffer
//
// The recorder hands the core a 16-bit mono 44.1 kHz WAV. Two decoders exist:
// - Permissive: skip a fixed 44-byte header, read little-endian i16 until the
//   bytes run out (a trailing odd byte is dropped). Chunk tags are not checked,
//   so files with metadata chunks ahead of `data` decode as noise.
// - Strict: walk the RIFF chunks with hound and reject anything that is not
//   mono 16-bit integer PCM at 44100 Hz.

use std::io::{Cursor, Read};

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Sample rate every buffer is assumed to carry (not read from the header)
pub const SAMPLE_RATE: u32 = 44_100;

/// Fixed header length skipped by the permissive decoder
pub const WAV_HEADER_LEN: usize = 44;

/// i16 full-scale divisor; maps PCM into [-1.0, 1.0)
const PCM16_SCALE: f32 = 32768.0;

/// Which decoder to run over a byte source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// Fixed 44-byte header skip, no validation
    #[default]
    Permissive,
    /// Chunk-aware parse with format validation
    Strict,
}

/// Decoded mono waveform at [`SAMPLE_RATE`]
///
/// Samples are finite and lie in [-1.0, 1.0]. The buffer is never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
}

impl SampleBuffer {
    /// Wrap caller-provided samples, clamping into [-1.0, 1.0]
    ///
    /// Non-finite values are replaced by silence.
    pub fn from_samples(samples: Vec<f32>) -> Self {
        let non_finite = samples.iter().filter(|s| !s.is_finite()).count();
        if non_finite > 0 {
            log::warn!(
                "[Decoder] Replaced {} non-finite samples with silence",
                non_finite
            );
        }

        let samples = samples
            .into_iter()
            .map(|s| if s.is_finite() { s.clamp(-1.0, 1.0) } else { 0.0 })
            .collect();
        Self { samples }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Capture length in milliseconds
    pub fn duration_ms(&self) -> f32 {
        self.samples.len() as f32 * 1000.0 / SAMPLE_RATE as f32
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.samples
    }
}

/// Read a whole byte source and decode it permissively
pub fn decode_wav<R: Read>(mut reader: R) -> Result<SampleBuffer, DecodeError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_wav_bytes(&bytes)
}

/// Decode with the fixed 44-byte header skip
///
/// Output length is `floor((len - 44) / 2)`.
pub fn decode_wav_bytes(bytes: &[u8]) -> Result<SampleBuffer, DecodeError> {
    let data = bytes.get(WAV_HEADER_LEN..).unwrap_or(&[]);
    let samples: Vec<f32> = data
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / PCM16_SCALE)
        .collect();

    if samples.is_empty() {
        return Err(DecodeError::Empty {
            byte_len: bytes.len(),
        });
    }

    log::debug!(
        "[Decoder] Decoded {} samples from {} bytes",
        samples.len(),
        bytes.len()
    );
    Ok(SampleBuffer { samples })
}

/// Decode by parsing RIFF chunks, rejecting formats the analysis cannot use
pub fn decode_wav_strict(bytes: &[u8]) -> Result<SampleBuffer, DecodeError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.channels != 1
        || spec.bits_per_sample != 16
        || spec.sample_format != hound::SampleFormat::Int
        || spec.sample_rate != SAMPLE_RATE
    {
        return Err(DecodeError::UnsupportedFormat {
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            sample_rate: spec.sample_rate,
        });
    }

    let samples = reader
        .samples::<i16>()
        .map(|sample| sample.map(|v| v as f32 / PCM16_SCALE))
        .collect::<Result<Vec<f32>, _>>()?;

    if samples.is_empty() {
        return Err(DecodeError::Empty {
            byte_len: bytes.len(),
        });
    }

    Ok(SampleBuffer { samples })
}

/// Decode with the selected mode
pub fn decode(bytes: &[u8], mode: DecodeMode) -> Result<SampleBuffer, DecodeError> {
    match mode {
        DecodeMode::Permissive => decode_wav_bytes(bytes),
        DecodeMode::Strict => decode_wav_strict(bytes),
    }
}
