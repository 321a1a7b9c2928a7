// Decode error types and constants

use crate::error::ErrorCode;
use flutter_rust_bridge::frb;
use log::error;
use std::fmt;

/// Decode error code constants exposed to Dart via FFI
///
/// Error code range: 2001-2004
#[frb(unignore)]
pub struct DecodeErrorCodes {}

#[frb]
impl DecodeErrorCodes {
    /// Byte source could not be read
    pub const UNREADABLE: i32 = 2001;

    /// Decoding produced no samples
    pub const EMPTY: i32 = 2002;

    /// Container is not a valid WAV stream (strict mode)
    pub const MALFORMED: i32 = 2003;

    /// WAV stream is not mono 16-bit PCM at 44100 Hz (strict mode)
    pub const UNSUPPORTED_FORMAT: i32 = 2004;

    /// Get UNREADABLE error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn unreadable() -> i32 {
        Self::UNREADABLE
    }

    /// Get EMPTY error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn empty() -> i32 {
        Self::EMPTY
    }

    /// Get MALFORMED error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn malformed() -> i32 {
        Self::MALFORMED
    }

    /// Get UNSUPPORTED_FORMAT error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn unsupported_format() -> i32 {
        Self::UNSUPPORTED_FORMAT
    }
}

/// Log a decode error with structured context
pub fn log_decode_error(err: &DecodeError, context: &str) {
    error!(
        "Decode error in {}: code={}, component=WavDecoder, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while turning a WAV byte source into a sample buffer
///
/// Any of these aborts the buffer pipeline before spectral work starts.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Reading the byte source failed
    Unreadable { details: String },

    /// No PCM samples follow the header
    Empty { byte_len: usize },

    /// The container could not be parsed
    Malformed { reason: String },

    /// The stream parsed but does not match the mono/16-bit/44.1 kHz contract
    UnsupportedFormat {
        channels: u16,
        bits_per_sample: u16,
        sample_rate: u32,
    },
}

impl ErrorCode for DecodeError {
    fn code(&self) -> i32 {
        match self {
            DecodeError::Unreadable { .. } => DecodeErrorCodes::UNREADABLE,
            DecodeError::Empty { .. } => DecodeErrorCodes::EMPTY,
            DecodeError::Malformed { .. } => DecodeErrorCodes::MALFORMED,
            DecodeError::UnsupportedFormat { .. } => DecodeErrorCodes::UNSUPPORTED_FORMAT,
        }
    }

    fn message(&self) -> String {
        match self {
            DecodeError::Unreadable { details } => {
                format!("Failed to read audio source: {}", details)
            }
            DecodeError::Empty { byte_len } => {
                format!("No PCM samples in {} byte source", byte_len)
            }
            DecodeError::Malformed { reason } => format!("Malformed WAV data: {}", reason),
            DecodeError::UnsupportedFormat {
                channels,
                bits_per_sample,
                sample_rate,
            } => format!(
                "Unsupported WAV format: {} channel(s), {} bit, {} Hz (expected mono 16 bit 44100 Hz)",
                channels, bits_per_sample, sample_rate
            ),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecodeError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for DecodeError {}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::Unreadable {
            details: err.to_string(),
        }
    }
}

impl From<hound::Error> for DecodeError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) => io.into(),
            other => DecodeError::Malformed {
                reason: other.to_string(),
            },
        }
    }
}
