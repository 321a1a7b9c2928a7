// Thump Core - acoustic ripeness analysis
// Turns a recorded thump (PCM WAV or dB metering series) into a ripeness verdict

// Module declarations
pub mod analysis;
pub mod api;
pub mod config;
pub mod decoder;
pub mod error;
pub mod fixtures;
pub mod session;

pub use analysis::{
    analyze_buffer, analyze_metering, analyze_wav, AnalysisOutcome, AnalysisResult,
    ThresholdSettings,
};
pub use decoder::{decode_wav, decode_wav_bytes, DecodeMode, SampleBuffer};
pub use error::{DecodeError, ErrorCode, SessionError};
pub use session::{SessionState, ThumpSession};

/// Initialize Android logging
#[cfg(target_os = "android")]
fn init_logging() {
    use tracing_subscriber::prelude::*;

    match tracing_android::layer("ThumpCore") {
        Ok(layer) => {
            let _ = tracing_subscriber::registry().with(layer).try_init();
        }
        Err(err) => eprintln!("Failed to create Android log layer: {err}"),
    }
}

#[cfg(not(target_os = "android"))]
fn init_logging() {
    // Also captures `log` records through the tracing-log bridge
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init();
}
