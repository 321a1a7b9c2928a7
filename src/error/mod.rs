// Error types for the thump analysis core
//
// This module defines coded error types for decoding and session operations,
// providing structured error handling with error codes suitable for FFI communication.
//
// Weak-signal and silent captures are not errors: they surface as inconclusive
// `AnalysisResult`s (see `analysis::AnalysisOutcome`).

mod decode;
mod session;

pub use decode::{log_decode_error, DecodeError, DecodeErrorCodes};
pub use session::{log_session_error, SessionError, SessionErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the FFI boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
