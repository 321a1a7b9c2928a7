// Session error types and constants

use crate::error::ErrorCode;
use flutter_rust_bridge::frb;
use log::error;
use std::fmt;

/// Session error code constants exposed to Dart via FFI
///
/// Error code range: 3001-3002
#[frb(unignore)]
pub struct SessionErrorCodes {}

#[frb]
impl SessionErrorCodes {
    /// Operation not allowed in the current session state
    pub const INVALID_TRANSITION: i32 = 3001;

    /// Capture finished without any metering readings
    pub const NO_READINGS: i32 = 3002;

    /// Get INVALID_TRANSITION error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn invalid_transition() -> i32 {
        Self::INVALID_TRANSITION
    }

    /// Get NO_READINGS error code
    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn no_readings() -> i32 {
        Self::NO_READINGS
    }
}

/// Log a session error with structured context
pub fn log_session_error(err: &SessionError, context: &str) {
    error!(
        "Session error in {}: code={}, component=ThumpSession, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by the capture/analysis session state machine
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The requested operation is not valid from `state`
    InvalidTransition { state: String, action: String },

    /// Metering capture was finished with an empty series
    NoReadings,
}

impl ErrorCode for SessionError {
    fn code(&self) -> i32 {
        match self {
            SessionError::InvalidTransition { .. } => SessionErrorCodes::INVALID_TRANSITION,
            SessionError::NoReadings => SessionErrorCodes::NO_READINGS,
        }
    }

    fn message(&self) -> String {
        match self {
            SessionError::InvalidTransition { state, action } => {
                format!("Cannot {} while session is {}", action, state)
            }
            SessionError::NoReadings => {
                "Capture finished without metering readings. Re-thump and try again.".to_string()
            }
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SessionError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for SessionError {}
