// ThumpSession - capture/analysis lifecycle seen from the app
//
// Idle -> Capturing -> Analyzing -> Completed | Failed
//
// The recorder owns the audio session; this type only tracks where the app
// is and holds the metering series while it is being polled. Analysis runs
// synchronously inside `finish_*`, so `Analyzing` is never observable from
// outside. Nothing is retried: a failed or inconclusive capture means the
// user thumps again after `reset`.

use crate::analysis::metering::{MeteringAnalyzer, MeteringSeries};
use crate::analysis::{self, AnalysisResult, ThresholdSettings};
use crate::decoder::{self, DecodeMode, SampleBuffer};
use crate::error::{log_decode_error, log_session_error, ErrorCode, SessionError};

/// Lifecycle state of a thump capture
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Capturing,
    Analyzing,
    Completed(AnalysisResult),
    /// Decode failure; carries the error code and message
    Failed { code: i32, message: String },
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Capturing => "Capturing",
            SessionState::Analyzing => "Analyzing",
            SessionState::Completed(_) => "Completed",
            SessionState::Failed { .. } => "Failed",
        }
    }
}

/// One thump from start of capture to verdict
pub struct ThumpSession {
    state: SessionState,
    settings: ThresholdSettings,
    metering: MeteringSeries,
    metering_analyzer: MeteringAnalyzer,
    decode_mode: DecodeMode,
}

impl ThumpSession {
    pub fn new(settings: ThresholdSettings) -> Self {
        Self {
            state: SessionState::Idle,
            settings,
            metering: MeteringSeries::new(),
            metering_analyzer: MeteringAnalyzer::default(),
            decode_mode: DecodeMode::default(),
        }
    }

    /// Use a polling interval matching the recorder's cadence
    pub fn with_poll_interval_ms(mut self, poll_interval_ms: f32) -> Self {
        self.metering_analyzer = MeteringAnalyzer::new(poll_interval_ms);
        self
    }

    pub fn with_decode_mode(mut self, decode_mode: DecodeMode) -> Self {
        self.decode_mode = decode_mode;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Latest result, if the session completed
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            SessionState::Completed(result) => Some(result),
            _ => None,
        }
    }

    fn invalid(&self, action: &str) -> SessionError {
        let err = SessionError::InvalidTransition {
            state: self.state.name().to_string(),
            action: action.to_string(),
        };
        log_session_error(&err, action);
        err
    }

    /// Idle -> Capturing
    pub fn start_capture(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(self.invalid("start capture"));
        }
        self.metering = MeteringSeries::new();
        self.state = SessionState::Capturing;
        log::debug!("[Session] Capture started");
        Ok(())
    }

    /// Append one polled dB reading while capturing
    pub fn push_metering(&mut self, db: f32) -> Result<(), SessionError> {
        if self.state != SessionState::Capturing {
            return Err(self.invalid("push metering reading"));
        }
        self.metering.push(db);
        Ok(())
    }

    /// Capturing -> Completed, analysing the collected metering series
    pub fn finish_with_metering(&mut self) -> Result<AnalysisResult, SessionError> {
        if self.state != SessionState::Capturing {
            return Err(self.invalid("finish with metering"));
        }
        if self.metering.is_empty() {
            let err = SessionError::NoReadings;
            log_session_error(&err, "finish with metering");
            return Err(err);
        }

        self.state = SessionState::Analyzing;
        let result = self
            .metering_analyzer
            .analyze(self.metering.readings(), &self.settings);
        Ok(self.complete(result))
    }

    /// Capturing -> Completed, analysing a decoded PCM buffer
    ///
    /// Samples go through [`SampleBuffer::from_samples`] first.
    pub fn finish_with_samples(
        &mut self,
        samples: Vec<f32>,
    ) -> Result<AnalysisResult, SessionError> {
        if self.state != SessionState::Capturing {
            return Err(self.invalid("finish with samples"));
        }

        self.state = SessionState::Analyzing;
        let buffer = SampleBuffer::from_samples(samples);
        let result = analysis::analyze_buffer(buffer.samples(), &self.settings);
        Ok(self.complete(result))
    }

    /// Capturing -> Completed | Failed, decoding a recorded WAV first
    ///
    /// A decode failure moves the session to `Failed` and is returned as the
    /// state rather than an error; only an invalid transition is an `Err`.
    pub fn finish_with_wav(&mut self, bytes: &[u8]) -> Result<&SessionState, SessionError> {
        if self.state != SessionState::Capturing {
            return Err(self.invalid("finish with wav"));
        }

        self.state = SessionState::Analyzing;
        self.state = match decoder::decode(bytes, self.decode_mode) {
            Ok(buffer) => {
                SessionState::Completed(analysis::analyze_buffer(buffer.samples(), &self.settings))
            }
            Err(err) => {
                log_decode_error(&err, "ThumpSession::finish_with_wav");
                SessionState::Failed {
                    code: err.code(),
                    message: err.message(),
                }
            }
        };
        Ok(&self.state)
    }

    /// Completed | Failed -> Idle, discarding the previous capture
    pub fn reset(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Completed(_) | SessionState::Failed { .. } => {
                self.metering = MeteringSeries::new();
                self.state = SessionState::Idle;
                Ok(())
            }
            _ => Err(self.invalid("reset")),
        }
    }

    fn complete(&mut self, result: AnalysisResult) -> AnalysisResult {
        log::info!(
            "[Session] Completed: ripe={} confidence={:.2}",
            result.is_ripe,
            result.confidence
        );
        self.state = SessionState::Completed(result.clone());
        result
    }
}
