//! Configuration management for analysis parameters
//!
//! Thresholds, metering cadence and decoder strictness can be adjusted via a
//! JSON file without recompiling. Missing sections fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::metering::DEFAULT_POLL_INTERVAL_MS;
use crate::analysis::ThresholdSettings;
use crate::decoder::DecodeMode;
use crate::session::ThumpSession;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub thresholds: ThresholdSettings,
    pub metering: MeteringConfig,
    pub decoder: DecoderConfig,
}

/// Metering pipeline parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteringConfig {
    /// Recorder polling interval; must match the actual cadence
    pub poll_interval_ms: f32,
}

impl Default for MeteringConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// WAV decoder parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub mode: DecodeMode,
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Returns
    /// The parsed configuration, or defaults if the file is missing or invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration for non-Android platforms
    #[cfg(not(target_os = "android"))]
    pub fn load() -> Self {
        Self::load_from_file("assets/thump_config.json")
    }

    /// Build a session wired with this configuration
    pub fn session(&self) -> ThumpSession {
        ThumpSession::new(self.thresholds)
            .with_poll_interval_ms(self.metering.poll_interval_ms)
            .with_decode_mode(self.decoder.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.thresholds.freq_min, 60.0);
        assert_eq!(config.thresholds.decay_threshold_ms, 120.0);
        assert_eq!(config.metering.poll_interval_ms, 50.0);
        assert_eq!(config.decoder.mode, DecodeMode::Permissive);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{"thresholds": {"freqMax": 160}, "decoder": {"mode": "strict"}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.thresholds.freq_max, 160.0);
        assert_eq!(config.thresholds.freq_min, 60.0);
        assert_eq!(config.decoder.mode, DecodeMode::Strict);
        assert_eq!(config.metering.poll_interval_ms, 50.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.thresholds, config.thresholds);
        assert_eq!(
            parsed.metering.poll_interval_ms,
            config.metering.poll_interval_ms
        );
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_from_file("/nonexistent/thump_config.json");
        assert_eq!(config.thresholds, ThresholdSettings::default());
    }

    #[test]
    fn test_invalid_json_uses_defaults() {
        let path = std::env::temp_dir().join(format!("thump-config-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let config = AppConfig::load_from_file(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(config.metering.poll_interval_ms, 50.0);
    }

    #[test]
    fn test_negative_poll_interval_keeps_decay_positive() {
        let json = r#"{"metering": {"poll_interval_ms": -50}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        let mut session = config.session();
        session.start_capture().unwrap();
        for db in [-10.0, -10.0, -10.0, -30.0] {
            session.push_metering(db).unwrap();
        }
        let result = session.finish_with_metering().unwrap();
        assert_eq!(result.decay_time_ms, 150.0);
    }
}
