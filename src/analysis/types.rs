// Types module - settings and result records shared by both pipelines

use serde::{Deserialize, Serialize};

/// Caller-supplied classification thresholds
///
/// Read-only inside the core. `min_amplitude` is carried for the app's own
/// gating; the analysis floors (0.05 for PCM, 0.001 for metering) are fixed
/// and independent of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThresholdSettings {
    /// Lowest dominant frequency (Hz) accepted as ripe
    pub freq_min: f32,
    /// Highest dominant frequency (Hz) accepted as ripe
    pub freq_max: f32,
    /// Minimum decay time (ms) accepted as ripe
    #[serde(rename = "decayThreshold")]
    pub decay_threshold_ms: f32,
    pub min_amplitude: f32,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            freq_min: 60.0,
            freq_max: 180.0,
            decay_threshold_ms: 120.0,
            min_amplitude: 0.05,
        }
    }
}

impl ThresholdSettings {
    /// Check the settings for values that make a ripe verdict impossible
    ///
    /// Analysis still runs with inconsistent settings; this only exists so
    /// callers and logs can surface the mistake.
    pub fn validate(&self) -> Result<(), String> {
        let finite = [
            self.freq_min,
            self.freq_max,
            self.decay_threshold_ms,
            self.min_amplitude,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err("thresholds must be finite".to_string());
        }
        if self.freq_min > self.freq_max {
            return Err(format!(
                "freq_min ({} Hz) is above freq_max ({} Hz)",
                self.freq_min, self.freq_max
            ));
        }
        if self.decay_threshold_ms < 0.0 || self.min_amplitude < 0.0 {
            return Err("decay threshold and min amplitude must be non-negative".to_string());
        }
        Ok(())
    }
}

/// How an analysis ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisOutcome {
    /// Features were extracted and a verdict was reached
    Classified,
    /// PCM peak under the weak-signal floor
    WeakSignal,
    /// Metering peak under the silence floor
    Silence,
}

/// Output of one analysis pass
///
/// Serialized with the field names the app already stores:
/// `{frequency, amplitude, decayTime, isRipe, confidence, debug, outcome}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Dominant frequency in Hz (fixed estimate for metering input)
    pub frequency: f32,
    /// Peak amplitude, normalized
    pub amplitude: f32,
    #[serde(rename = "decayTime")]
    pub decay_time_ms: f32,
    pub is_ripe: bool,
    /// Heuristic score in [0, 1]
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
    pub outcome: AnalysisOutcome,
}

impl AnalysisResult {
    pub(crate) fn weak_signal(peak_amplitude: f32) -> Self {
        Self {
            frequency: 0.0,
            amplitude: peak_amplitude,
            decay_time_ms: 0.0,
            is_ripe: false,
            confidence: 0.0,
            debug: Some("signal too weak".to_string()),
            outcome: AnalysisOutcome::WeakSignal,
        }
    }

    pub(crate) fn silence(peak_amplitude: f32) -> Self {
        Self {
            frequency: 0.0,
            amplitude: peak_amplitude,
            decay_time_ms: 0.0,
            is_ripe: false,
            confidence: 0.0,
            debug: Some("silence".to_string()),
            outcome: AnalysisOutcome::Silence,
        }
    }

    /// True when the capture carried too little energy to judge
    ///
    /// Callers should prompt for another thump rather than show a verdict.
    pub fn is_inconclusive(&self) -> bool {
        self.outcome != AnalysisOutcome::Classified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ThresholdSettings::default();
        assert_eq!(settings.freq_min, 60.0);
        assert_eq!(settings.freq_max, 180.0);
        assert_eq!(settings.decay_threshold_ms, 120.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_app_field_names() {
        let json = r#"{"freqMin": 70, "freqMax": 150, "decayThreshold": 90}"#;
        let settings: ThresholdSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.freq_min, 70.0);
        assert_eq!(settings.freq_max, 150.0);
        assert_eq!(settings.decay_threshold_ms, 90.0);
        // Missing fields fall back to defaults
        assert_eq!(settings.min_amplitude, 0.05);
    }

    #[test]
    fn test_settings_validation() {
        let inverted = ThresholdSettings {
            freq_min: 200.0,
            freq_max: 100.0,
            ..Default::default()
        };
        assert!(inverted.validate().unwrap_err().contains("freq_min"));

        let negative = ThresholdSettings {
            decay_threshold_ms: -1.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let nan = ThresholdSettings {
            freq_max: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_result_json_shape() {
        let result = AnalysisResult::weak_signal(0.01);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["decayTime"], 0.0);
        assert_eq!(json["isRipe"], false);
        assert_eq!(json["outcome"], "weakSignal");
        assert_eq!(json["debug"], "signal too weak");
        assert!(result.is_inconclusive());
    }
}
