use super::*;

/// Helper to create BufferFeatures for testing
fn create_features(dominant_frequency: f32, decay_time_ms: f32) -> BufferFeatures {
    BufferFeatures {
        peak_amplitude: 0.8,
        peak_index: 0,
        dominant_frequency,
        decay_time_ms,
    }
}

/// Helper to create Classifier with default thresholds (60-180 Hz, 120 ms)
fn create_classifier() -> Classifier {
    Classifier::new(ThresholdSettings::default())
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_buffer_ripe() {
    let verdict = create_classifier().classify_buffer(&create_features(120.0, 200.0));

    assert!(verdict.is_ripe);
    assert_eq!(verdict.frequency_ok, Some(true));
    assert!(verdict.decay_ok);
    assert_close(verdict.confidence, 1.0);
}

#[test]
fn test_buffer_frequency_out_of_band() {
    let verdict = create_classifier().classify_buffer(&create_features(195.0, 200.0));

    assert!(!verdict.is_ripe, "decay alone is not enough for PCM input");
    assert_eq!(verdict.frequency_ok, Some(false));
    assert_close(verdict.confidence, 0.8);
}

#[test]
fn test_buffer_short_decay() {
    let verdict = create_classifier().classify_buffer(&create_features(120.0, 80.0));

    assert!(!verdict.is_ripe);
    assert!(!verdict.decay_ok);
    assert!(!verdict.decays_too_fast);
    assert_close(verdict.confidence, 0.7);
}

#[test]
fn test_buffer_fast_decay_penalty() {
    let verdict = create_classifier().classify_buffer(&create_features(120.0, 4.5));

    assert!(verdict.decays_too_fast);
    assert_close(verdict.confidence, 0.3);

    // Nothing matches and it decays too fast: 0.5 - 0.4
    let verdict = create_classifier().classify_buffer(&create_features(0.0, 4.5));
    assert_close(verdict.confidence, 0.1);
}

#[test]
fn test_penalty_applies_even_when_decay_ok() {
    // A permissive decay threshold below 50 ms still takes the penalty
    let classifier = Classifier::new(ThresholdSettings {
        decay_threshold_ms: 10.0,
        ..Default::default()
    });
    let verdict = classifier.classify_buffer(&create_features(120.0, 30.0));

    assert!(verdict.is_ripe);
    assert!(verdict.decays_too_fast);
    assert_close(verdict.confidence, 0.6);
}

#[test]
fn test_band_edges_inclusive() {
    let classifier = create_classifier();
    assert_eq!(
        classifier
            .classify_buffer(&create_features(60.0, 150.0))
            .frequency_ok,
        Some(true)
    );
    assert_eq!(
        classifier
            .classify_buffer(&create_features(180.0, 150.0))
            .frequency_ok,
        Some(true)
    );
    assert!(classifier.classify_buffer(&create_features(120.0, 120.0)).decay_ok);
}

#[test]
fn test_metering_ripe_and_loud() {
    let verdict = create_classifier().classify_metering(700.0, 0.3);

    assert!(verdict.is_ripe);
    assert_eq!(verdict.frequency_ok, None);
    assert_close(verdict.confidence, 0.8);
}

#[test]
fn test_metering_quiet_short() {
    let verdict = create_classifier().classify_metering(50.0, 0.05);

    assert!(!verdict.is_ripe);
    assert_close(verdict.confidence, 0.4);
}

#[test]
fn test_metering_confidence_is_additive() {
    let classifier = create_classifier();
    let cases = [
        (50.0, 0.05, 0.4),
        (700.0, 0.05, 0.6),
        (50.0, 0.3, 0.6),
        (700.0, 0.3, 0.8),
    ];
    for (decay, peak, expected) in cases {
        let verdict = classifier.classify_metering(decay, peak);
        assert_close(verdict.confidence, expected);
    }
}

#[test]
fn test_confidence_always_in_range() {
    let classifier = create_classifier();
    for frequency in [0.0, 59.0, 60.0, 125.0, 180.0, 500.0] {
        for decay in [0.0, 10.0, 49.9, 50.0, 119.0, 120.0, 300.0] {
            let verdict = classifier.classify_buffer(&create_features(frequency, decay));
            assert!(
                (0.0..=1.0).contains(&verdict.confidence),
                "confidence {} out of range for {} Hz / {} ms",
                verdict.confidence,
                frequency,
                decay
            );
        }
    }
}
