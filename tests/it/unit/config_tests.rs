use pull_refresh::{Config, ConfigError, LabelKind, Labels, Resistance, Tunables};

use crate::helpers::tunables;

#[test]
fn defaults() {
    let t = Tunables::default();
    assert_eq!(t.threshold_distance, 60.0);
    assert_eq!(t.maximum_distance, 80.0);
    assert_eq!(t.reload_distance, 50.0);
    assert_eq!(t.refresh_delay_ms, 500);
    assert!(t.validate().is_ok());
}

#[test]
fn resisted_distance_is_clamped_to_maximum() {
    let config = Config::new(|_| {}).with_tunables(tunables());
    // raw 200 clamped to 150, ratio 200 / 80 = 2.5 -> no damping left
    assert_eq!(config.resisted(200.0), 150.0);
    // ratio 1.25 -> factor 0.5
    assert_eq!(config.resisted(100.0), 50.0);
    assert_eq!(config.resisted(0.0), 0.0);
}

#[test]
fn damping_applies_to_the_clamped_distance() {
    let config = Config::new(|_| {}).with_tunables(tunables());
    // raw 180 clamped to 150, ratio 180 / 80 = 2.25 -> factor 0.9
    assert_eq!(config.resisted(180.0), 135.0);
    // ratio 1.875 -> factor 0.75
    assert_eq!(config.resisted(150.0), 112.5);
}

#[test]
fn custom_resistance_is_used() {
    let config = Config::new(|_| {})
        .with_tunables(tunables())
        .with_resistance(Resistance::new(|_| 1.0));
    assert_eq!(config.resisted(42.0), 42.0);
    assert_eq!(config.resisted(400.0), 150.0);
}

#[test]
fn resisted_distance_never_decreases_and_stays_under_maximum() {
    let config = Config::new(|_| {}).with_tunables(tunables());
    let mut previous = 0.0;
    for raw in (0..=600).map(|d| d as f64 * 0.75) {
        let resisted = config.resisted(raw);
        assert!(resisted >= previous, "{resisted} < {previous} at raw {raw}");
        assert!(resisted <= 150.0);
        previous = resisted;
    }
}

#[test]
fn invalid_tunables_are_rejected() {
    let bad = |patch: fn(&mut Tunables)| {
        let mut t = tunables();
        patch(&mut t);
        t.validate().unwrap_err()
    };
    assert!(matches!(bad(|t| t.threshold_distance = 0.0), ConfigError::Threshold(_)));
    assert!(matches!(bad(|t| t.threshold_distance = f64::NAN), ConfigError::Threshold(_)));
    assert!(matches!(bad(|t| t.maximum_distance = 79.0), ConfigError::Maximum { .. }));
    assert!(matches!(bad(|t| t.maximum_distance = f64::INFINITY), ConfigError::Maximum { .. }));
    assert!(matches!(bad(|t| t.reload_distance = -1.0), ConfigError::Reload(_)));
}

#[test]
fn malformed_json_is_an_error() {
    let err = Tunables::from_json("{ thresholdDistance: }").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("malformed tunables"));
}

#[test]
fn tunables_round_trip_through_camel_case_json() {
    let json = serde_json::to_value(tunables()).unwrap();
    assert_eq!(json["thresholdDistance"], 80.0);
    assert_eq!(json["refreshDelayMs"], 300);
}

#[test]
fn labels_fill_in_missing_fields() {
    let labels: Labels = serde_json::from_str(r#"{ "release": "Let go" }"#).unwrap();
    assert_eq!(labels.text(LabelKind::Release), "Let go");
    assert_eq!(labels.text(LabelKind::Pull), "Pull down to refresh");
    assert_eq!(labels.text(LabelKind::Refreshing), "Refreshing");
}
