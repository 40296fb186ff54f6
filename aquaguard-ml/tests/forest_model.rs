//! Forest loaded from disk and plugged into the monitor

use std::io::Write;

use aquaguard_core::{Classifier, MonitorConfig, MonitorService, SpeciesModel};
use aquaguard_ml::{MLError, RandomForest};
use tempfile::NamedTempFile;

// DO <= 10 votes "bawal", otherwise " NILA " (labels exported unnormalized)
const EXPORT: &str = r#"{
    "n_features": 3,
    "classes": ["bawal", " NILA "],
    "trees": [
        { "nodes": [
            { "split": { "feature": 0, "threshold": 10.0, "left": 1, "right": 2 } },
            { "leaf": { "class": 0 } },
            { "leaf": { "class": 1 } }
        ] }
    ]
}"#;

fn export_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(EXPORT.as_bytes()).unwrap();
    file
}

fn monitor_with_forest() -> MonitorService {
    let file = export_file();
    let forest = RandomForest::load(file.path()).unwrap();
    MonitorService::new(Classifier::with_model(Box::new(forest)))
}

#[test]
fn model_species_joins_rule_matches() {
    let monitor = monitor_with_forest();
    let result = monitor.submit_reading(25.0, 4.0, 7.0).unwrap();

    assert_eq!(
        result.species(),
        ["Bawal", "Gurame", "Lele", "Mas", "Nila", "Patin"]
    );
}

#[test]
fn model_label_is_normalized_and_deduplicated() {
    let monitor = monitor_with_forest();
    let result = monitor.submit_reading(28.0, 12.0, 7.0).unwrap();

    assert_eq!(result.len(), 5);
    assert_eq!(result.species().iter().filter(|s| s.as_str() == "Nila").count(), 1);
}

#[test]
fn out_of_range_input_skips_model() {
    let monitor = monitor_with_forest();
    let result = monitor.submit_reading(50.0, 25.0, 1.0).unwrap();

    assert!(result.is_empty());
    assert!(monitor.current_state().last_reading.is_some());
}

#[test]
fn forest_through_config() {
    let file = export_file();
    let forest = RandomForest::load(file.path()).unwrap();
    let config = MonitorConfig::from_json_str(r#"{ "min_matches": 3 }"#).unwrap();

    let monitor = MonitorService::from_config(&config, Some(Box::new(forest))).unwrap();
    // At 21°C all three ranges hold only for mas and nila
    let result = monitor.submit_reading(21.0, 4.0, 7.0).unwrap();
    assert_eq!(result.species(), ["Bawal", "Mas", "Nila"]);
}

#[test]
fn missing_export_falls_back_to_rules() {
    let loaded = RandomForest::load("/nonexistent/forest.json");
    assert!(matches!(loaded, Err(MLError::Io(_))));

    let model = loaded.ok().map(|f| Box::new(f) as Box<dyn SpeciesModel>);
    let monitor = MonitorService::new(Classifier::new(
        Default::default(),
        aquaguard_core::ModelAdapter::from_option(model),
    ));

    let result = monitor.submit_reading(25.0, 4.0, 7.0).unwrap();
    assert_eq!(result.len(), 5);
    assert!(!monitor.classifier().adapter().is_loaded());
}

#[test]
fn truncated_export_is_a_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&EXPORT.as_bytes()[..40]).unwrap();

    assert!(matches!(RandomForest::load(file.path()), Err(MLError::Parse(_))));
}
