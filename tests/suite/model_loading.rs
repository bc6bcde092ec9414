//! Startup model loading against real exports on disk.

use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

use churn_model::{ModelError, XgbModel, load_classifier};
use churn_types::FeatureRecord;

use crate::common::{fixture_model_json, fixture_model_path};

fn write_model(doc: &Value) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    fs::write(&path, doc.to_string()).unwrap();
    (dir, path)
}

#[test]
fn fixture_matches_encoder_schema() {
    let model = XgbModel::load(&fixture_model_path()).unwrap();
    assert_eq!(model.tree_count(), 2);
    let columns: Vec<&str> = FeatureRecord::columns().to_vec();
    let names: Vec<&str> = model.feature_names().iter().map(String::as_str).collect();
    assert_eq!(names, columns);
}

#[test]
fn renamed_feature_fails_the_load() {
    let mut doc = fixture_model_json();
    doc["learner"]["feature_names"][0] = json!("account length");
    let (_dir, path) = write_model(&doc);

    let err = load_classifier(&path).unwrap_err();
    assert!(
        matches!(err, ModelError::SchemaMismatch { index: 0, .. }),
        "{err}"
    );
    assert_eq!(
        err.to_string(),
        "feature 0 is 'account length' in the model but 'account length (in months)' in the encoder"
    );
}

#[test]
fn nineteen_feature_model_is_rejected() {
    let mut doc = fixture_model_json();
    let names = doc["learner"]["feature_names"].as_array_mut().unwrap();
    names.pop();
    doc["learner"]["learner_model_param"]["num_feature"] = json!("19");
    let (_dir, path) = write_model(&doc);

    let err = load_classifier(&path).unwrap_err();
    assert!(matches!(err, ModelError::FeatureCount { .. }), "{err}");
}

#[test]
fn categorical_splits_are_refused() {
    let mut doc = fixture_model_json();
    doc["learner"]["gradient_booster"]["model"]["trees"][0]["split_type"] = json!([1, 0, 0]);
    let (_dir, path) = write_model(&doc);

    let err = load_classifier(&path).unwrap_err();
    assert!(matches!(err, ModelError::InvalidTree { tree: 0, .. }), "{err}");
}

#[test]
fn multiclass_model_is_refused() {
    let mut doc = fixture_model_json();
    doc["learner"]["learner_model_param"]["num_class"] = json!("3");
    let (_dir, path) = write_model(&doc);

    let err = load_classifier(&path).unwrap_err();
    assert!(matches!(err, ModelError::NotBinary(3)), "{err}");
}

#[test]
fn non_json_artifact_reports_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("best_XGB_model.pkl");
    fs::write(&path, [0x80, 0x04, 0x95]).unwrap();

    let err = load_classifier(&path).unwrap_err();
    assert!(matches!(err, ModelError::Parse { .. }), "{err}");
    assert_eq!(err.path(), Some(&path));
}
