//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use churn_engine::{App, AppOptions, ThemeStore};
use churn_model::Classifier;

/// Two-tree XGBoost export over the 20 churn features.
///
/// Tree 0 splits on contract type (< 0.5 → +0.8, else −0.6); tree 1 splits on
/// monthly charge (< 50 → −0.2, else +0.3). `base_score` is 0.5, so the
/// default form scores `sigmoid(0.6)` = 64.57%.
pub fn fixture_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tests")
        .join("fixtures")
        .join("two_tree_model.json")
}

pub fn fixture_model_json() -> serde_json::Value {
    let raw = fs::read_to_string(fixture_model_path()).expect("fixture is readable");
    serde_json::from_str(&raw).expect("fixture is valid JSON")
}

pub fn load_fixture_classifier() -> Arc<dyn Classifier> {
    churn_model::load_classifier(&fixture_model_path()).expect("fixture model loads")
}

/// An app that never writes the theme preset to disk.
pub fn app_with(classifier: Arc<dyn Classifier>) -> App {
    App::new(
        classifier,
        AppOptions {
            theme_store: ThemeStore::Memory,
            ..AppOptions::default()
        },
    )
}
