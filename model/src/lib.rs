//! Churn classifiers.
//!
//! [`Classifier`] is the seam between the form and whatever produces a churn
//! probability. The production implementation is [`XgbModel`], a gradient
//! boosted tree ensemble read from XGBoost's JSON export and validated against
//! the encoder's column schema at load time. [`ConstantClassifier`] and
//! [`FnClassifier`] stand in for it in tests.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use churn_types::{ClassProbabilities, FeatureRecord};

mod error;
mod schema;
mod stub;
mod xgboost;

pub use error::ModelError;
pub use schema::check_schema;
pub use stub::{ConstantClassifier, FnClassifier};
pub use xgboost::{Objective, XgbModel};

/// A pre-trained binary churn classifier.
///
/// Implementations are read-only after construction and may be shared across
/// threads behind an `Arc`.
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Score a single encoded record.
    ///
    /// Returns `(p_no_churn, p_churn)`; the pair is validated by
    /// [`ClassProbabilities`], so callers never see values outside `[0, 1]`.
    fn predict_proba(&self, record: &FeatureRecord) -> Result<ClassProbabilities, ModelError>;

    /// Short human-readable description for logs and the status line.
    fn summary(&self) -> String;
}

/// Load the model artifact at `path` as a shareable classifier.
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, ModelError> {
    let model = XgbModel::load(path)?;
    Ok(Arc::new(model))
}
