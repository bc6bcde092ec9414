//! Deterministic classifiers for tests and offline demos.

use std::fmt;

use churn_types::{ClassProbabilities, FeatureRecord, ProbabilityError};

use crate::{Classifier, ModelError};

/// Returns the same churn probability for every record.
#[derive(Debug, Clone, Copy)]
pub struct ConstantClassifier {
    probabilities: ClassProbabilities,
}

impl ConstantClassifier {
    pub fn new(churn: f64) -> Result<Self, ProbabilityError> {
        Ok(Self {
            probabilities: ClassProbabilities::from_churn(churn)?,
        })
    }
}

impl Classifier for ConstantClassifier {
    fn predict_proba(&self, _record: &FeatureRecord) -> Result<ClassProbabilities, ModelError> {
        Ok(self.probabilities)
    }

    fn summary(&self) -> String {
        format!("constant p={}", self.probabilities.churn().value())
    }
}

/// Computes the churn probability with a closure over the record.
///
/// The closure's output is validated like any other model output, so a stub
/// that returns `1.7` surfaces as [`ModelError::Probability`].
pub struct FnClassifier<F> {
    score: F,
}

impl<F> FnClassifier<F>
where
    F: Fn(&FeatureRecord) -> f64 + Send + Sync,
{
    pub fn new(score: F) -> Self {
        Self { score }
    }
}

impl<F> fmt::Debug for FnClassifier<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnClassifier").finish_non_exhaustive()
    }
}

impl<F> Classifier for FnClassifier<F>
where
    F: Fn(&FeatureRecord) -> f64 + Send + Sync,
{
    fn predict_proba(&self, record: &FeatureRecord) -> Result<ClassProbabilities, ModelError> {
        Ok(ClassProbabilities::from_churn((self.score)(record))?)
    }

    fn summary(&self) -> String {
        "stub".to_string()
    }
}
