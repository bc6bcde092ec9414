use std::path::PathBuf;

use thiserror::Error;

use churn_types::ProbabilityError;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported objective '{0}'; expected binary:logistic, reg:logistic, or binary:logitraw")]
    UnsupportedObjective(String),
    #[error("unsupported booster '{0}'; only gbtree models can be evaluated")]
    UnsupportedBooster(String),
    #[error("model is multi-class (num_class = {0}); a binary classifier is required")]
    NotBinary(usize),
    #[error("invalid base_score '{0}'")]
    InvalidBaseScore(String),
    #[error("invalid model parameter {name} = '{value}'")]
    InvalidParam { name: &'static str, value: String },
    #[error("tree {tree} is malformed: {reason}")]
    InvalidTree { tree: usize, reason: String },
    #[error("model expects {found} features, the encoder produces {expected}")]
    FeatureCount { expected: usize, found: usize },
    #[error("feature {index} is '{found}' in the model but '{expected}' in the encoder")]
    SchemaMismatch {
        index: usize,
        expected: &'static str,
        found: String,
    },
    #[error("classifier returned an invalid probability: {0}")]
    Probability(#[from] ProbabilityError),
}

impl ModelError {
    /// Artifact path for IO and parse failures.
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ModelError::Read { path, .. } | ModelError::Parse { path, .. } => Some(path),
            _ => None,
        }
    }
}
