//! Gradient-boosted tree classifier loaded from XGBoost's JSON model format.
//!
//! Only the pieces needed to score a binary classifier are read:
//!
//! | JSON path | Use |
//! |-----------|-----|
//! | `learner.objective.name` | link function (logistic or raw margin) |
//! | `learner.learner_model_param.base_score` | starting margin |
//! | `learner.learner_model_param.num_feature` | schema check |
//! | `learner.feature_names` | schema check (optional) |
//! | `learner.gradient_booster.model.trees[]` | node arrays |
//!
//! Node arrays follow XGBoost's layout: node `i` is a leaf when
//! `left_children[i] == -1`, in which case `split_conditions[i]` holds the leaf
//! value. Splits compare in `f32` (`x < condition` goes left) and missing
//! values follow `default_left`.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use churn_types::{ClassProbabilities, FeatureRecord};

use crate::schema::check_schema;
use crate::{Classifier, ModelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// `binary:logistic` / `reg:logistic`: `base_score` is a probability.
    Logistic,
    /// `binary:logitraw`: `base_score` is already a margin.
    LogitRaw,
}

impl Objective {
    fn parse(name: &str) -> Result<Self, ModelError> {
        match name {
            "binary:logistic" | "reg:logistic" => Ok(Objective::Logistic),
            "binary:logitraw" => Ok(Objective::LogitRaw),
            other => Err(ModelError::UnsupportedObjective(other.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Objective::Logistic => "binary:logistic",
            Objective::LogitRaw => "binary:logitraw",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        default_left: bool,
    },
    Leaf(f32),
}

#[derive(Debug, Clone, PartialEq)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_doc(tree: usize, doc: TreeDoc, num_feature: usize) -> Result<Self, ModelError> {
        let invalid = |reason: String| ModelError::InvalidTree { tree, reason };

        let n = doc.left_children.len();
        if n == 0 {
            return Err(invalid("tree has no nodes".to_string()));
        }
        let lengths = [
            ("right_children", doc.right_children.len()),
            ("split_indices", doc.split_indices.len()),
            ("split_conditions", doc.split_conditions.len()),
            ("default_left", doc.default_left.len()),
        ];
        if let Some((name, len)) = lengths.iter().find(|(_, len)| *len != n) {
            return Err(invalid(format!(
                "{name} has {len} entries, left_children has {n}"
            )));
        }
        if doc.split_type.iter().any(|&kind| kind != 0) {
            return Err(invalid("categorical splits are not supported".to_string()));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let left = doc.left_children[i];
            let right = doc.right_children[i];
            if left == -1 {
                if right != -1 {
                    return Err(invalid(format!("node {i} has only a right child")));
                }
                nodes.push(Node::Leaf(doc.split_conditions[i]));
                continue;
            }

            // Children are always allocated after their parent, which also rules out cycles.
            let child = |raw: i32| -> Result<usize, ModelError> {
                usize::try_from(raw)
                    .ok()
                    .filter(|&c| c > i && c < n)
                    .ok_or_else(|| invalid(format!("node {i} has invalid child index {raw}")))
            };
            let feature = doc.split_indices[i] as usize;
            if feature >= num_feature {
                return Err(invalid(format!(
                    "node {i} splits on feature {feature}, model has {num_feature}"
                )));
            }
            nodes.push(Node::Split {
                feature,
                threshold: doc.split_conditions[i],
                left: child(left)?,
                right: child(right)?,
                default_left: doc.default_left[i].is_set(),
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_value(&self, row: &[f32]) -> f32 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let x = row[feature];
                    idx = if x.is_nan() {
                        if default_left { left } else { right }
                    } else if x < threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// A validated XGBoost tree ensemble for binary classification.
#[derive(Debug, Clone, PartialEq)]
pub struct XgbModel {
    objective: Objective,
    base_margin: f64,
    trees: Vec<Tree>,
    feature_names: Vec<String>,
}

impl XgbModel {
    /// Read, parse, and validate a model artifact.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let bytes = fs::read(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: ModelDocument =
            serde_json::from_slice(&bytes).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let model = Self::from_document(doc)?;
        tracing::info!(
            path = %path.display(),
            trees = model.trees.len(),
            objective = model.objective.as_str(),
            "Loaded model"
        );
        Ok(model)
    }

    /// Parse a model from an in-memory JSON string.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let doc: ModelDocument =
            serde_json::from_str(json).map_err(|source| ModelError::Parse {
                path: "<memory>".into(),
                source,
            })?;
        Self::from_document(doc)
    }

    fn from_document(doc: ModelDocument) -> Result<Self, ModelError> {
        let learner = doc.learner;

        let objective = Objective::parse(&learner.objective.name)?;

        let booster = learner.gradient_booster;
        if booster.name != "gbtree" {
            return Err(ModelError::UnsupportedBooster(booster.name));
        }
        let Some(tree_model) = booster.model else {
            return Err(ModelError::UnsupportedBooster(booster.name));
        };

        let params = learner.learner_model_param;
        let num_class = params.num_class.as_ref().map_or(Ok(0), |raw| {
            raw.as_usize().ok_or_else(|| ModelError::InvalidParam {
                name: "num_class",
                value: raw.to_string(),
            })
        })?;
        if num_class > 1 {
            return Err(ModelError::NotBinary(num_class));
        }
        let num_feature =
            params
                .num_feature
                .as_usize()
                .ok_or_else(|| ModelError::InvalidParam {
                    name: "num_feature",
                    value: params.num_feature.to_string(),
                })?;
        check_schema(Some(learner.feature_names.as_slice()), num_feature)?;

        let base_score = params
            .base_score
            .as_f64()
            .filter(|score| score.is_finite())
            .ok_or_else(|| ModelError::InvalidBaseScore(params.base_score.to_string()))?;
        let base_margin = match objective {
            Objective::Logistic => {
                if !(0.0 < base_score && base_score < 1.0) {
                    return Err(ModelError::InvalidBaseScore(base_score.to_string()));
                }
                (base_score / (1.0 - base_score)).ln()
            }
            Objective::LogitRaw => base_score,
        };

        let trees = tree_model
            .trees
            .into_iter()
            .enumerate()
            .map(|(idx, tree)| Tree::from_doc(idx, tree, num_feature))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            objective,
            base_margin,
            trees,
            feature_names: learner.feature_names,
        })
    }

    #[must_use]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Raw ensemble output before the sigmoid.
    #[must_use]
    pub fn margin(&self, record: &FeatureRecord) -> f64 {
        let row = record.to_f32_row();
        self.trees
            .iter()
            .map(|tree| f64::from(tree.leaf_value(&row)))
            .sum::<f64>()
            + self.base_margin
    }
}

impl Classifier for XgbModel {
    fn predict_proba(&self, record: &FeatureRecord) -> Result<ClassProbabilities, ModelError> {
        let churn = sigmoid(self.margin(record));
        Ok(ClassProbabilities::from_churn(churn)?)
    }

    fn summary(&self) -> String {
        format!("xgboost {} ({} trees)", self.objective.as_str(), self.trees.len())
    }
}

/// Logistic function, stable for large negative margins.
fn sigmoid(margin: f64) -> f64 {
    if margin >= 0.0 {
        1.0 / (1.0 + (-margin).exp())
    } else {
        let e = margin.exp();
        e / (1.0 + e)
    }
}

// ============================================================================
// Serialized layout
// ============================================================================

#[derive(Debug, Deserialize)]
struct ModelDocument {
    learner: LearnerDoc,
}

#[derive(Debug, Deserialize)]
struct LearnerDoc {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: BoosterDoc,
    learner_model_param: ModelParamDoc,
    objective: ObjectiveDoc,
}

#[derive(Debug, Deserialize)]
struct BoosterDoc {
    name: String,
    model: Option<TreeModelDoc>,
}

#[derive(Debug, Deserialize)]
struct TreeModelDoc {
    trees: Vec<TreeDoc>,
}

#[derive(Debug, Deserialize)]
struct TreeDoc {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<u32>,
    split_conditions: Vec<f32>,
    default_left: Vec<FlagDoc>,
    #[serde(default)]
    split_type: Vec<u8>,
}

/// Older exports write `default_left` as 0/1, newer ones as booleans.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum FlagDoc {
    Bool(bool),
    Int(u8),
}

impl FlagDoc {
    fn is_set(self) -> bool {
        match self {
            FlagDoc::Bool(b) => b,
            FlagDoc::Int(i) => i != 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelParamDoc {
    base_score: ScalarDoc,
    num_feature: ScalarDoc,
    num_class: Option<ScalarDoc>,
}

/// XGBoost stores numeric params as strings (`"5E-1"`, sometimes `"[5E-1]"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ScalarDoc {
    Number(f64),
    Text(String),
}

impl ScalarDoc {
    fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarDoc::Number(n) => Some(*n),
            ScalarDoc::Text(s) => s
                .trim()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse()
                .ok(),
        }
    }

    fn as_usize(&self) -> Option<usize> {
        let value = self.as_f64()?;
        (value >= 0.0 && value.fract() == 0.0).then_some(value as usize)
    }
}

impl fmt::Display for ScalarDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarDoc::Number(n) => write!(f, "{n}"),
            ScalarDoc::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ObjectiveDoc {
    name: String,
}
