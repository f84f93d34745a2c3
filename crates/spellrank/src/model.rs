// Learned ranking models.
//
// Models are trained elsewhere and exported as JSON. Two formats are
// understood, selected by the `"kind"` tag of the file:
//
//   {"kind": "gradient_boosted_trees", "num_features": 51, "num_class": 6,
//    "base_margin": 0.0, "trees": [{"nodes": [...]}, ...]}
//
//   {"kind": "logistic", "weights": [...], "bias": 0.0}
//
// Tree `i` contributes to class `i % num_class`. A split node sends the
// input left (`yes`) when `features[feature] < threshold`, right (`no`)
// otherwise, and to `missing` when the value is NaN.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;

/// A trained model mapping a fixed-length feature vector to scores.
pub trait ModelEvaluator: Send + Sync {
    /// Number of input features the model was trained on.
    fn num_features(&self) -> usize;

    /// Number of values [`evaluate`](Self::evaluate) returns.
    fn num_outputs(&self) -> usize;

    /// Evaluate the model. The input must have exactly
    /// [`num_features`](Self::num_features) values.
    fn evaluate(&self, features: &[f32]) -> Result<Vec<f32>, ModelError>;
}

fn check_input(expected: usize, features: &[f32]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::FeatureCountMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(margins: &[f32]) -> Vec<f32> {
    let max = margins.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = margins.iter().map(|m| (m - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

// ============================================================================
// Gradient boosted trees
// ============================================================================

/// One node of a regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f32,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf {
        leaf: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk from the root to a leaf, giving up after one step per node.
    fn predict(&self, index: usize, features: &[f32]) -> Result<f32, ModelError> {
        let mut node = 0;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(node) {
                Some(TreeNode::Leaf { leaf }) => return Ok(*leaf),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                }) => {
                    let value = features.get(*feature).copied().unwrap_or(f32::NAN);
                    node = if value.is_nan() {
                        *missing
                    } else if value < *threshold {
                        *yes
                    } else {
                        *no
                    };
                }
                None => {
                    return Err(ModelError::MalformedTree {
                        tree: index,
                        reason: format!("node {node} does not exist"),
                    });
                }
            }
        }
        Err(ModelError::MalformedTree {
            tree: index,
            reason: "cycle between nodes".to_string(),
        })
    }

    fn validate(&self, index: usize, num_features: usize) -> Result<(), ModelError> {
        let malformed = |reason: String| ModelError::MalformedTree {
            tree: index,
            reason,
        };
        if self.nodes.is_empty() {
            return Err(malformed("no nodes".to_string()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                yes,
                no,
                missing,
                ..
            } = node
            {
                if *feature >= num_features {
                    return Err(malformed(format!(
                        "node {i} splits on feature {feature}, model has {num_features}"
                    )));
                }
                // Children must come after their parent, which rules out cycles.
                for child in [*yes, *no, *missing] {
                    if child <= i || child >= self.nodes.len() {
                        return Err(malformed(format!("node {i} has invalid child {child}")));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Tree ensemble classifier.
///
/// With `num_class == 1` the output is a single sigmoid probability;
/// otherwise one softmax probability per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedTrees {
    pub num_features: usize,
    #[serde(default = "default_num_class")]
    pub num_class: usize,
    #[serde(default, alias = "base_score")]
    pub base_margin: f32,
    pub trees: Vec<Tree>,
}

fn default_num_class() -> usize {
    1
}

impl GradientBoostedTrees {
    /// Check class count, feature indices and node links.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.num_class == 0 {
            return Err(ModelError::Invalid("num_class must be at least 1".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.num_features)?;
        }
        Ok(())
    }

    /// Raw per-class margins before the output transform.
    pub fn margins(&self, features: &[f32]) -> Result<Vec<f32>, ModelError> {
        check_input(self.num_features, features)?;
        if self.num_class == 0 {
            return Err(ModelError::Invalid("num_class must be at least 1".to_string()));
        }
        let mut margins = vec![self.base_margin; self.num_class];
        for (i, tree) in self.trees.iter().enumerate() {
            margins[i % self.num_class] += tree.predict(i, features)?;
        }
        Ok(margins)
    }
}

impl ModelEvaluator for GradientBoostedTrees {
    fn num_features(&self) -> usize {
        self.num_features
    }

    fn num_outputs(&self) -> usize {
        self.num_class
    }

    fn evaluate(&self, features: &[f32]) -> Result<Vec<f32>, ModelError> {
        let margins = self.margins(features)?;
        if self.num_class == 1 {
            Ok(vec![sigmoid(margins[0])])
        } else {
            Ok(softmax(&margins))
        }
    }
}

// ============================================================================
// Logistic regression
// ============================================================================

/// Binary logistic regression: `sigmoid(w . x + b)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f32>,
    #[serde(default)]
    pub bias: f32,
}

impl ModelEvaluator for LogisticModel {
    fn num_features(&self) -> usize {
        self.weights.len()
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn evaluate(&self, features: &[f32]) -> Result<Vec<f32>, ModelError> {
        check_input(self.weights.len(), features)?;
        let z: f32 = self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.bias;
        Ok(vec![sigmoid(z)])
    }
}

// ============================================================================
// Loading
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelFile {
    GradientBoostedTrees(GradientBoostedTrees),
    Logistic(LogisticModel),
}

/// Parse a model from its JSON representation.
pub fn model_from_json(json: &str) -> Result<Arc<dyn ModelEvaluator>, ModelError> {
    match serde_json::from_str(json)? {
        ModelFile::GradientBoostedTrees(model) => {
            model.validate()?;
            debug!(
                trees = model.trees.len(),
                num_class = model.num_class,
                num_features = model.num_features,
                "loaded tree ensemble"
            );
            Ok(Arc::new(model))
        }
        ModelFile::Logistic(model) => {
            debug!(num_features = model.weights.len(), "loaded logistic model");
            Ok(Arc::new(model))
        }
    }
}

/// Read and parse a model file.
pub fn load_model(path: &Path) -> Result<Arc<dyn ModelEvaluator>, ModelError> {
    let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    model_from_json(&json)
}
