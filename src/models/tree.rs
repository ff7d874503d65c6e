//! Gradient-boosted regression tree ensemble.
//!
//! Each tree is a flat node array rooted at index 0. A split node sends a row
//! left when `x[feature] < threshold`; NaN values follow `default_left`.
//! The prediction is `base_score + Σ leaf(tree, x)`.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{BundleError, PredictionError};
use crate::models::{Predictor, check_len};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        #[serde(default)]
        default_left: bool,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("empty tree".to_string());
        }
        let n = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split { feature, threshold, left, right, .. } => {
                    if feature >= n_features {
                        return Err(format!("node {idx} splits on feature {feature} of {n_features}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold"));
                    }
                    // Children must point forward, which also rules out cycles.
                    if left <= idx || right <= idx || left >= n || right >= n {
                        return Err(format!("node {idx} has invalid children ({left}, {right})"));
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {idx} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }

    fn leaf_value(&self, row: &DVector<f64>) -> Result<f64, PredictionError> {
        let mut idx = 0usize;
        // A validated tree reaches a leaf in fewer than `nodes.len()` hops.
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(idx).ok_or_else(|| PredictionError::Model {
                reason: format!("tree node {idx} does not exist"),
            })?;
            match *node {
                TreeNode::Leaf { value } => return Ok(value),
                TreeNode::Split { feature, threshold, left, right, default_left } => {
                    let x = *row.get(feature).ok_or_else(|| PredictionError::Model {
                        reason: format!("tree splits on feature {feature}, row has {}", row.len()),
                    })?;
                    let go_left = if x.is_nan() { default_left } else { x < threshold };
                    idx = if go_left { left } else { right };
                }
            }
        }
        Err(PredictionError::Model {
            reason: "tree traversal did not reach a leaf".to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub base_score: f64,
    pub n_features: usize,
    pub trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    pub fn validate(&self, n_features: usize) -> Result<(), BundleError> {
        if self.n_features != n_features {
            return Err(BundleError::DimensionMismatch {
                component: "model",
                expected: n_features,
                actual: self.n_features,
            });
        }
        if !self.base_score.is_finite() {
            return Err(BundleError::Invalid {
                component: "model",
                reason: "non-finite base score".to_string(),
            });
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features).map_err(|reason| BundleError::Invalid {
                component: "model",
                reason: format!("tree {i}: {reason}"),
            })?;
        }
        Ok(())
    }
}

impl Predictor for TreeEnsemble {
    fn predict(&self, row: &DVector<f64>) -> Result<f64, PredictionError> {
        check_len("model", self.n_features, row)?;
        let mut sum = self.base_score;
        for tree in &self.trees {
            sum += tree.leaf_value(row)?;
        }
        Ok(sum)
    }

    fn input_len(&self) -> Option<usize> {
        Some(self.n_features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f64, lo: f64, hi: f64) -> RegressionTree {
        RegressionTree {
            nodes: vec![
                TreeNode::Split { feature, threshold, left: 1, right: 2, default_left: true },
                TreeNode::Leaf { value: lo },
                TreeNode::Leaf { value: hi },
            ],
        }
    }

    #[test]
    fn sums_leaves_over_trees() {
        let ensemble = TreeEnsemble {
            base_score: 100.0,
            n_features: 2,
            trees: vec![stump(0, 0.5, -10.0, 10.0), stump(1, 0.0, 1.0, 2.0)],
        };
        let y = ensemble.predict(&DVector::from_vec(vec![1.0, -1.0])).unwrap();
        assert_eq!(y, 111.0);
        let y = ensemble.predict(&DVector::from_vec(vec![0.0, 3.0])).unwrap();
        assert_eq!(y, 92.0);
    }

    #[test]
    fn nan_follows_default_direction() {
        let ensemble = TreeEnsemble {
            base_score: 0.0,
            n_features: 1,
            trees: vec![stump(0, 0.5, -1.0, 1.0)],
        };
        let y = ensemble.predict(&DVector::from_vec(vec![f64::NAN])).unwrap();
        assert_eq!(y, -1.0);
    }

    #[test]
    fn validate_rejects_backward_children() {
        let ensemble = TreeEnsemble {
            base_score: 0.0,
            n_features: 1,
            trees: vec![RegressionTree {
                nodes: vec![
                    TreeNode::Split { feature: 0, threshold: 0.0, left: 0, right: 1, default_left: false },
                    TreeNode::Leaf { value: 1.0 },
                ],
            }],
        };
        assert!(ensemble.validate(1).is_err());
    }

    #[test]
    fn validate_rejects_feature_count_mismatch() {
        let ensemble = TreeEnsemble {
            base_score: 0.0,
            n_features: 3,
            trees: vec![],
        };
        assert_eq!(
            ensemble.validate(2),
            Err(BundleError::DimensionMismatch { component: "model", expected: 2, actual: 3 })
        );
    }

    #[test]
    fn parses_nodes_from_json() {
        let json = r#"{
            "base_score": 1.0,
            "n_features": 1,
            "trees": [{"nodes": [
                {"type": "split", "feature": 0, "threshold": 2.0, "left": 1, "right": 2},
                {"type": "leaf", "value": 5.0},
                {"type": "leaf", "value": 7.0}
            ]}]
        }"#;
        let ensemble: TreeEnsemble = serde_json::from_str(json).unwrap();
        assert!(ensemble.validate(1).is_ok());
        assert_eq!(ensemble.predict(&DVector::from_vec(vec![3.0])).unwrap(), 8.0);
    }
}
