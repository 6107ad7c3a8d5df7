//! Contrast generation
//!
//! Run-level one-vs-rest t-contrasts and the identity passthrough contrasts
//! that carry them up through aggregation levels.

use serde::{Deserialize, Serialize};

use super::node::{trial_type_factors, Level, ModelNode, ModelType, NodeModel};
use crate::{Error, Result};

/// Statistical test used by every generated contrast.
pub const T_TEST: &str = "t";

/// A linear combination of named regressors.
///
/// Invariant: `weights().len() == condition_list().len()`, checked on
/// construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "RawContrastSpec")]
pub struct ContrastSpec {
    name: String,
    condition_list: Vec<String>,
    #[serde(serialize_with = "super::number::serialize_seq")]
    weights: Vec<f64>,
    test: String,
}

/// Unchecked wire form of `ContrastSpec`.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawContrastSpec {
    name: String,
    condition_list: Vec<String>,
    weights: Vec<f64>,
    test: String,
}

impl TryFrom<RawContrastSpec> for ContrastSpec {
    type Error = Error;

    fn try_from(raw: RawContrastSpec) -> Result<Self> {
        let mut contrast = Self::t(raw.name, raw.condition_list, raw.weights)?;
        contrast.test = raw.test;
        Ok(contrast)
    }
}

impl ContrastSpec {
    /// Create a t-contrast.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `weights` and `condition_list` differ
    /// in length.
    pub fn t(
        name: impl Into<String>,
        condition_list: Vec<String>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        let name = name.into();
        if weights.len() != condition_list.len() {
            return Err(Error::InvalidInput(format!(
                "contrast {name}: {} weights for {} conditions",
                weights.len(),
                condition_list.len()
            )));
        }
        Ok(Self {
            name,
            condition_list,
            weights,
            test: T_TEST.to_string(),
        })
    }

    /// Contrast name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regressors the weights apply to.
    #[must_use]
    pub fn condition_list(&self) -> &[String] {
        &self.condition_list
    }

    /// Weights, aligned with `condition_list`.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Test statistic.
    #[must_use]
    pub fn test(&self) -> &str {
        &self.test
    }
}

/// Weights contrasting `target` against every other label.
///
/// The target gets 1.0 and each other label `-1/(k-1)`, so the vector sums to
/// zero for k > 1. With a single label there is nothing to contrast against and
/// the weight stays 1.0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn one_vs_rest_weights(trial_types: &[String], target: &str) -> Vec<f64> {
    let k = trial_types.len();
    if k <= 1 {
        return vec![1.0; k];
    }
    let rest = -1.0 / (k - 1) as f64;
    trial_types
        .iter()
        .map(|tt| if tt == target { 1.0 } else { rest })
        .collect()
}

/// One run-level t-contrast per trial type, each against all the others.
///
/// `trial_types` must be sorted and deduplicated; it fixes the regressor order
/// shared by every contrast.
///
/// # Errors
///
/// Returns `Error::InvalidInput` if a contrast would break the length
/// invariant.
pub fn one_vs_rest_contrasts(trial_types: &[String]) -> Result<Vec<ContrastSpec>> {
    let factors = trial_type_factors(trial_types);
    let many = trial_types.len() > 1;

    trial_types
        .iter()
        .map(|tt| {
            let name = if many {
                format!("{}_{tt}_vs_others", Level::Run.prefix())
            } else {
                format!("{}_{tt}", Level::Run.prefix())
            };
            ContrastSpec::t(name, factors.clone(), one_vs_rest_weights(trial_types, tt))
        })
        .collect()
}

/// Build an aggregation node that passes each inherited contrast through
/// unchanged.
///
/// The node's design matrix is the inherited contrast names, and for every
/// name `cn` it carries an identity contrast `<level>_<cn>` with weight 1.
///
/// # Errors
///
/// Returns `Error::InvalidInput` for `Level::Run`, which has nothing below it
/// to aggregate.
pub fn make_passthrough_contrast(
    level: Level,
    contrast_names: &[String],
    model_type: ModelType,
) -> Result<ModelNode> {
    if level == Level::Run {
        return Err(Error::InvalidInput(
            "passthrough contrasts need an aggregation level, got Run".to_string(),
        ));
    }

    let contrasts = contrast_names
        .iter()
        .map(|cn| {
            ContrastSpec::t(format!("{}_{cn}", level.prefix()), vec![cn.clone()], vec![1.0])
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ModelNode::new(level)
        .with_model(NodeModel::new(model_type, contrast_names.to_vec()))
        .with_contrasts(contrasts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_weights_two_labels() {
        let tts = labels(&["go", "stop"]);
        assert_eq!(one_vs_rest_weights(&tts, "go"), vec![1.0, -1.0]);
        assert_eq!(one_vs_rest_weights(&tts, "stop"), vec![-1.0, 1.0]);
    }

    #[test]
    fn test_weights_three_labels_sum_to_zero() {
        let tts = labels(&["a", "b", "c"]);
        let weights = one_vs_rest_weights(&tts, "b");
        assert_eq!(weights, vec![-0.5, 1.0, -0.5]);
        assert!(weights.iter().sum::<f64>().abs() < 1e-12);
    }

    #[test]
    fn test_weights_single_label() {
        let tts = labels(&["only"]);
        assert_eq!(one_vs_rest_weights(&tts, "only"), vec![1.0]);
    }

    #[test]
    fn test_weights_no_labels() {
        assert!(one_vs_rest_weights(&[], "x").is_empty());
    }

    #[test]
    fn test_one_vs_rest_names() {
        let contrasts = one_vs_rest_contrasts(&labels(&["go", "stop"])).unwrap();
        let names: Vec<_> = contrasts.iter().map(ContrastSpec::name).collect();
        assert_eq!(names, ["run_go_vs_others", "run_stop_vs_others"]);
        for c in &contrasts {
            assert_eq!(c.condition_list(), ["trial_type.go", "trial_type.stop"]);
            assert_eq!(c.test(), "t");
        }
    }

    #[test]
    fn test_one_vs_rest_single_label_name() {
        let contrasts = one_vs_rest_contrasts(&labels(&["only"])).unwrap();
        assert_eq!(contrasts.len(), 1);
        assert_eq!(contrasts[0].name(), "run_only");
        assert_eq!(contrasts[0].weights(), [1.0]);
    }

    #[test]
    fn test_passthrough_session() {
        let names = labels(&["run_go_vs_others", "run_stop_vs_others"]);
        let node = make_passthrough_contrast(Level::Session, &names, ModelType::Meta).unwrap();

        assert_eq!(node.level(), Level::Session);
        assert_eq!(node.name(), "Session");
        assert_eq!(node.group_by(), ["session", "contrast"]);
        assert_eq!(node.model().unwrap().model_type(), ModelType::Meta);
        assert_eq!(node.model().unwrap().x(), names.as_slice());
        assert!(node.transformations().is_none());

        let contrasts = node.contrasts().unwrap();
        assert_eq!(contrasts[0].name(), "session_run_go_vs_others");
        assert_eq!(contrasts[0].condition_list(), ["run_go_vs_others"]);
        assert_eq!(contrasts[0].weights(), [1.0]);
    }

    #[test]
    fn test_passthrough_rejects_run_level() {
        let result = make_passthrough_contrast(Level::Run, &[], ModelType::Glm);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_deserialize_rejects_length_mismatch() {
        let json = r#"{"Name":"x","ConditionList":["a","b"],"Weights":[1.0],"Test":"t"}"#;
        let err = serde_json::from_str::<ContrastSpec>(json).unwrap_err();
        assert!(err.to_string().contains("1 weights for 2 conditions"));
    }

    #[test]
    fn test_deserialize_keeps_test_statistic() {
        let json = r#"{"Name":"x","ConditionList":["a"],"Weights":[1],"Test":"F"}"#;
        let contrast: ContrastSpec = serde_json::from_str(json).unwrap();
        assert_eq!(contrast.test(), "F");
        assert_eq!(contrast.weights(), [1.0]);
    }

    #[test]
    fn test_weights_serialize_whole_numbers_as_integers() {
        let passthrough = ContrastSpec::t("dataset_a", labels(&["a"]), vec![1.0]).unwrap();
        assert!(serde_json::to_string(&passthrough)
            .unwrap()
            .contains(r#""Weights":[1]"#));

        let three = one_vs_rest_contrasts(&labels(&["a", "b", "c"])).unwrap();
        assert!(serde_json::to_string(&three[0])
            .unwrap()
            .contains(r#""Weights":[1,-0.5,-0.5]"#));
    }

    #[test]
    fn test_contrast_spec_length_mismatch() {
        let result = ContrastSpec::t("bad", labels(&["a", "b"]), vec![1.0]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
