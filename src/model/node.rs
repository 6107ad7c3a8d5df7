//! Model Node - one analysis level of a stats model

use serde::{Deserialize, Serialize};

use super::ContrastSpec;

/// Name of the regressor produced by factorizing `trial_type`.
pub const TRIAL_TYPE: &str = "trial_type";

/// Transformer identifier understood by the downstream stats-model runner.
pub const TRANSFORMER: &str = "pybids-transforms-v1";

/// Canonical hemodynamic response model applied at the run level.
pub const DOUBLE_GAMMA: &str = "DoubleGamma";

/// Analysis level of a model node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Single scan run.
    Run,
    /// Runs aggregated within a session.
    Session,
    /// Sessions (or runs) aggregated within a subject.
    Subject,
    /// Everything aggregated across the dataset.
    Dataset,
}

impl Level {
    /// Level name as it appears in the model document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Run => "Run",
            Self::Session => "Session",
            Self::Subject => "Subject",
            Self::Dataset => "Dataset",
        }
    }

    /// Lowercase level name, used as the contrast name prefix.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Session => "session",
            Self::Subject => "subject",
            Self::Dataset => "dataset",
        }
    }

    /// Grouping keys for this level.
    ///
    /// Aggregation levels group by `contrast` so that each inherited contrast
    /// is estimated separately.
    #[must_use]
    pub fn group_by(self) -> Vec<String> {
        let keys: &[&str] = match self {
            Self::Run => &["run", "subject"],
            Self::Session => &["session", "contrast"],
            Self::Subject => &["subject", "contrast"],
            Self::Dataset => &["contrast"],
        };
        keys.iter().map(|k| (*k).to_string()).collect()
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimator used by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// General linear model.
    Glm,
    /// Meta-analytic combination of lower-level estimates.
    Meta,
}

/// Double-gamma HRF parameters. Fixed, not user-configurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HrfParameters {
    /// Time to peak (seconds).
    #[serde(serialize_with = "super::number::serialize")]
    pub peak_delay: f64,
    /// Peak dispersion.
    #[serde(serialize_with = "super::number::serialize")]
    pub peak_dispersion: f64,
    /// Time to undershoot (seconds).
    #[serde(serialize_with = "super::number::serialize")]
    pub undershoot_delay: f64,
    /// Undershoot dispersion.
    #[serde(serialize_with = "super::number::serialize")]
    pub undershoot_dispersion: f64,
    /// Peak to undershoot amplitude ratio.
    #[serde(serialize_with = "super::number::serialize")]
    pub peak_undershoot_ratio: f64,
}

impl HrfParameters {
    /// The canonical double-gamma parameters.
    pub const CANONICAL: Self = Self {
        peak_delay: 3.0,
        peak_dispersion: 6.0,
        undershoot_delay: 10.0,
        undershoot_dispersion: 12.0,
        peak_undershoot_ratio: 0.2,
    };
}

impl Default for HrfParameters {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Convolution of regressors with a hemodynamic response function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Hrf {
    variables: Vec<String>,
    model: String,
    parameters: HrfParameters,
}

impl Hrf {
    /// Convolve `variables` with the canonical double-gamma HRF.
    #[must_use]
    pub fn double_gamma(variables: Vec<String>) -> Self {
        Self {
            variables,
            model: DOUBLE_GAMMA.to_string(),
            parameters: HrfParameters::CANONICAL,
        }
    }

    /// Regressors that get convolved.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// HRF model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// HRF parameters.
    #[must_use]
    pub const fn parameters(&self) -> &HrfParameters {
        &self.parameters
    }
}

/// The `Model` block of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeModel {
    #[serde(rename = "Type")]
    model_type: ModelType,
    #[serde(rename = "X")]
    x: Vec<String>,
    #[serde(rename = "HRF", default, skip_serializing_if = "Option::is_none")]
    hrf: Option<Hrf>,
}

impl NodeModel {
    /// Create a model block without HRF convolution.
    #[must_use]
    pub fn new(model_type: ModelType, x: Vec<String>) -> Self {
        Self {
            model_type,
            x,
            hrf: None,
        }
    }

    /// Attach an HRF convolution.
    #[must_use]
    pub fn with_hrf(mut self, hrf: Hrf) -> Self {
        self.hrf = Some(hrf);
        self
    }

    /// Estimator type.
    #[must_use]
    pub const fn model_type(&self) -> ModelType {
        self.model_type
    }

    /// Design matrix columns.
    #[must_use]
    pub fn x(&self) -> &[String] {
        &self.x
    }

    /// HRF convolution, if any.
    #[must_use]
    pub const fn hrf(&self) -> Option<&Hrf> {
        self.hrf.as_ref()
    }
}

/// A single transformation instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instruction {
    /// Transformation name.
    pub name: String,
    /// Input column.
    pub input: String,
}

/// Variable transformations applied before model fitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transformations {
    transformer: String,
    instructions: Vec<Instruction>,
}

impl Transformations {
    /// Factorize the `trial_type` column into one indicator per level.
    #[must_use]
    pub fn factor_trial_type() -> Self {
        Self {
            transformer: TRANSFORMER.to_string(),
            instructions: vec![Instruction {
                name: "Factor".to_string(),
                input: TRIAL_TYPE.to_string(),
            }],
        }
    }

    /// Transformer identifier.
    #[must_use]
    pub fn transformer(&self) -> &str {
        &self.transformer
    }

    /// Ordered instructions.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

/// One node of a stats model graph.
///
/// Optional blocks are omitted from the serialized document when absent, so a
/// run node built without contrasts carries no `Contrasts` key at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelNode {
    level: Level,
    name: String,
    group_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transformations: Option<Transformations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<NodeModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contrasts: Option<Vec<ContrastSpec>>,
}

impl ModelNode {
    /// Create a bare node for `level`, named after the level and grouped by
    /// the level's default keys.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            name: level.as_str().to_string(),
            group_by: level.group_by(),
            transformations: None,
            model: None,
            contrasts: None,
        }
    }

    /// Build the run-level node for the given trial-type labels.
    ///
    /// Labels are expected sorted and deduplicated; regressor order follows
    /// them exactly.
    #[must_use]
    pub fn run(trial_types: &[String]) -> Self {
        let factors = trial_type_factors(trial_types);
        let model = NodeModel::new(ModelType::Glm, factors.clone())
            .with_hrf(Hrf::double_gamma(factors));
        Self::new(Level::Run)
            .with_transformations(Transformations::factor_trial_type())
            .with_model(model)
    }

    /// Set the transformations block.
    #[must_use]
    pub fn with_transformations(mut self, transformations: Transformations) -> Self {
        self.transformations = Some(transformations);
        self
    }

    /// Set the model block.
    #[must_use]
    pub fn with_model(mut self, model: NodeModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Set the contrasts block.
    #[must_use]
    pub fn with_contrasts(mut self, contrasts: Vec<ContrastSpec>) -> Self {
        self.contrasts = Some(contrasts);
        self
    }

    /// Analysis level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grouping keys.
    #[must_use]
    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    /// Transformations, if any.
    #[must_use]
    pub const fn transformations(&self) -> Option<&Transformations> {
        self.transformations.as_ref()
    }

    /// Model block, if any.
    #[must_use]
    pub const fn model(&self) -> Option<&NodeModel> {
        self.model.as_ref()
    }

    /// Contrasts, if any.
    #[must_use]
    pub fn contrasts(&self) -> Option<&[ContrastSpec]> {
        self.contrasts.as_deref()
    }

    /// Names of this node's contrasts; empty when the node has none.
    #[must_use]
    pub fn contrast_names(&self) -> Vec<String> {
        self.contrasts
            .iter()
            .flatten()
            .map(|c| c.name().to_string())
            .collect()
    }
}

/// Regressor names produced by factorizing `trial_type`: `trial_type.<label>`.
#[must_use]
pub fn trial_type_factors(trial_types: &[String]) -> Vec<String> {
    trial_types
        .iter()
        .map(|tt| format!("{TRIAL_TYPE}.{tt}"))
        .collect()
}
