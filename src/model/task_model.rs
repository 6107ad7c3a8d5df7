//! Task Model - root document of a generated stats model

use serde::{Deserialize, Serialize};

use super::node::ModelNode;
use crate::Result;

/// Version of the stats model schema the documents target.
pub const BIDS_MODEL_VERSION: &str = "1.0.0";

/// Input selector of a model: which task's runs it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInput {
    /// Selected task names.
    pub task: Vec<String>,
}

/// A complete model for one task of a dataset.
///
/// The first node is always the run level; aggregation nodes follow in
/// ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskModel {
    name: String,
    description: String,
    #[serde(rename = "BIDSModelVersion")]
    bids_model_version: String,
    input: ModelInput,
    nodes: Vec<ModelNode>,
}

impl TaskModel {
    /// Create the model for `task` of dataset `dataset_name`.
    ///
    /// # Arguments
    ///
    /// * `dataset_name` - Root name of the dataset
    /// * `task` - Task the model selects
    /// * `nodes` - Model graph, run node first
    #[must_use]
    pub fn new(dataset_name: &str, task: &str, nodes: Vec<ModelNode>) -> Self {
        Self {
            name: format!("{dataset_name}_{task}"),
            description: format!(
                "Autogenerated model for the {task} task from {dataset_name}"
            ),
            bids_model_version: BIDS_MODEL_VERSION.to_string(),
            input: ModelInput {
                task: vec![task.to_string()],
            },
            nodes,
        }
    }

    /// Model name, `<dataset>_<task>`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Schema version.
    #[must_use]
    pub fn bids_model_version(&self) -> &str {
        &self.bids_model_version
    }

    /// Input selector.
    #[must_use]
    pub const fn input(&self) -> &ModelInput {
        &self.input
    }

    /// Model graph nodes.
    #[must_use]
    pub fn nodes(&self) -> &[ModelNode] {
        &self.nodes
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
