//! Default model generation
//!
//! For each task: a run-level GLM over the factorized trial types, and, when
//! one-vs-rest contrasts are enabled, passthrough nodes that carry those
//! contrasts up to the dataset level.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::dataset::Dataset;
use crate::model::{
    make_passthrough_contrast, one_vs_rest_contrasts, Level, ModelNode, ModelType, TaskModel,
};
use crate::Result;

/// Options for default model generation.
///
/// Deserializes from JSON with missing fields defaulted, e.g.
/// `{"one_vs_rest": true}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoModel {
    scan_length: Option<f64>,
    one_vs_rest: bool,
}

impl AutoModel {
    /// Create with default options: no scan length, no contrasts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder
    #[must_use]
    pub fn builder() -> AutoModelBuilder {
        AutoModelBuilder::default()
    }

    /// Scan length passed to the dataset for runs without a readable duration.
    #[must_use]
    pub const fn scan_length(&self) -> Option<f64> {
        self.scan_length
    }

    /// Whether one-vs-rest contrasts and aggregation nodes are generated.
    #[must_use]
    pub const fn one_vs_rest(&self) -> bool {
        self.one_vs_rest
    }

    /// Build one model per task of `dataset`, in the dataset's task order.
    ///
    /// # Errors
    ///
    /// Propagates any error from the dataset unchanged.
    pub fn build_models<D: Dataset + ?Sized>(&self, dataset: &D) -> Result<Vec<TaskModel>> {
        let tasks = dataset.tasks();
        let mut models = Vec::with_capacity(tasks.len());

        for task in &tasks {
            models.push(self.build_task_model(dataset, task)?);
        }

        info!(
            dataset = dataset.name(),
            models = models.len(),
            one_vs_rest = self.one_vs_rest,
            "Built default models"
        );
        Ok(models)
    }

    fn build_task_model<D: Dataset + ?Sized>(&self, dataset: &D, task: &str) -> Result<TaskModel> {
        let trial_types = dataset.load_run_trial_types(task, self.scan_length)?;
        debug!(task, trial_types = trial_types.len(), "Loaded trial types");

        let mut run = ModelNode::run(&trial_types);
        if self.one_vs_rest {
            run = run.with_contrasts(one_vs_rest_contrasts(&trial_types)?);
        }
        let mut nodes = vec![run];

        if self.one_vs_rest {
            if dataset.session_count() > 1 {
                push_passthrough(&mut nodes, Level::Session, ModelType::Meta)?;
            }
            if dataset.subject_count() > 1 {
                push_passthrough(&mut nodes, Level::Subject, ModelType::Meta)?;
            }
            push_passthrough(&mut nodes, Level::Dataset, ModelType::Glm)?;
        }

        Ok(TaskModel::new(dataset.name(), task, nodes))
    }
}

/// Append a passthrough node aggregating the contrasts of the last node.
fn push_passthrough(nodes: &mut Vec<ModelNode>, level: Level, model_type: ModelType) -> Result<()> {
    let names = nodes.last().map(ModelNode::contrast_names).unwrap_or_default();
    trace!(%level, contrasts = names.len(), "Adding passthrough node");
    nodes.push(make_passthrough_contrast(level, &names, model_type)?);
    Ok(())
}

/// Builder for `AutoModel`.
#[derive(Debug, Default)]
pub struct AutoModelBuilder {
    scan_length: Option<f64>,
    one_vs_rest: bool,
}

impl AutoModelBuilder {
    /// Set the fallback scan length in seconds.
    #[must_use]
    pub const fn scan_length(mut self, seconds: f64) -> Self {
        self.scan_length = Some(seconds);
        self
    }

    /// Enable or disable one-vs-rest contrasts.
    #[must_use]
    pub const fn one_vs_rest(mut self, enabled: bool) -> Self {
        self.one_vs_rest = enabled;
        self
    }

    /// Build the `AutoModel`.
    #[must_use]
    pub const fn build(self) -> AutoModel {
        AutoModel {
            scan_length: self.scan_length,
            one_vs_rest: self.one_vs_rest,
        }
    }
}

/// Build one default model per task of `dataset`.
///
/// Shorthand for `AutoModel` with the given options.
///
/// # Errors
///
/// Propagates any error from the dataset unchanged.
pub fn build_models<D: Dataset + ?Sized>(
    dataset: &D,
    scan_length: Option<f64>,
    one_vs_rest: bool,
) -> Result<Vec<TaskModel>> {
    AutoModel {
        scan_length,
        one_vs_rest,
    }
    .build_models(dataset)
}
