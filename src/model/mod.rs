//! Stats model document schema
//!
//! Typed records for the model documents produced by [`crate::AutoModel`].
//! Field declaration order fixes the key order of the serialized JSON.
//!
//! ## Schema Overview
//!
//! ```text
//! TaskModel ──< ModelNode (Run, [Session], [Subject], Dataset)
//!                   │
//!                   ├── Transformations (run only)
//!                   ├── NodeModel ── Hrf (run only)
//!                   └──< ContrastSpec
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use bids_automodel::model::{make_passthrough_contrast, Level, ModelNode, ModelType};
//!
//! let labels = vec!["go".to_string(), "stop".to_string()];
//! let run = ModelNode::run(&labels);
//! assert_eq!(run.model().unwrap().x(), ["trial_type.go", "trial_type.stop"]);
//!
//! let names = vec!["run_go_vs_others".to_string()];
//! let dataset = make_passthrough_contrast(Level::Dataset, &names, ModelType::Glm)?;
//! assert_eq!(dataset.contrast_names(), ["dataset_run_go_vs_others"]);
//! # Ok::<(), bids_automodel::Error>(())
//! ```

mod contrast;
mod node;
mod number;
mod task_model;

pub use contrast::{
    make_passthrough_contrast, one_vs_rest_contrasts, one_vs_rest_weights, ContrastSpec, T_TEST,
};
pub use node::{
    trial_type_factors, Hrf, HrfParameters, Instruction, Level, ModelNode, ModelType, NodeModel,
    Transformations, DOUBLE_GAMMA, TRANSFORMER, TRIAL_TYPE,
};
pub use task_model::{ModelInput, TaskModel, BIDS_MODEL_VERSION};
