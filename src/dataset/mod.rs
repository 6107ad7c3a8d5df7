//! Dataset access for model generation
//!
//! The builder reads a dataset only through the [`Dataset`] trait: task
//! enumeration, session/subject counts, and run-level variables. Adapters over
//! a real indexing layer implement it; [`MemoryDataset`] is the in-memory
//! implementation.
//!
//! # Example
//!
//! ```rust
//! use bids_automodel::dataset::{Dataset, MemoryDataset, RunNode};
//!
//! let dataset = MemoryDataset::new("ds001").with_run(
//!     RunNode::builder("rest")
//!         .subject("01")
//!         .duration(300.0)
//!         .trial_types(&["stop", "go", "go"])
//!         .build()?,
//! );
//!
//! assert_eq!(dataset.tasks(), ["rest"]);
//! assert_eq!(dataset.load_run_trial_types("rest", None)?, ["go", "stop"]);
//! # Ok::<(), bids_automodel::Error>(())
//! ```

mod memory;
mod variables;

pub use memory::MemoryDataset;
pub use variables::{events_schema, RunNode, RunNodeBuilder};

use std::collections::BTreeSet;

use crate::Result;

/// Read-only view of an indexed dataset.
pub trait Dataset {
    /// Root name of the dataset.
    fn name(&self) -> &str;

    /// Distinct task identifiers, in the index's enumeration order.
    fn tasks(&self) -> Vec<String>;

    /// Number of distinct sessions.
    fn session_count(&self) -> usize;

    /// Number of distinct subjects.
    fn subject_count(&self) -> usize;

    /// Load run-level variables for every run of `task`.
    ///
    /// `scan_length` (seconds) is used for runs whose duration cannot be
    /// read from the scan itself.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the builder propagates these unchanged.
    fn load_run_variables(&self, task: &str, scan_length: Option<f64>) -> Result<Vec<RunNode>>;

    /// Sorted, deduplicated `trial_type` labels observed across the task's runs.
    ///
    /// # Errors
    ///
    /// Propagates errors from `load_run_variables` and from reading the
    /// `trial_type` column.
    fn load_run_trial_types(&self, task: &str, scan_length: Option<f64>) -> Result<Vec<String>> {
        collect_trial_types(self, task, scan_length)
    }
}

/// Concatenate the `trial_type` values of every run of `task`, then
/// deduplicate and sort them.
///
/// Runs without a `trial_type` column contribute nothing.
///
/// # Errors
///
/// Propagates collaborator errors unchanged.
pub fn collect_trial_types<D: Dataset + ?Sized>(
    dataset: &D,
    task: &str,
    scan_length: Option<f64>,
) -> Result<Vec<String>> {
    let runs = dataset.load_run_variables(task, scan_length)?;

    let mut labels = BTreeSet::new();
    for run in &runs {
        labels.extend(run.trial_type_values()?);
    }

    Ok(labels.into_iter().collect())
}
