//! In-memory dataset built from run nodes.
//!
//! Holds everything up front; nothing is read lazily.

use super::{Dataset, RunNode};
use crate::{Error, Result};

/// In-memory dataset.
///
/// Tasks are enumerated in the order they are first seen; sessions and
/// subjects are counted as distinct entity values across all runs.
///
/// # Example
///
/// ```rust
/// use bids_automodel::dataset::{Dataset, MemoryDataset, RunNode};
///
/// let mut dataset = MemoryDataset::new("ds002");
/// for subject in ["01", "02"] {
///     dataset.add_run(RunNode::builder("nback").subject(subject).build()?);
/// }
/// assert_eq!(dataset.subject_count(), 2);
/// assert_eq!(dataset.session_count(), 0);
/// # Ok::<(), bids_automodel::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDataset {
    name: String,
    runs: Vec<RunNode>,
}

impl MemoryDataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runs: Vec::new(),
        }
    }

    /// Add a run, builder style.
    #[must_use]
    pub fn with_run(mut self, run: RunNode) -> Self {
        self.runs.push(run);
        self
    }

    /// Add a run.
    pub fn add_run(&mut self, run: RunNode) {
        self.runs.push(run);
    }

    /// All runs, in insertion order.
    #[must_use]
    pub fn runs(&self) -> &[RunNode] {
        &self.runs
    }

    /// Number of runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Check if the dataset has no runs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    fn distinct(&self, key: &str) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for value in self.runs.iter().filter_map(|r| r.entity(key)) {
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
        seen
    }
}

impl Dataset for MemoryDataset {
    fn name(&self) -> &str {
        &self.name
    }

    fn tasks(&self) -> Vec<String> {
        self.distinct("task").into_iter().map(str::to_owned).collect()
    }

    fn session_count(&self) -> usize {
        self.distinct("session").len()
    }

    fn subject_count(&self) -> usize {
        self.distinct("subject").len()
    }

    fn load_run_variables(&self, task: &str, scan_length: Option<f64>) -> Result<Vec<RunNode>> {
        self.runs
            .iter()
            .filter(|run| run.task() == Some(task))
            .map(|run| match (run.duration(), scan_length) {
                (Some(_), _) => Ok(run.clone()),
                (None, Some(seconds)) => Ok(run.clone().with_duration(seconds)),
                (None, None) => Err(Error::ScanLength {
                    task: task.to_string(),
                    run: run.label(),
                }),
            })
            .collect()
    }
}
