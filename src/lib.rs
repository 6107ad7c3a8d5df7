//! # bids-automodel: Default Stats Models for BIDS Datasets
//!
//! Derives a default statistical model for every task of a dataset from the
//! trial types observed in its runs. Each model is a run-level GLM over the
//! factorized `trial_type` column, convolved with a double-gamma HRF, and
//! optionally a chain of one-vs-rest contrasts aggregated up through the
//! session, subject, and dataset levels.
//!
//! Dataset indexing and event loading live behind the [`dataset::Dataset`]
//! trait; this crate performs no I/O of its own.
//!
//! ## Example Usage
//!
//! ```rust
//! use bids_automodel::dataset::{MemoryDataset, RunNode};
//! use bids_automodel::AutoModel;
//!
//! let dataset = MemoryDataset::new("ds001").with_run(
//!     RunNode::builder("rest")
//!         .subject("01")
//!         .trial_types(&["go", "stop", "go"])
//!         .build()?,
//! );
//!
//! let models = AutoModel::builder()
//!     .scan_length(300.0)
//!     .one_vs_rest(true)
//!     .build()
//!     .build_models(&dataset)?;
//!
//! assert_eq!(models[0].name(), "ds001_rest");
//! assert_eq!(models[0].nodes().len(), 2); // Run, Dataset
//! println!("{}", models[0].to_json_pretty()?);
//! # Ok::<(), bids_automodel::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod builder;
pub mod dataset;
pub mod error;
pub mod model;

pub use builder::{build_models, AutoModel, AutoModelBuilder};
pub use error::{Error, Result};
