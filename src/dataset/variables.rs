//! Run-level variable nodes backed by Arrow event tables.

use std::collections::BTreeMap;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

use crate::model::TRIAL_TYPE;
use crate::{Error, Result};

/// Schema of an events table: `onset`, `duration`, `trial_type`.
#[must_use]
pub fn events_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("onset", DataType::Float64, false),
        Field::new("duration", DataType::Float64, false),
        Field::new(TRIAL_TYPE, DataType::Utf8, true),
    ]))
}

/// Variables of a single scan run.
///
/// Entities (`subject`, `session`, `task`, `run`) identify the run; the
/// events table holds one row per event.
#[derive(Debug, Clone)]
pub struct RunNode {
    entities: BTreeMap<String, String>,
    duration: Option<f64>,
    events: RecordBatch,
}

impl RunNode {
    /// Create a run node from entities and an events table.
    #[must_use]
    pub fn new(entities: BTreeMap<String, String>, events: RecordBatch) -> Self {
        Self {
            entities,
            duration: None,
            events,
        }
    }

    /// Start building a run of `task`.
    #[must_use]
    pub fn builder(task: impl Into<String>) -> RunNodeBuilder {
        RunNodeBuilder::new(task)
    }

    /// Set the scan duration in seconds.
    #[must_use]
    pub const fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Look up an entity value.
    #[must_use]
    pub fn entity(&self, key: &str) -> Option<&str> {
        self.entities.get(key).map(String::as_str)
    }

    /// All entities, ordered by key.
    #[must_use]
    pub const fn entities(&self) -> &BTreeMap<String, String> {
        &self.entities
    }

    /// Task entity.
    #[must_use]
    pub fn task(&self) -> Option<&str> {
        self.entity("task")
    }

    /// Subject entity.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.entity("subject")
    }

    /// Session entity.
    #[must_use]
    pub fn session(&self) -> Option<&str> {
        self.entity("session")
    }

    /// Scan duration in seconds, if known.
    #[must_use]
    pub const fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Events table.
    #[must_use]
    pub const fn events(&self) -> &RecordBatch {
        &self.events
    }

    /// BIDS-style label, e.g. `sub-01_ses-1_task-rest_run-2`.
    #[must_use]
    pub fn label(&self) -> String {
        [("sub", "subject"), ("ses", "session"), ("task", "task"), ("run", "run")]
            .iter()
            .filter_map(|(short, key)| self.entity(key).map(|v| format!("{short}-{v}")))
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Values of the `trial_type` column, in row order.
    ///
    /// A run without a `trial_type` column yields no values. Null entries are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns `Error::Variables` if the column is not a string column.
    pub fn trial_type_values(&self) -> Result<Vec<String>> {
        let Some(column) = self.events.column_by_name(TRIAL_TYPE) else {
            return Ok(Vec::new());
        };

        if let Some(values) = column.as_string_opt::<i32>() {
            return Ok(values.iter().flatten().map(str::to_owned).collect());
        }
        if let Some(values) = column.as_string_opt::<i64>() {
            return Ok(values.iter().flatten().map(str::to_owned).collect());
        }

        Err(Error::Variables(format!(
            "{}: {TRIAL_TYPE} column has type {}, expected strings",
            self.label(),
            column.data_type()
        )))
    }
}

/// Builder for `RunNode`.
#[derive(Debug)]
pub struct RunNodeBuilder {
    entities: BTreeMap<String, String>,
    duration: Option<f64>,
    events: Option<RecordBatch>,
    trial_types: Option<Vec<String>>,
}

impl RunNodeBuilder {
    /// Create a builder for a run of `task`.
    #[must_use]
    pub fn new(task: impl Into<String>) -> Self {
        let mut entities = BTreeMap::new();
        entities.insert("task".to_string(), task.into());
        Self {
            entities,
            duration: None,
            events: None,
            trial_types: None,
        }
    }

    /// Set an arbitrary entity.
    #[must_use]
    pub fn entity(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.insert(key.into(), value.into());
        self
    }

    /// Set the subject entity.
    #[must_use]
    pub fn subject(self, subject: impl Into<String>) -> Self {
        self.entity("subject", subject)
    }

    /// Set the session entity.
    #[must_use]
    pub fn session(self, session: impl Into<String>) -> Self {
        self.entity("session", session)
    }

    /// Set the run entity.
    #[must_use]
    pub fn run(self, run: impl Into<String>) -> Self {
        self.entity("run", run)
    }

    /// Set the scan duration in seconds.
    #[must_use]
    pub const fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Use a prepared events table. Takes precedence over `trial_types`.
    #[must_use]
    pub fn events(mut self, events: RecordBatch) -> Self {
        self.events = Some(events);
        self
    }

    /// Generate an events table with one event per label, one second each,
    /// two seconds apart.
    #[must_use]
    pub fn trial_types<S: AsRef<str>>(mut self, labels: &[S]) -> Self {
        self.trial_types = Some(labels.iter().map(|s| s.as_ref().to_string()).collect());
        self
    }

    /// Build the `RunNode`.
    ///
    /// Without events or trial types the run gets an empty table that has no
    /// `trial_type` column.
    ///
    /// # Errors
    ///
    /// Returns `Error::Arrow` if the generated events table is invalid.
    #[allow(clippy::cast_precision_loss)]
    pub fn build(self) -> Result<RunNode> {
        let events = match (self.events, self.trial_types) {
            (Some(events), _) => events,
            (None, Some(labels)) => {
                let onsets =
                    Float64Array::from_iter_values((0..labels.len()).map(|i| i as f64 * 2.0));
                let durations = Float64Array::from(vec![1.0; labels.len()]);
                let trial_types = StringArray::from(labels);
                RecordBatch::try_new(
                    events_schema(),
                    vec![
                        Arc::new(onsets) as ArrayRef,
                        Arc::new(durations),
                        Arc::new(trial_types),
                    ],
                )?
            }
            (None, None) => RecordBatch::new_empty(Arc::new(Schema::new(vec![
                Field::new("onset", DataType::Float64, false),
                Field::new("duration", DataType::Float64, false),
            ]))),
        };

        Ok(RunNode {
            entities: self.entities,
            duration: self.duration,
            events,
        })
    }
}
