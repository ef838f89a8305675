//! Evaluations: one observer's full list of breakdowns.

use serde::{Deserialize, Serialize};

use crate::breakdown::Breakdown;
use crate::code::Code;
use crate::time::{Interval, TimeOfDay};
use crate::types::{CoreError, ObserverId};

/// Default tolerance window, in seconds.
pub const DEFAULT_THRESHOLD_SECS: u32 = 4;

/// One raw row of a coding sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// `/`-delimited code tokens. Blank marks a non-event row.
    pub codes: String,
    /// Start time, `HH:MM:SS` or a shorter suffix of it.
    pub start: String,
    /// End time. Missing or blank means the row ends when it starts.
    pub end: Option<String>,
}

impl RawRow {
    pub fn new(codes: impl Into<String>, start: impl Into<String>, end: Option<&str>) -> Self {
        Self {
            codes: codes.into(),
            start: start.into(),
            end: end.map(str::to_string),
        }
    }

    /// Whether the row carries no codes and is not an event.
    pub fn is_blank(&self) -> bool {
        self.codes.trim().is_empty()
    }
}

/// What to do with a row that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// The first invalid row fails the whole evaluation.
    #[default]
    Abort,
    /// Invalid rows are dropped and reported back to the caller.
    Skip,
}

/// Options applied while building an evaluation from raw rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Seconds added on both sides of every row.
    pub threshold_secs: u32,
    pub policy: RowPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            threshold_secs: DEFAULT_THRESHOLD_SECS,
            policy: RowPolicy::Abort,
        }
    }
}

/// An evaluation together with the rows dropped while building it.
#[derive(Debug, Clone)]
pub struct LoadedEvaluation {
    pub evaluation: Evaluation,
    /// Row errors skipped under [`RowPolicy::Skip`], each tagged with its row.
    pub rejected: Vec<CoreError>,
}

/// One observer's breakdowns, in sheet order.
#[derive(Debug, Clone)]
pub struct Evaluation {
    name: ObserverId,
    events: Vec<Breakdown>,
}

impl Evaluation {
    /// Creates an evaluation from breakdowns that are already built.
    pub const fn new(name: ObserverId, events: Vec<Breakdown>) -> Self {
        Self { name, events }
    }

    /// Builds an evaluation from raw rows.
    ///
    /// Blank-code rows are dropped. Each remaining row becomes one breakdown
    /// whose interval is widened by `options.threshold_secs`. Rows are
    /// numbered from 1 in error reports.
    pub fn from_rows<I>(
        name: ObserverId,
        rows: I,
        options: LoadOptions,
    ) -> Result<LoadedEvaluation, CoreError>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut events = Vec::new();
        let mut rejected = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            let row_number = index + 1;
            match breakdown_from_row(&row, &name, options.threshold_secs) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(e) => {
                    let err = e.at_row(row_number);
                    match options.policy {
                        RowPolicy::Abort => return Err(err),
                        RowPolicy::Skip => {
                            tracing::warn!(evaluation = %name, error = %err, "skipping invalid row");
                            rejected.push(err);
                        }
                    }
                }
            }
        }

        tracing::debug!(
            evaluation = %name,
            events = events.len(),
            rejected = rejected.len(),
            "built evaluation"
        );

        Ok(LoadedEvaluation {
            evaluation: Self { name, events },
            rejected,
        })
    }

    pub const fn name(&self) -> &ObserverId {
        &self.name
    }

    pub fn events(&self) -> &[Breakdown] {
        &self.events
    }
}

/// Turns one raw row into a breakdown, or `None` for a blank-code row.
fn breakdown_from_row(
    row: &RawRow,
    owner: &ObserverId,
    threshold_secs: u32,
) -> Result<Option<Breakdown>, CoreError> {
    if row.is_blank() {
        return Ok(None);
    }

    let codes = Code::parse_list(&row.codes)?;
    let start = TimeOfDay::parse(&row.start)?;
    let end = match row.end.as_deref().map(str::trim) {
        Some(end) if !end.is_empty() => TimeOfDay::parse(end)?,
        _ => start,
    };
    let interval = Interval::widened(start, end, threshold_secs)?;

    Breakdown::new(codes, interval, owner.clone()).map(Some)
}
