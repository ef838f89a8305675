//! CSV layer for any-two agreement.
//!
//! Reads observers' coding sheets into evaluations and writes pair results
//! back out as CSV tables.
//!
//! # Input Format
//!
//! One CSV file per observer, with a header row. Three columns are used,
//! located by header name (case-insensitive, see [`ColumnNames`]):
//! - codes: `/`-delimited code tokens, blank for rows that are not events
//! - start: `HH:MM:SS`, or a shorter suffix such as `MM:SS`
//! - end: same format; the column or the cell may be missing
//!
//! Other columns are ignored. The file stem names the evaluation.
//!
//! # Output Layout
//!
//! ```text
//! <output>/summary.csv
//! <output>/<A>_vs_<B>/agreements.csv
//! <output>/<A>_vs_<B>/single_points_<A>.csv
//! <output>/<A>_vs_<B>/single_points_<B>.csv
//! ```

mod export;
mod reader;

use std::path::PathBuf;

use anytwo_core::CoreError;
use thiserror::Error;

pub use export::{
    AgreementRow, CsvTable, SinglePointRow, SummaryRow, pair_dir_name, write_pair, write_summary,
};
pub use reader::{
    ColumnNames, discover_inputs, load_evaluation, load_evaluations, read_rows,
};

/// CSV layer errors.
#[derive(Debug, Error)]
pub enum IoError {
    /// A filesystem operation failed.
    #[error("{action} {}: {source}", path.display())]
    Fs {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The CSV reader or writer failed.
    #[error("csv error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// A required column is missing from the header row.
    #[error("{} has no {column:?} column", path.display())]
    MissingColumn { path: PathBuf, column: String },
    /// The file name cannot be used as an observer name.
    #[error("cannot derive an observer name from {}", path.display())]
    InvalidName { path: PathBuf },
    /// Two coding sheets resolve to the same observer name.
    #[error("{} and {} both name observer {name:?}", first.display(), second.display())]
    DuplicateObserver {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    /// A row failed validation.
    #[error("{}: {source}", path.display())]
    Core {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}
