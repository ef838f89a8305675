//! CSV export of pair results.

use std::path::{Path, PathBuf};

use anytwo_core::{AnyTwo, PairSummary, Point};
use serde::Serialize;

use crate::IoError;

/// A row type with a fixed header, written even when a table has no rows.
pub trait CsvTable: Serialize {
    /// Column names, in field order.
    const HEADERS: &'static [&'static str];
}

/// One agreement, with both sides' original breakdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgreementRow {
    pub code: String,
    pub a_owner: String,
    pub a_codes: String,
    pub a_start: String,
    pub a_end: String,
    pub b_owner: String,
    pub b_codes: String,
    pub b_start: String,
    pub b_end: String,
}

impl CsvTable for AgreementRow {
    const HEADERS: &'static [&'static str] = &[
        "code", "a_owner", "a_codes", "a_start", "a_end", "b_owner", "b_codes", "b_start", "b_end",
    ];
}

impl AgreementRow {
    /// Returns `None` for a point with no second side.
    pub fn from_point(point: &Point) -> Option<Self> {
        let a = point.a().source();
        let b = point.b()?.source();
        Some(Self {
            code: point.a().code().to_string(),
            a_owner: a.owner().to_string(),
            a_codes: a.code_label(),
            a_start: a.interval().start().to_string(),
            a_end: a.interval().end().to_string(),
            b_owner: b.owner().to_string(),
            b_codes: b.code_label(),
            b_start: b.interval().start().to_string(),
            b_end: b.interval().end().to_string(),
        })
    }
}

/// One unmatched code of one observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinglePointRow {
    pub code: String,
    pub codes: String,
    pub start: String,
    pub end: String,
}

impl CsvTable for SinglePointRow {
    const HEADERS: &'static [&'static str] = &["code", "codes", "start", "end"];
}

impl SinglePointRow {
    pub fn from_point(point: &Point) -> Self {
        let source = point.a().source();
        Self {
            code: point.a().code().to_string(),
            codes: source.code_label(),
            start: source.interval().start().to_string(),
            end: source.interval().end().to_string(),
        }
    }
}

/// One line of `summary.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub a: String,
    pub b: String,
    /// Empty when the pair produced no points.
    pub any_two_ratio: Option<f64>,
    pub agreements: usize,
    pub disagreements: usize,
    pub single_points_a: usize,
    pub single_points_b: usize,
    pub total: usize,
}

impl CsvTable for SummaryRow {
    const HEADERS: &'static [&'static str] = &[
        "a",
        "b",
        "any_two_ratio",
        "agreements",
        "disagreements",
        "single_points_a",
        "single_points_b",
        "total",
    ];
}

impl From<&PairSummary> for SummaryRow {
    fn from(summary: &PairSummary) -> Self {
        let [a, b] = summary.pair.clone();
        let single = |owner: &str| {
            summary
                .single_points_by_owner
                .get(owner)
                .copied()
                .unwrap_or(0)
        };
        Self {
            single_points_a: single(&a),
            single_points_b: single(&b),
            a,
            b,
            any_two_ratio: summary.any_two_ratio,
            agreements: summary.agreements,
            disagreements: summary.disagreements,
            total: summary.total,
        }
    }
}

/// Directory name used for one pair's exports.
pub fn pair_dir_name(result: &AnyTwo) -> String {
    let (a, b) = result.pair();
    format!("{a}_vs_{b}")
}

fn create_dir(path: &Path) -> Result<(), IoError> {
    std::fs::create_dir_all(path).map_err(|source| IoError::Fs {
        action: "failed to create directory",
        path: path.to_path_buf(),
        source,
    })
}

fn write_rows<R: CsvTable>(
    path: &Path,
    rows: impl IntoIterator<Item = R>,
) -> Result<(), IoError> {
    let csv_err = |source| IoError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(R::HEADERS).map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| IoError::Fs {
        action: "failed to write",
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `agreements.csv` and one `single_points_<owner>.csv` per observer.
///
/// Returns the pair directory.
pub fn write_pair(output_dir: &Path, result: &AnyTwo) -> Result<PathBuf, IoError> {
    let dir = output_dir.join(pair_dir_name(result));
    create_dir(&dir)?;

    write_rows(
        &dir.join("agreements.csv"),
        result.agreement_points().filter_map(AgreementRow::from_point),
    )?;

    for (owner, points) in result.single_points_by_owner() {
        write_rows(
            &dir.join(format!("single_points_{owner}.csv")),
            points.iter().map(SinglePointRow::from_point),
        )?;
    }

    tracing::debug!(dir = %dir.display(), "exported pair");
    Ok(dir)
}

/// Writes `summary.csv` with one line per pair. Returns its path.
pub fn write_summary(output_dir: &Path, summaries: &[PairSummary]) -> Result<PathBuf, IoError> {
    create_dir(output_dir)?;
    let path = output_dir.join("summary.csv");
    write_rows(&path, summaries.iter().map(SummaryRow::from))?;
    Ok(path)
}
