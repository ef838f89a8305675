//! Input discovery and coding sheet parsing.

use std::path::{Path, PathBuf};

use anytwo_core::{Evaluation, LoadOptions, LoadedEvaluation, ObserverId, RawRow};
use serde::{Deserialize, Serialize};

use crate::IoError;

/// Header names of the columns read from each coding sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub codes: String,
    pub start: String,
    pub end: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            codes: "Code".to_string(),
            start: "Start".to_string(),
            end: "End".to_string(),
        }
    }
}

/// Column positions resolved against a header row.
struct ColumnIndex {
    codes: usize,
    start: usize,
    end: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, names: &ColumnNames, path: &Path) -> Result<Self, IoError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
        };
        let required = |name: &str| {
            find(name).ok_or_else(|| IoError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
        };

        Ok(Self {
            codes: required(&names.codes)?,
            start: required(&names.start)?,
            end: find(&names.end),
        })
    }
}

/// Lists every `*.csv` file directly inside `dir`, sorted by file name.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    let entries = std::fs::read_dir(dir).map_err(|source| IoError::Fs {
        action: "failed to read directory",
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IoError::Fs {
            action: "failed to read directory",
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            paths.push(path);
        }
    }

    paths.sort();
    tracing::debug!(dir = %dir.display(), files = paths.len(), "discovered input files");
    Ok(paths)
}

/// Reads the raw rows of one coding sheet.
pub fn read_rows(path: &Path, columns: &ColumnNames) -> Result<Vec<RawRow>, IoError> {
    let csv_err = |source| IoError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let index = ColumnIndex::resolve(reader.headers().map_err(csv_err)?, columns, path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let cell = |i: usize| record.get(i).unwrap_or("");
        rows.push(RawRow::new(
            cell(index.codes),
            cell(index.start),
            index.end.map(cell),
        ));
    }

    Ok(rows)
}

/// Observer name for a coding sheet: its file stem.
fn observer_name(path: &Path) -> Result<ObserverId, IoError> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| ObserverId::new(s).ok())
        .ok_or_else(|| IoError::InvalidName {
            path: path.to_path_buf(),
        })
}

/// Reads one coding sheet into an evaluation named after the file.
pub fn load_evaluation(
    path: &Path,
    columns: &ColumnNames,
    options: LoadOptions,
) -> Result<LoadedEvaluation, IoError> {
    let name = observer_name(path)?;
    let rows = read_rows(path, columns)?;
    Evaluation::from_rows(name, rows, options).map_err(|source| IoError::Core {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads every coding sheet in `dir`, sorted by observer name.
///
/// Observer names must be unique, so `alice.csv` next to `alice.CSV` fails.
pub fn load_evaluations(
    dir: &Path,
    columns: &ColumnNames,
    options: LoadOptions,
) -> Result<Vec<(PathBuf, LoadedEvaluation)>, IoError> {
    let mut loaded = discover_inputs(dir)?
        .into_iter()
        .map(|path| {
            let evaluation = load_evaluation(&path, columns, options)?;
            Ok((path, evaluation))
        })
        .collect::<Result<Vec<_>, IoError>>()?;

    loaded.sort_by(|(_, a), (_, b)| a.evaluation.name().cmp(b.evaluation.name()));
    if let Some(pair) = loaded
        .windows(2)
        .find(|pair| pair[0].1.evaluation.name() == pair[1].1.evaluation.name())
    {
        return Err(IoError::DuplicateObserver {
            name: pair[0].1.evaluation.name().to_string(),
            first: pair[0].0.clone(),
            second: pair[1].0.clone(),
        });
    }
    Ok(loaded)
}
