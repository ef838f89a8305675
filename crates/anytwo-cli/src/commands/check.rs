//! Check command for validating coding sheets.

use std::io::Write;

use anyhow::{Context, Result};
use anytwo_core::{LoadOptions, RowPolicy};

use crate::Config;

/// Validates every coding sheet and lists its rejected rows.
///
/// All rows are checked even under the abort policy, so one run reports every
/// problem. Returns the number of rejected rows.
pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<usize> {
    let options = LoadOptions {
        policy: RowPolicy::Skip,
        ..config.load_options()
    };

    let paths = anytwo_io::discover_inputs(&config.input_dir).with_context(|| {
        format!(
            "failed to list coding sheets in {}",
            config.input_dir.display()
        )
    })?;

    if paths.is_empty() {
        writeln!(writer, "No coding sheets in {}.", config.input_dir.display())?;
        return Ok(0);
    }

    let mut rejected_total = 0;
    for path in &paths {
        let loaded = anytwo_io::load_evaluation(path, &config.columns, options)
            .with_context(|| format!("failed to read {}", path.display()))?;

        writeln!(
            writer,
            "{}: {} breakdowns, {} rejected rows",
            loaded.evaluation.name(),
            loaded.evaluation.events().len(),
            loaded.rejected.len()
        )?;
        for err in &loaded.rejected {
            writeln!(writer, "  {err}")?;
        }
        rejected_total += loaded.rejected.len();
    }

    Ok(rejected_total)
}
