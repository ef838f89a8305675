//! Compare command: load every coding sheet, compare all pairs, report and export.

use std::io::Write;

use anyhow::{Context, Result};
use anytwo_core::{AnyTwo, Evaluation, PairSummary, Pipeline};

use crate::Config;
use crate::commands::report;

/// Output options for the compare command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    /// Print JSON instead of the text report.
    pub json: bool,
    /// Write CSV tables to the configured output directory.
    pub export: bool,
}

/// Loads the configured input directory, keeping only the evaluations.
pub fn load(config: &Config) -> Result<Vec<Evaluation>> {
    let loaded = anytwo_io::load_evaluations(
        &config.input_dir,
        &config.columns,
        config.load_options(),
    )
    .with_context(|| {
        format!(
            "failed to load coding sheets from {}",
            config.input_dir.display()
        )
    })?;

    let rejected: usize = loaded.iter().map(|(_, l)| l.rejected.len()).sum();
    if rejected > 0 {
        tracing::warn!(rejected, "skipped invalid rows");
    }

    Ok(loaded.into_iter().map(|(_, l)| l.evaluation).collect())
}

/// Writes every pair's tables and the summary table.
fn export(config: &Config, results: &[AnyTwo], summaries: &[PairSummary]) -> Result<()> {
    for result in results {
        anytwo_io::write_pair(&config.output_dir, result)
            .with_context(|| format!("failed to export {}", result.label()))?;
    }
    let path = anytwo_io::write_summary(&config.output_dir, summaries)
        .context("failed to write summary table")?;
    tracing::info!(summary = %path.display(), pairs = results.len(), "exported results");
    Ok(())
}

pub fn run<W: Write>(writer: &mut W, config: &Config, options: CompareOptions) -> Result<()> {
    let evaluations = load(config)?;
    if evaluations.len() < 2 {
        anyhow::bail!(
            "need at least two coding sheets in {}, found {}",
            config.input_dir.display(),
            evaluations.len()
        );
    }

    let results = Pipeline::new().run(&evaluations);
    let summaries: Vec<PairSummary> = results.iter().map(AnyTwo::summary).collect();

    if options.json {
        writeln!(writer, "{}", report::format_json(&summaries)?)?;
    } else {
        write!(writer, "{}", report::format_report(&summaries))?;
    }

    if options.export {
        export(config, &results, &summaries)?;
    }

    Ok(())
}
