use std::path::Path;

use anyhow::{Context, Result};
use anytwo_core::RowPolicy;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use anytwo_cli::commands::{check, compare};
use anytwo_cli::{Cli, Commands, Config, InputArgs};

/// Load config and apply the input flags shared by every command.
fn load_config(config_path: Option<&Path>, input: &InputArgs) -> Result<Config> {
    let mut config = Config::load_from(config_path).context("failed to load configuration")?;

    if let Some(dir) = &input.input {
        config.input_dir.clone_from(dir);
    }
    if let Some(threshold) = input.threshold {
        config.threshold_secs = threshold;
    }
    if input.skip_invalid {
        config.on_invalid_row = RowPolicy::Skip;
    }

    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so reports on stdout stay machine-readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Compare {
            input,
            output,
            json,
            no_export,
        }) => {
            let mut config = load_config(cli.config.as_deref(), input)?;
            if let Some(dir) = output {
                config.output_dir.clone_from(dir);
            }
            compare::run(
                &mut stdout,
                &config,
                compare::CompareOptions {
                    json: *json,
                    export: !*no_export,
                },
            )?;
        }
        Some(Commands::Check { input }) => {
            let config = load_config(cli.config.as_deref(), input)?;
            let rejected = check::run(&mut stdout, &config)?;
            if rejected > 0 && config.on_invalid_row == RowPolicy::Abort {
                anyhow::bail!("{rejected} invalid rows found");
            }
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
