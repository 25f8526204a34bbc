//! corrsynth CLI - Correlation-Preserving Synthetic Data
//!
//! Operational entry point for the corrsynth sampler.
//!
//! # Commands
//!
//! - `corrsynth synthesize --input <csv>` - Synthesise a local CSV file
//! - `corrsynth import --input <csv> --dataset <name> --resource <name>` -
//!   Register a CSV file in the local store
//! - `corrsynth publish (--input <csv> | --dataset <name> --resource <name>)` -
//!   Synthesise and publish into the local store
//! - `corrsynth check` - Validate configuration and credentials
//!
//! # Logging
//!
//! `RUST_LOG` takes precedence; otherwise the configured `log_level` applies
//! (`debug` with `--verbose`).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::publish::PublishSource;
use commands::SamplerArgs;
use config::CliConfig;

/// Correlation-preserving synthetic data generator
#[derive(Parser)]
#[command(name = "corrsynth")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "corrsynth.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic copy of a CSV file
    Synthesize {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Column holding row labels
        #[arg(long)]
        index_col: Option<String>,

        #[command(flatten)]
        sampler: SamplerArgs,

        /// Output CSV file [default: stdout]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the fidelity report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a CSV file as a dataset resource in the local store
    Import {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Column holding row labels
        #[arg(long)]
        index_col: Option<String>,

        /// Dataset to create or extend
        #[arg(short, long)]
        dataset: String,

        /// Resource name within the dataset
        #[arg(long)]
        resource: String,

        /// Credentials file [default: from config or environment]
        #[arg(long)]
        credentials: Option<PathBuf>,
    },

    /// Synthesise and publish into the local store
    Publish {
        /// Input CSV file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Column holding row labels of the input file
        #[arg(long, requires = "input")]
        index_col: Option<String>,

        /// Source dataset in the store
        #[arg(short, long)]
        dataset: Option<String>,

        /// Source resource within --dataset
        #[arg(long, requires = "dataset")]
        resource: Option<String>,

        /// Target dataset [default: synthetic_data, or the source dataset]
        #[arg(short, long)]
        target: Option<String>,

        #[command(flatten)]
        sampler: SamplerArgs,

        /// Credentials file [default: from config or environment]
        #[arg(long)]
        credentials: Option<PathBuf>,
    },

    /// Check configuration, credentials and store
    Check {
        /// Credentials file [default: from config or environment]
        #[arg(long)]
        credentials: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // `check` reports validation problems itself
    let config = if matches!(cli.command, Commands::Check { .. }) {
        CliConfig::load_or_default(&cli.config)?.with_env_override()?
    } else {
        CliConfig::resolve(&cli.config)?
    };

    // Initialise tracing
    let default_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Synthesize {
            input,
            index_col,
            sampler,
            output,
            json,
        } => commands::synthesize::run(
            &config,
            &input,
            index_col.as_deref(),
            &sampler,
            output.as_deref(),
            json,
        )
        .map(|_| ()),
        Commands::Import {
            input,
            index_col,
            dataset,
            resource,
            credentials,
        } => commands::import::run(
            &config,
            &input,
            index_col.as_deref(),
            &dataset,
            &resource,
            credentials.as_deref(),
        )
        .map(|_| ()),
        Commands::Publish {
            input,
            index_col,
            dataset,
            resource,
            target,
            sampler,
            credentials,
        } => {
            let source = PublishSource::from_args(
                input.as_deref(),
                index_col.as_deref(),
                dataset.as_deref(),
                resource.as_deref(),
            )?;
            commands::publish::run(
                &config,
                source,
                target.as_deref(),
                &sampler,
                credentials.as_deref(),
            )
            .map(|_| ())
        }
        Commands::Check { credentials } => commands::check::run(&config, credentials.as_deref()),
    }
}
