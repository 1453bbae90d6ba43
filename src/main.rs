//! Command-line front end for phishing report exports.
//!
//! ```bash
//! # Executive report into ./reports
//! phishreport export --output-dir reports
//!
//! # Detailed report, API settings from a file
//! phishreport --config phishreport.toml export --kind detailed
//!
//! # Print the aggregated data as JSON
//! phishreport snapshot --kind personal
//! ```

use clap::{Parser, Subcommand};
use phishreport::config::Settings;
use phishreport::{ExportError, ReportExporter, ReportKind};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "phishreport")]
#[command(about = "Export phishing simulation reports as PDF")]
struct Cli {
    /// Configuration file (defaults to ./phishreport.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the PDF and save it
    Export {
        /// executive, detailed or personal
        #[arg(long)]
        kind: Option<ReportKind>,

        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the normalized report data as JSON
    Snapshot {
        #[arg(long)]
        kind: Option<ReportKind>,
    },
}

async fn run(cli: Cli) -> Result<(), ExportError> {
    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Export { kind, output_dir } => {
            if let Some(kind) = kind {
                settings.report.kind = kind;
            }
            if let Some(dir) = output_dir {
                settings.report.output_dir = dir;
            }
            let exporter = ReportExporter::from_settings(&settings)?;
            let path = exporter.export().await?;
            println!("{}", path.display());
        }
        Command::Snapshot { kind } => {
            if let Some(kind) = kind {
                settings.report.kind = kind;
            }
            let exporter = ReportExporter::from_settings(&settings)?;
            let snapshot = exporter.snapshot().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
