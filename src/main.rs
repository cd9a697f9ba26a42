use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use servicegraph::cli::{self, OutputFormat};

#[derive(Parser)]
#[command(name = "sgtool", version, about = "Architectural knowledge-graph extraction")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a recorded traversal-event stream and write the graph.
    Extract {
        /// Path to the JSON event stream.
        events: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "turtle")]
        format: OutputFormat,
    },
    /// Replay a recorded traversal-event stream and print a summary.
    Inspect {
        /// Path to the JSON event stream.
        events: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Extract {
            events,
            out,
            format,
        } => cli::run_extract(&events, out.as_deref(), format),
        Command::Inspect { events } => cli::run_inspect(&events),
    }
}
