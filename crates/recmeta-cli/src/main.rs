//! # recmeta CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// recmeta — recording-session metadata toolchain.
///
/// Merges subject defaults, versioned hardware configurations, and
/// per-session overrides into one exportable record; validates it against
/// the session-metadata schema and the semantic wiring rules; round-trips
/// channel maps through CSV for review.
#[derive(Parser, Debug)]
#[command(name = "recmeta", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Merge and validate a subject/session pair.
    Validate(recmeta_cli::validate::ValidateArgs),
    /// Merge, validate, and write the flattened record.
    Export(recmeta_cli::export::ExportArgs),
    /// Channel-map CSV import/export.
    ChannelMap(recmeta_cli::channel_map::ChannelMapArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => recmeta_cli::validate::run(&args),
        Commands::Export(args) => recmeta_cli::export::run(&args),
        Commands::ChannelMap(args) => recmeta_cli::channel_map::run(&args),
    }
}
