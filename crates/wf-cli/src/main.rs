//! Command-line host for the Worldforge narrative engine.

mod commands;
mod input;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wf_fiction::DEFAULT_SAVE_PATH;

#[derive(Parser)]
#[command(
    name = "wf",
    about = "Worldforge: a drowned-vessel narrative engine",
    version,
    propagate_version = true
)]
struct Cli {
    /// Print engine diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ContentArg {
    /// Content file (JSON); the built-in slice when omitted
    #[arg(short, long)]
    content: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively from stdin
    Play {
        #[command(flatten)]
        content: ContentArg,

        /// Save file used by `save` and `load`
        #[arg(short, long, default_value = DEFAULT_SAVE_PATH)]
        save: PathBuf,

        /// Seconds between ambient events
        #[arg(long, default_value = "8.0")]
        interval: f32,

        /// Number of chronicle lines kept
        #[arg(long, default_value = "16")]
        chronicle: usize,

        /// Clear at most one objective per progress pass
        #[arg(long)]
        stepwise: bool,
    },

    /// Decode a save file and show what it holds
    Inspect {
        /// Save file to read
        save: PathBuf,

        #[command(flatten)]
        content: ContentArg,

        /// Print the decoded snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate content cross references
    Check {
        #[command(flatten)]
        content: ContentArg,
    },

    /// Write content as JSON
    Export {
        #[command(flatten)]
        content: ContentArg,

        /// Output format: json, markdown
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "wf=debug,wf_fiction=debug,wf_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            content,
            save,
            interval,
            chronicle,
            stepwise,
        } => commands::play::run(
            content.content.as_deref(),
            &save,
            commands::play::PlayOptions {
                interval,
                chronicle,
                stepwise,
            },
        ),
        Commands::Inspect {
            save,
            content,
            json,
        } => commands::inspect::run(&save, content.content.as_deref(), json),
        Commands::Check { content } => commands::check::run(content.content.as_deref()),
        Commands::Export {
            content,
            format,
            output,
        } => commands::export::run(content.content.as_deref(), &format, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
