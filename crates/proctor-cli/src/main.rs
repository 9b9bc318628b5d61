//! proctor CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "proctor", version, about = "Candidate assessment runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an assessment (resumes a persisted session if one exists)
    Run {
        /// Path to a .toml question bank (defaults to the configured bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Directory holding the durable session slot
        #[arg(long)]
        state_dir: Option<PathBuf>,

        /// Directory for archived reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Discard any persisted session
    Reset {
        /// Directory holding the durable session slot
        #[arg(long)]
        state_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("proctor=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            bank,
            state_dir,
            output,
            config,
        } => commands::run::execute(bank, state_dir, output, config).await,
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Reset { state_dir, config } => commands::reset::execute(state_dir, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
