use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;

#[derive(Parser)]
#[command(name = "tutoria")]
#[command(about = "TutorIA CLI - personalized explanations and exercises", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to secret.json (defaults to the user config directory)
    #[arg(long, global = true)]
    secrets: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Topic selection shared by the generation commands.
#[derive(Args)]
pub struct TargetArgs {
    /// Subject id, e.g. "math"
    #[arg(long)]
    pub subject: String,

    /// Level id, e.g. "secondary"
    #[arg(long)]
    pub level: String,

    #[arg(long)]
    pub topic: String,

    /// JSON file with the student profile
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// JSON file with an array of past sessions
    #[arg(long)]
    pub history: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a personalized explanation
    Explain {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Generate a batch of exercises
    Exercises {
        #[command(flatten)]
        target: TargetArgs,

        /// Number of exercises (defaults to the configured count)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Check an answer against the expected one
    Check {
        #[arg(long)]
        exercise_id: u32,

        #[arg(long)]
        answer: String,

        #[arg(long)]
        expected: String,
    },
    /// Show the configured provider tiers
    Providers,
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tutoria=info,warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let paths = commands::utils::ConfigPaths {
        config: cli.config,
        secrets: cli.secrets,
    };

    match cli.command {
        Commands::Explain { target } => commands::explain::run(&paths, target).await?,
        Commands::Exercises { target, count } => {
            commands::exercises::run(&paths, target, count).await?
        }
        Commands::Check {
            exercise_id,
            answer,
            expected,
        } => commands::check::run(&paths, exercise_id, answer, expected)?,
        Commands::Providers => commands::providers::run(&paths)?,
    }

    Ok(())
}
