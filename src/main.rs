use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::error;

use vaultwarden_backup::config;
use vaultwarden_backup::config::dotenv::DEFAULT_DOTENV_PATH;
use vaultwarden_backup::managers;
use vaultwarden_backup::managers::notification::{NotificationManager, Outcome, PingStage};

#[derive(Parser)]
#[command(name = "vaultwarden-backup")]
#[command(about = "Configuration resolution and notification dispatch for the vaultwarden backup agent", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the optional env file
    #[arg(long, default_value = DEFAULT_DOTENV_PATH)]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate connectivity of every configured rclone remote
    Check,

    /// Print the resolved configuration as JSON (secrets redacted)
    Config,

    /// Dispatch a notification for a finished backup or restore operation
    Notify {
        #[arg(long, value_enum)]
        outcome: OutcomeArg,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        body: String,
    },

    /// Send a liveness ping for the given stage
    Ping {
        #[arg(long, value_enum)]
        stage: StageArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutcomeArg {
    Success,
    Failure,
}

impl From<OutcomeArg> for Outcome {
    fn from(arg: OutcomeArg) -> Self {
        match arg {
            OutcomeArg::Success => Outcome::Success,
            OutcomeArg::Failure => Outcome::Failure,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StageArg {
    Start,
    Success,
    Failure,
}

impl From<StageArg> for PingStage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Start => PingStage::Start,
            StageArg::Success => PingStage::Success,
            StageArg::Failure => PingStage::Failure,
        }
    }
}

fn main() -> Result<()> {
    managers::logging::init_logging();

    let cli = Cli::parse();

    // Unreadable secret references are a misconfiguration; nothing runs
    // without a resolved configuration.
    let config = config::load_config(&cli.env_file)?;

    let command = cli.command.unwrap_or(Commands::Config);

    match command {
        Commands::Check => {
            if let Err(e) = managers::preflight::check_connectivity(&config) {
                error!("Connectivity preflight failed: {:#}", e);
                std::process::exit(1);
            }
            println!("✓ All {} remote(s) reachable", config.remotes.len());
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        Commands::Notify {
            outcome,
            subject,
            body,
        } => {
            let manager = NotificationManager::new(&config)?;
            manager.notify(outcome.into(), &subject, &body);
        }

        Commands::Ping { stage } => {
            let manager = NotificationManager::new(&config)?;
            manager.ping(stage.into());
        }
    }

    Ok(())
}
