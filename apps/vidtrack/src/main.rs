//! vidtrack - aspect field metadata server and CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use vidtrack::api::{self, AppState};
use vidtrack::cli::{self, CliError, Report};
use vidtrack::config::{self, DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT, ServerConfig};
use vidtrack_core::AspectService;

#[derive(Debug, Parser)]
#[command(name = "vidtrack", version, about = "Video production aspect metadata")]
struct Args {
    /// Tracing filter used when RUST_LOG is unset.
    #[arg(long, global = true, env = "VIDTRACK_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Full metadata of every aspect.
    Aspects {
        #[arg(long)]
        json: bool,
    },
    /// Aspect summaries with field counts.
    Overview {
        #[arg(long)]
        json: bool,
    },
    /// Fields of one aspect.
    Fields {
        /// Aspect key, e.g. `initial-details`.
        key: String,
        #[arg(long)]
        json: bool,
    },
    /// Completion progress of a JSON video record.
    Progress {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Type violations in a JSON video record.
    Validate {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Start the HTTP server.
    Serve {
        #[arg(long, env = "VIDTRACK_HOST", default_value = DEFAULT_HOST)]
        host: String,
        #[arg(long, env = "VIDTRACK_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    config::init_tracing(&args.log_level);

    let service = match AspectService::standard() {
        Ok(service) => service,
        Err(e) => {
            error!("Field table is inconsistent: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result: Result<Report, CliError> = match args.command {
        Command::Aspects { json } => cli::cmd_aspects(&service, json),
        Command::Overview { json } => cli::cmd_overview(&service, json),
        Command::Fields { key, json } => cli::cmd_fields(&service, &key, json),
        Command::Progress { file, json } => cli::cmd_progress(&service, &file, json),
        Command::Validate { file, json } => cli::cmd_validate(&service, &file, json),
        Command::Serve { host, port } => {
            let config = ServerConfig::new(host, port);
            info!("Starting vidtrack {}", env!("CARGO_PKG_VERSION"));
            return match api::serve(&config, AppState::new(service)).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("Server error: {}", e);
                    ExitCode::FAILURE
                }
            };
        }
    };

    match result {
        Ok(report) => {
            print!("{}", report.output);
            if report.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
