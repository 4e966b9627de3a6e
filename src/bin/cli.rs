use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use task_authz::authz::state_machine::allowed_targets;
use task_authz::config::Config;
use task_authz::errors::AppError;
use task_authz::models::TaskState;
use task_authz::scenario::{check_transition, Scenario};

#[derive(Parser, Debug)]
#[command(author, version, about = "task authorization and workflow tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the task state transition table
    Transitions,
    /// Check whether a task may move from one state to another
    CheckTransition {
        #[arg(long)]
        from: TaskState,
        #[arg(long)]
        to: TaskState,
        /// Required when moving to BLOCKED or CANCELLED
        #[arg(long)]
        reason: Option<String>,
    },
    /// Evaluate an actor, a resource snapshot and an action read from JSON
    Decide { path: PathBuf },
}

fn main() -> anyhow::Result<ExitCode> {
    load_env();
    let config = Config::from_env()?;
    init_tracing(&config.log_filter);

    let cli = Cli::parse();

    let verdict = match cli.command {
        Commands::Transitions => {
            print_transitions();
            return Ok(ExitCode::SUCCESS);
        }
        Commands::CheckTransition { from, to, reason } => check_transition(from, to, reason.as_deref()).map(|_| ()),
        Commands::Decide { path } => Scenario::from_path(&path)?.decide(),
    };

    match verdict {
        Ok(()) => {
            println!("allowed");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("denied: {err}");
            if let AppError::TaskState(state_err) = &err {
                println!("rejected move: {} -> {}", state_err.from_state(), state_err.to_state());
            }
            tracing::debug!(status = %err.status(), "decision rejected");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_transitions() {
    for state in TaskState::ALL {
        let targets = if state.is_terminal() {
            "(terminal)".to_string()
        } else {
            let names: Vec<&str> = allowed_targets(state).iter().map(TaskState::as_str).collect();
            names.join(", ")
        };
        println!("{:<12} -> {}", state.as_str(), targets);
    }
}

fn load_env() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let crate_env = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    let _ = dotenvy::from_path(crate_env);
}

fn init_tracing(default_filter: &str) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
