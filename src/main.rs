//! Pomodoro Timer CLI - A terminal countdown timer
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work per session
//! - Start, pause, resume and reset from the keyboard

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use pomodoro_timer::cli::{Cli, Commands, Display, RunArgs, Session};

/// Main entry point
fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            Display::show_error(&format!("Failed to start runtime: {}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = runtime.block_on(execute(cli));

    // A stdin read may still be parked on a blocking thread.
    runtime.shutdown_background();

    if let Err(e) = result {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins over `--verbose`. Logs go to stderr so stdout carries
/// only timer output.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run_session(&args).await?,
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs an interactive session on stdin until quit or Ctrl-C.
async fn run_session(args: &RunArgs) -> Result<()> {
    let config = args.to_config();
    let session = Session::new(&config, args.json)?.with_auto_start(args.auto_start);

    let input = BufReader::new(tokio::io::stdin());
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    session.run(input, shutdown).await
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
