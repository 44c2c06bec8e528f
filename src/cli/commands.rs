//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::types::{TimerConfig, DEFAULT_TICK_MILLIS, MAX_SESSION_SECONDS, MAX_TICK_MILLIS};

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer CLI - A terminal countdown timer
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-timer",
    version,
    about = "Terminal Pomodoro countdown timer",
    long_about = "A single-session Pomodoro countdown timer.\n\
                  Run `pomodoro-timer run` and control it with one-letter commands on stdin.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer session
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Session length in minutes (1-1440)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=1440)
    )]
    pub minutes: u32,

    /// Session length in seconds, overrides --minutes
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SESSION_SECONDS as i64)
    )]
    pub seconds: Option<u32>,

    /// Milliseconds between ticks
    #[arg(
        long,
        hide = true,
        default_value_t = DEFAULT_TICK_MILLIS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TICK_MILLIS)
    )]
    pub tick_ms: u64,

    /// Start counting down immediately
    #[arg(short, long)]
    pub auto_start: bool,

    /// Print one JSON snapshot per state change instead of text
    #[arg(long)]
    pub json: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            minutes: 25,
            seconds: None,
            tick_ms: DEFAULT_TICK_MILLIS,
            auto_start: false,
            json: false,
        }
    }
}

impl RunArgs {
    /// Builds the timer configuration described by these arguments.
    pub fn to_config(&self) -> TimerConfig {
        let config = TimerConfig::default().with_tick_millis(self.tick_ms);
        match self.seconds {
            Some(seconds) => config.with_seconds(seconds),
            None => config.with_minutes(self.minutes),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
