//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - Countdown store with start/pause/reset/tick transitions
//! - Observable timer handle and the periodic tick driver
//! - CLI command parsing, display utilities and the interactive session
//! - Type definitions for configuration and snapshots

pub mod cli;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use timer::{TimerDriver, TimerHandle, TimerStore, WeakTimerHandle};
pub use types::{format_time, ConfigError, TimerConfig, TimerSnapshot, TimerStatus};
