//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Timer configuration with validation
//! - Derived timer status
//! - Serializable snapshots of the timer state

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Default session length in seconds (25 minutes).
pub const DEFAULT_SESSION_SECONDS: u32 = 25 * 60;

/// Default tick period in milliseconds.
pub const DEFAULT_TICK_MILLIS: u64 = 1000;

/// Longest allowed session (24 hours).
pub const MAX_SESSION_SECONDS: u32 = 24 * 60 * 60;

/// Longest allowed tick period.
pub const MAX_TICK_MILLIS: u64 = 60_000;

// ============================================================================
// Time Formatting
// ============================================================================

/// Formats seconds as `MM:SS`.
///
/// Both fields are zero-padded to two digits. Minutes are never truncated,
/// so 100 minutes renders as `100:00`.
pub fn format_time(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

// ============================================================================
// TimerStatus
// ============================================================================

/// Logical state of the countdown.
///
/// Derived from the running/paused flags and the remaining time; it is
/// never stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    /// Never started since creation or the last reset
    Idle,
    /// Actively counting down
    Running,
    /// Halted after having been started
    Paused,
    /// Reached zero and stopped on its own
    Finished,
}

impl TimerStatus {
    /// Derives the status from the raw store fields.
    pub fn from_flags(is_running: bool, is_paused: bool, time_left: u32) -> Self {
        if is_running {
            TimerStatus::Running
        } else if is_paused {
            TimerStatus::Paused
        } else if time_left == 0 {
            TimerStatus::Finished
        } else {
            TimerStatus::Idle
        }
    }

    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Finished => "finished",
        }
    }
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Invalid timer configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Session length outside `1..=MAX_SESSION_SECONDS`
    #[error("session length must be between 1 and {max} seconds, got {0}", max = MAX_SESSION_SECONDS)]
    SessionLength(u32),

    /// Tick period outside `1..=MAX_TICK_MILLIS`
    #[error("tick period must be between 1 and {max} milliseconds, got {0}", max = MAX_TICK_MILLIS)]
    TickPeriod(u64),
}

/// Configuration for a timer session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Session length in seconds
    pub session_seconds: u32,
    /// Wall-clock period between ticks in milliseconds
    pub tick_millis: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            session_seconds: DEFAULT_SESSION_SECONDS,
            tick_millis: DEFAULT_TICK_MILLIS,
        }
    }
}

impl TimerConfig {
    /// Sets the session length in whole minutes.
    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.session_seconds = minutes.saturating_mul(60);
        self
    }

    /// Sets the session length in seconds.
    pub fn with_seconds(mut self, seconds: u32) -> Self {
        self.session_seconds = seconds;
        self
    }

    /// Sets the tick period in milliseconds.
    pub fn with_tick_millis(mut self, millis: u64) -> Self {
        self.tick_millis = millis;
        self
    }

    /// Returns the tick period as a `Duration`.
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_millis)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_seconds < 1 || self.session_seconds > MAX_SESSION_SECONDS {
            return Err(ConfigError::SessionLength(self.session_seconds));
        }
        if self.tick_millis < 1 || self.tick_millis > MAX_TICK_MILLIS {
            return Err(ConfigError::TickPeriod(self.tick_millis));
        }
        Ok(())
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Point-in-time copy of everything the UI can read from the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Remaining seconds
    pub time_left: u32,
    /// Configured session length in seconds
    pub total_time: u32,
    /// Whether the countdown is decrementing
    pub is_running: bool,
    /// Whether the countdown was halted after starting
    pub is_paused: bool,
    /// `MM:SS` rendering of `time_left`
    pub formatted_time: String,
    /// Derived logical state
    pub status: TimerStatus,
}

impl TimerSnapshot {
    /// Completed share of the session as a whole percentage (0-100).
    pub fn progress_percent(&self) -> u32 {
        if self.total_time == 0 {
            return 100;
        }
        let elapsed = self.total_time.saturating_sub(self.time_left) as f64;
        (elapsed / self.total_time as f64 * 100.0).round() as u32
    }

    /// True while running inside the last minute.
    pub fn is_final_minute(&self) -> bool {
        self.is_running && self.time_left < 60
    }
}

// ============================================================================
// Tests
// ============================================================================
