//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - Timer state lines (text or JSON)
//! - The primary control choice (Start / Pause / Resume)
//! - Error messages

use anyhow::{Context, Result};

use crate::types::{TimerSnapshot, TimerStatus};

// ============================================================================
// PrimaryControl
// ============================================================================

/// The control a UI shows as its main button for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryControl {
    /// Idle or finished
    Start,
    /// Running
    Pause,
    /// Paused
    Resume,
}

impl PrimaryControl {
    /// Picks the control for a snapshot.
    pub fn for_snapshot(snapshot: &TimerSnapshot) -> Self {
        if snapshot.is_running {
            PrimaryControl::Pause
        } else if snapshot.is_paused {
            PrimaryControl::Resume
        } else {
            PrimaryControl::Start
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            PrimaryControl::Start => "Start",
            PrimaryControl::Pause => "Pause",
            PrimaryControl::Resume => "Resume",
        }
    }

    /// Spoken description of what the control does.
    pub fn description(&self) -> &'static str {
        match self {
            PrimaryControl::Start => "Start timer",
            PrimaryControl::Pause => "Pause timer",
            PrimaryControl::Resume => "Resume timer",
        }
    }
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Short message describing the timer state.
    ///
    /// A finished countdown has the same flags as an idle one; it gets its
    /// own message only because `time_left` is zero.
    pub fn status_message(snapshot: &TimerSnapshot) -> &'static str {
        match snapshot.status {
            TimerStatus::Running => "Focus time!",
            TimerStatus::Paused => "Paused",
            TimerStatus::Idle => "Ready to start",
            TimerStatus::Finished => "Session complete!",
        }
    }

    /// Renders one text line for a snapshot.
    pub fn render_line(snapshot: &TimerSnapshot) -> String {
        let mut line = format!(
            "{}  {}  {}% complete",
            snapshot.formatted_time,
            Self::status_message(snapshot),
            snapshot.progress_percent()
        );
        if snapshot.is_final_minute() {
            line.push_str("  Final minute!");
        }
        line
    }

    /// Renders a snapshot as a single JSON object.
    pub fn render_json(snapshot: &TimerSnapshot) -> Result<String> {
        serde_json::to_string(snapshot).context("Failed to serialize timer snapshot")
    }

    /// Renders the key hint for the available controls.
    pub fn controls_hint(snapshot: &TimerSnapshot) -> String {
        let primary = PrimaryControl::for_snapshot(snapshot);
        format!("[t] {}  [r] Reset  [q] Quit", primary.label())
    }

    /// Spoken form of the remaining time.
    pub fn spoken_time(snapshot: &TimerSnapshot) -> String {
        format!(
            "Timer: {} minutes and {} seconds",
            snapshot.time_left / 60,
            snapshot.time_left % 60
        )
    }

    /// Prints the session banner.
    pub fn show_banner(total_seconds: u32) {
        println!("Pomodoro Timer");
        println!("─────────────────────────────");
        println!(
            "Stay focused with {}-minute work sessions",
            Self::session_minutes(total_seconds)
        );
    }

    /// Prints the current state.
    pub fn show_state(snapshot: &TimerSnapshot, json: bool) -> Result<()> {
        if json {
            println!("{}", Self::render_json(snapshot)?);
        } else {
            println!("{}", Self::render_line(snapshot));
            println!("  {}", Self::controls_hint(snapshot));
        }
        Ok(())
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Whole minutes in a session, rounded up so short sessions show 1.
    fn session_minutes(total_seconds: u32) -> u32 {
        total_seconds.div_ceil(60)
    }
}

// ============================================================================
// Tests
// ============================================================================
