//! Countdown state machine.
//!
//! `TimerStore` is a plain state container: it never sleeps, spawns or
//! performs I/O. Wall-clock ticks come from [`super::driver::TimerDriver`].
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//!                    |
//!                    +--tick (reaches 0)--> Finished
//! any --reset--> Idle
//! ```

use crate::types::{format_time, TimerSnapshot, TimerStatus, DEFAULT_SESSION_SECONDS};

// ============================================================================
// TimerStore
// ============================================================================

/// Single countdown counter with its derived display string.
///
/// Every operation is total: calls that make no sense in the current state
/// leave it untouched. Each operation returns whether observable state
/// changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerStore {
    time_left: u32,
    total_time: u32,
    is_running: bool,
    is_paused: bool,
    formatted_time: String,
    run_generation: u64,
}

impl Default for TimerStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_SECONDS)
    }
}

impl TimerStore {
    /// Creates an idle store with a full session of `total_time` seconds.
    pub fn new(total_time: u32) -> Self {
        Self {
            time_left: total_time,
            total_time,
            is_running: false,
            is_paused: false,
            formatted_time: format_time(total_time),
            run_generation: 0,
        }
    }

    /// Starts or resumes the countdown.
    ///
    /// No-op while already running, and once finished: a finished session
    /// has to be reset before it can run again.
    pub fn start(&mut self) -> bool {
        if self.is_running || self.time_left == 0 {
            return false;
        }
        self.is_running = true;
        self.is_paused = false;
        self.run_generation += 1;
        true
    }

    /// Pauses a running countdown. No-op otherwise.
    pub fn pause(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        self.is_running = false;
        self.is_paused = true;
        true
    }

    /// Returns to the idle state with a full session.
    pub fn reset(&mut self) -> bool {
        let before = (self.time_left, self.is_running, self.is_paused);
        self.time_left = self.total_time;
        self.is_running = false;
        self.is_paused = false;
        self.refresh_formatted_time();
        before != (self.time_left, self.is_running, self.is_paused)
    }

    /// Advances the countdown by one second.
    ///
    /// Ignored unless running. Reaching zero stops the countdown; it does
    /// not enter the paused state.
    pub fn tick(&mut self) -> bool {
        if !self.is_running {
            return false;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.is_running = false;
            self.is_paused = false;
        }
        self.refresh_formatted_time();
        true
    }

    /// Overrides the remaining time, clamped to the session length.
    ///
    /// Zero stops the countdown as a final tick would.
    #[cfg(test)]
    pub fn set_time_left(&mut self, seconds: u32) {
        self.time_left = seconds.min(self.total_time);
        if self.time_left == 0 {
            self.is_running = false;
            self.is_paused = false;
        }
        self.refresh_formatted_time();
    }

    fn refresh_formatted_time(&mut self) {
        self.formatted_time = format_time(self.time_left);
    }

    /// Remaining seconds.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Configured session length in seconds.
    pub fn total_time(&self) -> u32 {
        self.total_time
    }

    /// True while the countdown is decrementing.
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// True when halted after having been started.
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// `MM:SS` rendering of the remaining time.
    pub fn formatted_time(&self) -> &str {
        &self.formatted_time
    }

    /// Number of times the countdown has entered the running state.
    ///
    /// Observers that see only the latest state use this to tell a
    /// pause/resume or reset/start pair apart from uninterrupted running.
    pub fn run_generation(&self) -> u64 {
        self.run_generation
    }

    /// Logical state derived from the flags and the remaining time.
    pub fn status(&self) -> TimerStatus {
        TimerStatus::from_flags(self.is_running, self.is_paused, self.time_left)
    }

    /// Copies the readable state.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            time_left: self.time_left,
            total_time: self.total_time,
            is_running: self.is_running,
            is_paused: self.is_paused,
            formatted_time: self.formatted_time.clone(),
            status: self.status(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
