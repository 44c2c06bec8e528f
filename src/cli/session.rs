//! Interactive timer session.
//!
//! A session owns the timer handle and its driver, reads one command per
//! input line and re-renders whenever the timer publishes a change.

use std::future::Future;
use std::str::FromStr;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use super::display::{Display, PrimaryControl};
use crate::timer::{TimerDriver, TimerHandle};
use crate::types::{TimerConfig, TimerSnapshot, TimerStatus};

// ============================================================================
// SessionCommand
// ============================================================================

/// A command typed into a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Start or resume
    Start,
    /// Pause
    Pause,
    /// Whatever the primary control currently does
    Toggle,
    /// Back to a full idle session
    Reset,
    /// End the session
    Quit,
}

/// Input line that is not a known command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command {0:?} (use s, p, t, r or q)")]
pub struct CommandParseError(pub String);

impl FromStr for SessionCommand {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "start" | "resume" => Ok(SessionCommand::Start),
            "p" | "pause" => Ok(SessionCommand::Pause),
            "t" | "toggle" => Ok(SessionCommand::Toggle),
            "r" | "reset" => Ok(SessionCommand::Reset),
            "q" | "quit" | "exit" => Ok(SessionCommand::Quit),
            _ => Err(CommandParseError(s.trim().to_string())),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// One interactive timer session.
#[derive(Debug)]
pub struct Session {
    handle: TimerHandle,
    driver: TimerDriver,
    json: bool,
    auto_start: bool,
}

impl Session {
    /// Creates a session and spawns its driver.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &TimerConfig, json: bool) -> Result<Self> {
        config.validate().context("Invalid timer configuration")?;

        let handle = TimerHandle::from_config(config);
        let driver = TimerDriver::spawn(&handle, config.tick_period());

        Ok(Self {
            handle,
            driver,
            json,
            auto_start: false,
        })
    }

    /// Starts the countdown as soon as the session runs.
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Returns the session's timer handle.
    pub fn handle(&self) -> &TimerHandle {
        &self.handle
    }

    /// Applies a command. Returns false when the session should end.
    pub fn apply(&self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::Start => {
                self.handle.start();
            }
            SessionCommand::Pause => {
                self.handle.pause();
            }
            SessionCommand::Toggle => {
                let control = PrimaryControl::for_snapshot(&self.handle.snapshot());
                debug!(action = control.description(), "toggle");
                match control {
                    PrimaryControl::Start | PrimaryControl::Resume => self.handle.start(),
                    PrimaryControl::Pause => self.handle.pause(),
                };
            }
            SessionCommand::Reset => {
                self.handle.reset();
            }
            SessionCommand::Quit => return false,
        }
        true
    }

    /// Runs the session until quit, shutdown, or input closes with the
    /// timer no longer running.
    pub async fn run<R, F>(self, input: R, shutdown: F) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        F: Future<Output = ()>,
    {
        let mut updates = self.handle.subscribe();
        let mut lines = input.lines();
        let mut input_open = true;
        tokio::pin!(shutdown);

        let initial = self.handle.snapshot();
        info!(total_seconds = initial.total_time, "session started");
        if !self.json {
            Display::show_banner(initial.total_time);
        }
        self.render(&initial)?;

        if self.auto_start {
            self.handle.start();
        }

        loop {
            if !input_open && !self.handle.is_running() {
                debug!("input closed and timer idle, ending session");
                break;
            }

            tokio::select! {
                biased;

                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = updates.borrow_and_update().snapshot();
                    self.render(&snapshot)?;
                    if snapshot.status == TimerStatus::Finished {
                        info!("session complete");
                    }
                }
                line = lines.next_line(), if input_open => {
                    match line.context("Failed to read input")? {
                        Some(line) if line.trim().is_empty() => {}
                        Some(line) => match line.parse::<SessionCommand>() {
                            Ok(command) => {
                                debug!(?command, "command received");
                                if !self.apply(command) {
                                    break;
                                }
                            }
                            Err(e) => {
                                warn!(input = %e.0, "ignoring unknown command");
                                Display::show_error(&e.to_string());
                            }
                        },
                        None => {
                            debug!("input closed");
                            input_open = false;
                        }
                    }
                }
                _ = &mut shutdown => {
                    info!("session interrupted");
                    break;
                }
            }
        }

        self.driver.shutdown().await;
        Ok(())
    }

    fn render(&self, snapshot: &TimerSnapshot) -> Result<()> {
        debug!(spoken = %Display::spoken_time(snapshot), "render");
        Display::show_state(snapshot, self.json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;
    use tokio::io::BufReader;
    use tokio::time::{sleep, Duration};

    fn config(seconds: u32) -> TimerConfig {
        TimerConfig::default().with_seconds(seconds)
    }

    // ------------------------------------------------------------------------
    // SessionCommand Tests
    // ------------------------------------------------------------------------

    mod command_tests {
        use super::*;

        #[test]
        fn test_parse_short_forms() {
            assert_eq!("s".parse::<SessionCommand>(), Ok(SessionCommand::Start));
            assert_eq!("p".parse::<SessionCommand>(), Ok(SessionCommand::Pause));
            assert_eq!("t".parse::<SessionCommand>(), Ok(SessionCommand::Toggle));
            assert_eq!("r".parse::<SessionCommand>(), Ok(SessionCommand::Reset));
            assert_eq!("q".parse::<SessionCommand>(), Ok(SessionCommand::Quit));
        }

        #[test]
        fn test_parse_long_forms_case_insensitive() {
            assert_eq!("Resume".parse::<SessionCommand>(), Ok(SessionCommand::Start));
            assert_eq!(" PAUSE ".parse::<SessionCommand>(), Ok(SessionCommand::Pause));
            assert_eq!("exit".parse::<SessionCommand>(), Ok(SessionCommand::Quit));
        }

        #[test]
        fn test_parse_unknown() {
            let err = "stop".parse::<SessionCommand>().unwrap_err();
            assert_eq!(err, CommandParseError("stop".to_string()));
            assert_eq!(
                err.to_string(),
                "unknown command \"stop\" (use s, p, t, r or q)"
            );
        }
    }

    // ------------------------------------------------------------------------
    // Session Tests
    // ------------------------------------------------------------------------

    mod session_tests {
        use super::*;

        #[tokio::test]
        async fn test_new_rejects_invalid_config() {
            let result = Session::new(&config(0), false);
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_apply_toggle_follows_primary_control() {
            let session = Session::new(&config(60), false).unwrap();
            let handle = session.handle().clone();

            assert!(session.apply(SessionCommand::Toggle));
            assert_eq!(handle.status(), TimerStatus::Running);
            assert!(session.apply(SessionCommand::Toggle));
            assert_eq!(handle.status(), TimerStatus::Paused);
            assert!(session.apply(SessionCommand::Toggle));
            assert_eq!(handle.status(), TimerStatus::Running);
            assert!(session.apply(SessionCommand::Reset));
            assert_eq!(handle.status(), TimerStatus::Idle);
            assert!(!session.apply(SessionCommand::Quit));
        }

        #[tokio::test(start_paused = true)]
        async fn test_ends_when_input_closes_while_idle() {
            let session = Session::new(&config(60), false).unwrap();
            let handle = session.handle().clone();

            session.run(BufReader::new(&b""[..]), pending()).await.unwrap();

            assert_eq!(handle.status(), TimerStatus::Idle);
        }

        #[tokio::test(start_paused = true)]
        async fn test_ends_paused_after_start_and_pause() {
            let session = Session::new(&config(60), false).unwrap();
            let handle = session.handle().clone();

            session
                .run(BufReader::new(&b"s\n\nbogus\np\n"[..]), pending())
                .await
                .unwrap();

            assert_eq!(handle.status(), TimerStatus::Paused);
        }

        #[tokio::test(start_paused = true)]
        async fn test_runs_to_completion_after_input_closes() {
            let session = Session::new(&config(3), true).unwrap();
            let handle = session.handle().clone();

            session.run(BufReader::new(&b"s\n"[..]), pending()).await.unwrap();

            let snapshot = handle.snapshot();
            assert_eq!(snapshot.status, TimerStatus::Finished);
            assert_eq!(snapshot.formatted_time, "00:00");
        }

        #[tokio::test(start_paused = true)]
        async fn test_quit_ends_running_session() {
            let session = Session::new(&config(60), false).unwrap();
            let handle = session.handle().clone();

            session
                .run(BufReader::new(&b"s\nq\n"[..]), pending())
                .await
                .unwrap();

            assert!(handle.is_running());
            sleep(Duration::from_secs(5)).await;
            assert_eq!(handle.time_left(), 60);
        }

        #[tokio::test(start_paused = true)]
        async fn test_shutdown_ends_session() {
            let session = Session::new(&config(60), false)
                .unwrap()
                .with_auto_start(true);
            let handle = session.handle().clone();
            let (_writer, reader) = tokio::io::duplex(64);

            session
                .run(BufReader::new(reader), sleep(Duration::from_millis(5500)))
                .await
                .unwrap();

            assert_eq!(handle.time_left(), 55);
            assert!(handle.is_running());
        }
    }
}
