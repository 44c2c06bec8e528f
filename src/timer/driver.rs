//! Periodic tick source for the timer store.
//!
//! The driver watches the store's running flag. While it is set, a
//! `tokio::time::Interval` calls [`TimerHandle::tick`] once per period;
//! otherwise no interval exists. The background task is aborted when the
//! driver is dropped, and exits on its own once the store is gone.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use super::handle::{TimerHandle, WeakTimerHandle};
use super::store::TimerStore;

// ============================================================================
// TimerDriver
// ============================================================================

/// Owns the background task that turns "running" into ticks.
#[derive(Debug)]
pub struct TimerDriver {
    task: Option<JoinHandle<()>>,
}

impl TimerDriver {
    /// Spawns the driver on the current tokio runtime.
    ///
    /// The driver keeps only a weak reference to the store.
    pub fn spawn(handle: &TimerHandle, period: Duration) -> Self {
        let rx = handle.subscribe();
        let store = handle.downgrade();
        let task = tokio::spawn(drive(store, rx, period));
        Self { task: Some(task) }
    }

    /// Returns true once the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stops the background task and waits for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            debug!("timer driver shut down");
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Creates a ticker whose first tick is one full period away.
fn new_ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Ticker tagged with the run generation it was created for.
type HeldTicker = Option<(u64, Interval)>;

/// Waits for the next tick, or forever when no ticker is held.
async fn next_tick(ticker: &mut HeldTicker) {
    match ticker {
        Some((_, ticker)) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn drive(store: WeakTimerHandle, mut rx: watch::Receiver<TimerStore>, period: Duration) {
    let mut ticker: HeldTicker = None;

    loop {
        // The channel keeps only the latest state, so a pause/start pair
        // between two polls shows up as a new run generation.
        let (running, generation) = {
            let current = rx.borrow_and_update();
            (current.is_running(), current.run_generation())
        };
        let held = ticker.as_ref().map(|(held, _)| *held);
        match (running, held) {
            (true, Some(held)) if held == generation => {}
            (true, _) => {
                ticker = Some((generation, new_ticker(period)));
                debug!(?period, generation, "tick source acquired");
            }
            (false, Some(_)) => {
                ticker = None;
                debug!("tick source released");
            }
            (false, None) => {}
        }

        tokio::select! {
            // State changes win over a ready tick so a pause is seen first.
            biased;

            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = next_tick(&mut ticker) => {
                match store.upgrade() {
                    Some(handle) => {
                        handle.tick();
                    }
                    None => break,
                }
            }
        }
    }

    debug!("timer store dropped, driver exiting");
}

// ============================================================================
// Tests
// ============================================================================
