//! Shared handle to the timer store.
//!
//! The store lives inside a `watch` channel: every operation that changes
//! observable state notifies subscribers, and operations that are no-ops
//! stay silent.

use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tracing::debug;

use super::store::TimerStore;
use crate::types::{TimerConfig, TimerSnapshot, TimerStatus};

// ============================================================================
// TimerHandle
// ============================================================================

/// Cloneable handle to a single [`TimerStore`].
#[derive(Debug, Clone)]
pub struct TimerHandle {
    tx: Arc<watch::Sender<TimerStore>>,
}

impl TimerHandle {
    /// Creates a handle owning a fresh idle store.
    pub fn new(store: TimerStore) -> Self {
        let (tx, _rx) = watch::channel(store);
        Self { tx: Arc::new(tx) }
    }

    /// Creates a handle with the session length from `config`.
    pub fn from_config(config: &TimerConfig) -> Self {
        Self::new(TimerStore::new(config.session_seconds))
    }

    /// Starts or resumes the countdown.
    pub fn start(&self) -> bool {
        self.apply("start", TimerStore::start)
    }

    /// Pauses a running countdown.
    pub fn pause(&self) -> bool {
        self.apply("pause", TimerStore::pause)
    }

    /// Returns the store to idle with a full session.
    pub fn reset(&self) -> bool {
        self.apply("reset", TimerStore::reset)
    }

    /// Advances the countdown by one second. Invoked by the driver.
    pub fn tick(&self) -> bool {
        self.apply("tick", TimerStore::tick)
    }

    fn apply(&self, op: &'static str, f: fn(&mut TimerStore) -> bool) -> bool {
        let changed = self.tx.send_if_modified(|store| f(store));
        if changed {
            let store = self.tx.borrow();
            debug!(
                op,
                status = store.status().as_str(),
                time_left = store.time_left(),
                "timer state changed"
            );
        }
        changed
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<TimerStore> {
        self.tx.subscribe()
    }

    /// Copies the current state.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.tx.borrow().snapshot()
    }

    /// Current logical state.
    pub fn status(&self) -> TimerStatus {
        self.tx.borrow().status()
    }

    /// True while the countdown is decrementing.
    pub fn is_running(&self) -> bool {
        self.tx.borrow().is_running()
    }

    /// Remaining seconds.
    pub fn time_left(&self) -> u32 {
        self.tx.borrow().time_left()
    }

    /// Downgrades to a handle that does not keep the store alive.
    pub fn downgrade(&self) -> WeakTimerHandle {
        WeakTimerHandle {
            tx: Arc::downgrade(&self.tx),
        }
    }

    /// Overrides the remaining time.
    #[cfg(test)]
    pub fn set_time_left(&self, seconds: u32) {
        self.tx.send_modify(|store| store.set_time_left(seconds));
    }
}

impl Default for TimerHandle {
    fn default() -> Self {
        Self::new(TimerStore::default())
    }
}

// ============================================================================
// WeakTimerHandle
// ============================================================================

/// Non-owning handle; see [`TimerHandle::downgrade`].
#[derive(Debug, Clone)]
pub struct WeakTimerHandle {
    tx: Weak<watch::Sender<TimerStore>>,
}

impl WeakTimerHandle {
    /// Returns a strong handle while any other strong handle is alive.
    pub fn upgrade(&self) -> Option<TimerHandle> {
        self.tx.upgrade().map(|tx| TimerHandle { tx })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handle_is_idle() {
        let handle = TimerHandle::default();
        assert_eq!(handle.status(), TimerStatus::Idle);
        assert_eq!(handle.time_left(), 1500);
        assert_eq!(handle.snapshot().formatted_time, "25:00");
    }

    #[test]
    fn test_from_config() {
        let config = TimerConfig::default().with_seconds(42);
        let handle = TimerHandle::from_config(&config);
        assert_eq!(handle.time_left(), 42);
        assert_eq!(handle.snapshot().total_time, 42);
    }

    #[test]
    fn test_clones_share_store() {
        let handle = TimerHandle::default();
        let other = handle.clone();

        handle.start();
        other.tick();

        assert!(handle.is_running());
        assert_eq!(handle.time_left(), 1499);
    }

    #[test]
    fn test_subscriber_notified_on_change() {
        let handle = TimerHandle::default();
        let mut rx = handle.subscribe();
        assert!(!rx.has_changed().unwrap());

        assert!(handle.start());
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_running());
    }

    #[test]
    fn test_subscriber_not_notified_on_noop() {
        let handle = TimerHandle::default();
        let mut rx = handle.subscribe();

        assert!(!handle.pause());
        assert!(!handle.tick());
        assert!(!handle.reset());
        assert!(!rx.has_changed().unwrap());

        handle.start();
        rx.borrow_and_update();
        assert!(!handle.start());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_weak_handle_upgrade() {
        let handle = TimerHandle::default();
        let weak = handle.downgrade();

        let upgraded = weak.upgrade().expect("store should be alive");
        upgraded.start();
        assert!(handle.is_running());
        drop(upgraded);

        drop(handle);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_receiver_sees_closed_store() {
        let handle = TimerHandle::default();
        let rx = handle.subscribe();
        drop(handle);
        assert!(rx.has_changed().is_err());
    }
}
