//! Timer module for the Pomodoro Timer.
//!
//! This module contains the countdown core:
//! - `store`: countdown state machine with start/pause/reset/tick
//! - `handle`: shared, observable handle to the store
//! - `driver`: periodic tick source bound to the running flag

pub mod driver;
pub mod handle;
pub mod store;

pub use driver::TimerDriver;
pub use handle::{TimerHandle, WeakTimerHandle};
pub use store::TimerStore;
