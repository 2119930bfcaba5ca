//! Frame-driven liveness tracking for the active macro.
//!
//! The host has no "macro finished" event, so the plugin watches the macro
//! engine's execution cursor once per frame instead. The timer starts the
//! first time the cursor is seen on a line and restarts on every stepping
//! frame; once the cursor has stayed idle for longer than the grace period
//! the active record is dropped. Macros that never step a line (an empty
//! macro, or one the engine rejects before its first line) never start the
//! timer and therefore never expire.

use crate::chain::ChainTracker;
use crate::host::MacroHost;
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Elapsed-time tracker with stopwatch semantics: not running until the
/// first [`LivenessTimer::restart`], and expiry never fires while stopped.
#[derive(Debug, Default, Clone, Copy)]
pub struct LivenessTimer {
    started: Option<Instant>,
}

impl LivenessTimer {
    pub fn new() -> LivenessTimer {
        LivenessTimer::default()
    }

    /// (Re)starts the timer from `now`.
    pub fn restart(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Stops the timer and discards its start point.
    pub fn reset(&mut self) {
        self.started = None;
    }

    /// True while the timer has a start point.
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// True once strictly more than `grace` has passed since the last
    /// restart. A timer that was never started does not expire.
    pub fn expired(&self, now: Instant, grace: Duration) -> bool {
        self.started
            .is_some_and(|started| now.duration_since(started) > grace)
    }
}

/// Per-frame poll that retires the active macro record.
pub struct LivenessMonitor {
    timer: Mutex<LivenessTimer>,
    grace: Duration,
}

impl LivenessMonitor {
    pub fn new(grace: Duration) -> LivenessMonitor {
        LivenessMonitor {
            timer: Mutex::new(LivenessTimer::new()),
            grace,
        }
    }

    /// The configured grace period.
    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Runs one poll step. Call once per host frame tick.
    ///
    /// Does nothing while no macro is active. Logout drops the record
    /// immediately; otherwise a stepping cursor restarts the timer and an
    /// idle cursor past the grace period retires the record.
    pub fn poll(&self, host: &dyn MacroHost, tracker: &ChainTracker, now: Instant) {
        if !tracker.is_active() {
            return;
        }
        if !host.is_logged_in() {
            tracker.clear_active();
            self.timer.lock().reset();
            log::debug!("logout observed, chain record dropped");
            return;
        }
        let line = host.current_macro_line();
        let mut timer = self.timer.lock();
        if line >= 0 {
            timer.restart(now);
            return;
        }
        if timer.expired(now, self.grace) {
            tracker.clear_active();
            timer.reset();
            log::debug!(
                "macro idle past {} ms grace, chain record dropped",
                self.grace.as_millis()
            );
        }
    }
}
