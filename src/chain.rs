//! Shared chain state: the active macro record and the stop flag.

use crate::host::MacroHandle;
use macro_chain_grid::{NeighborSet, Slot};
use parking_lot::Mutex;

/// The macro currently considered active, with its precomputed neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveMacro {
    /// Host handle of the executed macro.
    pub handle: MacroHandle,
    /// Table position of the executed macro.
    pub slot: Slot,
    /// Directional neighbors, derived when the record was made.
    pub neighbors: NeighborSet,
}

/// Outcome of the precondition check shared by the chaining operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The operation may proceed.
    Proceed,
    /// Nothing is active and the operation needs an active macro.
    NoActiveMacro,
    /// A stop request was pending; it has been consumed and the operation
    /// must not run.
    Stopped,
}

#[derive(Debug, Default)]
struct ChainState {
    active: Option<ActiveMacro>,
    stop_requested: bool,
}

/// Chain tracking shared by the execution hook, the command handlers, and
/// the frame poll.
///
/// Interior mutability only. The host runs all three callers on its main
/// thread, so the mutex guards simple field access; it is never held across
/// a host call.
#[derive(Debug, Default)]
pub struct ChainTracker {
    state: Mutex<ChainState>,
}

impl ChainTracker {
    pub fn new() -> ChainTracker {
        ChainTracker::default()
    }

    /// Records `slot` as the active macro and derives its neighbors.
    pub fn record_execution(&self, handle: MacroHandle, slot: Slot) {
        let neighbors = NeighborSet::around(slot);
        self.state.lock().active = Some(ActiveMacro {
            handle,
            slot,
            neighbors,
        });
        log::debug!("active macro now {slot} (handle {handle})");
    }

    /// The active record, if any.
    pub fn active(&self) -> Option<ActiveMacro> {
        self.state.lock().active
    }

    /// True while a macro chain is considered active.
    pub fn is_active(&self) -> bool {
        self.state.lock().active.is_some()
    }

    /// Drops the active record. A pending stop request is left as-is, so a
    /// stop outlives liveness expiry and logout.
    pub fn clear_active(&self) {
        self.state.lock().active = None;
    }

    /// Flags the next chain operation to be aborted.
    pub fn request_stop(&self) {
        self.state.lock().stop_requested = true;
    }

    /// Whether a stop request is waiting to be consumed.
    pub fn stop_pending(&self) -> bool {
        self.state.lock().stop_requested
    }

    /// Precondition shared by the chaining operations.
    ///
    /// `run` relaxes the active-macro requirement so the run command can
    /// start a chain from idle. A pending stop request is consumed here, and
    /// only while a macro is active.
    pub fn check_requirements(&self, run: bool) -> Requirement {
        let mut state = self.state.lock();
        if !run && state.active.is_none() {
            return Requirement::NoActiveMacro;
        }
        if state.active.is_some() && state.stop_requested {
            state.stop_requested = false;
            return Requirement::Stopped;
        }
        Requirement::Proceed
    }
}
