//! Interception of the host's execute-macro entry point.
//!
//! The embedder patches the native entry point to call
//! [`ExecuteMacroHook::intercept`] and hands the trampoline to the unhooked
//! implementation over at construction. The hook is transparent: every call
//! is forwarded unchanged before anything is observed, and no fault here
//! ever escapes to the host caller.

use crate::chain::ChainTracker;
use crate::host::{HostError, MacroHandle, MacroHost, OriginalExecuteFn};
use macro_chain_grid::Slot;
use std::sync::Arc;

/// Detour installed over the host's execute-macro entry point.
pub struct ExecuteMacroHook {
    host: Arc<dyn MacroHost>,
    tracker: Arc<ChainTracker>,
    original: OriginalExecuteFn,
}

impl ExecuteMacroHook {
    pub(crate) fn new(
        host: Arc<dyn MacroHost>,
        tracker: Arc<ChainTracker>,
        original: OriginalExecuteFn,
    ) -> ExecuteMacroHook {
        ExecuteMacroHook {
            host,
            tracker,
            original,
        }
    }

    /// Detour body for one intercepted execution.
    ///
    /// Forwards to the original implementation first. A forwarding failure
    /// is logged and nothing is recorded. After a successful forward the
    /// executed slot is recorded unless the host reports its reentrancy lock
    /// held, or the handle cannot be located in the macro table (a macro
    /// executed from outside the table is not chainable).
    pub fn intercept(&self, handle: MacroHandle) {
        if let Err(err) = (self.original)(handle) {
            log::error!("forwarded macro execution failed: {err}");
            return;
        }
        if self.host.macro_locked() {
            log::trace!("macro subsystem locked, execution of {handle} not recorded");
            return;
        }
        match self.locate(handle) {
            Ok(Some(slot)) => self.tracker.record_execution(handle, slot),
            Ok(None) => log::debug!("executed macro {handle} is not in the table, not chainable"),
            Err(err) => log::error!("macro table scan failed: {err}"),
        }
    }

    /// Scans both banks for the slot whose stored handle equals `handle`.
    fn locate(&self, handle: MacroHandle) -> Result<Option<Slot>, HostError> {
        for slot in Slot::all() {
            if self.host.macro_handle(slot)? == handle {
                return Ok(Some(slot));
            }
        }
        Ok(None)
    }
}
