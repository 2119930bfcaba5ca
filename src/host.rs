//! Host-side collaborators consumed by the plugin.
//!
//! The game client owns macro storage, macro execution, the chat log, and
//! the frame loop; this module defines the narrow surface the plugin needs
//! from it. The embedder supplies implementations backed by the client's
//! native modules, tests use scripted doubles.

use macro_chain_grid::{Bank, Slot};
use std::fmt;

/// Opaque address of one macro inside the host's macro table.
///
/// Handles are minted and owned by the host. The plugin only stores and
/// compares them; a handle is never kept past the host invalidating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacroHandle(u64);

impl MacroHandle {
    /// Wraps a raw host address.
    pub fn from_raw(raw: u64) -> MacroHandle {
        MacroHandle(raw)
    }

    /// The raw host address.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MacroHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Faults reported by host calls.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The macro table has no entry at the requested position.
    #[error("no macro at {bank} slot {index}")]
    InvalidSlot { bank: Bank, index: u8 },
    /// The macro subsystem refused or failed an execution request.
    #[error("macro execution failed: {0}")]
    ExecutionFailed(String),
    /// The host module backing a call is not available right now.
    #[error("host macro subsystem unavailable: {0}")]
    Unavailable(String),
}

/// The game client's macro subsystem, as seen by the plugin.
///
/// Implementations are single-threaded by contract: the host never runs the
/// execution entry point and the frame tick concurrently, and every call
/// here happens on the host's main thread. `execute_macro` goes through the
/// patched entry point, so it synchronously re-enters the installed hook.
pub trait MacroHost {
    /// Requests playback of the given macro.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the macro subsystem rejects or fails the
    /// request.
    fn execute_macro(&self, handle: MacroHandle) -> Result<(), HostError>;

    /// Handle of the macro stored at `slot`.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] when the table cannot be read.
    fn macro_handle(&self, slot: Slot) -> Result<MacroHandle, HostError>;

    /// Current state of the host's macro reentrancy lock.
    fn macro_locked(&self) -> bool;

    /// Overrides the host's macro reentrancy lock.
    fn set_macro_locked(&self, locked: bool);

    /// Line index the macro engine is currently executing. Negative while no
    /// macro line is being stepped.
    fn current_macro_line(&self) -> i32;

    /// Whether a character is logged in.
    fn is_logged_in(&self) -> bool;
}

/// Chat output as offered to the plugin.
pub trait ChatSink {
    /// Prints a plain chat line.
    fn print(&self, message: &str);

    /// Prints an error-styled chat line.
    fn print_error(&self, message: &str);
}

/// Trampoline to the host's unhooked execute-macro implementation.
///
/// Supplied once when the execution hook is installed. The hook forwards
/// every intercepted call through it before observing anything, so macro
/// execution behaves identically with or without the plugin.
pub type OriginalExecuteFn = Box<dyn Fn(MacroHandle) -> Result<(), HostError>>;
