// Library exports for embedders and tests
//
// # Threading Model
//
// The host client runs every entry point into this crate (the execute-macro
// detour, the chat command handlers, the per-frame liveness poll) on its
// main thread, never concurrently. State is still wrapped in
// `parking_lot::Mutex` so the types are sound if an embedder drives them
// from elsewhere, with one hard rule:
//
//   - Never hold a state lock across a host call. `execute_macro` goes
//     through the patched entry point and synchronously re-enters the
//     detour, which takes the same locks. Copy what you need out of the
//     guard, drop it, then call the host.

/// Plugin version (root crate version).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod chain;
pub mod commands;
pub mod hook;
pub mod host;
pub mod liveness;
pub mod plugin;

pub use chain::{ActiveMacro, ChainTracker, Requirement};
pub use commands::{
    COMMANDS, ChainCommand, CommandSpec, LOOP_COMMAND, NEXT_COMMAND, PLUGIN_NAME, RUN_COMMAND,
    STOP_COMMAND,
};
pub use hook::ExecuteMacroHook;
pub use host::{ChatSink, HostError, MacroHandle, MacroHost, OriginalExecuteFn};
pub use liveness::{LivenessMonitor, LivenessTimer};
pub use plugin::MacroChainPlugin;

// Re-export the sub-crates so embedders depend on one crate.
pub use macro_chain_config::{ChainSettings, ConfigError};
pub use macro_chain_grid as grid;
pub use macro_chain_grid::{Bank, Direction, NeighborSet, Slot};
