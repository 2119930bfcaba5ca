//! Plugin lifecycle: wiring, the frame tick entry, and command dispatch.

use crate::chain::{ActiveMacro, ChainTracker};
use crate::commands::{ChainCommand, ChainController};
use crate::hook::ExecuteMacroHook;
use crate::host::{ChatSink, MacroHost, OriginalExecuteFn};
use crate::liveness::LivenessMonitor;
use macro_chain_config::ChainSettings;
use std::sync::Arc;
use std::time::Instant;

/// The macro chaining plugin.
///
/// The embedder builds one of these around its host surfaces, installs
/// [`MacroChainPlugin::hook`] over the native execute-macro entry point,
/// registers the [`crate::commands::COMMANDS`] table, and calls
/// [`MacroChainPlugin::on_framework_update`] once per frame.
pub struct MacroChainPlugin {
    tracker: Arc<ChainTracker>,
    hook: Arc<ExecuteMacroHook>,
    controller: ChainController,
    monitor: LivenessMonitor,
    host: Arc<dyn MacroHost>,
}

impl MacroChainPlugin {
    /// Builds the plugin around the host surfaces.
    ///
    /// `original` is the trampoline to the unhooked execute-macro
    /// implementation; the embedder obtains it while patching the native
    /// entry point to call [`ExecuteMacroHook::intercept`].
    pub fn new(
        host: Arc<dyn MacroHost>,
        chat: Arc<dyn ChatSink>,
        settings: &ChainSettings,
        original: OriginalExecuteFn,
    ) -> MacroChainPlugin {
        let tracker = Arc::new(ChainTracker::new());
        let hook = Arc::new(ExecuteMacroHook::new(
            host.clone(),
            tracker.clone(),
            original,
        ));
        let controller = ChainController::new(
            host.clone(),
            chat,
            tracker.clone(),
            settings.legacy_run_bank,
        );
        let monitor = LivenessMonitor::new(settings.liveness_grace());
        log::info!(
            "macro chaining ready (grace {} ms, legacy run bank {})",
            settings.liveness_grace_ms,
            settings.legacy_run_bank
        );
        MacroChainPlugin {
            tracker,
            hook,
            controller,
            monitor,
            host,
        }
    }

    /// The detour to install over the host's execute-macro entry point.
    pub fn hook(&self) -> Arc<ExecuteMacroHook> {
        self.hook.clone()
    }

    /// Handles one invocation of a registered chat command.
    pub fn handle_command(&self, command: ChainCommand, args: &str) {
        self.controller.handle(command, args);
    }

    /// Resolves a registered command name and dispatches it.
    ///
    /// Returns false when the name is not one of the plugin's commands.
    pub fn handle_named_command(&self, name: &str, args: &str) -> bool {
        match ChainCommand::from_name(name) {
            Some(command) => {
                self.handle_command(command, args);
                true
            }
            None => false,
        }
    }

    /// Runs the per-frame liveness poll.
    pub fn on_framework_update(&self, now: Instant) {
        self.monitor.poll(self.host.as_ref(), &self.tracker, now);
    }

    /// The macro the plugin currently considers active.
    pub fn active_macro(&self) -> Option<ActiveMacro> {
        self.tracker.active()
    }

    /// Whether a stop request is waiting to be consumed.
    pub fn stop_pending(&self) -> bool {
        self.tracker.stop_pending()
    }
}

impl Drop for MacroChainPlugin {
    fn drop(&mut self) {
        self.tracker.clear_active();
        log::debug!("macro chaining shut down");
    }
}
