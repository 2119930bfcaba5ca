//! The four chat commands and their handling.

use crate::chain::{ChainTracker, Requirement};
use crate::host::{ChatSink, MacroHost};
use macro_chain_grid::{Bank, RunArgsError, Slot, parse_direction, parse_run_args};
use std::sync::Arc;

/// Display name prefixed to every chat line.
pub const PLUGIN_NAME: &str = "Macro Chaining";

/// Re-execute the active macro.
pub const LOOP_COMMAND: &str = "/mcloop";
/// Execute the active macro's neighbor in a direction.
pub const NEXT_COMMAND: &str = "/mcnext";
/// Execute an arbitrary slot by number and bank.
pub const RUN_COMMAND: &str = "/mcrun";
/// Abort the chain at its next step.
pub const STOP_COMMAND: &str = "/mcstop";

const NEXT_HELP: &str = concat!(
    "\nCommand: /mcnext - Help\n\n",
    "/mcnext (right/r|left/l|up/u|down/d)\n                ",
    "right - eg. Macro #00 executes Macro #01\n                ",
    "left - eg. Macro #00 executes Macro #99\n                ",
    "up - eg. #00 executes Macro #90\n                ",
    "down - eg. Macro #00 executes Macro #10",
);

const RUN_HELP: &str = concat!(
    "\nCommand: /mcrun - Help\n\n",
    "/mcrun ## (shared|individual)\n        ",
    "## - Macro number\n        ",
    "(shared/share/s|individual/i)\n                ",
    "shared - all character macros\n                ",
    "individual - current character macros",
);

/// One user-facing chain command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainCommand {
    Loop,
    Next,
    Run,
    Stop,
}

impl ChainCommand {
    /// Maps a registered command name back to its command.
    pub fn from_name(name: &str) -> Option<ChainCommand> {
        match name {
            LOOP_COMMAND => Some(ChainCommand::Loop),
            NEXT_COMMAND => Some(ChainCommand::Next),
            RUN_COMMAND => Some(ChainCommand::Run),
            STOP_COMMAND => Some(ChainCommand::Stop),
            _ => None,
        }
    }

    /// Name the command is registered under.
    pub fn name(self) -> &'static str {
        match self {
            ChainCommand::Loop => LOOP_COMMAND,
            ChainCommand::Next => NEXT_COMMAND,
            ChainCommand::Run => RUN_COMMAND,
            ChainCommand::Stop => STOP_COMMAND,
        }
    }
}

/// Registration entry for the host's command system.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub command: ChainCommand,
    /// Name to register.
    pub name: &'static str,
    /// One-line help shown by the host's command list.
    pub help: &'static str,
}

/// The full registration table, in registration order.
pub const COMMANDS: [CommandSpec; 4] = [
    CommandSpec {
        command: ChainCommand::Loop,
        name: LOOP_COMMAND,
        help: "Loops the current macro. - /mcloop.",
    },
    CommandSpec {
        command: ChainCommand::Next,
        name: NEXT_COMMAND,
        help: "Executes the next macro. - /mcnext (right|left|up|down).",
    },
    CommandSpec {
        command: ChainCommand::Run,
        name: RUN_COMMAND,
        help: "Execute a macro. - /mcrun ## (individual|shared).",
    },
    CommandSpec {
        command: ChainCommand::Stop,
        name: STOP_COMMAND,
        help: "Stops at the next call of /mcnext or /mcrun",
    },
];

/// Scoped override of the host's macro reentrancy lock.
///
/// The host refuses to start a macro while another is playing; clearing the
/// lock is what lets a chained execution through. Cleared on construction
/// and again on drop, so the lock is left cleared on every exit path of an
/// operation, including help paths and host faults.
struct MacroLockOverride<'a> {
    host: &'a dyn MacroHost,
}

impl<'a> MacroLockOverride<'a> {
    fn new(host: &'a dyn MacroHost) -> MacroLockOverride<'a> {
        host.set_macro_locked(false);
        MacroLockOverride { host }
    }
}

impl Drop for MacroLockOverride<'_> {
    fn drop(&mut self) {
        self.host.set_macro_locked(false);
    }
}

/// Handles the chain commands against the tracker and the host.
pub(crate) struct ChainController {
    host: Arc<dyn MacroHost>,
    chat: Arc<dyn ChatSink>,
    tracker: Arc<ChainTracker>,
    legacy_run_bank: bool,
}

impl ChainController {
    pub(crate) fn new(
        host: Arc<dyn MacroHost>,
        chat: Arc<dyn ChatSink>,
        tracker: Arc<ChainTracker>,
        legacy_run_bank: bool,
    ) -> ChainController {
        ChainController {
            host,
            chat,
            tracker,
            legacy_run_bank,
        }
    }

    /// Entry point for one registered command invocation.
    pub(crate) fn handle(&self, command: ChainCommand, args: &str) {
        match command {
            ChainCommand::Loop => self.on_loop(),
            ChainCommand::Next => self.on_next(args),
            ChainCommand::Run => self.on_run(args),
            ChainCommand::Stop => self.on_stop(),
        }
    }

    fn on_loop(&self) {
        if self.requirements_block(false) {
            return;
        }
        let Some(active) = self.tracker.active() else {
            return;
        };
        let _lock = MacroLockOverride::new(self.host.as_ref());
        if let Err(err) = self.host.execute_macro(active.handle) {
            log::error!("loop of {} failed: {err}", active.slot);
        }
    }

    fn on_next(&self, args: &str) {
        if self.requirements_block(false) {
            return;
        }
        let Some(active) = self.tracker.active() else {
            return;
        };
        let _lock = MacroLockOverride::new(self.host.as_ref());
        let Some(direction) = parse_direction(args) else {
            self.print(NEXT_HELP);
            return;
        };
        let target = active.neighbors.get(direction);
        log::debug!("chaining {direction} from {} to {target}", active.slot);
        self.execute_slot(target);
    }

    fn on_run(&self, args: &str) {
        if self.requirements_block(true) {
            return;
        }
        let _lock = MacroLockOverride::new(self.host.as_ref());
        match parse_run_args(args) {
            Ok(slot) => {
                let slot = if self.legacy_run_bank {
                    slot.in_bank(Bank::Shared)
                } else {
                    slot
                };
                self.execute_slot(slot);
            }
            Err(RunArgsError::InvalidSlot) => {
                self.print_error("Invalid Macro number. (0-99)");
            }
            Err(RunArgsError::Empty | RunArgsError::UnknownBank) => self.print(RUN_HELP),
        }
    }

    fn on_stop(&self) {
        if !self.tracker.is_active() {
            self.print_error("No macro is running.");
            return;
        }
        self.tracker.request_stop();
    }

    /// Runs the shared precondition and prints its rejections.
    ///
    /// Returns true when the operation must not continue.
    fn requirements_block(&self, run: bool) -> bool {
        match self.tracker.check_requirements(run) {
            Requirement::Proceed => false,
            Requirement::NoActiveMacro => {
                self.print_error("No macro is running.");
                true
            }
            Requirement::Stopped => {
                self.print_error("Stopped loop");
                true
            }
        }
    }

    /// Resolves `slot` to its handle and executes it. Host faults are
    /// logged, never surfaced to chat.
    fn execute_slot(&self, slot: Slot) {
        let handle = match self.host.macro_handle(slot) {
            Ok(handle) => handle,
            Err(err) => {
                log::error!("macro lookup for {slot} failed: {err}");
                return;
            }
        };
        if let Err(err) = self.host.execute_macro(handle) {
            log::error!("execution of {slot} failed: {err}");
        }
    }

    fn print(&self, message: &str) {
        self.chat.print(&format!("[{PLUGIN_NAME}]: {message}"));
    }

    fn print_error(&self, message: &str) {
        self.chat.print_error(&format!("[{PLUGIN_NAME}]: {message}"));
    }
}
