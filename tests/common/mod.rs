//! Shared integration test helpers for the macro chaining plugin.
//!
//! Provides the scripted host and chat doubles plus a factory that wires a
//! plugin to them with the hook installed.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{MockHost, test_rig};
//! ```
//!
//! Note: Rust integration tests use `mod common;` (not `use`) to bring in
//! helpers from `tests/common/mod.rs`. The `#![allow(dead_code)]` suppresses
//! warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use macro_chain::{
    Bank, ChainSettings, ChatSink, ExecuteMacroHook, HostError, MacroChainPlugin, MacroHandle,
    MacroHost, OriginalExecuteFn, Slot,
};
use parking_lot::Mutex;
use std::sync::Arc;

const TABLE_BASE: u64 = 0x7f00_0000;
const SLOT_STRIDE: u64 = 0x88;

#[derive(Debug, Default)]
struct MockHostState {
    locked: bool,
    current_line: i32,
    logged_in: bool,
    /// Handles the unhooked implementation was asked to play, in order.
    played: Vec<MacroHandle>,
    /// Every value written to the macro lock, in order.
    lock_writes: Vec<bool>,
    fail_execution: bool,
}

/// Scriptable stand-in for the game client's macro subsystem.
///
/// `execute_macro` routes through the installed hook exactly like the
/// patched native entry point would; the trampoline handed to the plugin is
/// [`MockHost::playback`].
pub struct MockHost {
    inner: Mutex<MockHostState>,
    hook: Mutex<Option<Arc<ExecuteMacroHook>>>,
}

impl MockHost {
    pub fn new() -> Arc<MockHost> {
        Arc::new(MockHost {
            inner: Mutex::new(MockHostState {
                logged_in: true,
                current_line: -1,
                ..Default::default()
            }),
            hook: Mutex::new(None),
        })
    }

    pub fn attach_hook(&self, hook: Arc<ExecuteMacroHook>) {
        *self.hook.lock() = Some(hook);
    }

    /// Deterministic synthetic handle for a table slot.
    pub fn handle_for(slot: Slot) -> MacroHandle {
        MacroHandle::from_raw(TABLE_BASE + u64::from(slot.flat()) * SLOT_STRIDE)
    }

    /// Reverse of [`MockHost::handle_for`], for assertions.
    pub fn slot_for(handle: MacroHandle) -> Option<Slot> {
        let offset = handle.as_raw().checked_sub(TABLE_BASE)?;
        if offset % SLOT_STRIDE != 0 {
            return None;
        }
        u8::try_from(offset / SLOT_STRIDE)
            .ok()
            .and_then(Slot::from_flat)
    }

    /// The unhooked execute-macro implementation. Records the request, then
    /// fails if scripted to.
    pub fn playback(&self, handle: MacroHandle) -> Result<(), HostError> {
        let mut inner = self.inner.lock();
        inner.played.push(handle);
        if inner.fail_execution {
            return Err(HostError::ExecutionFailed("scripted failure".into()));
        }
        Ok(())
    }

    pub fn set_locked(&self, locked: bool) {
        self.inner.lock().locked = locked;
    }

    pub fn set_current_line(&self, line: i32) {
        self.inner.lock().current_line = line;
    }

    pub fn set_logged_in(&self, logged_in: bool) {
        self.inner.lock().logged_in = logged_in;
    }

    pub fn set_fail_execution(&self, fail: bool) {
        self.inner.lock().fail_execution = fail;
    }

    /// Handles forwarded to the unhooked implementation, in order.
    pub fn played(&self) -> Vec<MacroHandle> {
        self.inner.lock().played.clone()
    }

    /// Same as [`MockHost::played`], resolved to slots.
    pub fn played_slots(&self) -> Vec<Slot> {
        self.played()
            .into_iter()
            .filter_map(MockHost::slot_for)
            .collect()
    }

    /// Every write made to the macro lock, in order.
    pub fn lock_writes(&self) -> Vec<bool> {
        self.inner.lock().lock_writes.clone()
    }

    pub fn clear_recorded(&self) {
        let mut inner = self.inner.lock();
        inner.played.clear();
        inner.lock_writes.clear();
    }
}

impl MacroHost for MockHost {
    fn execute_macro(&self, handle: MacroHandle) -> Result<(), HostError> {
        let hook = self.hook.lock().clone();
        match hook {
            Some(hook) => hook.intercept(handle),
            None => self.playback(handle)?,
        }
        if self.inner.lock().fail_execution {
            return Err(HostError::ExecutionFailed("scripted failure".into()));
        }
        Ok(())
    }

    fn macro_handle(&self, slot: Slot) -> Result<MacroHandle, HostError> {
        Ok(MockHost::handle_for(slot))
    }

    fn macro_locked(&self) -> bool {
        self.inner.lock().locked
    }

    fn set_macro_locked(&self, locked: bool) {
        let mut inner = self.inner.lock();
        inner.locked = locked;
        inner.lock_writes.push(locked);
    }

    fn current_macro_line(&self) -> i32 {
        self.inner.lock().current_line
    }

    fn is_logged_in(&self) -> bool {
        self.inner.lock().logged_in
    }
}

/// One captured chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub error: bool,
    pub text: String,
}

/// Chat double that captures every line.
#[derive(Default)]
pub struct MockChat {
    lines: Mutex<Vec<ChatLine>>,
}

impl MockChat {
    pub fn new() -> Arc<MockChat> {
        Arc::new(MockChat::default())
    }

    pub fn lines(&self) -> Vec<ChatLine> {
        self.lines.lock().clone()
    }

    pub fn plain(&self) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|line| !line.error)
            .map(|line| line.text.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|line| line.error)
            .map(|line| line.text.clone())
            .collect()
    }

    pub fn last(&self) -> Option<ChatLine> {
        self.lines.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl ChatSink for MockChat {
    fn print(&self, message: &str) {
        self.lines.lock().push(ChatLine {
            error: false,
            text: message.to_string(),
        });
    }

    fn print_error(&self, message: &str) {
        self.lines.lock().push(ChatLine {
            error: true,
            text: message.to_string(),
        });
    }
}

/// Plugin wired to a mock host and chat, hook installed.
pub struct TestRig {
    pub plugin: MacroChainPlugin,
    pub host: Arc<MockHost>,
    pub chat: Arc<MockChat>,
}

impl TestRig {
    /// A user executing `bank`/`index` by hand in the host UI.
    pub fn user_executes(&self, bank: Bank, index: u8) -> Slot {
        let slot = Slot::new(bank, index).unwrap();
        self.host.execute_macro(MockHost::handle_for(slot)).unwrap();
        slot
    }
}

pub fn test_rig() -> TestRig {
    test_rig_with_settings(&ChainSettings::default())
}

pub fn test_rig_with_settings(settings: &ChainSettings) -> TestRig {
    let host = MockHost::new();
    let chat = MockChat::new();
    let original: OriginalExecuteFn = {
        let host = host.clone();
        Box::new(move |handle| host.playback(handle))
    };
    let plugin = MacroChainPlugin::new(host.clone(), chat.clone(), settings, original);
    host.attach_hook(plugin.hook());
    TestRig { plugin, host, chat }
}
