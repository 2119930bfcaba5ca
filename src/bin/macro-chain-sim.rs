//! Scenario harness for the macro chaining plugin.
//!
//! Stands up a scripted host (macro table, chat log, frame clock) and drives
//! the plugin through a YAML scenario: direct macro executions, chat
//! commands, frame ticks with a chosen execution-cursor value, login and
//! lock toggles. Useful for eyeballing chain behavior without a game client.

use anyhow::{Context, Result};
use clap::Parser;
use macro_chain::grid::Bank;
use macro_chain::{
    ChainSettings, ExecuteMacroHook, HostError, MacroChainPlugin, MacroHandle, MacroHost,
    OriginalExecuteFn, Slot,
};
use parking_lot::Mutex;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(
    name = "macro-chain-sim",
    about = "Drive the macro chaining plugin through a scripted host scenario"
)]
struct Args {
    /// Scenario YAML to play (defaults to a built-in chain walk)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Settings YAML to load (defaults to built-in defaults, not the user file)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Force the historical run-command bank routing on
    #[arg(long)]
    legacy_run_bank: bool,
}

// ---------------------------------------------------------------------------
// Scenario format
// ---------------------------------------------------------------------------

fn default_frames() -> u32 {
    1
}

fn default_line() -> i32 {
    -1
}

fn default_frame_ms() -> u64 {
    16
}

#[derive(Debug, Deserialize)]
struct Scenario {
    /// Name printed when the scenario starts.
    #[serde(default)]
    name: Option<String>,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Step {
    /// A user executing a macro slot directly in the host UI.
    Execute { bank: Bank, index: u8 },
    /// One chat command invocation, e.g. name "/mcnext", args "right".
    Command {
        name: String,
        #[serde(default)]
        args: String,
    },
    /// Advance the frame clock with the execution cursor held at `line`.
    Tick {
        #[serde(default = "default_frames")]
        frames: u32,
        #[serde(default = "default_line")]
        line: i32,
        #[serde(default = "default_frame_ms")]
        ms: u64,
    },
    /// Toggle the login state.
    Login { value: bool },
    /// Toggle the host's macro reentrancy lock.
    Lock { value: bool },
}

fn load_scenario(path: &PathBuf) -> Result<Scenario> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("parsing scenario {}", path.display()))
}

/// Built-in demo: walk right along a row, loop, then stop the chain.
fn demo_scenario() -> Scenario {
    Scenario {
        name: Some("built-in chain walk".into()),
        steps: vec![
            Step::Execute {
                bank: Bank::Individual,
                index: 8,
            },
            Step::Tick {
                frames: 3,
                line: 0,
                ms: 16,
            },
            Step::Tick {
                frames: 2,
                line: -1,
                ms: 16,
            },
            Step::Command {
                name: "/mcnext".into(),
                args: "right".into(),
            },
            Step::Command {
                name: "/mcnext".into(),
                args: "right".into(),
            },
            Step::Command {
                name: "/mcloop".into(),
                args: String::new(),
            },
            Step::Command {
                name: "/mcstop".into(),
                args: String::new(),
            },
            Step::Command {
                name: "/mcloop".into(),
                args: String::new(),
            },
            // Idle past the grace period so the record expires.
            Step::Tick {
                frames: 1,
                line: 0,
                ms: 16,
            },
            Step::Tick {
                frames: 30,
                line: -1,
                ms: 100,
            },
            Step::Command {
                name: "/mcloop".into(),
                args: String::new(),
            },
        ],
    }
}

// ---------------------------------------------------------------------------
// Scripted host
// ---------------------------------------------------------------------------

const TABLE_BASE: u64 = 0x2620_0000;
const SLOT_STRIDE: u64 = 0x688;

#[derive(Debug, Default)]
struct SimState {
    locked: bool,
    line: i32,
    logged_in: bool,
    executed: Vec<Slot>,
}

/// Host double: a full macro table with synthetic handles, a macro lock, an
/// execution cursor, and a login flag, all scripted by scenario steps.
struct SimHost {
    state: Mutex<SimState>,
    hook: Mutex<Option<Arc<ExecuteMacroHook>>>,
}

impl SimHost {
    fn new() -> Arc<SimHost> {
        Arc::new(SimHost {
            state: Mutex::new(SimState {
                logged_in: true,
                line: -1,
                ..Default::default()
            }),
            hook: Mutex::new(None),
        })
    }

    fn install(&self, hook: Arc<ExecuteMacroHook>) {
        *self.hook.lock() = Some(hook);
    }

    fn handle_for(slot: Slot) -> MacroHandle {
        MacroHandle::from_raw(TABLE_BASE + u64::from(slot.flat()) * SLOT_STRIDE)
    }

    fn slot_for(handle: MacroHandle) -> Option<Slot> {
        let raw = handle.as_raw();
        let offset = raw.checked_sub(TABLE_BASE)?;
        if offset % SLOT_STRIDE != 0 {
            return None;
        }
        u8::try_from(offset / SLOT_STRIDE).ok().and_then(Slot::from_flat)
    }

    /// The unhooked execute-macro implementation.
    fn playback(&self, handle: MacroHandle) -> Result<(), HostError> {
        let Some(slot) = SimHost::slot_for(handle) else {
            return Err(HostError::ExecutionFailed(format!(
                "unknown handle {handle}"
            )));
        };
        let mut state = self.state.lock();
        if state.locked {
            return Err(HostError::ExecutionFailed(format!(
                "macro system locked, refusing {slot}"
            )));
        }
        state.executed.push(slot);
        drop(state);
        log::info!("host: playing {slot}");
        Ok(())
    }

    fn set_line(&self, line: i32) {
        self.state.lock().line = line;
    }

    fn set_logged_in(&self, value: bool) {
        self.state.lock().logged_in = value;
    }

    fn set_locked(&self, value: bool) {
        self.state.lock().locked = value;
    }

    fn executed(&self) -> Vec<Slot> {
        self.state.lock().executed.clone()
    }
}

impl MacroHost for SimHost {
    fn execute_macro(&self, handle: MacroHandle) -> Result<(), HostError> {
        // The patched entry point: every execution goes through the detour.
        let hook = self.hook.lock().clone();
        match hook {
            Some(hook) => {
                hook.intercept(handle);
                Ok(())
            }
            None => self.playback(handle),
        }
    }

    fn macro_handle(&self, slot: Slot) -> Result<MacroHandle, HostError> {
        Ok(SimHost::handle_for(slot))
    }

    fn macro_locked(&self) -> bool {
        self.state.lock().locked
    }

    fn set_macro_locked(&self, locked: bool) {
        self.state.lock().locked = locked;
    }

    fn current_macro_line(&self) -> i32 {
        self.state.lock().line
    }

    fn is_logged_in(&self) -> bool {
        self.state.lock().logged_in
    }
}

/// Chat double that renders to stdout.
struct SimChat;

impl macro_chain::ChatSink for SimChat {
    fn print(&self, message: &str) {
        println!("[chat] {message}");
    }

    fn print_error(&self, message: &str) {
        println!("[chat:error] {message}");
    }
}

// ---------------------------------------------------------------------------
// Playback loop
// ---------------------------------------------------------------------------

fn run_scenario(
    scenario: &Scenario,
    plugin: &MacroChainPlugin,
    host: &Arc<SimHost>,
) -> Result<()> {
    let start = Instant::now();
    let mut elapsed = Duration::ZERO;

    for step in &scenario.steps {
        match step {
            Step::Execute { bank, index } => {
                let slot = Slot::new(*bank, *index)
                    .with_context(|| format!("macro index {index} out of range (0-99)"))?;
                log::info!("user: executes {slot}");
                if let Err(err) = host.execute_macro(SimHost::handle_for(slot)) {
                    log::error!("execution rejected: {err}");
                }
            }
            Step::Command { name, args } => {
                log::info!("user: {name} {args}");
                if !plugin.handle_named_command(name, args) {
                    log::warn!("unknown command {name}");
                }
            }
            Step::Tick { frames, line, ms } => {
                host.set_line(*line);
                for _ in 0..*frames {
                    elapsed += Duration::from_millis(*ms);
                    plugin.on_framework_update(start + elapsed);
                }
                log::debug!(
                    "ticked {frames} frame(s) at line {line}, clock now {} ms",
                    elapsed.as_millis()
                );
            }
            Step::Login { value } => {
                log::info!("host: logged_in = {value}");
                host.set_logged_in(*value);
            }
            Step::Lock { value } => {
                log::info!("host: macro lock = {value}");
                host.set_locked(*value);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => match ChainSettings::load_from(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("failed to load settings: {err:#}; using defaults");
                ChainSettings::default()
            }
        },
        None => ChainSettings::default(),
    };
    if args.legacy_run_bank {
        settings.legacy_run_bank = true;
    }

    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => demo_scenario(),
    };
    if let Some(name) = &scenario.name {
        log::info!("scenario: {name}");
    }

    let host = SimHost::new();
    let chat = Arc::new(SimChat);
    let original: OriginalExecuteFn = {
        let host = host.clone();
        Box::new(move |handle| host.playback(handle))
    };
    let plugin = MacroChainPlugin::new(host.clone(), chat, &settings, original);
    host.install(plugin.hook());

    run_scenario(&scenario, &plugin, &host)?;

    println!();
    println!("executed {} macro(s):", host.executed().len());
    for slot in host.executed() {
        println!("  {slot}");
    }
    match plugin.active_macro() {
        Some(active) => println!("active at exit: {}", active.slot),
        None => println!("active at exit: none"),
    }
    if plugin.stop_pending() {
        println!("stop request still pending");
    }
    Ok(())
}
