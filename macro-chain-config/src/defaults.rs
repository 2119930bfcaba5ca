//! Default values for the settings file.
//!
//! Each function backs a `#[serde(default = "...")]` attribute so that a
//! partial settings file fills in the same values a fresh one gets.

/// Milliseconds the execution cursor may stay idle before the active macro
/// is considered finished.
pub fn liveness_grace_ms() -> u64 {
    2000
}

pub fn bool_false() -> bool {
    false
}
