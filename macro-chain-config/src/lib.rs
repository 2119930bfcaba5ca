//! Settings handling for the macro chaining plugin.
//!
//! One small YAML file holds everything the plugin lets the user tune: the
//! liveness grace period and a compatibility switch for the run command's
//! historical bank routing. Loading is forgiving (missing file or missing
//! fields become defaults), saving is atomic.

mod defaults;
mod error;
mod settings;

pub use error::ConfigError;
pub use settings::ChainSettings;
