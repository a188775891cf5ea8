//! Textual front-end for the rotor cipher engine.
//!
//! Reads a machine configuration (or uses the built-in catalog), then drives
//! the engine over message input where `*` lines set the machine up and every
//! other line is converted and printed in groups of five.

/// Machine configuration text and the built-in catalog.
pub mod config;
/// Line-oriented message driver.
pub mod driver;
/// Located simulator error types.
pub mod errors;
/// Output grouping.
pub mod format;
/// Setting-line parser.
pub mod settings;

pub use config::{parse_config, MachineConfig, DEFAULT_CONFIG};
pub use driver::Simulator;
pub use errors::{SimulatorError, SimulatorErrorKind, SourceLoc};
pub use format::group_in_fives;
pub use settings::parse_setting_line;

#[cfg(test)]
use tempfile as _;
