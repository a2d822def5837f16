//! CLI layer for flow-helpers.
//!
//! Exposes the helpers on the command line using clap, for scripting and
//! manual checks.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
