//! Formatter - Run Prettier over editor buffers
//!
//! This crate implements the format command: it resolves the formatter
//! options for a view, runs the external formatter process once per range
//! and writes the results back into the buffer. Errors go to an
//! [`ErrorReporter`], successes to the status line.

mod command;
mod config;
mod error;
mod external;
pub mod launch;
mod notify;
mod report;

pub use command::*;
pub use config::*;
pub use error::*;
pub use external::*;
pub use launch::{Invocation, LaunchError, LaunchResult, LaunchStrategy, Platform, ProcessLauncher, ProcessOutput, SystemLauncher};
pub use notify::*;
pub use report::*;
