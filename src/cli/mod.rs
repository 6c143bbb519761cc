//! CLI module.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - The interactive console's command parser and text rendering
//!
//! # Usage
//!
//! ```ignore
//! use authenticator::cli::{parse_args, CliCommand};
//!
//! let options = match parse_args(std::env::args()) {
//!     CliCommand::Version => handle_version_command(),
//!     CliCommand::Usage(message) => { /* print and exit(2) */ }
//!     CliCommand::Run(options) => options,
//! };
//! ```

pub mod args;
pub mod console;
pub mod version;

pub use args::{parse_args, CliCommand, RunOptions, USAGE};
pub use console::{describe_event, render_list, ConsoleCommand, ConsoleError, HELP};
pub use version::{handle_version_command, VERSION};
