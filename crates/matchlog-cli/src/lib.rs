//! matchlog command-line interface.
//!
//! The binary in `main.rs` parses arguments, wires the backend in
//! [`bootstrap`] and hands each command to its handler.

#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

// Used by the binary only
use dotenvy as _;
use tokio as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, LogKindArg, OutputArgs, TypeArgs};
pub use error::{CliError, exit_code_for};
pub use parser::{Cli, GlobalArgs};
