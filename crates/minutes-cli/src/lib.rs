//! Minutes CLI - library surface for the `minutes` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;

pub use cli::{Cli, Command, ProcessArgs};
pub use config::Config;
pub use error::{CliError, Result};
