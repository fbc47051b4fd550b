//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Minutes CLI - extract structured knowledge from meeting transcripts.
#[derive(Debug, Parser)]
#[command(name = "minutes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true, env = "VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process a transcript into session notes
    Process(ProcessArgs),
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Transcript file (.jsonl interaction log, .txt/.md plain text)
    pub input: PathBuf,

    /// Directory for notes, log, and index
    #[arg(long, env = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// YAML glossary to cross-reference against
    #[arg(long, env = "GLOSSARY_PATH")]
    pub glossary: Option<PathBuf>,

    /// Project key used when tagging memories
    #[arg(long, default_value = "unknown")]
    pub project: String,

    /// Session identifier; generated when omitted
    #[arg(long)]
    pub session: Option<String>,

    /// Reprocess even if this input was already processed
    #[arg(long)]
    pub force: bool,

    /// Push extracted items to the memory service
    #[arg(long)]
    pub pipe_memory: bool,
}
