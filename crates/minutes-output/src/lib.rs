//! Minutes Output Writers
//!
//! Renders the final extraction result to human- and machine-readable
//! session artifacts in the output directory:
//!
//! - a timestamped markdown notes file,
//! - a tab-separated `session.log` line per run,
//! - a cumulative `index.json` of per-session stats (atomic replace).

#![warn(missing_docs)]

mod index;
mod markdown;
mod session_log;

use thiserror::Error;

pub use index::{update_index, IndexStats, SessionIndex};
pub use markdown::{add_glossary_section, write_session_markdown, SessionMeta};
pub use session_log::append_session_log;

/// Errors that can occur while writing session outputs
#[derive(Error, Debug)]
pub enum OutputError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
