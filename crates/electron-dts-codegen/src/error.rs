//! Errors that abort a generation run.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A module descriptor without a usable name.
    #[error("module descriptor #{index} has no name")]
    MalformedModule { index: usize },

    /// A member (method, event, property or parameter) without a usable name.
    /// The declaration it belongs to would not be valid TypeScript.
    #[error("module `{module}`: {member} has no name")]
    MalformedMember { module: String, member: String },

    #[error("failed to parse API metadata from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write declarations: {0}")]
    Write(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
