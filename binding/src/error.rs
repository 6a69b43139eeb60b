//! Error types for the binding layer
//!
//! Every failure detected at the TileDB-VCF boundary becomes a [`VcfError`]
//! and is propagated immediately; nothing is retried or recovered locally.

use thiserror::Error;

/// Placeholder used when a reader reports failure without a message.
pub const UNKNOWN_READER_ERROR: &str = "Unknown reader error";

/// Placeholder used when a writer reports failure without a message.
pub const UNKNOWN_WRITER_ERROR: &str = "Unknown writer error";

/// Errors surfaced by the binding layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VcfError {
    /// A reader operation returned a non-OK status
    #[error("tiledbvcf reader error in {function}: {message}")]
    Reader { function: String, message: String },

    /// A writer operation returned a non-OK status
    #[error("tiledbvcf writer error in {function}: {message}")]
    Writer { function: String, message: String },

    /// Caller-detected failure with no library state involved
    #[error("tiledbvcf error in {function}: {message}")]
    General { function: String, message: String },

    /// A required pointer or handle was null
    #[error("tiledbvcf: {0}")]
    NullHandle(String),

    /// The shared library could not be opened or lacks a required symbol
    #[error("failed to load TileDB-VCF library: {0}")]
    Load(String),
}

impl VcfError {
    /// Name of the failing operation, if the error carries one.
    pub fn function(&self) -> Option<&str> {
        match self {
            VcfError::Reader { function, .. }
            | VcfError::Writer { function, .. }
            | VcfError::General { function, .. } => Some(function),
            VcfError::NullHandle(_) | VcfError::Load(_) => None,
        }
    }
}

/// Build a general error from an operation name and a caller-supplied message.
///
/// No library interaction takes place. The result is meant to be returned
/// straight away: `return Err(general_error("open_file", "path not found"))`.
pub fn general_error(function: &str, message: &str) -> VcfError {
    VcfError::General {
        function: function.to_string(),
        message: message.to_string(),
    }
}
