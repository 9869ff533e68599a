//! Unified error types for the gridlink binding layer
//!
//! This module provides a common error type [`GridError`] that can represent
//! failures from any part of the binding: engine calls, table decoding,
//! topology construction, and result lookups. Domain code converts into
//! `GridError` at API boundaries so callers handle one error type.
//!
//! # Example
//!
//! ```ignore
//! use gridlink_core::{GridError, GridResult};
//!
//! fn inspect(result: &SecurityAnalysisResult) -> GridResult<()> {
//!     let base = result.pre_contingency_result()?;
//!     println!("{base}");
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all gridlink operations.
///
/// The variants follow the binding's failure taxonomy: lookups that miss,
/// a missing pre-contingency result, malformed engine tables, and failures
/// reported by the external engine itself. All failures propagate to the
/// caller; this layer never retries.
#[derive(Error, Debug)]
pub enum GridError {
    /// I/O errors (file access, pipes, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A keyed lookup missed: the identifier is not in the collection
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// What was looked up (e.g. "contingency", "extension")
        kind: &'static str,
        /// The missing identifier
        id: String,
    },

    /// The pre-contingency (base case) result was not part of the input
    #[error("pre-contingency result not available")]
    MissingBaseCase,

    /// An engine table is missing an expected column or holds the wrong type
    #[error("malformed table '{table}': {reason}")]
    MalformedTable {
        /// Which table was being decoded
        table: String,
        /// What was wrong with it
        reason: String,
    },

    /// Topology data is internally inconsistent (e.g. edge endpoint unknown)
    #[error("topology error: {0}")]
    Topology(String),

    /// Failure reported by the external engine
    #[error("engine error: {0}")]
    Engine(String),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

impl GridError {
    /// Not-found error for a keyed lookup.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        GridError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Malformed-table error naming the offending table.
    pub fn malformed(table: impl Into<String>, reason: impl Into<String>) -> Self {
        GridError::MalformedTable {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results using GridError.
pub type GridResult<T> = Result<T, GridError>;

// Conversion from anyhow::Error
impl From<anyhow::Error> for GridError {
    fn from(err: anyhow::Error) -> Self {
        GridError::Other(err.to_string())
    }
}

// Conversion from string-like types for convenience
impl From<String> for GridError {
    fn from(s: String) -> Self {
        GridError::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        GridError::Other(s.to_string())
    }
}

// JSON parsing errors
impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Parse(err.to_string())
    }
}
