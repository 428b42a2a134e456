//! Error types for importing serialized world state.

use std::error::Error;
use std::fmt;

/// Errors from structured-state import.
///
/// Import validates the whole document before touching the world, so
/// any of these leaves the existing state unchanged. Malformed seed
/// text is deliberately not represented here: an empty or all-comment
/// seed is a no-op, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportError {
    /// The document names a rule that is not in the registry.
    UnknownRule {
        /// The unrecognized rule identifier.
        name: String,
    },
    /// The document is structurally invalid.
    InvalidDocument {
        /// Human-readable description of the parse failure.
        reason: String,
    },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRule { name } => write!(f, "unknown rule '{name}'"),
            Self::InvalidDocument { reason } => write!(f, "invalid state document: {reason}"),
        }
    }
}

impl Error for ImportError {}
