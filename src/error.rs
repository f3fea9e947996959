//! # Error Types
//!
//! Every fallible operation in this crate surfaces one of these variants and
//! nothing is caught internally: a malformed rule fails out of the matcher's
//! add-contract, an undeclared attribute fails out of the write, and the
//! caller sees the original cause either way.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by rule registration, attribute writes and rule files.
#[derive(Debug, Error)]
pub enum Error {
    /// A rule was registered without a label.
    #[error("rule has an empty label")]
    EmptyLabel,

    /// A phrase rule was registered with a pattern that tokenizes to nothing.
    #[error("rule '{label}' has an empty pattern")]
    EmptyPattern { label: String },

    /// A regex rule failed to compile.
    #[error("invalid regex pattern")]
    InvalidPattern(#[from] regex::Error),

    /// A token attribute was written without being declared first.
    #[error("token attribute '{name}' was never declared")]
    UndeclaredAttribute { name: String },

    /// A span referenced a token index past the end of the document.
    #[error("token index {index} out of bounds for document of {len} tokens")]
    TokenOutOfBounds { index: usize, len: usize },

    /// A rule file could not be parsed.
    #[error("failed to parse rule file")]
    RuleFile(#[from] serde_json::Error),
}
