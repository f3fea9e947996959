//! # Target Rules
//!
//! A [`TargetRule`] pairs a label with a pattern. The rule itself is inert
//! data: validation and compilation happen inside the matcher's add-contract,
//! so a rule can be built, serialized and inspected freely before it is ever
//! registered.
//!
//! Two pattern kinds are supported:
//!
//! - **Phrase**: a literal phrase matched token-wise, case-insensitively.
//!   `"diabetes mellitus"` matches the two-token sequence regardless of casing.
//! - **Regex**: a regular expression matched over the raw text; matches are
//!   expanded outward to the token boundaries that cover them.
//!
//! Rules serialize as JSON, so rule sets can be kept in files:
//!
//! ```json
//! [
//!   { "label": "CONDITION", "pattern": { "phrase": "diabetes mellitus" } },
//!   { "label": "DOSAGE", "pattern": { "regex": "\\d+ ?mg" } }
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How a rule matches tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Literal phrase, compared token-by-token and case-insensitively.
    Phrase(String),
    /// Regular expression over the raw text, snapped to token boundaries.
    Regex(String),
}

/// A labeled pattern consumed by a matcher to produce spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRule {
    /// Label written onto every span this rule produces (e.g. "CONDITION").
    pub label: String,
    /// The pattern to match.
    pub pattern: Pattern,
}

impl TargetRule {
    /// A rule matching a literal phrase.
    pub fn phrase(label: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: Pattern::Phrase(phrase.into()),
        }
    }

    /// A rule matching a regular expression.
    pub fn regex(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: Pattern::Regex(pattern.into()),
        }
    }

    /// Parses a JSON array of rules.
    pub fn from_json_str(json: &str) -> Result<Vec<TargetRule>> {
        Ok(serde_json::from_str(json)?)
    }
}
