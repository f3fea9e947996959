//! # Labeled Token Spans
//!
//! A span is a contiguous run of tokens carrying a label, produced by matching
//! a rule against a document. Spans use token indices with an exclusive end,
//! so iterating `start..end` visits every token the span covers.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A contiguous range of tokens with an associated label.
///
/// # Example
/// In "patient has diabetes mellitus", a rule labeled `CONDITION` matching
/// "diabetes mellitus" produces `Span { start: 2, end: 4, label: "CONDITION" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Index of the first token (inclusive).
    pub start: usize,
    /// Index past the last token (exclusive).
    pub end: usize,
    /// Label of the rule that produced this span (e.g. "CONDITION").
    pub label: String,
}

impl Span {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Number of tokens the span covers.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Token indices covered by this span.
    pub fn token_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the given token index falls inside this span.
    pub fn covers(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}
