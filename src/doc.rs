//! # Document Model
//!
//! A [`Document`] owns a text, its tokens, the standard entity layer, and a
//! store of custom per-token attributes. Components receive the document as a
//! mutable borrow, annotate it in place and hand the same borrow back; the
//! caller keeps ownership throughout.
//!
//! ## Custom token attributes
//!
//! Custom attributes are an explicit mapping `token index → attribute name →
//! value`. An attribute name must be declared on the document before any token
//! can carry a value under it — typically the declaration is stamped from the
//! pipeline's extension registry when the document is created (see
//! [`Pipeline::make_doc`](crate::pipeline::Pipeline::make_doc)). Writing to an
//! undeclared attribute is an error, not a silent insert.
//!
//! ## Entity layer
//!
//! `ents` is the document's canonical list of labeled spans. Matchers may be
//! configured to append their results here; components that keep their results
//! to custom attributes leave it untouched.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::span::Span;
use crate::tokenizer::{tokenize, Token};

/// Parsed text: tokens, entity layer and custom per-token attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The original text.
    pub text: String,
    /// Tokens in order, with byte offsets into `text`.
    pub tokens: Vec<Token>,
    /// The standard entity layer: labeled spans promoted to document level.
    pub ents: Vec<Span>,
    /// Attribute names that may be set on tokens of this document.
    declared: HashSet<String>,
    /// Per-token attribute values, indexed by token position.
    attrs: Vec<HashMap<String, String>>,
}

impl Document {
    /// Tokenizes a text into a fresh document with no declared attributes.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = tokenize(&text);
        let attrs = vec![HashMap::new(); tokens.len()];
        Self {
            text,
            tokens,
            ents: Vec::new(),
            declared: HashSet::new(),
            attrs,
        }
    }

    /// Declares a custom attribute name, allowing it to be set on tokens.
    /// Declaring the same name twice is a no-op.
    pub fn declare_attr(&mut self, name: &str) {
        self.declared.insert(name.to_string());
    }

    /// Whether the attribute name has been declared on this document.
    pub fn has_attr(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Sets a custom attribute on the token at `index`.
    ///
    /// Fails if the attribute was never declared or the index is out of
    /// bounds; an existing value is overwritten.
    pub fn set_token_attr(&mut self, index: usize, name: &str, value: &str) -> Result<()> {
        if !self.declared.contains(name) {
            return Err(Error::UndeclaredAttribute {
                name: name.to_string(),
            });
        }
        let len = self.tokens.len();
        let slot = self
            .attrs
            .get_mut(index)
            .ok_or(Error::TokenOutOfBounds { index, len })?;
        slot.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Reads a custom attribute from the token at `index`, if set.
    pub fn token_attr(&self, index: usize, name: &str) -> Option<&str> {
        self.attrs.get(index)?.get(name).map(String::as_str)
    }

    /// The source text covered by a span's tokens.
    pub fn span_text(&self, span: &Span) -> &str {
        if span.is_empty() || span.end > self.tokens.len() {
            return "";
        }
        let start = self.tokens[span.start].start;
        let end = self.tokens[span.end - 1].end;
        &self.text[start..end]
    }
}
