//! # target-matcher — Rule-Based Concept Tagging
//!
//! This crate tags tokens in clinical-style text with concept labels driven by
//! a registry of rules. It is organized as a small pipeline of named stages
//! over a shared, mutably-borrowed document:
//!
//! 1.  **Input**: raw text (String).
//! 2.  **Tokenization** ([`tokenizer`]): the text is split into tokens that
//!     keep their byte offsets into the original.
//! 3.  **Matching** ([`matcher`]): registered rules ([`rule`]) produce labeled
//!     spans ([`span`]) over the token sequence — literal phrases compared
//!     token-wise, regexes snapped to token boundaries.
//! 4.  **Tagging** ([`tagger`]): each span's label is copied onto every
//!     covered token as a custom attribute on the document ([`doc`]).
//!
//! ## Example
//!
//! ```rust
//! use target_matcher::{ConceptTagger, Pipeline, TargetRule};
//!
//! let mut pipeline = Pipeline::new();
//! let mut tagger = ConceptTagger::new(&mut pipeline);
//! tagger
//!     .add(&[TargetRule::phrase("CONDITION", "diabetes mellitus")])
//!     .unwrap();
//! pipeline.add_pipe(Box::new(tagger));
//!
//! let doc = pipeline.process("patient has diabetes mellitus").unwrap();
//! assert_eq!(doc.token_attr(2, "concept_tag"), Some("CONDITION"));
//! assert_eq!(doc.token_attr(3, "concept_tag"), Some("CONDITION"));
//! ```
//!
//! ## Main Modules
//!
//! - [`pipeline`]: named stages composed over shared documents.
//! - [`matcher`]: the [`SpanMatcher`] seam and the built-in [`TargetMatcher`].
//! - [`tagger`]: the concept tagger stage itself.
//! - [`doc`]: the document model with declared per-token custom attributes.

pub mod doc;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod rule;
pub mod span;
pub mod tagger;
pub mod tokenizer;

pub use doc::Document;
pub use error::{Error, Result};
pub use matcher::{SpanMatcher, TargetMatcher};
pub use pipeline::{Pipeline, PipelineComponent};
pub use rule::{Pattern, TargetRule};
pub use span::Span;
pub use tagger::{ConceptTagger, DEFAULT_ATTR};
pub use tokenizer::{tokenize, Token};
