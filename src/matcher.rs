//! # Span Matchers
//!
//! The [`SpanMatcher`] trait is the seam between components that consume spans
//! and whatever produces them. Consumers hold a `Box<dyn SpanMatcher>` and
//! never see a concrete matcher type, so a different matching backend can be
//! injected without touching the consumer.
//!
//! [`TargetMatcher`] is the provided implementation: phrase rules are matched
//! by comparing lowercased token n-grams, regex rules by running the compiled
//! expression over the raw text and expanding each match to the token
//! boundaries that cover it.
//!
//! ## Match ordering
//!
//! `find_spans` returns every match of every registered rule — overlapping
//! matches included, duplicated rules included. The order of the returned
//! spans (registration order, then position) is an implementation detail;
//! callers that write attributes span-by-span get last-write-wins semantics
//! with an order they must not rely on.

use regex::Regex;
use tracing::debug;

use crate::doc::Document;
use crate::error::{Error, Result};
use crate::rule::{Pattern, TargetRule};
use crate::span::Span;
use crate::tokenizer::{tokenize, Token};

/// Something that can be taught rules and asked for matching spans.
pub trait SpanMatcher: Send + Sync {
    /// Registers a batch of rules. Fails on the first malformed rule;
    /// rules registered by earlier calls are unaffected.
    fn register_rules(&mut self, rules: &[TargetRule]) -> Result<()>;

    /// All spans of the document matched by the registered rules.
    fn find_spans(&self, doc: &mut Document) -> Vec<Span>;
}

/// A rule compiled into its matchable form.
enum CompiledPattern {
    /// Lowercased phrase tokens, compared as an n-gram window.
    Phrase(Vec<String>),
    Regex(Regex),
}

struct CompiledRule {
    label: String,
    pattern: CompiledPattern,
}

/// Rule-based matcher over phrases and regular expressions.
pub struct TargetMatcher {
    rules: Vec<CompiledRule>,
    /// Whether found spans are also appended to the document's entity layer.
    add_ents: bool,
}

impl TargetMatcher {
    pub fn new(add_ents: bool) -> Self {
        Self {
            rules: Vec::new(),
            add_ents,
        }
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn compile(rule: &TargetRule) -> Result<CompiledRule> {
        if rule.label.is_empty() {
            return Err(Error::EmptyLabel);
        }
        let pattern = match &rule.pattern {
            Pattern::Phrase(phrase) => {
                let parts: Vec<String> = tokenize(phrase)
                    .into_iter()
                    .map(|t| t.text.to_lowercase())
                    .collect();
                if parts.is_empty() {
                    return Err(Error::EmptyPattern {
                        label: rule.label.clone(),
                    });
                }
                CompiledPattern::Phrase(parts)
            }
            Pattern::Regex(pattern) => CompiledPattern::Regex(Regex::new(pattern)?),
        };
        Ok(CompiledRule {
            label: rule.label.clone(),
            pattern,
        })
    }
}

impl SpanMatcher for TargetMatcher {
    fn register_rules(&mut self, rules: &[TargetRule]) -> Result<()> {
        for rule in rules {
            let compiled = Self::compile(rule)?;
            self.rules.push(compiled);
        }
        Ok(())
    }

    fn find_spans(&self, doc: &mut Document) -> Vec<Span> {
        let lowered: Vec<String> = doc
            .tokens
            .iter()
            .map(|t| t.text.to_lowercase())
            .collect();

        let mut spans = Vec::new();
        for rule in &self.rules {
            match &rule.pattern {
                CompiledPattern::Phrase(parts) => {
                    for start in 0..lowered.len() {
                        if start + parts.len() > lowered.len() {
                            break;
                        }
                        let matches = parts
                            .iter()
                            .enumerate()
                            .all(|(j, part)| lowered[start + j] == *part);
                        if matches {
                            spans.push(Span::new(start, start + parts.len(), &rule.label));
                        }
                    }
                }
                CompiledPattern::Regex(re) => {
                    for m in re.find_iter(&doc.text) {
                        if let Some((start, end)) =
                            snap_to_tokens(&doc.tokens, m.start(), m.end())
                        {
                            spans.push(Span::new(start, end, &rule.label));
                        }
                    }
                }
            }
        }

        for span in &spans {
            debug!(label = %span.label, start = span.start, end = span.end, "matched span");
        }
        if self.add_ents {
            doc.ents.extend(spans.iter().cloned());
        }
        spans
    }
}

/// Expands a byte range to the token indices that cover it.
///
/// Returns `None` when the range touches no token (e.g. an empty match or a
/// match entirely inside whitespace).
fn snap_to_tokens(tokens: &[Token], start: usize, end: usize) -> Option<(usize, usize)> {
    let first = tokens.iter().position(|t| t.end > start && t.start < end)?;
    let last = tokens.iter().rposition(|t| t.end > start && t.start < end)?;
    Some((first, last + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_match_case_insensitive() {
        let mut matcher = TargetMatcher::new(false);
        matcher
            .register_rules(&[TargetRule::phrase("CONDITION", "Diabetes Mellitus")])
            .unwrap();

        let mut doc = Document::new("patient has diabetes mellitus");
        let spans = matcher.find_spans(&mut doc);

        assert_eq!(spans, vec![Span::new(2, 4, "CONDITION")]);
    }

    #[test]
    fn test_phrase_matches_every_occurrence() {
        let mut matcher = TargetMatcher::new(false);
        matcher
            .register_rules(&[TargetRule::phrase("CONDITION", "pain")])
            .unwrap();

        let mut doc = Document::new("chest pain and back pain");
        let spans = matcher.find_spans(&mut doc);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_regex_match_snaps_to_tokens() {
        let mut matcher = TargetMatcher::new(false);
        matcher
            .register_rules(&[TargetRule::regex("DOSAGE", r"\d+ mg")])
            .unwrap();

        let mut doc = Document::new("prescribed 20 mg daily");
        let spans = matcher.find_spans(&mut doc);

        assert_eq!(spans, vec![Span::new(1, 3, "DOSAGE")]);
        assert_eq!(doc.span_text(&spans[0]), "20 mg");
    }

    #[test]
    fn test_no_match_returns_empty() {
        let mut matcher = TargetMatcher::new(false);
        matcher
            .register_rules(&[TargetRule::phrase("CONDITION", "diabetes")])
            .unwrap();

        let mut doc = Document::new("patient is healthy");
        assert!(matcher.find_spans(&mut doc).is_empty());
    }

    #[test]
    fn test_duplicate_rule_matches_twice() {
        let rule = TargetRule::phrase("CONDITION", "diabetes");
        let mut matcher = TargetMatcher::new(false);
        matcher.register_rules(&[rule.clone(), rule]).unwrap();

        let mut doc = Document::new("has diabetes");
        assert_eq!(matcher.find_spans(&mut doc).len(), 2);
    }

    #[test]
    fn test_empty_label_rejected() {
        let mut matcher = TargetMatcher::new(false);
        let err = matcher
            .register_rules(&[TargetRule::phrase("", "diabetes")])
            .unwrap_err();
        assert!(matches!(err, Error::EmptyLabel));
    }

    #[test]
    fn test_empty_phrase_rejected() {
        let mut matcher = TargetMatcher::new(false);
        let err = matcher
            .register_rules(&[TargetRule::phrase("CONDITION", "   ")])
            .unwrap_err();
        assert!(matches!(err, Error::EmptyPattern { .. }));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let mut matcher = TargetMatcher::new(false);
        let err = matcher
            .register_rules(&[TargetRule::regex("X", "(unclosed")])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_add_ents_false_leaves_entity_layer() {
        let mut matcher = TargetMatcher::new(false);
        matcher
            .register_rules(&[TargetRule::phrase("CONDITION", "diabetes")])
            .unwrap();

        let mut doc = Document::new("has diabetes");
        let spans = matcher.find_spans(&mut doc);
        assert_eq!(spans.len(), 1);
        assert!(doc.ents.is_empty());
    }

    #[test]
    fn test_add_ents_true_fills_entity_layer() {
        let mut matcher = TargetMatcher::new(true);
        matcher
            .register_rules(&[TargetRule::phrase("CONDITION", "diabetes")])
            .unwrap();

        let mut doc = Document::new("has diabetes");
        let spans = matcher.find_spans(&mut doc);
        assert_eq!(doc.ents, spans);
    }

    #[test]
    fn test_overlapping_rules_both_returned() {
        let mut matcher = TargetMatcher::new(false);
        matcher
            .register_rules(&[
                TargetRule::phrase("A", "diabetes mellitus"),
                TargetRule::phrase("B", "mellitus type"),
            ])
            .unwrap();

        let mut doc = Document::new("diabetes mellitus type 2");
        let spans = matcher.find_spans(&mut doc);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_snap_to_tokens_partial_overlap() {
        let tokens = tokenize("diabetes mellitus");
        // a byte range ending mid-word still covers the whole token
        let (start, end) = snap_to_tokens(&tokens, 0, 12).unwrap();
        assert_eq!((start, end), (0, 2));
    }

    #[test]
    fn test_snap_to_tokens_whitespace_only() {
        let tokens = tokenize("a b");
        assert_eq!(snap_to_tokens(&tokens, 1, 2), None);
        assert_eq!(snap_to_tokens(&tokens, 1, 1), None);
    }
}
