//! # Tokenizer for Clinical Text
//!
//! Splits raw text into tokens (words, numbers, punctuation). Each token
//! preserves its byte offsets into the original text so spans can always be
//! mapped back to the exact source characters.
//!
//! Segmentation follows Unicode word boundaries (UAX #29), which already keeps
//! decimals ("3.5"), contractions ("don't") and dotted abbreviations ("b.i.d")
//! together. On top of that, a small abbreviation list keeps the trailing
//! period attached to honorifics and units common in clinical notes, so
//! "Dr. Smith" tokenizes as `["Dr.", "Smith"]` rather than `["Dr", ".", "Smith"]`.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// A token extracted from the original text.
///
/// The token is the atomic unit of processing. It keeps the exact byte
/// position of its source (`start` and `end`), which is needed to map
/// character-level regex matches back onto token boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The token text (e.g. "diabetes", ",", "3.5").
    pub text: String,
    /// Starting byte index in the original text (inclusive).
    pub start: usize,
    /// Ending byte index in the original text (exclusive).
    pub end: usize,
    /// Sequential index of the token in the document (0, 1, 2...).
    pub index: usize,
}

/// Abbreviations whose trailing period belongs to the token itself.
const ABBREVIATIONS: &[&str] = &[
    "Dr", "Mr", "Mrs", "Ms", "Prof", "St", "Jr", "Sr", "vs", "approx",
    "mg", "mcg", "mL", "dL", "kg", "cm", "mm", "hr", "min", "wk", "mo", "yr",
];

/// Tokenizes a text into words, numbers and punctuation with byte offsets.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for (start, word) in text.split_word_bound_indices() {
        if word.chars().all(char::is_whitespace) {
            continue;
        }

        // Merge a period into a preceding abbreviation token.
        if word == "." {
            if let Some(last) = tokens.last_mut() {
                if last.end == start && ABBREVIATIONS.contains(&last.text.as_str()) {
                    last.text.push('.');
                    last.end = start + 1;
                    continue;
                }
            }
        }

        tokens.push(Token {
            text: word.to_string(),
            start,
            end: start + word.len(),
            index: 0,
        });
    }

    // Assign sequential indices
    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
    }
    tokens
}
