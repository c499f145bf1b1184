//! Unicode-aware word tokenization
//!
//! Splits chunk text into plain word tokens on UAX #29 boundaries.
//! Mirrors the original preprocessing: alphabetic tokens only, length
//! clamped to 2..=15 characters, punctuation discarded. Input is already
//! lowercased by the normalizer. Tokens that were merged by the phrase
//! detector keep their join character, so merged pairs survive a second
//! tokenization pass unharmed.

use unicode_segmentation::UnicodeSegmentation;

/// Minimum token length in characters
const MIN_TOKEN_LEN: usize = 2;
/// Maximum token length in characters
const MAX_TOKEN_LEN: usize = 15;

/// Tokenize chunk text into word tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .filter(|w| {
            let n = w.chars().count();
            n >= MIN_TOKEN_LEN && n <= MAX_TOKEN_LEN
        })
        .filter(|w| w.chars().any(|c| c.is_alphabetic()))
        .map(|w| w.to_string())
        .collect()
}
