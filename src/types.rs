//! Core types for transcript_topics
//!
//! Part-of-speech tags, annotated tokens, and the per-run parameter
//! block shared by the pipeline stages.

use crate::errors::{Result, TopicError};
use serde::{Deserialize, Serialize};

// ============================================================================
// Part-of-speech tags
// ============================================================================

/// Part-of-speech tags, following the Universal POS tag set the original
/// annotation pipeline emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Interjection,
    Numeral,
    Particle,
    Punctuation,
    Other,
}

impl PosTag {
    /// Parse from a universal POS tag string (case-insensitive)
    pub fn from_universal(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "NOUN" | "PROPN" => PosTag::Noun,
            "VERB" => PosTag::Verb,
            "ADJ" => PosTag::Adjective,
            "ADV" => PosTag::Adverb,
            "PRON" => PosTag::Pronoun,
            "DET" => PosTag::Determiner,
            "ADP" => PosTag::Preposition,
            "CCONJ" | "SCONJ" => PosTag::Conjunction,
            "INTJ" => PosTag::Interjection,
            "NUM" => PosTag::Numeral,
            "PART" => PosTag::Particle,
            "PUNCT" => PosTag::Punctuation,
            _ => PosTag::Other,
        }
    }

    /// The universal POS tag string for this tag
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::Verb => "VERB",
            PosTag::Adjective => "ADJ",
            PosTag::Adverb => "ADV",
            PosTag::Pronoun => "PRON",
            PosTag::Determiner => "DET",
            PosTag::Preposition => "ADP",
            PosTag::Conjunction => "CCONJ",
            PosTag::Interjection => "INTJ",
            PosTag::Numeral => "NUM",
            PosTag::Particle => "PART",
            PosTag::Punctuation => "PUNCT",
            PosTag::Other => "X",
        }
    }

    /// The subset of tags a run may filter on. Everything else is only
    /// ever produced by the annotator, never requested by a caller.
    pub fn is_filterable(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::Adjective | PosTag::Verb | PosTag::Adverb
        )
    }
}

// ============================================================================
// Token
// ============================================================================

/// A single annotated token from a chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// The surface form (after phrase merging)
    pub text: String,
    /// The lemmatized form
    pub lemma: String,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Whether this token is a stopword
    pub is_stopword: bool,
}

impl Token {
    /// Create a new token
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, pos: PosTag) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
            is_stopword: false,
        }
    }

    /// Check whether this token survives the lexical filter for the
    /// given allowed tag
    pub fn is_kept(&self, allowed: PosTag) -> bool {
        self.pos == allowed && !self.is_stopword && self.lemma.chars().any(|c| c.is_alphabetic())
    }
}

// ============================================================================
// Run parameters
// ============================================================================

/// Caller-facing knobs for one pipeline run. Chunk size lives on the run
/// target instead (full-corpus and per-speaker runs use different sizes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunParams {
    /// Number of latent topics to fit
    pub num_topics: usize,
    /// Collocation score threshold; higher accepts fewer phrases
    pub phrase_threshold: f64,
    /// The single part-of-speech tag retained by the lexical filter
    pub allowed_pos: PosTag,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            num_topics: 15,
            phrase_threshold: 100.0,
            allowed_pos: PosTag::Noun,
        }
    }
}

impl RunParams {
    /// Set the number of topics
    pub fn with_num_topics(mut self, num_topics: usize) -> Self {
        self.num_topics = num_topics;
        self
    }

    /// Set the phrase score threshold
    pub fn with_phrase_threshold(mut self, threshold: f64) -> Self {
        self.phrase_threshold = threshold;
        self
    }

    /// Set the allowed part-of-speech tag
    pub fn with_allowed_pos(mut self, pos: PosTag) -> Self {
        self.allowed_pos = pos;
        self
    }

    /// Reject unusable parameters before any expensive computation
    pub fn validate(&self) -> Result<()> {
        if self.num_topics == 0 {
            return Err(TopicError::invalid_config("num_topics must be positive"));
        }
        if !self.phrase_threshold.is_finite() || self.phrase_threshold < 0.0 {
            return Err(TopicError::invalid_config(format!(
                "phrase_threshold must be a non-negative number, got {}",
                self.phrase_threshold
            )));
        }
        if !self.allowed_pos.is_filterable() {
            return Err(TopicError::invalid_config(format!(
                "unsupported part-of-speech filter {}; expected one of NOUN, ADJ, VERB, ADV",
                self.allowed_pos.as_str()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_roundtrip() {
        for tag in ["NOUN", "ADJ", "VERB", "ADV"] {
            assert_eq!(PosTag::from_universal(tag).as_str(), tag);
        }
        assert_eq!(PosTag::from_universal("propn"), PosTag::Noun);
        assert_eq!(PosTag::from_universal("???"), PosTag::Other);
    }

    #[test]
    fn test_filterable_tags() {
        assert!(PosTag::Noun.is_filterable());
        assert!(PosTag::Adverb.is_filterable());
        assert!(!PosTag::Pronoun.is_filterable());
        assert!(!PosTag::Punctuation.is_filterable());
    }

    #[test]
    fn test_params_validate() {
        assert!(RunParams::default().validate().is_ok());
        assert!(RunParams::default()
            .with_num_topics(0)
            .validate()
            .is_err());
        assert!(RunParams::default()
            .with_phrase_threshold(f64::NAN)
            .validate()
            .is_err());
        assert!(RunParams::default()
            .with_allowed_pos(PosTag::Determiner)
            .validate()
            .is_err());
    }

    #[test]
    fn test_token_kept() {
        let mut tok = Token::new("dinosaurs", "dinosaur", PosTag::Noun);
        assert!(tok.is_kept(PosTag::Noun));
        assert!(!tok.is_kept(PosTag::Verb));
        tok.is_stopword = true;
        assert!(!tok.is_kept(PosTag::Noun));
    }
}
