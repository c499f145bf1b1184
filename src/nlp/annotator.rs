//! Lemmatization and part-of-speech tagging
//!
//! The pipeline depends on a [`Lemmatizer`] trait rather than a concrete
//! linguistic model, so alternate annotators can be substituted and the
//! lexical filter unit-tested against fixed input/output pairs.
//!
//! [`RuleLemmatizer`] is the built-in implementation: a function-word
//! table, small irregular-form tables, and suffix heuristics. It is
//! intentionally simple and fully deterministic; its misjudgments are
//! the usual suffix-heuristic ones (deverbal adjectives tag as verbs).

use crate::nlp::stopwords::StopwordFilter;
use crate::types::{PosTag, Token};
use rustc_hash::FxHashMap;

/// A lemmatizer plus part-of-speech tagger.
///
/// Implementations must be deterministic: the same word always yields
/// the same lemma and tag.
pub trait Lemmatizer: Send + Sync {
    /// Annotate a single lowercase word token
    fn annotate(&self, word: &str) -> Token;

    /// Annotate a token stream, preserving order
    fn annotate_stream(&self, tokens: &[String]) -> Vec<Token> {
        tokens.iter().map(|t| self.annotate(t)).collect()
    }
}

/// Rule-based lemmatizer and tagger
pub struct RuleLemmatizer {
    function_words: FxHashMap<&'static str, PosTag>,
    irregular_verbs: FxHashMap<&'static str, &'static str>,
    irregular_nouns: FxHashMap<&'static str, &'static str>,
}

impl Default for RuleLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleLemmatizer {
    pub fn new() -> Self {
        let function_words: FxHashMap<&'static str, PosTag> = [
            ("i", PosTag::Pronoun),
            ("you", PosTag::Pronoun),
            ("he", PosTag::Pronoun),
            ("she", PosTag::Pronoun),
            ("it", PosTag::Pronoun),
            ("we", PosTag::Pronoun),
            ("they", PosTag::Pronoun),
            ("me", PosTag::Pronoun),
            ("him", PosTag::Pronoun),
            ("them", PosTag::Pronoun),
            ("my", PosTag::Pronoun),
            ("your", PosTag::Pronoun),
            ("his", PosTag::Pronoun),
            ("its", PosTag::Pronoun),
            ("our", PosTag::Pronoun),
            ("their", PosTag::Pronoun),
            ("the", PosTag::Determiner),
            ("an", PosTag::Determiner),
            ("this", PosTag::Determiner),
            ("that", PosTag::Determiner),
            ("these", PosTag::Determiner),
            ("those", PosTag::Determiner),
            ("some", PosTag::Determiner),
            ("no", PosTag::Determiner),
            ("every", PosTag::Determiner),
            ("of", PosTag::Preposition),
            ("in", PosTag::Preposition),
            ("on", PosTag::Preposition),
            ("at", PosTag::Preposition),
            ("by", PosTag::Preposition),
            ("for", PosTag::Preposition),
            ("with", PosTag::Preposition),
            ("to", PosTag::Preposition),
            ("from", PosTag::Preposition),
            ("about", PosTag::Preposition),
            ("into", PosTag::Preposition),
            ("over", PosTag::Preposition),
            ("under", PosTag::Preposition),
            ("and", PosTag::Conjunction),
            ("or", PosTag::Conjunction),
            ("but", PosTag::Conjunction),
            ("because", PosTag::Conjunction),
            ("if", PosTag::Conjunction),
            ("while", PosTag::Conjunction),
            ("oh", PosTag::Interjection),
            ("hey", PosTag::Interjection),
            ("wow", PosTag::Interjection),
            ("yeah", PosTag::Interjection),
            ("not", PosTag::Particle),
            ("nt", PosTag::Particle),
        ]
        .into_iter()
        .collect();

        let irregular_verbs: FxHashMap<&'static str, &'static str> = [
            ("am", "be"),
            ("is", "be"),
            ("are", "be"),
            ("was", "be"),
            ("were", "be"),
            ("been", "be"),
            ("being", "be"),
            ("has", "have"),
            ("had", "have"),
            ("having", "have"),
            ("does", "do"),
            ("did", "do"),
            ("done", "do"),
            ("went", "go"),
            ("gone", "go"),
            ("goes", "go"),
            ("said", "say"),
            ("says", "say"),
            ("made", "make"),
            ("got", "get"),
            ("gotten", "get"),
            ("took", "take"),
            ("taken", "take"),
            ("came", "come"),
            ("saw", "see"),
            ("seen", "see"),
            ("knew", "know"),
            ("known", "know"),
            ("thought", "think"),
            ("told", "tell"),
            ("gave", "give"),
            ("given", "give"),
            ("found", "find"),
            ("left", "leave"),
            ("felt", "feel"),
            ("kept", "keep"),
            ("met", "meet"),
            ("meant", "mean"),
            ("broke", "break"),
            ("broken", "break"),
        ]
        .into_iter()
        .collect();

        let irregular_nouns: FxHashMap<&'static str, &'static str> = [
            ("children", "child"),
            ("men", "man"),
            ("women", "woman"),
            ("people", "person"),
            ("feet", "foot"),
            ("teeth", "tooth"),
            ("mice", "mouse"),
            ("wives", "wife"),
            ("lives", "life"),
            ("knives", "knife"),
            ("babies", "baby"),
            ("parties", "party"),
            ("stories", "story"),
        ]
        .into_iter()
        .collect();

        Self {
            function_words,
            irregular_verbs,
            irregular_nouns,
        }
    }

    /// Singularize a regular plural noun, or return it unchanged
    fn singularize(word: &str) -> String {
        if let Some(stem) = word.strip_suffix("ies") {
            if stem.len() >= 2 {
                return format!("{stem}y");
            }
        }
        for suffix in ["ches", "shes", "sses", "xes", "zes"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                return format!("{stem}{}", &suffix[..suffix.len() - 2]);
            }
        }
        if word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            let stem = &word[..word.len() - 1];
            if stem.len() >= 2 {
                return stem.to_string();
            }
        }
        word.to_string()
    }

    /// Strip a verbal inflection, undoing doubled consonants and
    /// restoring a dropped final `e` under the Porter conditions
    fn strip_inflection(word: &str, suffix: &str) -> String {
        let stem = match word.strip_suffix(suffix) {
            Some(s) if s.chars().count() >= 2 => s,
            _ => return word.to_string(),
        };
        let chars: Vec<char> = stem.chars().collect();
        let n = chars.len();
        // running -> run, stopped -> stop
        if n >= 3 && chars[n - 1] == chars[n - 2] && !matches!(chars[n - 1], 'l' | 's' | 'z') {
            return chars[..n - 1].iter().collect();
        }
        // making -> make, hoped -> hope (measure 1, ends cvc)
        if Self::measure(&chars) == 1 && Self::ends_cvc(&chars) {
            return format!("{stem}e");
        }
        stem.to_string()
    }

    fn is_vowel(c: char) -> bool {
        matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
    }

    /// Porter measure: the number of vowel-to-consonant transitions
    fn measure(chars: &[char]) -> usize {
        let mut m = 0;
        let mut prev_vowel = false;
        for &c in chars {
            let v = Self::is_vowel(c);
            if prev_vowel && !v {
                m += 1;
            }
            prev_vowel = v;
        }
        m
    }

    /// True when the stem ends consonant-vowel-consonant with the final
    /// consonant not w, x, or y
    fn ends_cvc(chars: &[char]) -> bool {
        let n = chars.len();
        if n < 3 {
            return false;
        }
        !Self::is_vowel(chars[n - 3])
            && Self::is_vowel(chars[n - 2])
            && !Self::is_vowel(chars[n - 1])
            && !matches!(chars[n - 1], 'w' | 'x' | 'y')
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn annotate(&self, word: &str) -> Token {
        // A merged collocation behaves as a single nominal token
        if word.contains('_') {
            return Token::new(word, word, PosTag::Noun);
        }

        if let Some(&pos) = self.function_words.get(word) {
            return Token::new(word, word, pos);
        }
        if let Some(&lemma) = self.irregular_verbs.get(word) {
            return Token::new(word, lemma, PosTag::Verb);
        }
        if let Some(&lemma) = self.irregular_nouns.get(word) {
            return Token::new(word, lemma, PosTag::Noun);
        }

        if word.len() > 4 && word.ends_with("ly") {
            return Token::new(word, word, PosTag::Adverb);
        }

        if word.len() > 4 && word.ends_with("ing") {
            return Token::new(word, Self::strip_inflection(word, "ing"), PosTag::Verb);
        }
        if word.len() > 3 && word.ends_with("ed") {
            return Token::new(word, Self::strip_inflection(word, "ed"), PosTag::Verb);
        }

        for suffix in ["ful", "less", "ous", "ive", "able", "ible", "ic"] {
            if word.len() > suffix.len() + 2 && word.ends_with(suffix) {
                return Token::new(word, word, PosTag::Adjective);
            }
        }

        // Remaining content words default to nouns, singularized
        Token::new(word, Self::singularize(word), PosTag::Noun)
    }
}

/// The lexical filter: annotate a phrase-merged token stream, mark
/// stopwords, and keep only lemmas whose tag matches the single allowed
/// part of speech. Possibly-empty output is fine; downstream encoding
/// tolerates empty streams.
pub fn lexical_filter(
    tokens: &[String],
    lemmatizer: &dyn Lemmatizer,
    stopwords: &StopwordFilter,
    allowed: PosTag,
) -> Vec<String> {
    let mut annotated = lemmatizer.annotate_stream(tokens);
    for token in &mut annotated {
        token.is_stopword =
            stopwords.is_stopword(&token.text) || stopwords.is_stopword(&token.lemma);
    }
    annotated
        .into_iter()
        .filter(|t| t.is_kept(allowed))
        .map(|t| t.lemma)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_fixed_lemma_pairs() {
        let lem = RuleLemmatizer::new();
        let cases = [
            ("dinosaurs", "dinosaur", PosTag::Noun),
            ("babies", "baby", PosTag::Noun),
            ("children", "child", PosTag::Noun),
            ("dishes", "dish", PosTag::Noun),
            ("running", "run", PosTag::Verb),
            ("making", "make", PosTag::Verb),
            ("hoped", "hope", PosTag::Verb),
            ("was", "be", PosTag::Verb),
            ("wonderful", "wonderful", PosTag::Adjective),
            ("quickly", "quickly", PosTag::Adverb),
            ("coffee", "coffee", PosTag::Noun),
        ];
        for (word, lemma, pos) in cases {
            let tok = lem.annotate(word);
            assert_eq!(tok.lemma, lemma, "lemma of {word}");
            assert_eq!(tok.pos, pos, "pos of {word}");
        }
    }

    #[test]
    fn test_merged_phrase_is_noun() {
        let lem = RuleLemmatizer::new();
        let tok = lem.annotate("central_perk");
        assert_eq!(tok.pos, PosTag::Noun);
        assert_eq!(tok.lemma, "central_perk");
    }

    #[test]
    fn test_function_words_not_nouns() {
        let lem = RuleLemmatizer::new();
        assert_eq!(lem.annotate("the").pos, PosTag::Determiner);
        assert_eq!(lem.annotate("you").pos, PosTag::Pronoun);
        assert_eq!(lem.annotate("with").pos, PosTag::Preposition);
    }

    #[test]
    fn test_lexical_filter_noun_run() {
        let lem = RuleLemmatizer::new();
        let sw = StopwordFilter::english();
        let out = lexical_filter(
            &toks("the dinosaurs were amazing at the museum"),
            &lem,
            &sw,
            PosTag::Noun,
        );
        assert_eq!(out, vec!["dinosaur", "museum"]);
    }

    #[test]
    fn test_lexical_filter_verb_run() {
        let lem = RuleLemmatizer::new();
        let sw = StopwordFilter::english();
        // "was" lemmatizes to "be" but both forms sit on the stopword
        // list, so only the content verb survives
        let out = lexical_filter(&toks("she was running to the store"), &lem, &sw, PosTag::Verb);
        assert_eq!(out, vec!["run"]);
    }

    #[test]
    fn test_lexical_filter_empty_stream() {
        let lem = RuleLemmatizer::new();
        let sw = StopwordFilter::english();
        let out = lexical_filter(&toks("the of and"), &lem, &sw, PosTag::Noun);
        assert!(out.is_empty());
    }
}
