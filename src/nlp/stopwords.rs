//! English stopword filtering
//!
//! A fixed function-word list applied after lemmatization. Distinct from
//! the corpus stop-list in `normalize`: that one holds transcript
//! artifacts (speaker tags, filler words); this one holds ordinary
//! closed-class English words.

use rustc_hash::FxHashSet;

/// Standard English stopwords, the closed-class core plus the spoken
/// contractions dialogue transcripts are full of.
const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "cannot", "could", "couldn", "did", "didn", "do", "does", "doesn",
    "doing", "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn",
    "has", "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just",
    "ll", "me", "might", "mightn", "more", "most", "must", "mustn", "my", "myself", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "re", "s", "same", "shan", "she", "should", "shouldn", "so", "some",
    "such", "t", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve",
    "very", "was", "wasn", "we", "were", "weren", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "won", "would", "wouldn", "y", "you", "your", "yours",
    "yourself", "yourselves", "yeah", "yes", "okay", "ok", "oh", "hey", "uh", "um", "hm", "huh",
    "gonna", "wanna", "gotta", "know", "like", "get", "got", "go", "going", "well", "right",
    "really", "mean", "one", "two", "look", "come", "see", "think", "say", "said",
];

/// A stopword filter for one language
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: FxHashSet<&'static str>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// The English filter
    pub fn english() -> Self {
        Self {
            words: ENGLISH.iter().copied().collect(),
        }
    }

    /// Check whether a token (surface or lemma) is a stopword
    pub fn is_stopword(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of stopwords in the table
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_words_are_stopwords() {
        let sw = StopwordFilter::english();
        for w in ["the", "and", "you", "gonna", "oh"] {
            assert!(sw.is_stopword(w), "{w} should be a stopword");
        }
    }

    #[test]
    fn test_content_words_are_not() {
        let sw = StopwordFilter::english();
        for w in ["dinosaur", "coffee", "wedding", "apartment"] {
            assert!(!sw.is_stopword(w), "{w} should not be a stopword");
        }
    }
}
