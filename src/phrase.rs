//! Collocation detection over the chunk corpus
//!
//! Learns statistically frequent adjacent token pairs and rewrites token
//! streams so each accepted pair becomes a single merged token. Trigram
//! collocations come from refitting on the bigram-rewritten corpus: a
//! merged pair is a plain token there, so a frequent `(pair, word)`
//! adjacency merges into a triple.
//!
//! Scoring follows the standard collocation statistic: for a pair (a, b)
//! with pair count `c_ab`, token counts `c_a` and `c_b`, and `v` distinct
//! entries in the frequency table,
//! `score = (c_ab - min_count) * v / (c_a * c_b)`, accepted when the
//! score exceeds the threshold. Fitting is pure counting; re-running on
//! the same corpus with the same thresholds yields the same phrases.

use rustc_hash::{FxHashMap, FxHashSet};

/// Configuration for collocation learning
#[derive(Debug, Clone)]
pub struct PhraseConfig {
    /// Minimum pair occurrences before a pair is a candidate
    pub min_count: u32,
    /// Score threshold; higher accepts fewer phrases
    pub threshold: f64,
    /// Join character used when merging a pair
    pub delimiter: char,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        Self {
            min_count: 10,
            threshold: 100.0,
            delimiter: '_',
        }
    }
}

impl PhraseConfig {
    /// Set the score threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the minimum pair count
    pub fn with_min_count(mut self, min_count: u32) -> Self {
        self.min_count = min_count;
        self
    }
}

/// A fitted collocation transformer
#[derive(Debug, Clone)]
pub struct PhraseModel {
    accepted: FxHashSet<(String, String)>,
    delimiter: char,
}

impl PhraseModel {
    /// Learn collocations from a tokenized corpus.
    ///
    /// Uses the entire corpus; there is no train/test split at this
    /// stage.
    pub fn fit(corpus: &[Vec<String>], config: &PhraseConfig) -> Self {
        let mut token_counts: FxHashMap<&str, u32> = FxHashMap::default();
        let mut pair_counts: FxHashMap<(&str, &str), u32> = FxHashMap::default();

        for doc in corpus {
            for token in doc {
                *token_counts.entry(token.as_str()).or_insert(0) += 1;
            }
            for pair in doc.windows(2) {
                *pair_counts
                    .entry((pair[0].as_str(), pair[1].as_str()))
                    .or_insert(0) += 1;
            }
        }

        // The frequency table holds unigrams and candidate pairs alike,
        // matching the statistic's original definition of vocabulary size.
        let vocab_size = (token_counts.len() + pair_counts.len()) as f64;

        let mut accepted = FxHashSet::default();
        for (&(a, b), &c_ab) in &pair_counts {
            if c_ab < config.min_count {
                continue;
            }
            let c_a = token_counts[a] as f64;
            let c_b = token_counts[b] as f64;
            let score = (c_ab as f64 - config.min_count as f64) * vocab_size / (c_a * c_b);
            if score > config.threshold {
                accepted.insert((a.to_string(), b.to_string()));
            }
        }

        Self {
            accepted,
            delimiter: config.delimiter,
        }
    }

    /// Number of accepted collocations
    pub fn num_phrases(&self) -> usize {
        self.accepted.len()
    }

    /// Rewrite one token stream, merging each accepted adjacent pair
    /// into a single delimiter-joined token. Greedy left-to-right: a
    /// token consumed by a merge is not considered for the next pair.
    pub fn apply(&self, tokens: &[String]) -> Vec<String> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            if i + 1 < tokens.len() {
                // Cheap membership probe; clone only on merge
                let key = (tokens[i].clone(), tokens[i + 1].clone());
                if self.accepted.contains(&key) {
                    out.push(format!("{}{}{}", tokens[i], self.delimiter, tokens[i + 1]));
                    i += 2;
                    continue;
                }
            }
            out.push(tokens[i].clone());
            i += 1;
        }
        out
    }

    /// Apply the transformer to every document, preserving order
    pub fn transform_corpus(&self, corpus: &[Vec<String>]) -> Vec<Vec<String>> {
        corpus.iter().map(|doc| self.apply(doc)).collect()
    }
}
