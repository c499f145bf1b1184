//! Model quality diagnostics
//!
//! Log-perplexity and topic coherence for a fitted model. Both are
//! side-channel numbers printed for operator inspection; neither gates
//! pipeline success.

use crate::lda::LdaModel;
use crate::vocab::{BowDocument, Vocabulary};
use rustc_hash::{FxHashMap, FxHashSet};

/// Per-word log2 likelihood of the corpus under the fitted model.
/// Lower (more negative) indicates a worse fit.
pub fn log_perplexity(model: &LdaModel, docs: &[BowDocument]) -> f64 {
    model.log_perplexity(docs)
}

/// Configuration for the coherence measure
#[derive(Debug, Clone)]
pub struct CoherenceConfig {
    /// Top words per topic entering the measure
    pub top_n: usize,
    /// Sliding-window width, in tokens
    pub window_size: usize,
}

impl Default for CoherenceConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            window_size: 10,
        }
    }
}

/// Topic coherence over sliding-window co-occurrence statistics.
///
/// For each topic's top words, boolean window counts give NPMI values;
/// each word's NPMI vector against its topic siblings is compared by
/// cosine, and the topic's score is the mean pairwise similarity.
/// The corpus-level score is the mean over topics. Higher is more
/// coherent.
pub fn topic_coherence(
    model: &LdaModel,
    streams: &[Vec<String>],
    vocab: &Vocabulary,
    config: &CoherenceConfig,
) -> f64 {
    let topics: Vec<Vec<u32>> = (0..model.num_topics())
        .map(|t| {
            model
                .top_terms(t, config.top_n)
                .into_iter()
                .map(|(id, _)| id)
                .collect()
        })
        .collect();

    let tracked: FxHashSet<u32> = topics.iter().flatten().copied().collect();
    let stats = WindowStats::collect(streams, vocab, &tracked, config.window_size);

    if stats.total_windows == 0 {
        return 0.0;
    }

    let per_topic: Vec<f64> = topics
        .iter()
        .map(|words| topic_score(words, &stats))
        .collect();
    per_topic.iter().sum::<f64>() / per_topic.len().max(1) as f64
}

/// Boolean sliding-window occurrence counts for a tracked word set
struct WindowStats {
    total_windows: u64,
    word_windows: FxHashMap<u32, u64>,
    pair_windows: FxHashMap<(u32, u32), u64>,
}

impl WindowStats {
    fn collect(
        streams: &[Vec<String>],
        vocab: &Vocabulary,
        tracked: &FxHashSet<u32>,
        window_size: usize,
    ) -> Self {
        let mut stats = Self {
            total_windows: 0,
            word_windows: FxHashMap::default(),
            pair_windows: FxHashMap::default(),
        };
        let window_size = window_size.max(1);

        for stream in streams {
            let ids: Vec<Option<u32>> = stream
                .iter()
                .map(|tok| vocab.id(tok).filter(|id| tracked.contains(id)))
                .collect();
            if ids.is_empty() {
                continue;
            }
            // A stream shorter than the window is a single window
            let n_windows = ids.len().saturating_sub(window_size) + 1;
            for start in 0..n_windows {
                let end = (start + window_size).min(ids.len());
                let mut present: Vec<u32> =
                    ids[start..end].iter().flatten().copied().collect();
                present.sort_unstable();
                present.dedup();

                stats.total_windows += 1;
                for &w in &present {
                    *stats.word_windows.entry(w).or_insert(0) += 1;
                }
                for i in 0..present.len() {
                    for j in (i + 1)..present.len() {
                        *stats
                            .pair_windows
                            .entry((present[i], present[j]))
                            .or_insert(0) += 1;
                    }
                }
            }
        }
        stats
    }

    fn p_word(&self, w: u32) -> f64 {
        *self.word_windows.get(&w).unwrap_or(&0) as f64 / self.total_windows as f64
    }

    fn p_pair(&self, a: u32, b: u32) -> f64 {
        let key = if a <= b { (a, b) } else { (b, a) };
        *self.pair_windows.get(&key).unwrap_or(&0) as f64 / self.total_windows as f64
    }

    /// Normalized pointwise mutual information in [-1, 1]
    fn npmi(&self, a: u32, b: u32) -> f64 {
        const EPS: f64 = 1e-12;
        let p_ab = self.p_pair(a, b);
        let p_a = self.p_word(a);
        let p_b = self.p_word(b);
        if p_ab <= 0.0 || p_a <= 0.0 || p_b <= 0.0 {
            return 0.0;
        }
        if p_ab >= 1.0 - EPS {
            // Words present in every single window are perfectly
            // correlated; the ratio degenerates to 0/0 there
            return 1.0;
        }
        let pmi = (p_ab / (p_a * p_b)).ln();
        pmi / -p_ab.ln()
    }
}

/// Mean pairwise cosine similarity of the topic words' NPMI vectors
fn topic_score(words: &[u32], stats: &WindowStats) -> f64 {
    if words.len() < 2 {
        return 0.0;
    }
    let vectors: Vec<Vec<f64>> = words
        .iter()
        .map(|&wi| words.iter().map(|&wj| stats.npmi(wi, wj)).collect())
        .collect();

    let mut total = 0.0;
    let mut pairs = 0usize;
    for i in 0..vectors.len() {
        for j in (i + 1)..vectors.len() {
            total += cosine(&vectors[i], &vectors[j]);
            pairs += 1;
        }
    }
    total / pairs as f64
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na * nb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lda::LdaConfig;

    fn themed_streams() -> Vec<Vec<String>> {
        let mut streams = Vec::new();
        for _ in 0..8 {
            streams.push(
                ["coffee", "muffin", "barista", "espresso"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            );
            streams.push(
                ["dinosaur", "fossil", "museum", "bone"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            );
        }
        streams
    }

    fn fitted() -> (LdaModel, Vec<Vec<String>>, Vocabulary) {
        let streams = themed_streams();
        let vocab = Vocabulary::build(&streams);
        let docs = vocab.encode_all(&streams);
        let model =
            LdaModel::fit(&docs, &vocab, &LdaConfig::default().with_num_topics(2)).unwrap();
        (model, streams, vocab)
    }

    #[test]
    fn test_coherence_is_finite() {
        let (model, streams, vocab) = fitted();
        let score = topic_coherence(&model, &streams, &vocab, &CoherenceConfig::default());
        assert!(score.is_finite());
        assert!((-1.0..=1.0).contains(&score), "got {score}");
    }

    #[test]
    fn test_coherence_deterministic() {
        let (model, streams, vocab) = fitted();
        let config = CoherenceConfig::default();
        let a = topic_coherence(&model, &streams, &vocab, &config);
        let b = topic_coherence(&model, &streams, &vocab, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_coherence_empty_streams() {
        let (model, _, vocab) = fitted();
        let score = topic_coherence(&model, &[], &vocab, &CoherenceConfig::default());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_perplexity_wrapper_matches_model() {
        let (model, streams, vocab) = fitted();
        let docs = vocab.encode_all(&streams);
        assert_eq!(log_perplexity(&model, &docs), model.log_perplexity(&docs));
    }

    #[test]
    fn test_npmi_perfect_cooccurrence() {
        let streams: Vec<Vec<String>> = (0..5)
            .map(|_| vec!["alpha".to_string(), "beta".to_string()])
            .collect();
        let vocab = Vocabulary::build(&streams);
        let tracked: FxHashSet<u32> = [0u32, 1u32].into_iter().collect();
        let stats = WindowStats::collect(&streams, &vocab, &tracked, 10);
        // Words that always co-occur approach NPMI of 1
        let score = stats.npmi(0, 1);
        assert!(score > 0.9, "got {score}");
    }
}
