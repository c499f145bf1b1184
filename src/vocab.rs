//! Vocabulary construction and bag-of-words encoding
//!
//! Assigns each distinct surface token a dense integer id in order of
//! first appearance (the ordering is documented but non-essential; only
//! uniqueness and bijectivity matter). Ids are stable for the duration
//! of one run and meaningless outside it — vocabularies from different
//! runs are never interchanged.

use rustc_hash::FxHashMap;

/// A sparse encoded document: (term id, occurrence count) pairs sorted
/// by id
pub type BowDocument = Vec<(u32, u32)>;

/// A bijective token ↔ id mapping for one pipeline run
#[derive(Debug, Default, Clone)]
pub struct Vocabulary {
    token_to_id: FxHashMap<String, u32>,
    id_to_token: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from every token stream of a run
    pub fn build(streams: &[Vec<String>]) -> Self {
        let mut vocab = Self::default();
        for stream in streams {
            for token in stream {
                vocab.intern(token);
            }
        }
        vocab
    }

    fn intern(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.token_to_id.get(token) {
            return id;
        }
        let id = self.id_to_token.len() as u32;
        self.token_to_id.insert(token.to_string(), id);
        self.id_to_token.push(token.to_string());
        id
    }

    /// Look up a token's id
    pub fn id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Look up the token for an id
    pub fn token(&self, id: u32) -> Option<&str> {
        self.id_to_token.get(id as usize).map(|s| s.as_str())
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    /// Check if the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.id_to_token.is_empty()
    }

    /// Encode one token stream as sparse (id, count) pairs, sorted by
    /// id. Tokens absent from the vocabulary are skipped (cannot happen
    /// for streams the vocabulary was built from). An empty stream
    /// encodes to an empty document.
    pub fn encode(&self, stream: &[String]) -> BowDocument {
        let mut counts: FxHashMap<u32, u32> = FxHashMap::default();
        for token in stream {
            if let Some(id) = self.id(token) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        let mut doc: BowDocument = counts.into_iter().collect();
        doc.sort_unstable_by_key(|&(id, _)| id);
        doc
    }

    /// Encode every token stream, aligned by index with the input
    pub fn encode_all(&self, streams: &[Vec<String>]) -> Vec<BowDocument> {
        streams.iter().map(|s| self.encode(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streams() -> Vec<Vec<String>> {
        vec![
            vec!["coffee".into(), "museum".into(), "coffee".into()],
            vec!["wedding".into(), "coffee".into()],
            vec![],
        ]
    }

    #[test]
    fn test_ids_are_bijective() {
        let vocab = Vocabulary::build(&streams());
        assert_eq!(vocab.len(), 3);
        for id in 0..vocab.len() as u32 {
            let token = vocab.token(id).expect("id maps to a token");
            assert_eq!(vocab.id(token), Some(id), "token {token} round-trips");
        }
        assert_eq!(vocab.id("unseen"), None);
        assert_eq!(vocab.token(99), None);
    }

    #[test]
    fn test_encode_counts_and_sorting() {
        let vocab = Vocabulary::build(&streams());
        let docs = vocab.encode_all(&streams());
        assert_eq!(docs.len(), 3);

        let coffee = vocab.id("coffee").unwrap();
        let museum = vocab.id("museum").unwrap();
        assert_eq!(docs[0], vec![(coffee, 2), (museum, 1)]);

        for doc in &docs {
            for pair in doc.windows(2) {
                assert!(pair[0].0 < pair[1].0, "ids sorted and unique");
            }
            for &(id, count) in doc {
                assert!((id as usize) < vocab.len());
                assert!(count > 0);
            }
        }
    }

    #[test]
    fn test_empty_stream_encodes_empty() {
        let vocab = Vocabulary::build(&streams());
        assert!(vocab.encode(&[]).is_empty());
    }

    #[test]
    fn test_empty_corpus_empty_vocab() {
        let vocab = Vocabulary::build(&[]);
        assert!(vocab.is_empty());
    }
}
