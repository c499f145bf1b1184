//! Chunking of utterances into pipeline documents
//!
//! A chunk is a fixed-size batch of consecutive utterances joined into
//! one text blob; it is the atomic unit the topic model reasons about.
//! Membership is fixed at creation. Chunks are never merged or split.

use crate::errors::{Result, TopicError};

/// Retain only utterances spoken by `speaker`, i.e. lines starting with
/// the literal `"<speaker>:"` prefix. Order is preserved.
pub fn filter_speaker(utterances: &[String], speaker: &str) -> Vec<String> {
    let prefix = format!("{speaker}:");
    utterances
        .iter()
        .filter(|u| u.starts_with(&prefix))
        .cloned()
        .collect()
}

/// Partition utterances into consecutive, non-overlapping groups of
/// `chunk_size`, the final group holding the remainder, each group
/// space-joined into one chunk string.
///
/// Guarantees: `ceil(n / chunk_size)` chunks, chunk order mirrors
/// utterance order, no utterance is duplicated or dropped. An empty
/// input yields zero chunks; the caller decides whether that is an
/// error for its run target.
pub fn chunk_utterances(utterances: &[String], chunk_size: usize) -> Result<Vec<String>> {
    if chunk_size == 0 {
        return Err(TopicError::invalid_config("chunk size must be positive"));
    }
    Ok(utterances
        .chunks(chunk_size)
        .map(|group| group.join(" "))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterances(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line{i}")).collect()
    }

    #[test]
    fn test_chunk_count_is_ceiling() {
        let lines = utterances(80);
        let chunks = chunk_utterances(&lines, 30).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].split_whitespace().count(), 30);
        assert_eq!(chunks[1].split_whitespace().count(), 30);
        assert_eq!(chunks[2].split_whitespace().count(), 20);
    }

    #[test]
    fn test_chunks_reconstruct_input() {
        let lines = utterances(47);
        let chunks = chunk_utterances(&lines, 10).unwrap();
        let rejoined = chunks.join(" ");
        assert_eq!(rejoined, lines.join(" "));
    }

    #[test]
    fn test_exact_multiple_has_no_short_tail() {
        let lines = utterances(40);
        let chunks = chunk_utterances(&lines, 40).unwrap();
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_empty_input_yields_zero_chunks() {
        let chunks = chunk_utterances(&[], 30).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let lines = utterances(5);
        assert!(chunk_utterances(&lines, 0).is_err());
    }

    #[test]
    fn test_speaker_filter_literal_prefix() {
        let lines = vec![
            "ross: hi".to_string(),
            "rachel: hey".to_string(),
            "ross-like: nope".to_string(),
            "ross: we were on a break".to_string(),
            " ross: leading space drops".to_string(),
        ];
        let ross = filter_speaker(&lines, "ross");
        assert_eq!(ross.len(), 2);
        assert!(ross.iter().all(|u| u.starts_with("ross:")));
    }

    #[test]
    fn test_speaker_absent_yields_empty() {
        let lines = vec!["rachel: hey".to_string()];
        assert!(filter_speaker(&lines, "gunther").is_empty());
    }
}
