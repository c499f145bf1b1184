//! Dominant-topic assignment and the representative-document table
//!
//! The table is the run's durable artifact: one row per topic that is
//! some chunk's dominant topic, carrying the winning chunk's text and
//! the topic's keywords.

use crate::errors::{Result, TopicError};
use crate::lda::LdaModel;
use crate::vocab::Vocabulary;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Keywords listed per topic in reports
const KEYWORDS_PER_TOPIC: usize = 10;

/// One chunk's dominant-topic breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicAssignment {
    /// Index of the chunk in the run's chunk list
    pub chunk_index: usize,
    /// The topic with the highest probability for this chunk
    pub dominant_topic: usize,
    /// That topic's probability mass in this chunk
    pub probability: f64,
    /// The topic's top keywords
    pub keywords: Vec<String>,
    /// The chunk's original text
    pub text: String,
}

/// One row of the representative table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepresentativeDoc {
    /// Topic id
    pub topic: usize,
    /// The dominant-topic probability in the winning chunk
    pub probability: f64,
    /// The topic's top keywords
    pub keywords: Vec<String>,
    /// The winning chunk's original text
    pub text: String,
}

/// Resolve a topic's keyword list through the vocabulary
fn topic_keywords(model: &LdaModel, vocab: &Vocabulary, topic: usize) -> Vec<String> {
    model
        .top_terms(topic, KEYWORDS_PER_TOPIC)
        .into_iter()
        .filter_map(|(id, _)| vocab.token(id).map(str::to_string))
        .collect()
}

/// The full per-document breakdown: each chunk's dominant topic with
/// probability and keywords, aligned with the chunk list.
///
/// The dominant topic is the argmax of the chunk's topic distribution;
/// an exact probability tie keeps the lower topic id.
pub fn dominant_topics(
    model: &LdaModel,
    chunks: &[String],
    vocab: &Vocabulary,
) -> Vec<TopicAssignment> {
    let keyword_cache: Vec<Vec<String>> = (0..model.num_topics())
        .map(|t| topic_keywords(model, vocab, t))
        .collect();

    chunks
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let dist = model.doc_topics(idx);
            let mut best = 0usize;
            for (t, &p) in dist.iter().enumerate() {
                if p > dist[best] {
                    best = t;
                }
            }
            TopicAssignment {
                chunk_index: idx,
                dominant_topic: best,
                probability: dist[best],
                keywords: keyword_cache[best].clone(),
                text: text.clone(),
            }
        })
        .collect()
}

/// Collapse assignments to one row per realized dominant topic: the
/// chunk with the highest dominant-topic probability wins; an exact tie
/// keeps the chunk appearing earlier in original order. Rows are
/// ordered by ascending topic id; topics that dominate no chunk emit no
/// row, so the table has at most `num_topics` rows.
pub fn representative_docs(assignments: &[TopicAssignment]) -> Vec<RepresentativeDoc> {
    let mut winners: Vec<Option<&TopicAssignment>> = Vec::new();
    for assignment in assignments {
        if winners.len() <= assignment.dominant_topic {
            winners.resize(assignment.dominant_topic + 1, None);
        }
        let slot = &mut winners[assignment.dominant_topic];
        // Strictly greater keeps the earlier chunk on ties
        match slot {
            Some(current) if assignment.probability <= current.probability => {}
            _ => *slot = Some(assignment),
        }
    }

    winners
        .into_iter()
        .flatten()
        .map(|a| RepresentativeDoc {
            topic: a.dominant_topic,
            probability: a.probability,
            keywords: a.keywords.clone(),
            text: a.text.clone(),
        })
        .collect()
}

/// Quote a CSV field when it needs quoting
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write the representative table as CSV, atomically: the file appears
/// complete under its final name or not at all.
pub fn write_table(path: &Path, rows: &[RepresentativeDoc]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| TopicError::output(format!("no parent directory for {}", path.display())))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| {
        TopicError::output_io(format!("cannot create temp file in {}", parent.display()), e)
    })?;

    let mut body = String::new();
    body.push_str("Topic_Num,Topic_Perc_Contrib,Keywords,Representative Text\n");
    for row in rows {
        body.push_str(&format!(
            "{},{:.4},{},{}\n",
            row.topic,
            row.probability,
            csv_field(&row.keywords.join(", ")),
            csv_field(&row.text)
        ));
    }

    tmp.write_all(body.as_bytes())
        .map_err(|e| TopicError::output_io(format!("cannot write {}", path.display()), e))?;
    tmp.persist(path)
        .map_err(|e| TopicError::output_io(format!("cannot persist {}", path.display()), e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(chunk: usize, topic: usize, p: f64) -> TopicAssignment {
        TopicAssignment {
            chunk_index: chunk,
            dominant_topic: topic,
            probability: p,
            keywords: vec!["coffee".into(), "muffin".into()],
            text: format!("chunk {chunk}"),
        }
    }

    #[test]
    fn test_representative_picks_highest() {
        let rows = representative_docs(&[
            assignment(0, 1, 0.4),
            assignment(1, 1, 0.9),
            assignment(2, 0, 0.5),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].topic, 0);
        assert_eq!(rows[1].topic, 1);
        assert_eq!(rows[1].text, "chunk 1");
    }

    #[test]
    fn test_tie_keeps_earlier_chunk() {
        let rows = representative_docs(&[
            assignment(0, 3, 0.75),
            assignment(1, 3, 0.75),
            assignment(2, 3, 0.7499),
        ]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "chunk 0");
    }

    #[test]
    fn test_rows_ascending_and_unique() {
        let rows = representative_docs(&[
            assignment(0, 5, 0.5),
            assignment(1, 2, 0.5),
            assignment(2, 9, 0.5),
            assignment(3, 2, 0.4),
        ]);
        let topics: Vec<usize> = rows.iter().map(|r| r.topic).collect();
        assert_eq!(topics, vec![2, 5, 9]);
    }

    #[test]
    fn test_unrealized_topics_emit_no_row() {
        let rows = representative_docs(&[assignment(0, 7, 0.6)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].topic, 7);
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_table_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topics_test.csv");
        write_table(&path, &[assignment(0, 1, 0.5)].map(|a| RepresentativeDoc {
            topic: a.dominant_topic,
            probability: a.probability,
            keywords: a.keywords,
            text: a.text,
        }))
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Topic_Num,Topic_Perc_Contrib,Keywords,Representative Text"
        );
        assert_eq!(lines.next().unwrap(), "1,0.5000,\"coffee, muffin\",chunk 0");
    }

    #[test]
    fn test_write_table_bad_location() {
        let err = write_table(Path::new("/nonexistent-dir/x/topics.csv"), &[]);
        assert!(err.is_err());
    }
}
