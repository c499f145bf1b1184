//! Visualization export
//!
//! Writes one self-contained HTML file per run embedding the prepared
//! topic-exploration data as JSON: per-topic term weights, corpus-wide
//! topic proportions, and the per-chunk dominant-topic table. The
//! interactive rendering itself is a consumer concern; this module only
//! guarantees the artifact exists, is deterministic, and is complete
//! under its final name or absent.

use crate::errors::{Result, TopicError};
use crate::lda::LdaModel;
use crate::report::TopicAssignment;
use crate::vocab::Vocabulary;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Terms exported per topic
const TERMS_PER_TOPIC: usize = 30;

#[derive(Debug, Serialize)]
struct VizTerm {
    term: String,
    weight: f64,
}

#[derive(Debug, Serialize)]
struct VizTopic {
    id: usize,
    /// Share of the corpus's probability mass on this topic
    proportion: f64,
    terms: Vec<VizTerm>,
}

#[derive(Debug, Serialize)]
struct VizDoc {
    index: usize,
    dominant_topic: usize,
    probability: f64,
}

#[derive(Debug, Serialize)]
struct VizBundle {
    name: String,
    num_topics: usize,
    num_terms: usize,
    num_docs: usize,
    topics: Vec<VizTopic>,
    docs: Vec<VizDoc>,
}

fn build_bundle(
    name: &str,
    model: &LdaModel,
    vocab: &Vocabulary,
    assignments: &[TopicAssignment],
) -> VizBundle {
    let num_docs = model.num_docs();

    // Mean document-topic mass per topic
    let mut proportions = vec![0.0; model.num_topics()];
    for d in 0..num_docs {
        for (t, &p) in model.doc_topics(d).iter().enumerate() {
            proportions[t] += p;
        }
    }
    for p in proportions.iter_mut() {
        *p /= num_docs.max(1) as f64;
    }

    let topics = (0..model.num_topics())
        .map(|t| VizTopic {
            id: t,
            proportion: proportions[t],
            terms: model
                .top_terms(t, TERMS_PER_TOPIC)
                .into_iter()
                .filter_map(|(id, weight)| {
                    vocab.token(id).map(|term| VizTerm {
                        term: term.to_string(),
                        weight,
                    })
                })
                .collect(),
        })
        .collect();

    let docs = assignments
        .iter()
        .map(|a| VizDoc {
            index: a.chunk_index,
            dominant_topic: a.dominant_topic,
            probability: a.probability,
        })
        .collect();

    VizBundle {
        name: name.to_string(),
        num_topics: model.num_topics(),
        num_terms: model.num_terms(),
        num_docs,
        topics,
        docs,
    }
}

/// Render the HTML shell around the embedded data
fn render_html(bundle: &VizBundle, payload: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>Topics — {}</title>\n", bundle.name));
    html.push_str("<style>body{font-family:sans-serif;margin:2em}table{border-collapse:collapse}td,th{border:1px solid #999;padding:4px 8px}</style>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<h1>Topic model: {} ({} topics, {} documents)</h1>\n",
        bundle.name, bundle.num_topics, bundle.num_docs
    ));
    html.push_str("<div id=\"topics\"></div>\n");
    html.push_str("<script id=\"topic-data\" type=\"application/json\">\n");
    html.push_str(payload);
    html.push_str("\n</script>\n<script>\n");
    html.push_str(concat!(
        "const data = JSON.parse(document.getElementById('topic-data').textContent);\n",
        "const root = document.getElementById('topics');\n",
        "for (const topic of data.topics) {\n",
        "  const h = document.createElement('h2');\n",
        "  h.textContent = `Topic ${topic.id} — ${(topic.proportion * 100).toFixed(1)}%`;\n",
        "  root.appendChild(h);\n",
        "  const p = document.createElement('p');\n",
        "  p.textContent = topic.terms.slice(0, 10).map(t => t.term).join(', ');\n",
        "  root.appendChild(p);\n",
        "}\n",
    ));
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

/// Write the visualization artifact for one run
pub fn write_visualization(
    path: &Path,
    name: &str,
    model: &LdaModel,
    vocab: &Vocabulary,
    assignments: &[TopicAssignment],
) -> Result<()> {
    let bundle = build_bundle(name, model, vocab, assignments);
    let payload = serde_json::to_string_pretty(&bundle)
        .map_err(|e| TopicError::output(format!("cannot serialize viz data: {e}")))?;
    let html = render_html(&bundle, &payload);

    let parent = path
        .parent()
        .ok_or_else(|| TopicError::output(format!("no parent directory for {}", path.display())))?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| {
        TopicError::output_io(format!("cannot create temp file in {}", parent.display()), e)
    })?;
    tmp.write_all(html.as_bytes())
        .map_err(|e| TopicError::output_io(format!("cannot write {}", path.display()), e))?;
    tmp.persist(path)
        .map_err(|e| TopicError::output_io(format!("cannot persist {}", path.display()), e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lda::LdaConfig;
    use crate::report::dominant_topics;

    fn fitted() -> (LdaModel, Vocabulary, Vec<String>) {
        let streams: Vec<Vec<String>> = vec![
            vec!["coffee".into(), "muffin".into()],
            vec!["dinosaur".into(), "museum".into()],
            vec!["coffee".into(), "espresso".into()],
        ];
        let vocab = Vocabulary::build(&streams);
        let docs = vocab.encode_all(&streams);
        let model =
            LdaModel::fit(&docs, &vocab, &LdaConfig::default().with_num_topics(2)).unwrap();
        let chunks: Vec<String> = streams.iter().map(|s| s.join(" ")).collect();
        (model, vocab, chunks)
    }

    #[test]
    fn test_bundle_shape() {
        let (model, vocab, chunks) = fitted();
        let assignments = dominant_topics(&model, &chunks, &vocab);
        let bundle = build_bundle("full", &model, &vocab, &assignments);
        assert_eq!(bundle.num_topics, 2);
        assert_eq!(bundle.topics.len(), 2);
        assert_eq!(bundle.docs.len(), 3);
        let total: f64 = bundle.topics.iter().map(|t| t.proportion).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_written_file_embeds_data() {
        let (model, vocab, chunks) = fitted();
        let assignments = dominant_topics(&model, &chunks, &vocab);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full_vis.html");
        write_visualization(&path, "full", &model, &vocab, &assignments).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("application/json"));
        assert!(contents.contains("\"num_topics\": 2"));
        assert!(contents.contains("coffee"));
    }
}
