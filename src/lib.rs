//! # transcript_topics
//!
//! Latent-topic discovery over dialogue transcripts with LDA.
//!
//! The crate turns a directory of episode scripts into, per run target
//! (the full corpus and each named speaker), a representative-document
//! table and a topic-visualization artifact. The pipeline:
//!
//! 1. normalize the raw script (strip stage directions, lowercase,
//!    split into utterances, apply the corpus stop-list)
//! 2. group utterances into fixed-size chunks — the model's documents
//! 3. learn bigram/trigram collocations and merge them into tokens
//! 4. lemmatize and keep a single part of speech
//! 5. build a vocabulary and encode chunks as bags of words
//! 6. fit an LDA model with fixed, seeded hyperparameters
//! 7. report perplexity and coherence, extract the most representative
//!    chunk per topic
//!
//! Every stage is deterministic: the same input and configuration
//! produce byte-identical outputs.

pub mod chunk;
pub mod errors;
pub mod eval;
pub mod lda;
pub mod nlp;
pub mod normalize;
pub mod phrase;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod viz;
pub mod vocab;

// Re-export commonly used types
pub use errors::{Result, TopicError};
pub use types::{PosTag, RunParams, Token};

pub use lda::{LdaConfig, LdaModel};
pub use nlp::{Lemmatizer, RuleLemmatizer, StopwordFilter};
pub use normalize::{normalize_script, strip_stage_directions, TokenFilter};
pub use phrase::{PhraseConfig, PhraseModel};
pub use pipeline::{
    default_targets, run_batch, run_pipeline, BatchReport, PipelineContext, PipelineRun,
    RunTarget,
};
pub use report::{dominant_topics, representative_docs, RepresentativeDoc, TopicAssignment};
pub use vocab::{BowDocument, Vocabulary};
