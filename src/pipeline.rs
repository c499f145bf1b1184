//! The topic-modeling pipeline and its run driver
//!
//! One parameterized invocation covers what used to be near-identical
//! per-speaker driver blocks: a run target names its utterance filter,
//! chunk size, and output files; the pipeline itself is identical for
//! every target. Targets run sequentially and share no mutable state —
//! each builds its own vocabulary, encoded corpus, and model.

use crate::chunk;
use crate::errors::{Result, TopicError};
use crate::eval::{self, CoherenceConfig};
use crate::lda::{LdaConfig, LdaModel};
use crate::nlp::annotator::lexical_filter;
use crate::nlp::{tokenize, Lemmatizer, RuleLemmatizer, StopwordFilter};
use crate::normalize::TokenFilter;
use crate::phrase::{PhraseConfig, PhraseModel};
use crate::report::{self, RepresentativeDoc, TopicAssignment};
use crate::types::RunParams;
use crate::viz;
use crate::vocab::Vocabulary;
use rayon::prelude::*;
use std::path::Path;
use tracing::{info, warn};

/// Chunk size for the full-corpus run
const FULL_CHUNK_SIZE: usize = 40;
/// Chunk size for per-speaker runs
const SPEAKER_CHUNK_SIZE: usize = 30;

/// The speakers modeled individually by the default batch
const DEFAULT_SPEAKERS: &[&str] = &["chandler", "monica", "ross", "rachel", "phoebe", "joey"];

/// Explicitly constructed shared machinery for a batch of runs: the
/// annotation model, stopword table, and corpus stop-list. Everything a
/// run touches is either here or derived inside the run.
pub struct PipelineContext {
    pub lemmatizer: Box<dyn Lemmatizer>,
    pub stopwords: StopwordFilter,
    pub token_filter: TokenFilter,
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineContext {
    /// Context with the built-in rule lemmatizer and default tables
    pub fn new() -> Self {
        Self {
            lemmatizer: Box::new(RuleLemmatizer::new()),
            stopwords: StopwordFilter::english(),
            token_filter: TokenFilter::default(),
        }
    }

    /// Substitute the annotation capability
    pub fn with_lemmatizer(mut self, lemmatizer: Box<dyn Lemmatizer>) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    /// Substitute the corpus stop-list
    pub fn with_token_filter(mut self, token_filter: TokenFilter) -> Self {
        self.token_filter = token_filter;
        self
    }
}

/// One run target: which utterances, how large the chunks, what the
/// outputs are called
#[derive(Debug, Clone)]
pub struct RunTarget {
    /// Name used for output files and log lines
    pub name: String,
    /// Retain only this speaker's lines when set
    pub speaker: Option<String>,
    /// Utterances per chunk
    pub chunk_size: usize,
}

impl RunTarget {
    /// The whole-corpus target
    pub fn full() -> Self {
        Self {
            name: "full".to_string(),
            speaker: None,
            chunk_size: FULL_CHUNK_SIZE,
        }
    }

    /// A single-speaker target
    pub fn speaker(name: &str) -> Self {
        Self {
            name: name.to_string(),
            speaker: Some(name.to_string()),
            chunk_size: SPEAKER_CHUNK_SIZE,
        }
    }
}

/// The default batch: the full corpus, then each named speaker
pub fn default_targets() -> Vec<RunTarget> {
    let mut targets = vec![RunTarget::full()];
    targets.extend(DEFAULT_SPEAKERS.iter().map(|s| RunTarget::speaker(s)));
    targets
}

/// Everything a completed run produces, before anything is written out
#[derive(Debug)]
pub struct PipelineRun {
    pub target: RunTarget,
    pub chunks: Vec<String>,
    pub token_streams: Vec<Vec<String>>,
    pub vocab: Vocabulary,
    pub model: LdaModel,
    pub assignments: Vec<TopicAssignment>,
    pub table: Vec<RepresentativeDoc>,
    pub log_perplexity: f64,
    pub coherence: f64,
}

/// Run the pipeline once for one target over the normalized utterances.
///
/// Stages: speaker filter → stop-list filter → chunking → phrase
/// detection (bigram, then trigram over the bigram rewrite) → lexical
/// filter → encoding → LDA fit → diagnostics → representative table.
pub fn run_pipeline(
    ctx: &PipelineContext,
    utterances: &[String],
    target: &RunTarget,
    params: &RunParams,
) -> Result<PipelineRun> {
    params.validate()?;

    let selected = match &target.speaker {
        Some(speaker) => chunk::filter_speaker(utterances, speaker),
        None => utterances.to_vec(),
    };
    let cleaned = ctx.token_filter.filter_lines(&selected);

    if cleaned.iter().all(|u| u.trim().is_empty()) {
        return Err(TopicError::input(format!(
            "run target '{}': no dialogue left after normalization and filtering",
            target.name
        )));
    }

    let chunks = chunk::chunk_utterances(&cleaned, target.chunk_size)?;
    info!(
        "Target '{}' - {} utterances in {} chunks",
        target.name,
        cleaned.len(),
        chunks.len()
    );

    let tokenized: Vec<Vec<String>> = chunks.iter().map(|c| tokenize(c)).collect();

    let phrase_config = PhraseConfig::default().with_threshold(params.phrase_threshold);
    let bigram = PhraseModel::fit(&tokenized, &phrase_config);
    let bigram_corpus = bigram.transform_corpus(&tokenized);
    let trigram = PhraseModel::fit(&bigram_corpus, &phrase_config);
    let trigram_corpus = trigram.transform_corpus(&bigram_corpus);
    info!(
        "Target '{}' - {} bigram and {} trigram collocations",
        target.name,
        bigram.num_phrases(),
        trigram.num_phrases()
    );

    // Order-preserving parallel map; annotation dominates run time
    let token_streams: Vec<Vec<String>> = trigram_corpus
        .par_iter()
        .map(|tokens| lexical_filter(tokens, ctx.lemmatizer.as_ref(), &ctx.stopwords, params.allowed_pos))
        .collect();

    let vocab = Vocabulary::build(&token_streams);
    if vocab.is_empty() {
        return Err(TopicError::empty_vocabulary(format!(
            "run target '{}': no {} lemmas survive the lexical filter",
            target.name,
            params.allowed_pos.as_str()
        )));
    }
    let docs = vocab.encode_all(&token_streams);

    let lda_config = LdaConfig::default().with_num_topics(params.num_topics);
    let model = LdaModel::fit(&docs, &vocab, &lda_config)?;

    let log_perplexity = eval::log_perplexity(&model, &docs);
    let coherence =
        eval::topic_coherence(&model, &token_streams, &vocab, &CoherenceConfig::default());

    let assignments = report::dominant_topics(&model, &chunks, &vocab);
    let table = report::representative_docs(&assignments);

    Ok(PipelineRun {
        target: target.clone(),
        chunks,
        token_streams,
        vocab,
        model,
        assignments,
        table,
        log_perplexity,
        coherence,
    })
}

/// Write a completed run's durable outputs: the representative table
/// and the visualization artifact.
pub fn write_outputs(run: &PipelineRun, out_dir: &Path) -> Result<()> {
    let csv_path = out_dir.join(format!("topics_{}.csv", run.target.name));
    report::write_table(&csv_path, &run.table)?;
    let vis_path = out_dir.join(format!("{}_vis.html", run.target.name));
    viz::write_visualization(
        &vis_path,
        &run.target.name,
        &run.model,
        &run.vocab,
        &run.assignments,
    )?;
    Ok(())
}

/// Outcome of a multi-target batch
pub struct BatchReport {
    pub completed: Vec<String>,
    pub failed: Vec<(String, TopicError)>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run every target in order. Fail-fast by default; with `keep_going`
/// a target's failure is reported and the batch moves on.
pub fn run_batch(
    ctx: &PipelineContext,
    utterances: &[String],
    targets: &[RunTarget],
    params: &RunParams,
    out_dir: &Path,
    keep_going: bool,
) -> Result<BatchReport> {
    std::fs::create_dir_all(out_dir).map_err(|e| {
        TopicError::output_io(format!("cannot create output dir {}", out_dir.display()), e)
    })?;

    let mut report = BatchReport {
        completed: Vec::new(),
        failed: Vec::new(),
    };

    for target in targets {
        info!("Running '{}' model ...", target.name);
        let outcome = run_pipeline(ctx, utterances, target, params)
            .and_then(|run| write_outputs(&run, out_dir).map(|()| run));
        match outcome {
            Ok(run) => {
                info!(
                    "Target '{}' - perplexity={:.4}, coherence={:.4}, {} table rows",
                    target.name,
                    run.log_perplexity,
                    run.coherence,
                    run.table.len()
                );
                report.completed.push(target.name.clone());
            }
            Err(err) if keep_going => {
                warn!("Target '{}' failed: {}", target.name, err);
                report.failed.push((target.name.clone(), err));
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}
