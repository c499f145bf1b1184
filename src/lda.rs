//! Latent Dirichlet Allocation trainer
//!
//! Online variational Bayes over sparse bag-of-words documents, the
//! inference scheme the original modeling library uses. All sources of
//! randomness go through one seeded RNG, so a fit is reproducible given
//! the same corpus, vocabulary, and configuration — regardless of how
//! the caller schedules runs.

use crate::errors::{Result, TopicError};
use crate::vocab::{BowDocument, Vocabulary};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Convergence threshold for the per-document E-step
const GAMMA_THRESHOLD: f64 = 0.001;
/// Learning-rate decay for online updates
const DECAY: f64 = 0.5;
/// Learning-rate offset for online updates
const OFFSET: f64 = 1.0;

/// Hyperparameters for one LDA fit.
///
/// The defaults are the fixed values every pipeline run uses; only the
/// topic count varies by caller.
#[derive(Debug, Clone)]
pub struct LdaConfig {
    /// Number of latent topics
    pub num_topics: usize,
    /// Seed for the topic-word initialization
    pub random_seed: u64,
    /// Documents per online update batch
    pub chunksize: usize,
    /// Full passes over the corpus
    pub passes: usize,
    /// Per-document E-step iteration cap
    pub iterations: usize,
    /// Probability floor applied to reported document-topic entries
    pub minimum_probability: f64,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            num_topics: 15,
            random_seed: 100,
            chunksize: 10,
            passes: 10,
            iterations: 100,
            minimum_probability: 0.0,
        }
    }
}

impl LdaConfig {
    /// Set the topic count
    pub fn with_num_topics(mut self, num_topics: usize) -> Self {
        self.num_topics = num_topics;
        self
    }

    /// Set the initialization seed
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Reject unusable hyperparameters
    pub fn validate(&self) -> Result<()> {
        if self.num_topics == 0 {
            return Err(TopicError::invalid_config("num_topics must be positive"));
        }
        if self.chunksize == 0 || self.iterations == 0 {
            return Err(TopicError::invalid_config(
                "chunksize and iterations must be positive",
            ));
        }
        Ok(())
    }
}

/// A fitted topic model. Immutable after fitting; every accessor is a
/// read-only query.
#[derive(Debug, Clone)]
pub struct LdaModel {
    num_topics: usize,
    num_terms: usize,
    minimum_probability: f64,
    /// Variational topic-word parameters, `num_topics` x `num_terms`
    lambda: Vec<Vec<f64>>,
    /// Per-document topic distributions, one row of length `num_topics`
    /// per training document
    theta: Vec<Vec<f64>>,
}

impl LdaModel {
    /// Fit a model over the encoded corpus.
    ///
    /// Fails explicitly on a degenerate corpus: zero documents is an
    /// input error, zero vocabulary terms an empty-vocabulary error.
    /// Neither silently produces a meaningless model.
    pub fn fit(docs: &[BowDocument], vocab: &Vocabulary, config: &LdaConfig) -> Result<Self> {
        config.validate()?;
        if docs.is_empty() {
            return Err(TopicError::input("cannot fit a topic model on zero documents"));
        }
        if vocab.is_empty() {
            return Err(TopicError::empty_vocabulary(
                "every document's token stream is empty after filtering",
            ));
        }

        let k = config.num_topics;
        let v = vocab.len();
        let d = docs.len();
        let alpha = 1.0 / k as f64;
        let eta = 1.0 / k as f64;

        debug!(
            "Fitting LDA - docs={}, terms={}, topics={}, passes={}",
            d, v, k, config.passes
        );

        // Symmetric-breaking initialization around 1.0 from the seeded RNG
        let mut rng = StdRng::seed_from_u64(config.random_seed);
        let mut lambda: Vec<Vec<f64>> = (0..k)
            .map(|_| (0..v).map(|_| 1.0 + 0.1 * rng.gen::<f64>()).collect())
            .collect();

        let mut updates = 0usize;
        for pass in 0..config.passes {
            for chunk in docs.chunks(config.chunksize) {
                let elog_beta = dirichlet_expectation_rows(&lambda);
                let mut sstats = vec![vec![0.0; v]; k];
                for doc in chunk {
                    let (_, phi_contrib) =
                        e_step_doc(doc, &elog_beta, alpha, k, config.iterations);
                    for (w_idx, contrib) in phi_contrib {
                        for (topic, &c) in contrib.iter().enumerate() {
                            sstats[topic][w_idx as usize] += c;
                        }
                    }
                }
                // Online update: blend the batch estimate into lambda
                let rho = (OFFSET + updates as f64).powf(-DECAY);
                let scale = d as f64 / chunk.len() as f64;
                for topic in 0..k {
                    for term in 0..v {
                        let estimate = eta + scale * sstats[topic][term];
                        lambda[topic][term] = (1.0 - rho) * lambda[topic][term] + rho * estimate;
                    }
                }
                updates += 1;
            }
            debug!("LDA pass {}/{} complete", pass + 1, config.passes);
        }

        // Final inference pass: per-document distributions under the
        // fitted topics
        let elog_beta = dirichlet_expectation_rows(&lambda);
        let theta: Vec<Vec<f64>> = docs
            .iter()
            .map(|doc| {
                let (gamma, _) = e_step_doc(doc, &elog_beta, alpha, k, config.iterations);
                let total: f64 = gamma.iter().sum();
                gamma
                    .iter()
                    .map(|g| (g / total).max(config.minimum_probability))
                    .collect()
            })
            .collect();

        Ok(Self {
            num_topics: k,
            num_terms: v,
            minimum_probability: config.minimum_probability,
            lambda,
            theta,
        })
    }

    /// Number of topics
    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    /// Number of vocabulary terms
    pub fn num_terms(&self) -> usize {
        self.num_terms
    }

    /// The probability floor applied to reported distributions
    pub fn minimum_probability(&self) -> f64 {
        self.minimum_probability
    }

    /// The full topic distribution for one training document (length
    /// `num_topics`, entries ≥ the floor)
    pub fn doc_topics(&self, doc_idx: usize) -> &[f64] {
        &self.theta[doc_idx]
    }

    /// Number of training documents
    pub fn num_docs(&self) -> usize {
        self.theta.len()
    }

    /// The normalized word distribution for one topic (length
    /// `num_terms`)
    pub fn topic_term_dist(&self, topic: usize) -> Vec<f64> {
        let row = &self.lambda[topic];
        let total: f64 = row.iter().sum();
        row.iter().map(|x| x / total).collect()
    }

    /// The `n` highest-weight terms of a topic as (term id, probability),
    /// ordered by probability descending, ties broken by ascending id.
    pub fn top_terms(&self, topic: usize, n: usize) -> Vec<(u32, f64)> {
        let dist = self.topic_term_dist(topic);
        let mut pairs: Vec<(u32, f64)> = dist
            .into_iter()
            .enumerate()
            .map(|(id, p)| (id as u32, p))
            .collect();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        pairs.truncate(n);
        pairs
    }

    /// Per-word log likelihood of the training corpus under the fitted
    /// point estimates, in log base 2. More negative means a worse fit;
    /// `2^(-value)` is the conventional perplexity.
    pub fn log_perplexity(&self, docs: &[BowDocument]) -> f64 {
        let betas: Vec<Vec<f64>> = (0..self.num_topics)
            .map(|t| self.topic_term_dist(t))
            .collect();
        let mut log_likelihood = 0.0;
        let mut token_count = 0u64;
        for (d, doc) in docs.iter().enumerate() {
            let theta = &self.theta[d];
            for &(term, count) in doc {
                let p_w: f64 = (0..self.num_topics)
                    .map(|t| theta[t] * betas[t][term as usize])
                    .sum();
                log_likelihood += count as f64 * p_w.max(f64::MIN_POSITIVE).log2();
                token_count += count as u64;
            }
        }
        if token_count == 0 {
            return 0.0;
        }
        log_likelihood / token_count as f64
    }
}

/// One document's variational E-step. Returns the converged gamma and,
/// for each (term, count) entry, the per-topic expected count
/// contribution used by the M-step.
fn e_step_doc(
    doc: &BowDocument,
    elog_beta: &[Vec<f64>],
    alpha: f64,
    k: usize,
    max_iterations: usize,
) -> (Vec<f64>, Vec<(u32, Vec<f64>)>) {
    let mut gamma = vec![1.0; k];
    if doc.is_empty() {
        // Nothing to infer from; the prior is the posterior
        return (vec![alpha; k], Vec::new());
    }

    let mut elog_theta = dirichlet_expectation(&gamma);
    for _ in 0..max_iterations {
        let mut new_gamma = vec![alpha; k];
        for &(term, count) in doc {
            let w = term as usize;
            let mut phi = vec![0.0; k];
            let mut norm = 1e-100;
            for t in 0..k {
                phi[t] = (elog_theta[t] + elog_beta[t][w]).exp();
                norm += phi[t];
            }
            for t in 0..k {
                new_gamma[t] += count as f64 * phi[t] / norm;
            }
        }
        let delta: f64 = gamma
            .iter()
            .zip(&new_gamma)
            .map(|(a, b)| (a - b).abs())
            .sum::<f64>()
            / k as f64;
        gamma = new_gamma;
        elog_theta = dirichlet_expectation(&gamma);
        if delta < GAMMA_THRESHOLD {
            break;
        }
    }

    // Final responsibilities under the converged gamma
    let mut contribs = Vec::with_capacity(doc.len());
    for &(term, count) in doc {
        let w = term as usize;
        let mut phi = vec![0.0; k];
        let mut norm = 1e-100;
        for t in 0..k {
            phi[t] = (elog_theta[t] + elog_beta[t][w]).exp();
            norm += phi[t];
        }
        for p in phi.iter_mut() {
            *p = count as f64 * *p / norm;
        }
        contribs.push((term, phi));
    }
    (gamma, contribs)
}

/// E[log X] for each component of a Dirichlet-distributed row
fn dirichlet_expectation(row: &[f64]) -> Vec<f64> {
    let psi_total = digamma(row.iter().sum());
    row.iter().map(|&x| digamma(x) - psi_total).collect()
}

fn dirichlet_expectation_rows(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    rows.iter().map(|r| dirichlet_expectation(r)).collect()
}

/// Digamma via the asymptotic expansion, shifted into its stable range
fn digamma(x: f64) -> f64 {
    let mut x = x;
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    result + x.ln() - 0.5 * inv
        - inv2 * (1.0 / 12.0 - inv2 * (1.0 / 120.0 - inv2 / 252.0))
}
