//! Text normalization for raw transcript scripts
//!
//! Turns the concatenated episode scripts into an ordered list of
//! utterances: stage directions removed, everything lowercased, one
//! utterance per line. Stop-list filtering is a separate operation
//! ([`TokenFilter`]) because per-speaker runs filter by the literal
//! `speaker:` prefix first and strip the tag tokens afterwards.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Matches a parenthesized or bracketed stage-direction span. Non-greedy,
/// does not cross line breaks, tolerates mixed delimiters the way the
/// source transcripts mix them.
fn direction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[(\[].*?[)\]]").expect("static regex"))
}

/// Remove stage-direction spans from conversational text.
///
/// The extracted direction text is discarded; only the dialogue remains.
/// Idempotent: a second application finds nothing left to remove.
pub fn strip_stage_directions(text: &str) -> String {
    direction_re().replace_all(text, "").into_owned()
}

/// Normalize a full script into utterances: strip stage directions,
/// lowercase, split on line breaks. Utterance count and order mirror the
/// input lines; empty lines are kept as empty utterances.
pub fn normalize_script(text: &str) -> Vec<String> {
    strip_stage_directions(text)
        .to_lowercase()
        .split('\n')
        .map(|line| line.to_string())
        .collect()
}

/// An exact-match token stop-list applied to utterances.
///
/// The default list carries the original corpus's accreted members —
/// speaker-tag tokens plus high-frequency filler words with their
/// punctuation variants. Membership is configuration, not contract;
/// construct with [`TokenFilter::new`] to substitute a different table.
#[derive(Debug, Clone)]
pub struct TokenFilter {
    words: FxHashSet<String>,
}

impl Default for TokenFilter {
    fn default() -> Self {
        let words = [
            "guy",
            "chandler:",
            "monica:",
            "ross:",
            "joey:",
            "phoebe:",
            "rachel:",
            "guys?",
            "guys?!",
            "guys,",
            "guy's",
            "guys'd",
            "guy!\"",
            "guys",
            "guy'",
            "guys'",
            "guys...",
            "guys.",
            "good",
            "better",
            "best",
            "guys!",
            "guy.",
            "guy!",
            "guy?",
            "guy?\"",
            "guy..?",
            "guy,",
            "thing",
            "things",
            "thing.",
            "things.",
            "thing!",
        ];
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl TokenFilter {
    /// Build a filter from an explicit word table
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a whitespace token is on the stop-list
    pub fn is_filtered(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Drop stop-list tokens from one utterance by whitespace
    /// tokenization, then rejoin. An utterance reduced to nothing comes
    /// back as the empty string rather than being dropped.
    pub fn filter_line(&self, line: &str) -> String {
        line.split_whitespace()
            .filter(|tok| !self.is_filtered(tok))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Apply [`filter_line`](TokenFilter::filter_line) to every utterance,
    /// preserving count and order.
    pub fn filter_lines(&self, lines: &[String]) -> Vec<String> {
        lines.iter().map(|l| self.filter_line(l)).collect()
    }
}
