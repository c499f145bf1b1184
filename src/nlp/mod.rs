//! Linguistic processing: tokenization, stopwords, lemmatization and
//! part-of-speech tagging

pub mod annotator;
pub mod stopwords;
pub mod tokenizer;

pub use annotator::{Lemmatizer, RuleLemmatizer};
pub use stopwords::StopwordFilter;
pub use tokenizer::tokenize;
