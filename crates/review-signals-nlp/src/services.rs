//! Service seams for model-backed NLP collaborators.
//!
//! Implementations live outside the deterministic core (a model server,
//! local bindings, a mock). Whether a failing service skips the row or
//! aborts the run is the caller's policy; the core only guarantees the
//! failure stays scoped to that row's service-dependent fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// NLP service errors.
#[derive(Error, Debug)]
pub enum NlpError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("invalid response format: {0}")]
    InvalidFormat(String),

    #[error("service failure: {0}")]
    Service(String),
}

pub type NlpResult<T> = Result<T, NlpError>;

/// A phrase with its extraction score, highest ranked first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedPhrase {
    pub phrase: String,
    pub score: f64,
}

/// One category assignment from zero-shot classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
}

/// Sentiment polarity labels as produced by transformer classifiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SentimentLabel {
    Negative,
    Positive,
}

impl SentimentLabel {
    /// Map a classifier's textual label; anything but NEGATIVE reads as
    /// positive.
    pub fn from_classifier(label: &str) -> Self {
        if label.eq_ignore_ascii_case("negative") {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Positive
        }
    }

    /// Binary encoding used in the output tables: NEGATIVE → 0, else 1.
    pub fn as_binary(&self) -> u8 {
        match self {
            SentimentLabel::Negative => 0,
            SentimentLabel::Positive => 1,
        }
    }
}

/// A sentiment assignment with the classifier's confidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

/// Ranked key-phrase extraction from raw text.
pub trait PhraseExtractor {
    fn extract(&self, text: &str) -> NlpResult<Vec<RankedPhrase>>;
}

/// Zero-shot classification of a phrase against candidate labels.
pub trait TopicClassifier {
    fn classify(&self, text: &str, labels: &[String]) -> NlpResult<Vec<CategoryScore>>;
}

/// Sentiment scoring of a phrase.
pub trait SentimentScorer {
    fn score(&self, text: &str) -> NlpResult<Sentiment>;
}

/// Lexical similarity between a keyword and a topic term.
pub trait TermSimilarity {
    fn similarity(&self, a: &str, b: &str) -> NlpResult<f64>;
}
