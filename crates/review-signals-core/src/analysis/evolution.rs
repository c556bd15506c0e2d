//! Fuzzy treatment-change detection.
//!
//! Scans each comment for fuzzy mentions of treatments known to the corpus,
//! subtracts the row's own treatment, and maps the rating to an ordinal
//! change-direction score. Rows without an extractable treatment are
//! excluded here and only here.

use strsim::normalized_levenshtein;

use crate::models::{AnnotatedReview, FuzzyMentions, TreatmentChangeEvent};

/// Distinct treatments observed in the filtered dataset.
///
/// Built once per run, before any row scanning begins; read-only
/// afterwards. Order is first observation, so scans are deterministic.
#[derive(Debug, Clone, Default)]
pub struct TreatmentVocabulary {
    treatments: Vec<String>,
}

impl TreatmentVocabulary {
    /// Collect the distinct non-null treatments from annotated rows.
    pub fn from_rows(rows: &[AnnotatedReview]) -> Self {
        let mut treatments: Vec<String> = Vec::new();
        for row in rows {
            if let Some(treatment) = row.descriptor.treatment.as_deref() {
                if !treatment.is_empty() && !treatments.iter().any(|t| t == treatment) {
                    treatments.push(treatment.to_string());
                }
            }
        }
        Self { treatments }
    }

    /// The known treatments, in first-observed order.
    pub fn treatments(&self) -> &[String] {
        &self.treatments
    }

    pub fn len(&self) -> usize {
        self.treatments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treatments.is_empty()
    }
}

/// Fuzzy similarity as an integer percentage, case-insensitive.
pub fn similarity(a: &str, b: &str) -> u32 {
    let score = normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase());
    (score * 100.0).round() as u32
}

/// Map a 1-10 rating to an ordinal change-direction score.
///
/// Ratings above the documented band fall into the top bucket.
pub fn change_score(rate: u8) -> i8 {
    match rate {
        1..=2 => -2,
        3..=4 => -1,
        5 => 0,
        6..=7 => 1,
        _ => 2,
    }
}

/// Detector for treatment changes evidenced in comments.
pub struct ChangeDetector<'a> {
    vocabulary: &'a TreatmentVocabulary,
    /// Minimum similarity percentage for a word to count as a mention
    threshold: u32,
}

impl<'a> ChangeDetector<'a> {
    /// Create a detector over a fully-built vocabulary.
    pub fn new(vocabulary: &'a TreatmentVocabulary, threshold: u32) -> Self {
        Self {
            vocabulary,
            threshold,
        }
    }

    /// Vocabulary treatments fuzzy-mentioned in a comment.
    ///
    /// A treatment is recorded at most once per comment: scanning its words
    /// stops at the first hit.
    pub fn mentions_in(&self, comment: &str) -> Vec<String> {
        let words: Vec<&str> = comment.split_whitespace().collect();
        let mut mentioned = Vec::new();

        for treatment in self.vocabulary.treatments() {
            for word in &words {
                if similarity(treatment, word) >= self.threshold {
                    mentioned.push(treatment.clone());
                    break;
                }
            }
        }
        mentioned
    }

    /// Analyze one row: mentions, delta and score.
    ///
    /// The score is `None` exactly when the delta is empty; no evidence of
    /// a change means no score regardless of the rating.
    pub fn analyze(&self, treatment: &str, comment: Option<&str>, rate: u8) -> FuzzyMentions {
        let treatments_in_comment = comment.map(|c| self.mentions_in(c)).unwrap_or_default();

        let delta_treatment: Vec<String> = treatments_in_comment
            .iter()
            .filter(|mention| mention.as_str() != treatment)
            .cloned()
            .collect();

        let change_score = if delta_treatment.is_empty() {
            None
        } else {
            Some(change_score(rate))
        };

        FuzzyMentions {
            treatments_in_comment,
            delta_treatment,
            change_score,
        }
    }

    /// Explode a row's delta into one event per previous treatment.
    pub fn events_for(&self, text_index: &str, mentions: &FuzzyMentions) -> Vec<TreatmentChangeEvent> {
        let Some(score) = mentions.change_score else {
            return Vec::new();
        };

        mentions
            .delta_treatment
            .iter()
            .map(|previous| TreatmentChangeEvent {
                text_index: text_index.to_string(),
                previous_treatment: previous.clone(),
                change_score: score,
            })
            .collect()
    }
}
