//! Review records and their annotated forms.

use serde::{Deserialize, Serialize};

use super::{FuzzyMentions, MedicationDescriptor};

/// A single patient review as read from the dataset.
///
/// Immutable input: the pipeline annotates rows but never rewrites them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewRecord {
    /// Unique identifier, stable across the pipeline
    pub text_index: String,
    /// Raw medication label (e.g. "Humira (adalimumab) for Crohn's Disease, Maintenance")
    pub medication: Option<String>,
    /// Raw free-text comment
    pub comment: Option<String>,
    /// Patient rating, 1-10
    pub rate: u8,
}

/// A review annotated with everything the deterministic core derives from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotatedReview {
    /// The original record
    pub record: ReviewRecord,
    /// Fields parsed out of the medication label
    pub descriptor: MedicationDescriptor,
    /// Normalized comment tokens with self-referential terms removed
    pub comment_tokens: Vec<String>,
    /// Fuzzy treatment-mention annotations; `None` until the fuzzy phase
    /// runs, and for rows without an extractable treatment
    pub fuzzy: Option<FuzzyMentions>,
}

impl AnnotatedReview {
    /// Comment tokens rejoined into a single string.
    pub fn joined_comment(&self) -> String {
        self.comment_tokens.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_comment() {
        let review = AnnotatedReview {
            record: ReviewRecord {
                text_index: "1".into(),
                medication: None,
                comment: Some("worked well".into()),
                rate: 8,
            },
            descriptor: MedicationDescriptor::default(),
            comment_tokens: vec!["worked".into(), "well".into()],
            fuzzy: None,
        };

        assert_eq!(review.joined_comment(), "worked well");
    }
}
