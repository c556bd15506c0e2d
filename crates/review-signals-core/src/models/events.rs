//! Event rows emitted by the marker and treatment-change analytics.

use serde::{Deserialize, Serialize};

/// A positive marker detection for one review.
///
/// Sparse representation: a missing row means "not detected", never
/// "unknown".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkerEvent {
    /// Identifier of the review the marker was found in
    pub text_index: String,
    /// Marker label from the marker dictionary
    pub marker: String,
    /// Topic the marker belongs to
    pub topic: String,
}

/// Per-review fuzzy treatment-mention annotations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuzzyMentions {
    /// Vocabulary treatments fuzzy-matched against words in the comment
    pub treatments_in_comment: Vec<String>,
    /// Mentioned treatments minus the row's own treatment
    pub delta_treatment: Vec<String>,
    /// Ordinal change-direction score; `None` exactly when the delta is empty
    pub change_score: Option<i8>,
}

/// One exploded treatment-change observation.
///
/// A review whose delta holds several treatments produces one event per
/// delta element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentChangeEvent {
    /// Identifier of the review the change was observed in
    pub text_index: String,
    /// A treatment from the row's delta
    pub previous_treatment: String,
    /// Change-direction score derived from the rating
    pub change_score: i8,
}
