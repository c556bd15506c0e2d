//! Curated marker detection in normalized comments.
//!
//! Marker phrases and comments are reduced with the same normalize-then-stem
//! treatment, then a marker counts as present when one of its stemmed
//! phrases occurs as a contiguous token run inside the stemmed comment.
//! Detection builds the wide row-by-marker flag matrix first and melts it
//! into the sparse long event table, keeping positives only.

use crate::models::{AnnotatedReview, MarkerEvent};
use crate::text::{Stemmer, TextNormalizer};

/// A marker with its phrases normalized and stemmed for matching.
#[derive(Debug, Clone)]
pub struct CompiledMarker {
    /// Marker label as configured
    pub label: String,
    /// Stemmed token sequences, one per keyword phrase
    pub phrases: Vec<Vec<String>>,
}

/// A topic with all of its markers compiled.
#[derive(Debug, Clone)]
pub struct CompiledTopic {
    /// Topic name as configured
    pub topic: String,
    /// Disease the topic is bound to; rows with any other disease are
    /// skipped for this topic
    pub disease: String,
    pub markers: Vec<CompiledMarker>,
}

/// Matcher applying a compiled marker dictionary to annotated reviews.
pub struct MarkerMatcher<'a> {
    normalizer: &'a TextNormalizer,
    stemmer: Stemmer,
}

impl<'a> MarkerMatcher<'a> {
    /// Create a matcher sharing the pipeline's normalizer.
    pub fn new(normalizer: &'a TextNormalizer) -> Self {
        Self {
            normalizer,
            stemmer: Stemmer::new(),
        }
    }

    /// Compile one topic's marker dictionary.
    ///
    /// Phrases that normalize to nothing (all stop words or punctuation)
    /// are dropped; they could never match a comment.
    pub fn compile_topic<I>(&self, topic: &str, disease: &str, markers: I) -> CompiledTopic
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let markers = markers
            .into_iter()
            .map(|(label, phrases)| CompiledMarker {
                label,
                phrases: phrases
                    .iter()
                    .map(|phrase| {
                        let tokens = self.normalizer.normalize(Some(phrase));
                        self.stemmer.stem_tokens(&tokens)
                    })
                    .filter(|stemmed| !stemmed.is_empty())
                    .collect(),
            })
            .collect();

        CompiledTopic {
            topic: topic.to_string(),
            disease: disease.to_string(),
            markers,
        }
    }

    /// Stem a row's normalized comment tokens for matching.
    pub fn stem_comment(&self, tokens: &[String]) -> Vec<String> {
        self.stemmer.stem_tokens(tokens)
    }

    /// Detect a topic's markers across all rows.
    ///
    /// Returns one event per positive (row, marker) flag, melted
    /// marker-major like the wide-to-long reshape it implements.
    pub fn match_topic(&self, rows: &[AnnotatedReview], topic: &CompiledTopic) -> Vec<MarkerEvent> {
        let cohort: Vec<&AnnotatedReview> = rows
            .iter()
            .filter(|row| row.descriptor.disease.as_deref() == Some(topic.disease.as_str()))
            .collect();

        let stemmed_comments: Vec<Vec<String>> = cohort
            .iter()
            .map(|row| self.stem_comment(&row.comment_tokens))
            .collect();

        // Wide flag matrix: rows x markers.
        let flags: Vec<Vec<bool>> = stemmed_comments
            .iter()
            .map(|comment| {
                topic
                    .markers
                    .iter()
                    .map(|marker| {
                        marker
                            .phrases
                            .iter()
                            .any(|phrase| contains_run(comment, phrase))
                    })
                    .collect()
            })
            .collect();

        // Melt to long form, positives only.
        let mut events = Vec::new();
        for (marker_idx, marker) in topic.markers.iter().enumerate() {
            for (row_idx, row) in cohort.iter().enumerate() {
                if flags[row_idx][marker_idx] {
                    events.push(MarkerEvent {
                        text_index: row.record.text_index.clone(),
                        marker: marker.label.clone(),
                        topic: topic.topic.clone(),
                    });
                }
            }
        }
        events
    }
}

/// Whether `needle` occurs as a contiguous run inside `haystack`.
fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty()
        && haystack.len() >= needle.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}
