//! Tabular export.
//!
//! One logical table per analytic: field-annotated reviews, marker events
//! and treatment-change events. Tables are written as CSV for the external
//! persistence layer; marker events additionally split into one file per
//! topic, named after the topic's disease.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AnnotatedReview, MarkerEvent, TreatmentChangeEvent};

/// Export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Flat row of the annotated-reviews table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedReviewRow {
    pub text_index: String,
    pub medication: Option<String>,
    pub comment: Option<String>,
    pub rate: u8,
    pub treatment: Option<String>,
    pub disease: Option<String>,
    pub antibody: Option<String>,
    pub treatment_type: Option<String>,
    /// Post-exclusion comment tokens, space-joined
    pub processed_comment: String,
    /// Fuzzy-mentioned treatments, comma-joined
    pub fuzzy_treatments_in_comment: String,
    /// Delta treatments, comma-joined
    pub fuzzy_delta_treatment: String,
    pub fuzzy_treatment_change_score: Option<i8>,
}

impl From<&AnnotatedReview> for AnnotatedReviewRow {
    fn from(review: &AnnotatedReview) -> Self {
        let fuzzy = review.fuzzy.as_ref();
        Self {
            text_index: review.record.text_index.clone(),
            medication: review.record.medication.clone(),
            comment: review.record.comment.clone(),
            rate: review.record.rate,
            treatment: review.descriptor.treatment.clone(),
            disease: review.descriptor.disease.clone(),
            antibody: review.descriptor.antibody.clone(),
            treatment_type: review
                .descriptor
                .treatment_type
                .map(|t| t.as_label().to_string()),
            processed_comment: review.joined_comment(),
            fuzzy_treatments_in_comment: fuzzy
                .map(|f| f.treatments_in_comment.join(", "))
                .unwrap_or_default(),
            fuzzy_delta_treatment: fuzzy
                .map(|f| f.delta_treatment.join(", "))
                .unwrap_or_default(),
            fuzzy_treatment_change_score: fuzzy.and_then(|f| f.change_score),
        }
    }
}

/// Write the annotated-reviews table.
///
/// Headers are written explicitly so an empty table still has a schema.
pub fn write_annotated_reviews<W: Write>(
    writer: W,
    reviews: &[AnnotatedReview],
) -> ExportResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record([
        "text_index",
        "medication",
        "comment",
        "rate",
        "treatment",
        "disease",
        "antibody",
        "treatment_type",
        "processed_comment",
        "fuzzy_treatments_in_comment",
        "fuzzy_delta_treatment",
        "fuzzy_treatment_change_score",
    ])?;
    for review in reviews {
        csv_writer.serialize(AnnotatedReviewRow::from(review))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a marker-event table.
pub fn write_marker_events<W: Write>(writer: W, events: &[MarkerEvent]) -> ExportResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(["text_index", "marker", "topic"])?;
    for event in events {
        csv_writer.serialize(event)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the treatment-change event table.
pub fn write_treatment_changes<W: Write>(
    writer: W,
    events: &[TreatmentChangeEvent],
) -> ExportResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(["text_index", "previous_treatment", "change_score"])?;
    for event in events {
        csv_writer.serialize(event)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// File name for one topic's marker table.
pub fn marker_table_path(dir: &Path, disease: &str, topic: &str) -> PathBuf {
    dir.join(format!("markers_{disease}_{topic}.csv"))
}

/// Create a file and hand it to one of the table writers.
pub fn create_output_file(path: &Path) -> ExportResult<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}
