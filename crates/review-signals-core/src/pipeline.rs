//! Pipeline orchestration.
//!
//! Phases, in order:
//!
//! 1. annotate: parse the medication label, apply the cohort filter,
//!    normalize the comment and strip the row's own terms (row-parallel)
//! 2. barrier: build the treatment vocabulary and compile the marker
//!    dictionary; both must be complete before any row scan starts
//! 3. scan: fuzzy treatment mentions and marker detection (row-parallel)
//!
//! Every per-row operation is a pure function of the row plus the shared
//! read-only configuration, so workers never lock, and output is identical
//! for any batch split.

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::{
    ChangeDetector, CohortFilter, CompiledTopic, ExclusionSet, MarkerMatcher, TreatmentVocabulary,
};
use crate::config::{ConfigError, RunConfig};
use crate::dataset::{self, DatasetError};
use crate::export::{self, ExportError, ExportResult};
use crate::label::LabelParser;
use crate::models::{AnnotatedReview, MarkerEvent, ReviewRecord, TreatmentChangeEvent};
use crate::text::TextNormalizer;

/// Pipeline errors.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// The three output tables of one run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub reviews: Vec<AnnotatedReview>,
    pub marker_events: Vec<MarkerEvent>,
    pub change_events: Vec<TreatmentChangeEvent>,
}

impl PipelineOutput {
    /// Serialize all three tables as one JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// The full deterministic pipeline.
pub struct Pipeline {
    config: RunConfig,
    parser: LabelParser,
    normalizer: TextNormalizer,
}

impl Pipeline {
    /// Create a pipeline from a validated configuration.
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            parser: LabelParser::new(),
            normalizer: TextNormalizer::new(),
        }
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Load the configured dataset, run, and write the configured outputs.
    pub fn execute(&self) -> PipelineResult<PipelineOutput> {
        let records = dataset::load_reviews(&self.config.input_path)?;
        info!(rows = records.len(), "dataset loaded");

        let output = self.run(records);
        self.write_outputs(&output)?;
        Ok(output)
    }

    /// Run the pipeline over in-memory records.
    pub fn run(&self, records: Vec<ReviewRecord>) -> PipelineOutput {
        let total = records.len();
        let mut reviews = self.annotate(records);
        info!(kept = reviews.len(), total, "rows annotated and filtered");

        // Barrier: shared dictionaries are fully built before any row scan.
        let vocabulary = TreatmentVocabulary::from_rows(&reviews);
        let matcher = MarkerMatcher::new(&self.normalizer);
        let topics: Vec<CompiledTopic> = self
            .config
            .topics
            .iter()
            .map(|(name, topic)| {
                matcher.compile_topic(name, &topic.disease, topic.markers.clone())
            })
            .collect();
        info!(
            treatments = vocabulary.len(),
            topics = topics.len(),
            "vocabulary and marker dictionary built"
        );

        let detector = ChangeDetector::new(&vocabulary, self.config.fuzzy_threshold);
        reviews.par_iter_mut().for_each(|row| {
            if let Some(treatment) = row.descriptor.treatment.as_deref() {
                if !treatment.is_empty() {
                    row.fuzzy = Some(detector.analyze(
                        treatment,
                        row.record.comment.as_deref(),
                        row.record.rate,
                    ));
                }
            }
        });

        let marker_events: Vec<MarkerEvent> = topics
            .iter()
            .flat_map(|topic| {
                let events = matcher.match_topic(&reviews, topic);
                debug!(topic = %topic.topic, hits = events.len(), "topic matched");
                events
            })
            .collect();

        let change_events: Vec<TreatmentChangeEvent> = reviews
            .iter()
            .flat_map(|row| {
                row.fuzzy
                    .as_ref()
                    .map(|fuzzy| detector.events_for(&row.record.text_index, fuzzy))
                    .unwrap_or_default()
            })
            .collect();

        info!(
            markers = marker_events.len(),
            changes = change_events.len(),
            "scan complete"
        );

        PipelineOutput {
            reviews,
            marker_events,
            change_events,
        }
    }

    /// Phase 1: parse, filter and normalize rows.
    fn annotate(&self, records: Vec<ReviewRecord>) -> Vec<AnnotatedReview> {
        let cohort = CohortFilter::new(
            self.config.diseases.clone(),
            self.config.antibodies.clone(),
            self.config.treatments.clone(),
        );

        records
            .into_par_iter()
            .filter_map(|record| {
                if record.medication.is_none() {
                    warn!(text_index = %record.text_index, "row has no medication label");
                }
                let descriptor = self.parser.parse(record.medication.as_deref());
                if !cohort.matches(&descriptor) {
                    return None;
                }

                let tokens = self.normalizer.normalize(record.comment.as_deref());
                let exclusion = ExclusionSet::build(
                    &[
                        descriptor.disease.as_deref(),
                        descriptor.treatment.as_deref(),
                        descriptor.antibody.as_deref(),
                    ],
                    &self.config.excluded_terms,
                    &self.normalizer,
                );
                let comment_tokens = exclusion.filter_tokens(&tokens);

                Some(AnnotatedReview {
                    record,
                    descriptor,
                    comment_tokens,
                    fuzzy: None,
                })
            })
            .collect()
    }

    /// Write the configured output tables.
    fn write_outputs(&self, output: &PipelineOutput) -> ExportResult<()> {
        if let Some(path) = &self.config.output.annotated_reviews {
            let file = export::create_output_file(path)?;
            export::write_annotated_reviews(file, &output.reviews)?;
            info!(path = %path.display(), rows = output.reviews.len(), "annotated reviews written");
        }

        if let Some(dir) = &self.config.output.marker_events_dir {
            for (name, topic) in &self.config.topics {
                let events: Vec<MarkerEvent> = output
                    .marker_events
                    .iter()
                    .filter(|event| event.topic == *name)
                    .cloned()
                    .collect();
                let path = export::marker_table_path(dir, &topic.disease, name);
                let file = export::create_output_file(&path)?;
                export::write_marker_events(file, &events)?;
                info!(path = %path.display(), rows = events.len(), "marker events written");
            }
        }

        if let Some(path) = &self.config.output.treatment_changes {
            let file = export::create_output_file(path)?;
            export::write_treatment_changes(file, &output.change_events)?;
            info!(path = %path.display(), rows = output.change_events.len(), "treatment changes written");
        }

        Ok(())
    }
}
