//! Review-Signals Core Library
//!
//! Deterministic signal extraction from free-text patient medication
//! reviews.
//!
//! # Architecture
//!
//! ```text
//! reviews.csv → Label Parser ──► Cohort Filter
//!                                      │
//!                          Normalize comment + own terms
//!                                      │
//!                            Term Exclusion Filter
//!                                      │
//!             ┌────────────────────────┼────────────────────────┐
//!             │                        │                        │
//!   [treatment vocabulary]    [marker dictionary]       keyword/topic/
//!             │                        │                sentiment services
//!             ▼                        ▼                  (external)
//!      Fuzzy Change            Marker Matching
//!        Detector                  Engine
//!             │                        │
//!     change events            marker events
//! ```
//!
//! # Core Principle
//!
//! **Row-level data problems degrade, configuration problems abort.** A
//! missing comment or malformed label yields empty/`None` derived fields
//! and the row flows on; an invalid configuration stops the run before the
//! first row is touched.
//!
//! # Modules
//!
//! - [`models`]: Domain types (ReviewRecord, MedicationDescriptor, events)
//! - [`label`]: Medication label parsing
//! - [`text`]: Tokenization, stop words, lemmatization and stemming
//! - [`analysis`]: Cohort filter, term exclusion, marker matching, fuzzy
//!   treatment-change detection
//! - [`config`]: YAML run configuration
//! - [`dataset`]: Reviews CSV input
//! - [`export`]: Output tables
//! - [`pipeline`]: Phase orchestration

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod export;
pub mod label;
pub mod models;
pub mod pipeline;
pub mod text;

// Re-export commonly used types
pub use analysis::{ChangeDetector, CohortFilter, ExclusionSet, MarkerMatcher, TreatmentVocabulary};
pub use config::{ConfigError, RunConfig, TopicConfig};
pub use label::LabelParser;
pub use models::{
    AnnotatedReview, FuzzyMentions, MarkerEvent, MedicationDescriptor, ReviewRecord,
    TreatmentChangeEvent, TreatmentType,
};
pub use pipeline::{Pipeline, PipelineError, PipelineOutput};
pub use text::{Stemmer, TextNormalizer};
