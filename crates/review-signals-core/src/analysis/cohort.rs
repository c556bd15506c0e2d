//! Cohort restriction by disease, antibody and treatment allow-lists.

use crate::models::MedicationDescriptor;

/// Allow-list filter over derived medication fields.
///
/// An empty list places no constraint on its dimension; a non-empty list
/// restricts rows to exact (case-sensitive) membership. Dimensions compose
/// by logical AND, so application order never changes the result.
#[derive(Debug, Clone, Default)]
pub struct CohortFilter {
    diseases: Vec<String>,
    antibodies: Vec<String>,
    treatments: Vec<String>,
}

impl CohortFilter {
    /// Create a filter from the three allow-lists.
    pub fn new(diseases: Vec<String>, antibodies: Vec<String>, treatments: Vec<String>) -> Self {
        Self {
            diseases,
            antibodies,
            treatments,
        }
    }

    /// Whether a row's descriptor passes all three dimensions.
    pub fn matches(&self, descriptor: &MedicationDescriptor) -> bool {
        dimension_matches(&self.diseases, descriptor.disease.as_deref())
            && dimension_matches(&self.antibodies, descriptor.antibody.as_deref())
            && dimension_matches(&self.treatments, descriptor.treatment.as_deref())
    }

    /// Whether any dimension is constrained.
    pub fn is_unconstrained(&self) -> bool {
        self.diseases.is_empty() && self.antibodies.is_empty() && self.treatments.is_empty()
    }
}

/// Empty allow-list passes everything; otherwise the field must be present
/// and listed.
fn dimension_matches(allowed: &[String], value: Option<&str>) -> bool {
    allowed.is_empty() || value.is_some_and(|v| allowed.iter().any(|a| a == v))
}
