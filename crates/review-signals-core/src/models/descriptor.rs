//! Typed fields derived from a raw medication label.

use serde::{Deserialize, Serialize};

/// Fields extracted from a medication label string.
///
/// All fields are optional: a malformed label degrades to partial
/// extraction, never an error. The `treatment`, `disease` and `antibody`
/// substrings never overlap.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MedicationDescriptor {
    /// Primary medication name (prefix before the first parenthesis or "for")
    pub treatment: Option<String>,
    /// Disease name (after "for", up to a comma or end of string)
    pub disease: Option<String>,
    /// Biologic-agent name inside the first parentheses
    pub antibody: Option<String>,
    /// Trailing ", Maintenance" / ", Acute" label
    pub treatment_type: Option<TreatmentType>,
}

impl MedicationDescriptor {
    /// Whether the label yielded a usable treatment name.
    ///
    /// Rows without one are excluded from treatment-based analytics.
    pub fn has_treatment(&self) -> bool {
        self.treatment.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Treatment phase label carried at the end of some medication labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TreatmentType {
    Maintenance,
    Acute,
}

impl TreatmentType {
    /// Parse the label as it appears in the medication string.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Maintenance" => Some(TreatmentType::Maintenance),
            "Acute" => Some(TreatmentType::Acute),
            _ => None,
        }
    }

    /// The label as it appears in the medication string.
    pub fn as_label(&self) -> &'static str {
        match self {
            TreatmentType::Maintenance => "Maintenance",
            TreatmentType::Acute => "Acute",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treatment_type_labels() {
        assert_eq!(
            TreatmentType::from_label("Maintenance"),
            Some(TreatmentType::Maintenance)
        );
        assert_eq!(TreatmentType::from_label("Acute"), Some(TreatmentType::Acute));
        assert_eq!(TreatmentType::from_label("Chronic"), None);

        assert_eq!(TreatmentType::Maintenance.as_label(), "Maintenance");
        assert_eq!(TreatmentType::Acute.as_label(), "Acute");
    }

    #[test]
    fn test_has_treatment() {
        let mut descriptor = MedicationDescriptor::default();
        assert!(!descriptor.has_treatment());

        descriptor.treatment = Some(String::new());
        assert!(!descriptor.has_treatment());

        descriptor.treatment = Some("Humira".into());
        assert!(descriptor.has_treatment());
    }
}
