//! Medication label parsing.
//!
//! Labels follow a loose convention:
//!
//! ```text
//! <treatment> (<antibody>) for <disease>, <Maintenance|Acute>
//! ```
//!
//! Every part after the treatment is optional, and the fields are extracted
//! independently rather than by one greedy parse, so a malformed label
//! degrades to partial extraction instead of failing.

use regex::Regex;

use crate::models::{MedicationDescriptor, TreatmentType};

/// Parser for raw medication label strings.
pub struct LabelParser {
    /// Prefix up to the first parenthesis or standalone "for"
    treatment: Regex,
    /// Text after "for", up to a comma or end of string
    disease: Regex,
    /// Text inside the first parentheses
    antibody: Regex,
    /// Trailing ", Maintenance" / ", Acute" label
    treatment_type: Regex,
}

impl Default for LabelParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelParser {
    /// Create a parser with the label patterns compiled.
    pub fn new() -> Self {
        // "for" must be a standalone word: "Forte" inside a brand name does
        // not terminate the treatment prefix.
        Self {
            treatment: Regex::new(r"(?i)^(.*?)(?:\s*\(|\s*\bfor\b)").unwrap(),
            disease: Regex::new(r"(?i)\bfor\s+(.*?)(?:,|$)").unwrap(),
            antibody: Regex::new(r"\(([^)]+)\)").unwrap(),
            treatment_type: Regex::new(r", (Maintenance|Acute)$").unwrap(),
        }
    }

    /// Parse a medication label into its typed fields.
    ///
    /// Total over all inputs: a missing label yields an all-`None`
    /// descriptor, and unmatched delimiters leave only the affected field
    /// unset.
    pub fn parse(&self, medication: Option<&str>) -> MedicationDescriptor {
        let Some(label) = medication else {
            return MedicationDescriptor::default();
        };

        MedicationDescriptor {
            treatment: self.extract_treatment(label),
            disease: self.extract_disease(label),
            antibody: self.extract_antibody(label),
            treatment_type: self.extract_treatment_type(label),
        }
    }

    fn extract_treatment(&self, label: &str) -> Option<String> {
        let prefix = match self.treatment.captures(label) {
            Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
            // No delimiter at all: the whole label is the treatment.
            None => label,
        };
        non_empty(prefix)
    }

    fn extract_disease(&self, label: &str) -> Option<String> {
        self.disease
            .captures(label)
            .and_then(|caps| caps.get(1))
            .and_then(|m| non_empty(m.as_str()))
    }

    fn extract_antibody(&self, label: &str) -> Option<String> {
        self.antibody
            .captures(label)
            .and_then(|caps| caps.get(1))
            .and_then(|m| non_empty(m.as_str()))
    }

    fn extract_treatment_type(&self, label: &str) -> Option<TreatmentType> {
        self.treatment_type
            .captures(label)
            .and_then(|caps| caps.get(1))
            .and_then(|m| TreatmentType::from_label(m.as_str()))
    }
}

/// Trim and keep only non-empty extractions.
fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
