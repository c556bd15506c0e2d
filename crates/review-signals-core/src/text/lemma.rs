//! Rule-based English noun lemmatization.
//!
//! A dictionary-free approximation of WordNet-style lemmatization:
//! irregular forms resolve through a lookup table, regular plurals through
//! ordered suffix rules. The output of `lemmatize` is a fixed point, which
//! is what makes whole-pipeline normalization idempotent.

use std::collections::HashMap;

/// Lemmatizer for individual tokens.
///
/// Expects lowercase input; the normalizer lowercases before calling in.
pub struct Lemmatizer {
    /// Irregular plural → singular, plus forms that must not be touched
    irregular: HashMap<String, String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    /// Create a lemmatizer with the default irregular-form table.
    pub fn new() -> Self {
        Self {
            irregular: Self::default_irregulars(),
        }
    }

    /// Reduce a token to its lemma.
    pub fn lemmatize(&self, token: &str) -> String {
        if let Some(lemma) = self.irregular.get(token) {
            return lemma.clone();
        }

        if let Some(stem) = token.strip_suffix("ies") {
            if token.len() > 4 {
                return format!("{stem}y");
            }
        }
        for (suffix, replacement) in [
            ("sses", "ss"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("xes", "x"),
            ("zes", "z"),
        ] {
            if let Some(stem) = token.strip_suffix(suffix) {
                return format!("{stem}{replacement}");
            }
        }
        // "doses" -> "dose", "causes" -> "cause"
        if token.ends_with("ses") {
            return token[..token.len() - 1].to_string();
        }
        if token.len() > 3
            && token.ends_with('s')
            && !token.ends_with("ss")
            && !token.ends_with("us")
            && !token.ends_with("is")
        {
            return token[..token.len() - 1].to_string();
        }

        token.to_string()
    }

    /// Add a custom irregular form.
    pub fn add_irregular(&mut self, form: &str, lemma: &str) {
        self.irregular
            .insert(form.to_lowercase(), lemma.to_lowercase());
    }

    /// Default irregular plural table.
    fn default_irregulars() -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("feet".into(), "foot".into());
        map.insert("teeth".into(), "tooth".into());
        map.insert("children".into(), "child".into());
        map.insert("men".into(), "man".into());
        map.insert("women".into(), "woman".into());
        map.insert("mice".into(), "mouse".into());
        map.insert("geese".into(), "goose".into());
        map.insert("lives".into(), "life".into());
        map.insert("wives".into(), "wife".into());
        map.insert("knives".into(), "knife".into());
        map.insert("leaves".into(), "leaf".into());
        map.insert("selves".into(), "self".into());
        map.insert("halves".into(), "half".into());

        // Invariant forms the suffix rules would mangle
        map.insert("species".into(), "species".into());
        map.insert("series".into(), "series".into());
        map.insert("news".into(), "news".into());
        map.insert("diabetes".into(), "diabetes".into());
        map.insert("herpes".into(), "herpes".into());
        map.insert("rabies".into(), "rabies".into());
        map.insert("scabies".into(), "scabies".into());
        map.insert("feces".into(), "feces".into());
        map.insert("pancreas".into(), "pancreas".into());
        map.insert("nausea".into(), "nausea".into());

        map
    }
}
