//! Self-referential term exclusion.
//!
//! A comment about Humira for Crohn's disease inevitably names them; those
//! names must never count as discovered content. Each row gets its own
//! exclusion set built from its disease, treatment and antibody names plus
//! a fixed configured term list.

use std::collections::HashSet;

use crate::text::TextNormalizer;

/// Per-row set of terms excluded from a comment's tokens and keywords.
///
/// Carries both the individual normalized tokens and the space-joined form
/// of every source, so single-token and whole-name references are both
/// caught.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    terms: HashSet<String>,
}

impl ExclusionSet {
    /// Build the exclusion set for one row.
    ///
    /// `sources` is the ordered list of the row's own field values
    /// (disease, treatment, antibody); adding a source is a one-element
    /// change at the call site. `fixed_terms` come from configuration and
    /// are taken lowercased as-is.
    pub fn build(
        sources: &[Option<&str>],
        fixed_terms: &[String],
        normalizer: &TextNormalizer,
    ) -> Self {
        let mut terms = HashSet::new();

        for source in sources.iter().copied().flatten() {
            let tokens = normalizer.normalize(Some(source));
            if tokens.is_empty() {
                continue;
            }
            terms.insert(tokens.join(" "));
            terms.extend(tokens);
        }
        for term in fixed_terms {
            terms.insert(term.to_lowercase());
        }

        Self { terms }
    }

    /// Whether a word is excluded.
    pub fn contains(&self, word: &str) -> bool {
        self.terms.contains(word)
    }

    /// Drop every token that matches an excluded term.
    pub fn filter_tokens(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|token| !self.terms.contains(*token))
            .cloned()
            .collect()
    }

    /// Drop every phrase with at least one excluded constituent word.
    ///
    /// All-or-nothing: a phrase survives only if none of its words match.
    pub fn filter_phrases(&self, phrases: &[String]) -> Vec<String> {
        phrases
            .iter()
            .filter(|phrase| {
                phrase
                    .split_whitespace()
                    .all(|word| !self.terms.contains(word))
            })
            .cloned()
            .collect()
    }

    /// Number of excluded terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
