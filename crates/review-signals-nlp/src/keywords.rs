//! Keyword post-processing.
//!
//! Raw comments go to the phrase extractor; every returned phrase is then
//! lemmatized into its joined form and passed through the row's exclusion
//! set, so the cohort's own disease/treatment/antibody names never surface
//! as discovered keywords.

use review_signals_core::analysis::ExclusionSet;
use review_signals_core::text::TextNormalizer;

use crate::services::{NlpResult, PhraseExtractor};

/// The extract → lemmatize → exclude keyword path for one run.
pub struct KeywordPipeline<'a, E: PhraseExtractor> {
    extractor: &'a E,
    normalizer: &'a TextNormalizer,
}

impl<'a, E: PhraseExtractor> KeywordPipeline<'a, E> {
    /// Create a keyword pipeline sharing the run's normalizer.
    pub fn new(extractor: &'a E, normalizer: &'a TextNormalizer) -> Self {
        Self {
            extractor,
            normalizer,
        }
    }

    /// Keywords for one comment, filtered through the row's exclusion set.
    ///
    /// A missing comment yields no keywords; extractor failures propagate
    /// and stay scoped to this row.
    pub fn keywords_for(
        &self,
        comment: Option<&str>,
        exclusion: &ExclusionSet,
    ) -> NlpResult<Vec<String>> {
        let Some(comment) = comment else {
            return Ok(Vec::new());
        };

        let ranked = self.extractor.extract(comment)?;
        let lemmatized: Vec<String> = ranked
            .iter()
            .map(|r| self.normalizer.normalize_joined(Some(&r.phrase)))
            .filter(|phrase| !phrase.is_empty())
            .collect();

        Ok(exclusion.filter_phrases(&lemmatized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rake::CooccurrenceExtractor;

    fn exclusion_for(normalizer: &TextNormalizer) -> ExclusionSet {
        ExclusionSet::build(
            &[Some("Crohn's Disease"), Some("Humira"), Some("adalimumab")],
            &["uc".to_string()],
            normalizer,
        )
    }

    #[test]
    fn test_keywords_are_lemmatized_and_filtered() {
        let normalizer = TextNormalizer::new();
        let extractor = CooccurrenceExtractor::new(1, 3);
        let pipeline = KeywordPipeline::new(&extractor, &normalizer);
        let exclusion = exclusion_for(&normalizer);

        let keywords = pipeline
            .keywords_for(
                Some("Humira cured my severe stomach cramps, but the headaches stayed"),
                &exclusion,
            )
            .unwrap();

        // "humira cured" is dropped whole; surviving phrases are lemmatized.
        assert!(keywords.iter().any(|k| k == "severe stomach cramp"));
        assert!(keywords.iter().any(|k| k == "headache stayed"));
        assert!(keywords.iter().all(|k| !k.contains("humira")));
    }

    #[test]
    fn test_missing_comment_yields_no_keywords() {
        let normalizer = TextNormalizer::new();
        let extractor = CooccurrenceExtractor::default();
        let pipeline = KeywordPipeline::new(&extractor, &normalizer);
        let exclusion = exclusion_for(&normalizer);

        assert!(pipeline.keywords_for(None, &exclusion).unwrap().is_empty());
    }

    #[test]
    fn test_phrase_with_excluded_word_dropped_whole() {
        let normalizer = TextNormalizer::new();
        let extractor = CooccurrenceExtractor::new(1, 3);
        let pipeline = KeywordPipeline::new(&extractor, &normalizer);
        let exclusion = exclusion_for(&normalizer);

        let keywords = pipeline
            .keywords_for(Some("crohn flare pain again"), &exclusion)
            .unwrap();

        // "crohn flare pain" contains an excluded word, so the whole
        // phrase goes, not just the word.
        assert!(keywords.iter().all(|k| !k.contains("flare")));
    }
}
