//! Property tests for the deterministic core.

use proptest::prelude::*;

use review_signals_core::analysis::{
    change_score, ChangeDetector, CohortFilter, ExclusionSet, MarkerMatcher, TreatmentVocabulary,
};
use review_signals_core::label::LabelParser;
use review_signals_core::models::{AnnotatedReview, MedicationDescriptor, ReviewRecord};
use review_signals_core::text::TextNormalizer;

fn review_with(
    text_index: usize,
    treatment: Option<String>,
    disease: Option<String>,
    comment_tokens: Vec<String>,
) -> AnnotatedReview {
    AnnotatedReview {
        record: ReviewRecord {
            text_index: text_index.to_string(),
            medication: None,
            comment: None,
            rate: 5,
        },
        descriptor: MedicationDescriptor {
            treatment,
            disease,
            antibody: None,
            treatment_type: None,
        },
        comment_tokens,
        fuzzy: None,
    }
}

proptest! {
    #[test]
    fn normalization_is_idempotent(text in "[ -~]{0,120}") {
        let normalizer = TextNormalizer::new();

        let once = normalizer.normalize(Some(&text));
        let joined = once.join(" ");
        let twice = normalizer.normalize(Some(&joined));

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalization_is_idempotent_over_unicode(text in "\\PC{0,60}") {
        let normalizer = TextNormalizer::new();

        let once = normalizer.normalize(Some(&text));
        let joined = once.join(" ");
        let twice = normalizer.normalize(Some(&joined));

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn label_parser_is_total(label in "\\PC{0,120}") {
        let parser = LabelParser::new();

        // Must not panic; extracted fields are trimmed and non-empty.
        let descriptor = parser.parse(Some(&label));
        for field in [&descriptor.treatment, &descriptor.disease, &descriptor.antibody] {
            if let Some(value) = field {
                prop_assert!(!value.is_empty());
                prop_assert_eq!(value.trim(), value.as_str());
            }
        }
    }

    #[test]
    fn excluded_word_never_survives(
        text in "[a-z]{2,8}( [a-z]{2,8}){0,14}",
        pick in any::<prop::sample::Index>(),
    ) {
        let normalizer = TextNormalizer::new();
        let tokens = normalizer.normalize(Some(&text));
        prop_assume!(!tokens.is_empty());

        let word = tokens[pick.index(tokens.len())].clone();
        let set = ExclusionSet::build(&[Some(word.as_str())], &[], &normalizer);

        let filtered = set.filter_tokens(&tokens);
        prop_assert!(!filtered.contains(&word));

        // A phrase containing the word is dropped whole, not trimmed. The
        // filler words carry digits, so they can never collide with the
        // purely alphabetic exclusion terms.
        let phrase = format!("w0 {word} w9");
        let kept = set.filter_phrases(&[phrase, "w0 w9".to_string()]);
        prop_assert_eq!(kept, vec!["w0 w9".to_string()]);
    }

    #[test]
    fn cohort_filters_commute(
        rows in prop::collection::vec(("[a-c]", "[x-z]"), 0..30),
        diseases in prop::collection::vec("[a-c]", 0..3),
        antibodies in prop::collection::vec("[x-z]", 0..3),
    ) {
        let reviews: Vec<MedicationDescriptor> = rows
            .into_iter()
            .map(|(disease, antibody)| MedicationDescriptor {
                treatment: None,
                disease: Some(disease),
                antibody: Some(antibody),
                treatment_type: None,
            })
            .collect();

        let by_disease = CohortFilter::new(diseases.clone(), vec![], vec![]);
        let by_antibody = CohortFilter::new(vec![], antibodies.clone(), vec![]);

        let disease_first: Vec<&MedicationDescriptor> = reviews
            .iter()
            .filter(|d| by_disease.matches(d))
            .filter(|d| by_antibody.matches(d))
            .collect();
        let antibody_first: Vec<&MedicationDescriptor> = reviews
            .iter()
            .filter(|d| by_antibody.matches(d))
            .filter(|d| by_disease.matches(d))
            .collect();

        prop_assert_eq!(disease_first, antibody_first);
    }

    #[test]
    fn adding_a_marker_phrase_is_monotonic(
        comments in prop::collection::vec(
            prop::collection::vec("[a-z]{2,6}", 0..8),
            1..12,
        ),
        base_phrase in "[a-z]{2,6}",
        extra_phrase in "[a-z]{2,6}",
    ) {
        let normalizer = TextNormalizer::new();
        let matcher = MarkerMatcher::new(&normalizer);

        let rows: Vec<AnnotatedReview> = comments
            .into_iter()
            .enumerate()
            .map(|(i, tokens)| {
                review_with(i, None, Some("Crohn's Disease".to_string()), tokens)
            })
            .collect();

        let narrow = matcher.compile_topic(
            "topic",
            "Crohn's Disease",
            vec![("marker".to_string(), vec![base_phrase.clone()])],
        );
        let wide = matcher.compile_topic(
            "topic",
            "Crohn's Disease",
            vec![("marker".to_string(), vec![base_phrase, extra_phrase])],
        );

        let narrow_hits: Vec<String> = matcher
            .match_topic(&rows, &narrow)
            .into_iter()
            .map(|e| e.text_index)
            .collect();
        let wide_hits: Vec<String> = matcher
            .match_topic(&rows, &wide)
            .into_iter()
            .map(|e| e.text_index)
            .collect();

        for hit in &narrow_hits {
            prop_assert!(wide_hits.contains(hit));
        }
    }

    #[test]
    fn delta_is_mentions_minus_own_treatment(
        vocab_words in prop::collection::hash_set("[A-Z][a-z]{3,8}", 1..6),
        comment_words in prop::collection::vec("[A-Za-z]{2,9}", 0..12),
        own_pick in any::<prop::sample::Index>(),
        rate in 1u8..=10,
    ) {
        let vocab_words: Vec<String> = vocab_words.into_iter().collect();
        let rows: Vec<AnnotatedReview> = vocab_words
            .iter()
            .enumerate()
            .map(|(i, t)| review_with(i, Some(t.clone()), None, vec![]))
            .collect();
        let vocabulary = TreatmentVocabulary::from_rows(&rows);

        let own = vocab_words[own_pick.index(vocab_words.len())].clone();
        let comment = comment_words.join(" ");
        let detector = ChangeDetector::new(&vocabulary, 80);

        let mentions = detector.analyze(&own, Some(&comment), rate);

        let expected_delta: Vec<String> = mentions
            .treatments_in_comment
            .iter()
            .filter(|m| *m != &own)
            .cloned()
            .collect();
        prop_assert_eq!(&mentions.delta_treatment, &expected_delta);

        if !mentions.treatments_in_comment.contains(&own) {
            prop_assert_eq!(&mentions.delta_treatment, &mentions.treatments_in_comment);
        }

        // Score is in band, and None exactly when the delta is empty.
        match mentions.change_score {
            None => prop_assert!(mentions.delta_treatment.is_empty()),
            Some(score) => {
                prop_assert!(!mentions.delta_treatment.is_empty());
                prop_assert!((-2..=2).contains(&score));
            }
        }
    }

    #[test]
    fn change_score_stays_in_band(rate in any::<u8>()) {
        prop_assert!((-2..=2).contains(&change_score(rate)));
    }
}
