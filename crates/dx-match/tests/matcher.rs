use dx_match::{Matcher, similarity_for};
use dx_model::{DictionaryEntry, MatchPolicy, ScanConfig, SimilarityMetric};
use proptest::prelude::*;

fn entry(name: &str, synonyms: &[&str]) -> DictionaryEntry {
    DictionaryEntry::new(name, synonyms.iter().copied(), ["opioid"]).expect("valid entry")
}

#[test]
fn strict_finds_exact_token() {
    let matcher = Matcher::new(&ScanConfig::strict());
    let outcome = matcher
        .find(&entry("Heroin", &["heroin"]), "heroin use")
        .expect("exact match");
    assert_eq!(outcome.word_found, "heroin");
    assert_eq!(outcome.similarity_ratio, 1.0);
    assert_eq!(outcome.matched_term, "heroin");
}

#[test]
fn strict_rejects_misspelling() {
    let matcher = Matcher::new(&ScanConfig::strict());
    assert!(matcher.find(&entry("Heroin", &["heroin"]), "heroine use").is_none());
}

#[test]
fn lenient_accepts_close_spelling() {
    let matcher = Matcher::new(&ScanConfig::default());
    let heroin = entry("Heroin", &["heroin"]);

    let outcome = matcher.find(&heroin, "heroine use").expect("fuzzy match");
    assert_eq!(outcome.word_found, "heroine");
    assert!(outcome.similarity_ratio >= 0.90 && outcome.similarity_ratio < 1.0);

    assert!(matcher.find(&heroin, "xyz").is_none());
}

#[test]
fn empty_text_never_matches() {
    let heroin = entry("Heroin", &["heroin"]);
    for config in [ScanConfig::default(), ScanConfig::strict()] {
        let matcher = Matcher::new(&config);
        assert!(matcher.find(&heroin, "").is_none());
        assert!(matcher.find(&heroin, "  ;;  ").is_none());
    }
}

#[test]
fn punctuation_is_ignored() {
    let matcher = Matcher::new(&ScanConfig::strict());
    let outcome = matcher
        .find(&entry("Cocaine", &["cocaine"]), "Acute (Cocaine)! toxicity")
        .expect("match through punctuation");
    assert_eq!(outcome.word_found, "cocaine");
}

#[test]
fn entry_without_synonyms_matches_on_name() {
    let matcher = Matcher::new(&ScanConfig::strict());
    let xylazine = entry("Xylazine", &[]);
    assert!(matcher.find(&xylazine, "xylazine detected").is_some());
}

#[test]
fn token_position_is_the_outer_loop() {
    // The later synonym appears earlier in the text and wins.
    let matcher = Matcher::new(&ScanConfig::strict());
    let heroin = entry("Heroin", &["diacetylmorphine", "heroin"]);
    let outcome = matcher
        .find(&heroin, "heroin and diacetylmorphine")
        .expect("match");
    assert_eq!(outcome.word_found, "heroin");
    assert_eq!(outcome.matched_term, "heroin");
}

#[test]
fn best_score_prefers_exact_later_token() {
    let heroin = entry("Heroin", &["heroin"]);
    let text = "heroine then heroin";

    let first = Matcher::new(&ScanConfig::default())
        .find(&heroin, text)
        .expect("first match");
    assert_eq!(first.word_found, "heroine");

    let best = Matcher::new(&ScanConfig::default().with_policy(MatchPolicy::BestScore))
        .find(&heroin, text)
        .expect("best match");
    assert_eq!(best.word_found, "heroin");
    assert_eq!(best.similarity_ratio, 1.0);
}

#[test]
fn best_score_keeps_earliest_on_ties() {
    let matcher = Matcher::new(&ScanConfig::default().with_policy(MatchPolicy::BestScore));
    let heroin = entry("Heroin", &["heroin"]);
    let outcome = matcher.find(&heroin, "heroinx heroinx").expect("match");
    assert_eq!(outcome.word_found, "heroinx");
}

#[test]
fn multi_word_terms_match_token_windows() {
    let ethanol = entry("Ethanol", &["ethyl alcohol"]);

    let strict = Matcher::new(&ScanConfig::strict());
    let outcome = strict
        .find(&ethanol, "positive for Ethyl  Alcohol.")
        .expect("window match");
    assert_eq!(outcome.word_found, "ethyl alcohol");

    assert!(strict.find(&ethanol, "ethyl").is_none());

    let lenient = Matcher::new(&ScanConfig::default());
    let outcome = lenient
        .find(&ethanol, "ethyl alcohl level")
        .expect("fuzzy window match");
    assert_eq!(outcome.word_found, "ethyl alcohl");
}

#[test]
fn metric_and_threshold_are_configurable() {
    let heroin = entry("Heroin", &["heroin"]);
    let levenshtein = ScanConfig::default().with_metric(SimilarityMetric::Levenshtein);

    // 1 - 1/7 falls below the default threshold under edit distance.
    assert!(Matcher::new(&levenshtein).find(&heroin, "heroine").is_none());

    let outcome = Matcher::new(&levenshtein.with_threshold(0.85))
        .find(&heroin, "heroine")
        .expect("lowered threshold");
    assert!((outcome.similarity_ratio - 6.0 / 7.0).abs() < 1e-9);
}

#[test]
fn find_in_tokens_matches_find() {
    let matcher = Matcher::new(&ScanConfig::default());
    let heroin = entry("Heroin", &["heroin"]);
    let tokens = ["possible", "heroinn", "overdose"];
    assert_eq!(
        matcher.find_in_tokens(&heroin, &tokens),
        matcher.find(&heroin, "Possible HEROINN overdose")
    );
}

const METRICS: [SimilarityMetric; 3] = [
    SimilarityMetric::JaroWinkler,
    SimilarityMetric::Levenshtein,
    SimilarityMetric::DamerauLevenshtein,
];

proptest! {
    #[test]
    fn similarity_stays_in_unit_range(a in "[a-z ]{0,16}", b in "[a-z ]{0,16}") {
        for metric in METRICS {
            let score = similarity_for(metric).similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score), "{metric}: {score}");
        }
    }

    #[test]
    fn similarity_of_identical_strings_is_one(a in "[a-z0-9 ]{0,24}") {
        for metric in METRICS {
            prop_assert_eq!(similarity_for(metric).similarity(&a, &a), 1.0);
        }
    }

    #[test]
    fn strict_match_implies_lenient_match(
        words in prop::collection::vec(
            prop::sample::select(vec!["heroin", "heroine", "use", "of", "xyz", "acute"]),
            0..8,
        )
    ) {
        let text = words.join(" ");
        let heroin = entry("Heroin", &["heroin"]);
        let strict = Matcher::new(&ScanConfig::strict()).find(&heroin, &text);
        let lenient = Matcher::new(&ScanConfig::default()).find(&heroin, &text);
        if strict.is_some() {
            prop_assert!(lenient.is_some());
        }
        prop_assert_eq!(strict.is_some(), words.contains(&"heroin"));
    }
}
