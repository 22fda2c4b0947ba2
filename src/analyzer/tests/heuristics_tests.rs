use crate::analyzer::heuristics::{
    AFFILIATE_LABEL, Heuristics, POLITICAL_LABEL, SPONSORED_LABEL,
};
use crate::config::HeuristicConfig;

const VOCABULARY: [&str; 3] = [AFFILIATE_LABEL, SPONSORED_LABEL, POLITICAL_LABEL];

#[test]
fn test_affiliate_links_yield_single_label() {
    let heuristics = Heuristics::default();
    let hrefs = vec![
        "https://amazon.com/product?ref=abc".to_string(),
        "https://clickbank.com/offer".to_string(),
        "https://example.com/affiliate/deal".to_string(),
    ];

    // Three matching hrefs still produce exactly one label
    let indicators = heuristics.detect_motive_indicators(&hrefs, "");
    assert_eq!(indicators, vec![AFFILIATE_LABEL.to_string()]);
}

#[test]
fn test_sponsored_and_political_text_rules() {
    let heuristics = Heuristics::default();

    let indicators =
        heuristics.detect_motive_indicators(&[], "this post is a paid partnership with acme");
    assert_eq!(indicators, vec![SPONSORED_LABEL.to_string()]);

    let indicators =
        heuristics.detect_motive_indicators(&[], "the deep state controls everything");
    assert_eq!(indicators, vec![POLITICAL_LABEL.to_string()]);
}

#[test]
fn test_indicators_stay_in_vocabulary_and_unique() {
    let heuristics = Heuristics::default();
    let hrefs = vec![
        "https://amazon.com/item?ref=x".to_string(),
        "https://example.com/sponsor/page".to_string(),
    ];
    let text = "sponsored advertorial conspiracy sheeple wake up advertisement";

    let indicators = heuristics.detect_motive_indicators(&hrefs, text);

    assert_eq!(indicators.len(), 3);
    for label in &indicators {
        assert!(VOCABULARY.contains(&label.as_str()), "unexpected label: {label}");
    }
    let mut unique = indicators.clone();
    unique.dedup();
    assert_eq!(unique.len(), indicators.len());
}

#[test]
fn test_no_signals_no_indicators() {
    let heuristics = Heuristics::default();
    let hrefs = vec!["https://example.com/contact".to_string()];
    let indicators = heuristics.detect_motive_indicators(&hrefs, "a calm, factual weather report");
    assert!(indicators.is_empty());
}

#[test]
fn test_bias_score_additive() {
    let heuristics = Heuristics::default();

    assert_eq!(heuristics.calculate_bias_score(""), 0);

    // One political term = 10
    assert_eq!(heuristics.calculate_bias_score("pure conspiracy"), 10);

    // One political + one commercial = 15
    assert_eq!(
        heuristics.calculate_bias_score("conspiracy! buy now!"),
        15
    );

    // Repetition of the same term does not accumulate
    assert_eq!(
        heuristics.calculate_bias_score("conspiracy conspiracy conspiracy"),
        10
    );
}

#[test]
fn test_bias_score_saturates_at_100() {
    let heuristics = Heuristics::default();

    // Every term from both default lists: 10*10 + 10*5 = 150, clamped
    let text = "conspiracy fake news mainstream media wake up sheeple elite globalist \
                deep state liberal media conservative bias buy now limited time act now \
                special offer discount sale deal promotion click here learn more";
    assert_eq!(heuristics.calculate_bias_score(text), 100);
}

#[test]
fn test_custom_lists_drive_detection() {
    let config = HeuristicConfig {
        affiliate_patterns: vec![r"utm_campaign=partner".to_string()],
        sponsored_terms: vec!["gifted by".to_string()],
        indicator_terms: vec!["hidden agenda".to_string()],
        bias_terms: vec!["propaganda".to_string()],
        commercial_terms: vec![],
        byline_selectors: vec![],
    };
    let heuristics = Heuristics::new(config).unwrap();

    let hrefs = vec!["https://shop.example.com/?utm_campaign=partner".to_string()];
    let indicators = heuristics.detect_motive_indicators(&hrefs, "gifted by brand x");
    assert_eq!(
        indicators,
        vec![AFFILIATE_LABEL.to_string(), SPONSORED_LABEL.to_string()]
    );

    assert_eq!(heuristics.calculate_bias_score("state propaganda"), 10);
    // Stock terms no longer matter with custom lists
    assert_eq!(heuristics.calculate_bias_score("buy now conspiracy"), 0);
}

#[test]
fn test_invalid_affiliate_pattern_is_construction_error() {
    let config = HeuristicConfig {
        affiliate_patterns: vec!["(unclosed".to_string()],
        ..HeuristicConfig::default()
    };
    assert!(Heuristics::new(config).is_err());
}
