use regex::Regex;

use crate::config::HeuristicConfig;

/// Label emitted when any anchor href matches an affiliate pattern
pub const AFFILIATE_LABEL: &str = "Affiliate links detected";

/// Label emitted when sponsored-content phrasing is present in the page text
pub const SPONSORED_LABEL: &str = "Sponsored content markers found";

/// Label emitted when politically-loaded phrasing is present in the page text
pub const POLITICAL_LABEL: &str = "Political bias indicators detected";

/// Bias score ceiling
pub const MAX_BIAS_SCORE: u32 = 100;

/// Keyword heuristics with the affiliate patterns compiled up front
#[derive(Debug)]
pub struct Heuristics {
    config: HeuristicConfig,
    affiliate_regexes: Vec<Regex>,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self::new(HeuristicConfig::default()).expect("Default affiliate patterns should be valid")
    }
}

impl Heuristics {
    /// Compile the heuristic configuration; fails only on an invalid
    /// user-supplied affiliate regex
    pub fn new(config: HeuristicConfig) -> Result<Self, regex::Error> {
        let mut affiliate_regexes = Vec::with_capacity(config.affiliate_patterns.len());
        for pattern in &config.affiliate_patterns {
            affiliate_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            config,
            affiliate_regexes,
        })
    }

    /// Evaluate the three independent indicator rules against the page's
    /// resolved anchor hrefs and its lowercased text.
    ///
    /// Each rule contributes at most one label no matter how many times it
    /// matches, and only labels from the fixed vocabulary are ever returned.
    pub fn detect_motive_indicators(&self, hrefs: &[String], lower_text: &str) -> Vec<String> {
        let mut indicators = Vec::new();

        let affiliate_hit = hrefs
            .iter()
            .any(|href| self.affiliate_regexes.iter().any(|re| re.is_match(href)));
        if affiliate_hit {
            indicators.push(AFFILIATE_LABEL.to_string());
        }

        if self
            .config
            .sponsored_terms
            .iter()
            .any(|term| lower_text.contains(term.as_str()))
        {
            indicators.push(SPONSORED_LABEL.to_string());
        }

        if self
            .config
            .indicator_terms
            .iter()
            .any(|term| lower_text.contains(term.as_str()))
        {
            indicators.push(POLITICAL_LABEL.to_string());
        }

        indicators
    }

    /// Additive presence/absence heuristic over the lowercased page text:
    /// 10 points per distinct political term, 5 per distinct commercial
    /// term, clamped to 100.
    pub fn calculate_bias_score(&self, lower_text: &str) -> u8 {
        let mut score: u32 = 0;

        let bias_matches = self
            .config
            .bias_terms
            .iter()
            .filter(|term| lower_text.contains(term.as_str()))
            .count() as u32;
        score += bias_matches * 10;

        let commercial_matches = self
            .config
            .commercial_terms
            .iter()
            .filter(|term| lower_text.contains(term.as_str()))
            .count() as u32;
        score += commercial_matches * 5;

        score.min(MAX_BIAS_SCORE) as u8
    }

    /// Byline selectors in the order they should be tried
    pub fn byline_selectors(&self) -> &[String] {
        &self.config.byline_selectors
    }
}
