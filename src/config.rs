use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Top-level configuration for an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model API settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Keyword lists and patterns driving the heuristic scoring
    #[serde(default)]
    pub heuristics: HeuristicConfig,

    /// URL for the WebDriver instance used to render pages
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// How long to wait after navigation for dynamic content to settle
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

/// Settings for the external model-inference endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Bearer credential; empty or the placeholder value is a hard
    /// precondition failure before any network call
    #[serde(default)]
    pub api_key: String,

    /// Chat-completions endpoint URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model identifier passed through in the request body
    #[serde(default = "default_model")]
    pub model: String,

    /// max_tokens limit passed through in the request body
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Optional HTTP-Referer header (some routers use it for attribution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_referer: Option<String>,
}

/// Keyword lists and patterns for the motive/bias heuristics.
///
/// Kept as editable configuration data rather than hardcoded logic so the
/// heuristic stays auditable and testable on its own. Defaults reproduce the
/// stock lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Regex patterns matched against resolved anchor hrefs
    #[serde(default = "default_affiliate_patterns")]
    pub affiliate_patterns: Vec<String>,

    /// Phrases marking sponsored/advertorial content (matched lowercase)
    #[serde(default = "default_sponsored_terms")]
    pub sponsored_terms: Vec<String>,

    /// Politically-loaded phrases triggering the bias indicator label
    #[serde(default = "default_indicator_terms")]
    pub indicator_terms: Vec<String>,

    /// Politically-loaded terms scored at 10 points each
    #[serde(default = "default_bias_terms")]
    pub bias_terms: Vec<String>,

    /// Commercial-urgency terms scored at 5 points each
    #[serde(default = "default_commercial_terms")]
    pub commercial_terms: Vec<String>,

    /// CSS selectors tried in order when looking for a byline
    #[serde(default = "default_byline_selectors")]
    pub byline_selectors: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            heuristics: HeuristicConfig::default(),
            webdriver_url: default_webdriver_url(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            http_referer: None,
        }
    }
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            affiliate_patterns: default_affiliate_patterns(),
            sponsored_terms: default_sponsored_terms(),
            indicator_terms: default_indicator_terms(),
            bias_terms: default_bias_terms(),
            commercial_terms: default_commercial_terms(),
            byline_selectors: default_byline_selectors(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Apply environment-variable overrides on top of the loaded values
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            if !key.is_empty() {
                self.llm.api_key = key;
            }
        }
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default settle delay after navigation, in milliseconds
fn default_settle_delay_ms() -> u64 {
    500
}

/// Default chat-completions endpoint (OpenRouter)
fn default_api_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

/// Default model identifier
fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

/// Default max_tokens limit
fn default_max_tokens() -> u32 {
    1000
}

fn default_affiliate_patterns() -> Vec<String> {
    [
        r"amazon\.com.*ref=",
        r"go2cloud\.org",
        r"clickbank\.com",
        r"commission",
        r"affiliate",
        r"partner",
        r"sponsor",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_sponsored_terms() -> Vec<String> {
    [
        "sponsored",
        "advertisement",
        "promoted",
        "paid partnership",
        "advertorial",
        "branded content",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_indicator_terms() -> Vec<String> {
    [
        "conspiracy",
        "fake news",
        "mainstream media",
        "wake up",
        "sheeple",
        "elite",
        "globalist",
        "deep state",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_bias_terms() -> Vec<String> {
    [
        "conspiracy",
        "fake news",
        "mainstream media",
        "wake up",
        "sheeple",
        "elite",
        "globalist",
        "deep state",
        "liberal media",
        "conservative bias",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_commercial_terms() -> Vec<String> {
    [
        "buy now",
        "limited time",
        "act now",
        "special offer",
        "discount",
        "sale",
        "deal",
        "promotion",
        "click here",
        "learn more",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_byline_selectors() -> Vec<String> {
    [
        ".author",
        ".byline",
        r#"[rel="author"]"#,
        ".post-author",
        ".article-author",
        ".writer",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.settle_delay_ms, 500);
        assert!(config.llm.api_key.is_empty());
        assert_eq!(config.heuristics.bias_terms.len(), 10);
        assert_eq!(config.heuristics.commercial_terms.len(), 10);
        assert_eq!(config.heuristics.byline_selectors.len(), 6);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"llm": {"api_key": "sk-test"}}"#).unwrap();
        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.llm.max_tokens, 1000);
        assert!(config.llm.api_url.contains("openrouter.ai"));
        assert!(!config.heuristics.affiliate_patterns.is_empty());
    }

    #[test]
    fn test_custom_heuristic_lists() {
        let config: AppConfig = serde_json::from_str(
            r#"{"heuristics": {"bias_terms": ["propaganda"], "commercial_terms": []}}"#,
        )
        .unwrap();
        assert_eq!(config.heuristics.bias_terms, vec!["propaganda"]);
        assert!(config.heuristics.commercial_terms.is_empty());
        // Lists that were not overridden keep their defaults
        assert_eq!(config.heuristics.sponsored_terms.len(), 6);
    }
}
