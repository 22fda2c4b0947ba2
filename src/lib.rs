// Re-export modules
pub mod analyzer;
pub mod config;
pub mod error;
pub mod messages;
pub mod report;
pub mod requester;
pub mod shell;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use error::AnalysisError;
pub use report::AnalysisReport;
pub use shell::{AnalysisOutcome, Shell};
pub use snapshot::PageSnapshot;

use std::fmt;

/// Reader-category hint used to tailor the model's recommendation text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    /// The reader themselves
    SelfReader,
    /// A child; recommendations become critical-thinking prompts
    Child,
    /// A grandparent; recommendations become fraud/scam warnings
    Grandparent,
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Persona::SelfReader => "self",
            Persona::Child => "child",
            Persona::Grandparent => "grandparent",
        };
        write!(f, "{}", label)
    }
}

/// Builder for configuring and running one page analysis
pub struct Spinguard {
    config: config::AppConfig,
    persona: Persona,
    snapshot_only: bool,
}

impl Default for Spinguard {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinguard {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            config: config::AppConfig::default(),
            persona: Persona::SelfReader,
            snapshot_only: false,
        }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: config::AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(
        mut self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        self.config = config::AppConfig::from_file(path)?;
        Ok(self)
    }

    /// Set the reader persona
    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    /// Skip the model call and stop after the page snapshot
    pub fn snapshot_only(mut self, snapshot_only: bool) -> Self {
        self.snapshot_only = snapshot_only;
        self
    }

    /// Run one analysis flow against the given page URL
    pub async fn analyze(self, url: &str) -> Result<AnalysisOutcome, AnalysisError> {
        let mut config = self.config;
        config.apply_env();

        let mut shell = Shell::new(config).map_err(|e| {
            AnalysisError::Configuration(format!("invalid affiliate pattern: {}", e))
        })?;
        shell.analyze(url, self.persona, self.snapshot_only).await
    }
}
