use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use url::Url;

use crate::Persona;
use crate::analyzer::{Heuristics, PageAnalyzer};
use crate::config::AppConfig;
use crate::error::AnalysisError;
use crate::messages::{AnalyzerRequest, RequesterRequest};
use crate::report::{self, AnalysisReport};
use crate::requester::ReportRequester;
use crate::snapshot::PageSnapshot;

/// Steps of one analysis flow, strictly sequential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Idle,
    RequestingPageData,
    RequestingReport,
    ParsingReport,
    Displaying,
}

/// Everything one completed flow produced; the report is absent in
/// snapshot-only runs
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub snapshot: PageSnapshot,
    pub report: Option<AnalysisReport>,
}

/// Orchestrates the click-to-report flow across the page analyzer and the
/// report requester, talking to both through message channels only.
///
/// Holds the only mutable presentation state; a second analyze call while
/// one is in flight is refused outright instead of racing the first.
pub struct Shell {
    config: AppConfig,
    state: ShellState,
    analyzer: Option<mpsc::Sender<AnalyzerRequest>>,
    requester: mpsc::Sender<RequesterRequest>,
}

impl Shell {
    /// Build a shell and spawn its report requester.
    ///
    /// Fails only when a configured affiliate pattern is not a valid regex.
    pub fn new(config: AppConfig) -> Result<Self, regex::Error> {
        // Validate the heuristic patterns up front so a bad config fails at
        // startup, not mid-flow
        Heuristics::new(config.heuristics.clone())?;

        let requester = ReportRequester::new(config.llm.clone()).spawn();

        Ok(Self {
            config,
            state: ShellState::Idle,
            analyzer: None,
            requester,
        })
    }

    /// Run one full analysis flow for `url`.
    ///
    /// On any error the shell is left re-triggerable in the idle state.
    pub async fn analyze(
        &mut self,
        url: &str,
        persona: Persona,
        snapshot_only: bool,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        if self.state != ShellState::Idle {
            return Err(AnalysisError::Busy);
        }

        let result = self.run_flow(url, persona, snapshot_only).await;
        self.state = ShellState::Idle;
        result
    }

    async fn run_flow(
        &mut self,
        url: &str,
        persona: Persona,
        snapshot_only: bool,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        check_url_allowed(url)?;

        self.state = ShellState::RequestingPageData;
        let snapshot = self.request_snapshot(url).await?;
        ::log::info!(
            "Snapshot ready: {} links, bias score {}",
            snapshot.links.len(),
            snapshot.bias_score
        );

        if snapshot_only {
            self.state = ShellState::Displaying;
            return Ok(AnalysisOutcome {
                snapshot,
                report: None,
            });
        }

        self.state = ShellState::RequestingReport;
        let raw = self.request_report(snapshot.clone(), persona).await?;

        self.state = ShellState::ParsingReport;
        let report = report::parse_report(&raw)?;

        self.state = ShellState::Displaying;
        Ok(AnalysisOutcome {
            snapshot,
            report: Some(report),
        })
    }

    /// Obtain a snapshot, preferring an analyzer that is already running.
    ///
    /// When delivery to the existing analyzer fails, fall back exactly once
    /// to spawning a fresh one; an error *returned by* the analyzer is
    /// propagated rather than re-attempted.
    async fn request_snapshot(&mut self, url: &str) -> Result<PageSnapshot, AnalysisError> {
        if let Some(tx) = self.analyzer.clone() {
            match deliver_analyze(&tx, url).await {
                Ok(result) => return result,
                Err(e) => {
                    ::log::warn!("Page analyzer not responding ({}), respawning", e);
                    self.analyzer = None;
                }
            }
        }

        let analyzer = PageAnalyzer::new(
            Heuristics::new(self.config.heuristics.clone())
                .expect("patterns validated at construction"),
            self.config.webdriver_url.clone(),
            Duration::from_millis(self.config.settle_delay_ms),
        );
        let tx = analyzer.spawn();
        self.analyzer = Some(tx.clone());

        deliver_analyze(&tx, url).await?
    }

    async fn request_report(
        &self,
        snapshot: PageSnapshot,
        persona: Persona,
    ) -> Result<String, AnalysisError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.requester
            .send(RequesterRequest::SendToLlm {
                data: snapshot,
                persona,
                reply: reply_tx,
            })
            .await
            .map_err(|_| AnalysisError::Transport("report requester is gone".to_string()))?;

        reply_rx
            .await
            .map_err(|_| AnalysisError::Transport("report requester dropped the reply".to_string()))?
    }
}

/// One delivery attempt to an analyzer task. The outer error is a delivery
/// failure (closed channel, dropped reply); the inner result is whatever
/// the analyzer itself produced.
async fn deliver_analyze(
    tx: &mpsc::Sender<AnalyzerRequest>,
    url: &str,
) -> Result<Result<PageSnapshot, AnalysisError>, AnalysisError> {
    let (reply_tx, reply_rx) = oneshot::channel();
    tx.send(AnalyzerRequest::Analyze {
        url: url.to_string(),
        reply: reply_tx,
    })
    .await
    .map_err(|_| AnalysisError::Transport("analyze message not delivered".to_string()))?;

    reply_rx
        .await
        .map_err(|_| AnalysisError::Transport("analyzer dropped the reply".to_string()))
}

/// Internal browser/extension scheme URLs are rejected up front, never
/// attempted
fn check_url_allowed(url: &str) -> Result<(), AnalysisError> {
    let parsed = Url::parse(url)
        .map_err(|e| AnalysisError::AccessDenied(format!("not a valid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AnalysisError::AccessDenied(format!(
            "cannot analyze {}:// pages; navigate to a regular website",
            scheme
        ))),
    }
}

/// Risk level label for a 0-100 score
pub fn risk_level(score: u8) -> &'static str {
    match score {
        0..=20 => "Low",
        21..=40 => "Moderate",
        41..=60 => "High",
        _ => "Extreme",
    }
}

/// Renders the final report panel. Missing optional fields fall back to
/// snapshot values or safe placeholders.
pub fn render_report(snapshot: &PageSnapshot, report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("=== Analysis Report ===\n\n");
    out.push_str(&format!(
        "Title:  {}\n",
        report.title.as_deref().unwrap_or(&snapshot.title)
    ));
    out.push_str(&format!(
        "Author: {}\n\n",
        report
            .author
            .as_deref()
            .or(snapshot.author.as_deref())
            .unwrap_or("Unknown")
    ));

    out.push_str("Risk assessment:\n");
    for (label, score) in [
        ("Bias", report.bias_score),
        ("Manipulation", report.manipulation_score),
        ("Commercial", report.commercial_score),
        ("Credibility", report.credibility_score),
    ] {
        out.push_str(&format!(
            "  {:<13} {:>3}/100  ({})\n",
            label,
            score,
            risk_level(score)
        ));
    }

    if !report.main_claims.is_empty() {
        out.push_str("\nMain claims:\n");
        for claim in &report.main_claims {
            out.push_str(&format!("  - {}\n", claim));
        }
    }

    if !report.warning_signs.is_empty() {
        out.push_str("\nWarning signs:\n");
        for sign in &report.warning_signs {
            out.push_str(&format!("  - {}\n", sign));
        }
    }

    out.push_str(&format!(
        "\nRecommendation: {}\n",
        report
            .recommendation
            .as_deref()
            .unwrap_or("Use critical thinking when reading this content")
    ));

    out
}

/// Renders the snapshot summary used in snapshot-only runs
pub fn render_snapshot(snapshot: &PageSnapshot) -> String {
    let mut out = String::new();

    out.push_str("=== Page Snapshot ===\n\n");
    out.push_str(&format!("URL:         {}\n", snapshot.url));
    out.push_str(&format!("Title:       {}\n", snapshot.title));
    out.push_str(&format!(
        "Author:      {}\n",
        snapshot.author.as_deref().unwrap_or("Unknown")
    ));
    out.push_str(&format!("Bias score:  {}/100\n", snapshot.bias_score));
    out.push_str(&format!("Links found: {}\n", snapshot.links.len()));

    out.push_str("Motive indicators:\n");
    if snapshot.motive_indicators.is_empty() {
        out.push_str("  - None detected\n");
    } else {
        for indicator in &snapshot.motive_indicators {
            out.push_str(&format!("  - {}\n", indicator));
        }
    }

    out
}
