pub mod extract;
pub mod heuristics;

#[cfg(test)]
mod tests;

use fantoccini::{Client, ClientBuilder};
use scraper::Html;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

use crate::error::AnalysisError;
use crate::messages::AnalyzerRequest;
use crate::snapshot::PageSnapshot;
pub use heuristics::Heuristics;

/// Produces one PageSnapshot per request from the rendered DOM of the
/// target page.
///
/// The WebDriver session is established lazily on the first request so a
/// spawned analyzer that never receives work never opens a browser.
pub struct PageAnalyzer {
    heuristics: Heuristics,
    webdriver_url: String,
    settle_delay: Duration,
    client: Option<Client>,
}

impl PageAnalyzer {
    pub fn new(heuristics: Heuristics, webdriver_url: String, settle_delay: Duration) -> Self {
        Self {
            heuristics,
            webdriver_url,
            settle_delay,
            client: None,
        }
    }

    /// Spawn the analyzer as a task serving requests from a channel.
    ///
    /// The task runs until every sender is dropped, then closes its
    /// WebDriver session.
    pub fn spawn(self) -> mpsc::Sender<AnalyzerRequest> {
        let (tx, mut rx) = mpsc::channel::<AnalyzerRequest>(16);

        tokio::spawn(async move {
            let mut analyzer = self;
            while let Some(request) = rx.recv().await {
                match request {
                    AnalyzerRequest::Analyze { url, reply } => {
                        ::log::info!("Analyzing page: {}", url);
                        let result = analyzer.analyze(&url).await;
                        if reply.send(result).is_err() {
                            ::log::warn!("Analyze reply channel dropped for: {}", url);
                        }
                    }
                }
            }

            if let Some(client) = analyzer.client.take() {
                if let Err(e) = client.close().await {
                    ::log::warn!("Failed to close WebDriver client: {}", e);
                }
            }
            ::log::debug!("Page analyzer task finished");
        });

        tx
    }

    /// Navigate to the URL, let dynamic content settle, and extract a
    /// snapshot from the rendered source.
    async fn analyze(&mut self, url: &str) -> Result<PageSnapshot, AnalysisError> {
        if self.client.is_none() {
            ::log::debug!("Connecting to WebDriver at {}", self.webdriver_url);
            let client = ClientBuilder::native()
                .connect(&self.webdriver_url)
                .await
                .map_err(|e| {
                    AnalysisError::Transport(format!(
                        "failed to connect to WebDriver at {}: {}",
                        self.webdriver_url, e
                    ))
                })?;
            self.client = Some(client);
        }
        // We now have a client - unwrap safely
        let client = self.client.as_ref().unwrap();

        client
            .goto(url)
            .await
            .map_err(|e| AnalysisError::Transport(format!("failed to load {}: {}", url, e)))?;

        tokio::time::sleep(self.settle_delay).await;

        let html = client
            .source()
            .await
            .map_err(|e| AnalysisError::Transport(format!("failed to read page source: {}", e)))?;

        let base = Url::parse(url)
            .map_err(|e| AnalysisError::AccessDenied(format!("invalid page URL: {}", e)))?;

        Ok(analyze_html(&html, &base, &self.heuristics))
    }
}

/// Builds a PageSnapshot from raw HTML; the single source of truth for the
/// extraction rules.
///
/// Synchronous and side-effect free so the full extraction pipeline can be
/// exercised without a browser. Per-element failures inside the extraction
/// helpers are skips, never fatal.
pub fn analyze_html(html: &str, base: &Url, heuristics: &Heuristics) -> PageSnapshot {
    let doc = Html::parse_document(html);

    let text = extract::page_text(&doc);
    let lower_text = text.to_lowercase();

    let links = extract::extract_links(&doc, base);
    let hrefs = extract::anchor_hrefs(&doc, base);

    let snapshot = PageSnapshot {
        url: base.to_string(),
        title: extract::page_title(&doc),
        motive_indicators: heuristics.detect_motive_indicators(&hrefs, &lower_text),
        author: extract::extract_author(&doc, heuristics.byline_selectors()),
        excerpt: extract::excerpt(&text),
        bias_score: heuristics.calculate_bias_score(&lower_text),
        links,
    };

    ::log::debug!(
        "Snapshot for {}: {} links, {} indicators, bias score {}",
        snapshot.url,
        snapshot.links.len(),
        snapshot.motive_indicators.len(),
        snapshot.bias_score
    );

    snapshot
}
