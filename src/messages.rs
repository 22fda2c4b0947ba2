use tokio::sync::oneshot;

use crate::Persona;
use crate::error::AnalysisError;
use crate::snapshot::PageSnapshot;

/// Request sent from the shell to the page analyzer task.
///
/// The reply channel carries one PageSnapshot (or the first error hit while
/// producing it); a dropped channel means the analyzer is gone and the
/// shell falls back to spawning a fresh one.
#[derive(Debug)]
pub enum AnalyzerRequest {
    /// Analyze the page at `url` and reply with its snapshot
    Analyze {
        url: String,
        reply: oneshot::Sender<Result<PageSnapshot, AnalysisError>>,
    },
}

/// Request sent from the shell to the report requester task
#[derive(Debug)]
pub enum RequesterRequest {
    /// Forward a snapshot to the model API and reply with the raw text of
    /// the first response choice
    SendToLlm {
        data: PageSnapshot,
        persona: Persona,
        reply: oneshot::Sender<Result<String, AnalysisError>>,
    },
}
