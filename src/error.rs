use thiserror::Error;

/// Errors that can surface during one analysis cycle.
///
/// Every variant is user-facing: the shell renders the message and returns
/// to the idle state, so none of these abort the process.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// API credential missing or still set to the placeholder value.
    #[error("API key not configured: {0}")]
    Configuration(String),

    /// The target URL uses an internal browser/extension scheme (or is not
    /// a valid URL at all) and must not be analyzed.
    #[error("cannot analyze this page: {0}")]
    AccessDenied(String),

    /// Message delivery to the page analyzer failed.
    #[error("page analyzer unreachable: {0}")]
    Transport(String),

    /// The model API answered with a non-success status.
    #[error("model API error: status {status} - {body}")]
    Upstream { status: u16, body: String },

    /// The HTTP call itself failed before any status was received.
    #[error("network error calling model API: {0}")]
    Network(String),

    /// The model reply contained no JSON object substring.
    #[error("could not find a JSON object in the model's reply")]
    NoJsonObject,

    /// The model reply contained a JSON-looking substring that failed to parse.
    #[error("model returned malformed JSON: {0}")]
    MalformedJson(String),

    /// An analysis is already in flight; the shell refuses overlapping runs.
    #[error("an analysis is already in progress")]
    Busy,
}
