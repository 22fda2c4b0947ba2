use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::Persona;
use crate::config::LlmConfig;
use crate::error::AnalysisError;
use crate::messages::RequesterRequest;
use crate::snapshot::PageSnapshot;

/// Credential value shipped in config templates; treated the same as an
/// absent key
const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Sentinel returned when the API reply contains no usable choice
const NO_ANALYSIS: &str = "No analysis available";

/// How much of the snapshot excerpt is embedded in the user prompt
const PROMPT_EXCERPT_CHARS: usize = 1000;

/// Fixed analyst instruction: persona-aware role, strict JSON-only output
/// contract, the 5-field risk schema, a controlled vocabulary for
/// rhetorical tactics and the 0-100 scoring rubric. Treated as opaque
/// configuration; the requester never interprets it.
const SYSTEM_PROMPT: &str = r#"SYSTEM ROLE
You are "Spinguard Analyzer", an AI research agent that receives:
  (a) extracted text and metadata of a web page,
  (b) minimal context about the reader persona: {self | child | grandparent}.

Your job is to produce a concise, structured JSON report that helps the
reader judge credibility, hidden motives, and psychological manipulation
risks in <= 10 s.

High-level tasks
1. Extract and normalise core metadata: title, declared author(s).
2. Analyse content: claim & evidence map (up to 5 strongest factual claims),
   rhetorical tactics detected, sentiment distribution.
3. Score four risk dimensions 0-100: bias, manipulation, commercial motive,
   credibility.
4. Recommend ONE "reader action" string tailored to persona:
   self -> bias awareness advice; child -> critical-thinking prompt or
   "ask a parent" nudge; grandparent -> fraud/scam warning or safe next step.
5. Never echo large verbatim chunks (>50 words) of the original.

Output STRICTLY as valid JSON that matches the schema.
Do not wrap in markdown. Do not add keys.

JSON SCHEMA
{
  "title": String,
  "author": String|Null,
  "bias_score": 0-100,
  "manipulation_score": 0-100,
  "commercial_score": 0-100,
  "credibility_score": 0-100,
  "main_claims": [String],
  "warning_signs": [String],
  "recommendation": String
}

CONTROLLED VOCAB for rhetorical tactics
["fear appeal","loaded language","cherry picking","bandwagon","ad hominem",
 "outrage bait","emotion framing","false balance","social proof","urgency"]

SCORING RUBRIC (0-100)
0-20 None/N-A   21-40 Minimal   41-60 Moderate   61-80 High   81-100 Extreme

End of prompt."#;

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// The slice of the chat-completions response this component reads
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Turns one PageSnapshot into the raw text of one model reply via a single
/// HTTP call. No retries, no batching, no streaming; a malformed or absent
/// answer is surfaced to the user as-is rather than silently recovered.
pub struct ReportRequester {
    config: LlmConfig,
    client: reqwest::Client,
}

impl ReportRequester {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Spawn the requester as a task serving requests from a channel
    pub fn spawn(self) -> mpsc::Sender<RequesterRequest> {
        let (tx, mut rx) = mpsc::channel::<RequesterRequest>(16);

        tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                match request {
                    RequesterRequest::SendToLlm {
                        data,
                        persona,
                        reply,
                    } => {
                        let result = self.request_report(&data, persona).await;
                        if reply.send(result).is_err() {
                            ::log::warn!("Report reply channel dropped");
                        }
                    }
                }
            }
            ::log::debug!("Report requester task finished");
        });

        tx
    }

    /// Send the snapshot to the model API and return the raw reply text.
    ///
    /// The returned string is opaque at this layer; schema validation
    /// happens downstream where the reply is parsed.
    pub async fn request_report(
        &self,
        snapshot: &PageSnapshot,
        persona: Persona,
    ) -> Result<String, AnalysisError> {
        if self.config.api_key.is_empty() || self.config.api_key == PLACEHOLDER_API_KEY {
            return Err(AnalysisError::Configuration(
                "set OPENROUTER_API_KEY or the llm.api_key config field".to_string(),
            ));
        }

        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_user_prompt(snapshot, persona),
                },
            ],
            max_tokens: self.config.max_tokens,
        };

        ::log::info!(
            "Requesting report from {} (model {})",
            self.config.api_url,
            self.config.model
        );

        let mut request = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(referer) = &self.config.http_referer {
            request = request.header("HTTP-Referer", referer);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Upstream { status, body });
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        ::log::debug!("Model API call succeeded");

        Ok(result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_else(|| NO_ANALYSIS.to_string()))
    }
}

/// Builds the user instruction embedding the snapshot fields and the first
/// 1000 characters of the excerpt
fn build_user_prompt(snapshot: &PageSnapshot, persona: Persona) -> String {
    let excerpt: String = snapshot.excerpt.chars().take(PROMPT_EXCERPT_CHARS).collect();

    format!(
        "Analyze this webpage for ulterior motives, bias, and hidden agendas:\n\n\
         URL: {}\n\
         Title: {}\n\
         Author: {}\n\
         Motive Indicators: {}\n\
         Bias Score: {}/100\n\
         Reader Persona: {}\n\n\
         Excerpt:\n{}...\n\n\
         Return a JSON response following the schema with scores for bias, \
         manipulation, commercial motives, and credibility. Include main \
         claims, warning signs, and a recommendation.",
        snapshot.url,
        snapshot.title,
        snapshot.author.as_deref().unwrap_or("Unknown"),
        snapshot.motive_indicators.join(", "),
        snapshot.bias_score,
        persona,
        excerpt,
    )
}
