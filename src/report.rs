use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Structured risk assessment returned by the external model.
///
/// Every field is optional on the wire; the renderer substitutes safe
/// placeholders for anything the model left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub bias_score: u8,

    #[serde(default)]
    pub manipulation_score: u8,

    #[serde(default)]
    pub commercial_score: u8,

    #[serde(default)]
    pub credibility_score: u8,

    /// Up to 5 claims, ordered by salience as judged by the model
    #[serde(default)]
    pub main_claims: Vec<String>,

    #[serde(default)]
    pub warning_signs: Vec<String>,

    #[serde(default)]
    pub recommendation: Option<String>,
}

/// Parses an AnalysisReport out of a free-text model reply.
///
/// The model is instructed to answer with bare JSON but frequently wraps it
/// in chatter or code fences, so this is a best-effort extraction with two
/// distinct failure modes: no JSON object present at all, or a candidate
/// object that does not parse.
pub fn parse_report(raw: &str) -> Result<AnalysisReport, AnalysisError> {
    let candidate = extract_json_object(raw).ok_or(AnalysisError::NoJsonObject)?;

    let mut report: AnalysisReport = serde_json::from_str(candidate)
        .map_err(|e| AnalysisError::MalformedJson(e.to_string()))?;

    // The scores are specified as 0-100; cap anything the model inflated
    report.bias_score = report.bias_score.min(100);
    report.manipulation_score = report.manipulation_score.min(100);
    report.commercial_score = report.commercial_score.min(100);
    report.credibility_score = report.credibility_score.min(100);

    Ok(report)
}

/// Finds the first balanced JSON object substring, tracking string literals
/// and escapes so braces inside values don't end the scan early.
///
/// Returns the unbalanced tail when the braces never close; the JSON parser
/// then reports the malformed input with its own diagnostics.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    Some(&text[start..])
}
