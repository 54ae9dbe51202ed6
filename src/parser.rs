//! Decoding model replies into [`CommandSuggestion`]s.
//!
//! Decoding is all-or-nothing: the reply must contain one JSON object with
//! a non-empty `command`, a string `explanation` and a string `risk_level`.
//! `alternatives` may be omitted. Any other shape is a [`ParseError`] and no
//! partial suggestion is ever produced.

use crate::error::ParseError;
use crate::types::{CommandSuggestion, RiskLevel};
use serde::Deserialize;

#[derive(Deserialize)]
struct RawSuggestion {
    command: String,
    explanation: String,
    risk_level: String,
    #[serde(default)]
    alternatives: Vec<String>,
}

/// Decode `response`. Models often wrap the object in prose or a code fence,
/// so only the span from the first `{` to the last `}` is decoded.
pub fn parse(response: &str) -> Result<CommandSuggestion, ParseError> {
    let response = response.trim();
    let json_str = match (response.find('{'), response.rfind('}')) {
        (Some(s), Some(e)) if e > s => &response[s..=e],
        _ => {
            tracing::debug!(response = %preview(response), "no JSON object in model reply");
            return Err(ParseError::new("no JSON object in model reply"));
        }
    };

    let raw: RawSuggestion = serde_json::from_str(json_str).map_err(|e| {
        tracing::debug!(json = %preview(json_str), error = %e, "model reply did not match schema");
        ParseError::new(e.to_string())
    })?;

    if raw.command.trim().is_empty() {
        return Err(ParseError::new("`command` is empty"));
    }

    Ok(CommandSuggestion {
        command: raw.command,
        explanation: raw.explanation,
        risk_level: RiskLevel::parse(&raw.risk_level),
        alternatives: raw.alternatives,
    })
}

fn preview(s: &str) -> String {
    s.chars().take(300).collect()
}
