//! Wire format of the OpenAI-compatible chat completions API.
//!
//! Kept free of any transport so both the request body and the reply
//! extraction can be checked without a network.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use carechat_types::{RemoteError, TransportError, config::CompletionConfig};

/// Reply used when the service answered but produced no usable candidate
pub const NO_ANSWER_PLACEHOLDER: &str = "I couldn't generate a proper answer.";

/// Request body. Always exactly one system turn and one user turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl CompletionRequest {
    pub fn single_turn(config: &CompletionConfig, user_text: &str) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system".to_string(),
                    content: config.system_prompt.clone(),
                },
                WireMessage {
                    role: "user".to_string(),
                    content: user_text.to_string(),
                },
            ],
        }
    }
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    #[serde(default)]
    message: Option<ApiMessage>,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull `choices[0].message.content` out of a successful response body.
///
/// Invalid JSON is a transport failure. Valid JSON of any other shape,
/// or an empty first candidate, yields [`NO_ANSWER_PLACEHOLDER`].
pub fn extract_reply(body: &str) -> Result<String, RemoteError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| RemoteError::Transport(TransportError::Decode(e.to_string())))?;

    let content = serde_json::from_value::<ApiResponse>(value)
        .ok()
        .and_then(|r| r.choices.into_iter().next())
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|text| !text.trim().is_empty());

    Ok(content.unwrap_or_else(|| NO_ANSWER_PLACEHOLDER.to_string()))
}

/// Classify a finished HTTP exchange.
///
/// `body` is the outcome of reading the response text. A non-2xx status is
/// `HttpStatus` whatever the body says; the body is only logged.
pub fn read_response(
    ok: bool,
    status: u16,
    body: Result<String, String>,
) -> Result<String, RemoteError> {
    if !ok {
        let text = body.unwrap_or_else(|_| "unknown error".to_string());
        log::error!("Completion API returned HTTP {}: {}", status, text);
        return Err(RemoteError::HttpStatus(status));
    }

    let text = body.map_err(TransportError::Decode)?;
    extract_reply(&text)
}
