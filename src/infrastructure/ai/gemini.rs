//! Gemini REST client
//!
//! Talks to the `generateContent` endpoint with the reservation tool
//! declared, and decodes the provider response into a `ModelReply` at
//! this boundary so nothing upstream handles provider JSON.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::application::ports::{ConciergeModel, ModelError, ModelReply, ReservationCall};

const RESERVATION_TOOL: &str = "makeReservation";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ModelError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ModelError::Call(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn request_body(system_instruction: &str, user_input: &str) -> Value {
        json!({
            "systemInstruction": {
                "parts": [{ "text": system_instruction }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": user_input }]
            }],
            "tools": [{
                "functionDeclarations": [{
                    "name": RESERVATION_TOOL,
                    "description": "Books a table at a restaurant for the user.",
                    "parameters": {
                        "type": "OBJECT",
                        "properties": {
                            "restaurant_id": {
                                "type": "STRING",
                                "description": "The numeric ID of the restaurant from the availability list."
                            },
                            "date": {
                                "type": "STRING",
                                "description": "Reservation date in YYYY-MM-DD format."
                            },
                            "time": {
                                "type": "STRING",
                                "description": "Reservation time in HH:MM format."
                            },
                            "party_size": {
                                "type": "INTEGER",
                                "description": "Number of guests."
                            }
                        },
                        "required": ["restaurant_id", "date", "time", "party_size"]
                    }
                }]
            }],
            "generationConfig": {
                "temperature": 0.5,
                "maxOutputTokens": 500
            }
        })
    }
}

#[async_trait]
impl ConciergeModel for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        user_input: &str,
    ) -> Result<ModelReply, ModelError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&Self::request_body(system_instruction, user_input))
            .send()
            .await
            .map_err(|e| ModelError::Call(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Call(format!("HTTP {}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;
        Ok(decode_reply(parsed))
    }
}

// ── Response decoding ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
    #[serde(rename = "functionCall")]
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

/// A tool call wins over text; text over nothing. Unknown tool names and
/// malformed arguments fall through to the remaining parts.
fn decode_reply(response: GenerateContentResponse) -> ModelReply {
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default();

    let mut text: Option<String> = None;
    for part in parts {
        if let Some(call) = part.function_call {
            if call.name == RESERVATION_TOOL {
                match extract_call(&call.args) {
                    Some(reservation) => return ModelReply::ToolCall(reservation),
                    None => warn!("Discarding {} call with malformed args", RESERVATION_TOOL),
                }
            } else {
                warn!("Model called undeclared function: {}", call.name);
            }
        } else if text.is_none() {
            if let Some(t) = part.text {
                if !t.trim().is_empty() {
                    text = Some(t);
                }
            }
        }
    }

    match text {
        Some(t) => ModelReply::Text(t),
        None => ModelReply::Empty,
    }
}

fn extract_call(args: &Value) -> Option<ReservationCall> {
    // The schema declares restaurant_id as a string, but models sometimes
    // send a number anyway. Accept both.
    let restaurant_id = match args.get("restaurant_id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let date = args.get("date")?.as_str()?.to_string();
    let time = args.get("time")?.as_str()?.to_string();
    let party_size = match args.get("party_size")? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.parse().ok()?,
        _ => return None,
    };

    Some(ReservationCall {
        restaurant_id,
        date,
        time,
        party_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> ModelReply {
        decode_reply(serde_json::from_str(raw).unwrap())
    }

    #[test]
    fn decodes_text_part() {
        let reply = decode(
            r#"{"candidates":[{"content":{"parts":[{"text":"Try Santoku for sushi."}]}}]}"#,
        );
        assert_eq!(reply, ModelReply::Text("Try Santoku for sushi.".to_string()));
    }

    #[test]
    fn decodes_reservation_call() {
        let reply = decode(
            r#"{"candidates":[{"content":{"parts":[{"functionCall":{
                "name":"makeReservation",
                "args":{"restaurant_id":"7","date":"2026-09-01","time":"19:30","party_size":2}
            }}]}}]}"#,
        );
        assert_eq!(
            reply,
            ModelReply::ToolCall(ReservationCall {
                restaurant_id: "7".to_string(),
                date: "2026-09-01".to_string(),
                time: "19:30".to_string(),
                party_size: 2,
            })
        );
    }

    #[test]
    fn tool_call_wins_over_text() {
        let reply = decode(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"Booking now."},
                {"functionCall":{"name":"makeReservation",
                 "args":{"restaurant_id":7,"date":"2026-09-01","time":"19:30","party_size":"4"}}}
            ]}}]}"#,
        );
        // Numeric id and string party size are both coerced
        assert_eq!(
            reply,
            ModelReply::ToolCall(ReservationCall {
                restaurant_id: "7".to_string(),
                date: "2026-09-01".to_string(),
                time: "19:30".to_string(),
                party_size: 4,
            })
        );
    }

    #[test]
    fn empty_candidates_decode_to_empty() {
        assert_eq!(decode(r#"{"candidates":[]}"#), ModelReply::Empty);
        assert_eq!(decode(r#"{}"#), ModelReply::Empty);
    }

    #[test]
    fn malformed_args_fall_back_to_text() {
        let reply = decode(
            r#"{"candidates":[{"content":{"parts":[
                {"functionCall":{"name":"makeReservation","args":{"date":"2026-09-01"}}},
                {"text":"Which restaurant did you mean?"}
            ]}}]}"#,
        );
        assert_eq!(
            reply,
            ModelReply::Text("Which restaurant did you mean?".to_string())
        );
    }

    #[test]
    fn unknown_function_is_ignored() {
        let reply = decode(
            r#"{"candidates":[{"content":{"parts":[
                {"functionCall":{"name":"cancelReservation","args":{}}}
            ]}}]}"#,
        );
        assert_eq!(reply, ModelReply::Empty);
    }
}
