//! Client for the hosted generative-AI endpoint.
//!
//! Every request pins a fixed instruction and a structured output schema so
//! the model is constrained to return a JSON array of the expected shape.
//! An empty model response parses as an empty result rather than an error.

use serde::{Deserialize, Serialize};

use crate::http_client;
use crate::school::DskpDraft;

const MAX_GENERATE_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

const EXTRACT_DSKP_INSTRUCTION: &str = "Extract Standard Kandungan (SK) and Standard Pembelajaran (SP) from this DSKP document. Return as a JSON array of objects with 'sk' and 'sp' fields.";
const EXTRACT_ROSTER_INSTRUCTION: &str =
    "Extract a list of student names from this file. Return as a JSON array of strings.";

/// Client bound to one endpoint base URL and model identifier.
///
/// Calls are blocking; callers run them off the UI thread. There is no
/// retry: each flow issues exactly one request.
#[derive(Debug, Clone)]
pub struct AssistApi {
    base_url: String,
    model: String,
}

/// Errors produced by assist calls.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("API key rejected")]
    Unauthorized,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Rate limited; try again later")]
    RateLimited,
    #[error("Server error: {0}")]
    ServerError(String),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("JSON error: {0}")]
    Json(String),
}

#[derive(Clone, Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Clone, Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Clone, Debug, Serialize)]
struct RequestPart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData<'a>>,
}

#[derive(Clone, Debug, Serialize)]
struct InlineData<'a> {
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Clone, Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct GenerateResponseWire {
    #[serde(default)]
    candidates: Vec<CandidateWire>,
}

#[derive(Clone, Debug, Deserialize)]
struct CandidateWire {
    content: Option<CandidateContentWire>,
}

#[derive(Clone, Debug, Deserialize)]
struct CandidateContentWire {
    #[serde(default)]
    parts: Vec<CandidatePartWire>,
}

#[derive(Clone, Debug, Deserialize)]
struct CandidatePartWire {
    text: Option<String>,
}

impl AssistApi {
    /// Create a client for the given base URL (no trailing slash) and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Extract SK/SP pairs from a base64-encoded document.
    pub fn extract_dskp_items(
        &self,
        api_key: &str,
        document_base64: &str,
        mime_type: &str,
    ) -> Result<Vec<DskpDraft>, AssistError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![
                    text_part(EXTRACT_DSKP_INSTRUCTION),
                    inline_data_part(document_base64, mime_type),
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: draft_array_schema(),
            },
        };
        let text = self.generate_text(api_key, &request)?;
        parse_drafts(&text)
    }

    /// Suggest SK/SP pairs for a subject at a year level.
    pub fn suggest_dskp_items(
        &self,
        api_key: &str,
        subject_name: &str,
        year_level: &str,
    ) -> Result<Vec<DskpDraft>, AssistError> {
        let prompt = suggestion_prompt(subject_name, year_level);
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![text_part(&prompt)],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: draft_array_schema(),
            },
        };
        let text = self.generate_text(api_key, &request)?;
        parse_drafts(&text)
    }

    /// Extract student names from a base64-encoded document.
    pub fn extract_student_names(
        &self,
        api_key: &str,
        document_base64: &str,
        mime_type: &str,
    ) -> Result<Vec<String>, AssistError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![
                    text_part(EXTRACT_ROSTER_INSTRUCTION),
                    inline_data_part(document_base64, mime_type),
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: string_array_schema(),
            },
        };
        let text = self.generate_text(api_key, &request)?;
        parse_names(&text)
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn generate_text(
        &self,
        api_key: &str,
        request: &GenerateRequest<'_>,
    ) -> Result<String, AssistError> {
        let url = self.generate_url();
        let req = http_client::agent()
            .post(&url)
            .set("Content-Type", "application/json")
            .set("x-goog-api-key", api_key.trim());

        let response = match req.send_json(request) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_limited(response, MAX_GENERATE_RESPONSE_BYTES)
                    .unwrap_or_else(|err| err);
                return Err(map_status_error(code, body));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(AssistError::Transport(err.to_string()));
            }
        };

        let body = read_body_limited(response, MAX_GENERATE_RESPONSE_BYTES)
            .map_err(AssistError::Json)?;
        response_text(&body)
    }
}

fn text_part(text: &str) -> RequestPart<'_> {
    RequestPart {
        text: Some(text),
        inline_data: None,
    }
}

fn inline_data_part<'a>(data: &'a str, mime_type: &'a str) -> RequestPart<'a> {
    RequestPart {
        text: None,
        inline_data: Some(InlineData { mime_type, data }),
    }
}

fn suggestion_prompt(subject_name: &str, year_level: &str) -> String {
    format!(
        "Suggest a list of Standard Kandungan (SK) and Standard Pembelajaran (SP) for the subject \"{subject_name}\" at year level \"{year_level}\" based on the Malaysian DSKP curriculum. Return as a JSON array of objects with 'sk' and 'sp' fields. Provide at least 5 relevant entries."
    )
}

fn draft_array_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "sk": { "type": "STRING" },
                "sp": { "type": "STRING" }
            },
            "required": ["sk", "sp"]
        }
    })
}

fn string_array_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": { "type": "STRING" }
    })
}

fn map_status_error(code: u16, body: String) -> AssistError {
    match code {
        400 => AssistError::BadRequest(body),
        401 | 403 => AssistError::Unauthorized,
        429 => AssistError::RateLimited,
        500..=599 => AssistError::ServerError(body),
        _ => AssistError::Transport(format!("HTTP {code}: {body}")),
    }
}

/// Concatenate the text parts of the first candidate.
///
/// A response with no candidates, no content, or no text parts yields an
/// empty string, which downstream parsers treat as an empty result.
fn response_text(body: &str) -> Result<String, AssistError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let parsed: GenerateResponseWire = serde_json::from_str(trimmed)
        .map_err(|err| AssistError::Json(format!("{err}: {trimmed}")))?;
    let Some(candidate) = parsed.candidates.into_iter().next() else {
        return Ok(String::new());
    };
    let Some(content) = candidate.content else {
        return Ok(String::new());
    };
    let mut text = String::new();
    for part in content.parts {
        if let Some(part_text) = part.text {
            text.push_str(&part_text);
        }
    }
    Ok(text)
}

fn parse_drafts(text: &str) -> Result<Vec<DskpDraft>, AssistError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(|err| AssistError::Json(format!("{err}: {trimmed}")))
}

fn parse_names(text: &str) -> Result<Vec<String>, AssistError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(|err| AssistError::Json(format!("{err}: {trimmed}")))
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, String> {
    let bytes = http_client::read_response_bytes(response, max_bytes)
        .map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}
