//! REST client for the school backend's class, subject, and DSKP endpoints.

use serde::{Deserialize, Serialize};

use crate::http_client;

use super::{ClassId, DskpDraft, DskpItem, ItemId, SchoolClass, Subject, SubjectId};

const MAX_LIST_RESPONSE_BYTES: usize = 1024 * 1024;
const MAX_CREATE_RESPONSE_BYTES: usize = 64 * 1024;

/// Client bound to one backend base URL.
///
/// Every call is blocking; callers run them off the UI thread.
#[derive(Debug, Clone)]
pub struct SchoolApi {
    base_url: String,
}

/// Errors produced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    BadRequest(String),
    #[error("Not authorized by the backend")]
    Unauthorized,
    #[error("Not found: {0}")]
    NotFound(String),
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
struct CreateSubjectRequest<'a> {
    name: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
struct CreatedWire {
    id: Option<String>,
    error: Option<String>,
    message: Option<String>,
}

impl SchoolApi {
    /// Create a client for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Fetch every class known to the backend.
    pub fn list_classes(&self) -> Result<Vec<SchoolClass>, ApiError> {
        let url = format!("{}/api/classes", self.base_url);
        self.get_list(&url)
    }

    /// Fetch the subjects belonging to one class.
    pub fn list_subjects(&self, class_id: &ClassId) -> Result<Vec<Subject>, ApiError> {
        let url = format!("{}/api/classes/{}/subjects", self.base_url, class_id);
        self.get_list(&url)
    }

    /// Create a subject under a class and return the id the backend issued.
    pub fn create_subject(&self, class_id: &ClassId, name: &str) -> Result<SubjectId, ApiError> {
        let url = format!("{}/api/classes/{}/subjects", self.base_url, class_id);
        let body = self.post_json(&url, &CreateSubjectRequest { name })?;
        parse_created_id(&body).map(SubjectId::from)
    }

    /// Fetch the DSKP items belonging to one subject.
    pub fn list_items(&self, subject_id: &SubjectId) -> Result<Vec<DskpItem>, ApiError> {
        let url = format!("{}/api/subjects/{}/dskp", self.base_url, subject_id);
        self.get_list(&url)
    }

    /// Persist one SK/SP pair under a subject and return the issued id.
    pub fn create_item(&self, subject_id: &SubjectId, draft: &DskpDraft) -> Result<ItemId, ApiError> {
        let url = format!("{}/api/subjects/{}/dskp", self.base_url, subject_id);
        let body = self.post_json(&url, draft)?;
        parse_created_id(&body).map(ItemId::from)
    }

    fn get_list<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, ApiError> {
        let response = match http_client::agent()
            .get(url)
            .set("Accept", "application/json")
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_limited(response, MAX_LIST_RESPONSE_BYTES)
                    .unwrap_or_else(|err| err);
                return Err(map_status_error(code, body));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(ApiError::Transport(err.to_string()));
            }
        };
        let body =
            read_body_limited(response, MAX_LIST_RESPONSE_BYTES).map_err(ApiError::Json)?;
        serde_json::from_str(&body).map_err(|err| ApiError::Json(format!("{err}: {body}")))
    }

    fn post_json(&self, url: &str, payload: &impl Serialize) -> Result<String, ApiError> {
        let request = http_client::agent()
            .post(url)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");
        let response = match request.send_json(payload) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_limited(response, MAX_CREATE_RESPONSE_BYTES)
                    .unwrap_or_else(|err| err);
                return Err(map_status_error(code, body));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(ApiError::Transport(err.to_string()));
            }
        };
        read_body_limited(response, MAX_CREATE_RESPONSE_BYTES).map_err(ApiError::Json)
    }
}

fn map_status_error(code: u16, body: String) -> ApiError {
    match code {
        400 => ApiError::BadRequest(body),
        401 | 403 => ApiError::Unauthorized,
        404 => ApiError::NotFound(body),
        429 => ApiError::RateLimited,
        500..=599 => ApiError::ServerError(body),
        _ => ApiError::Transport(format!("HTTP {code}: {body}")),
    }
}

fn parse_created_id(body: &str) -> Result<String, ApiError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Json("Empty response body".to_string()));
    }
    let parsed: CreatedWire = serde_json::from_str(trimmed)
        .map_err(|err| ApiError::Json(format!("{err}: {trimmed}")))?;
    if let Some(id) = parsed.id {
        if !id.is_empty() {
            return Ok(id);
        }
    }
    let message = parsed
        .error
        .or(parsed.message)
        .unwrap_or_else(|| "Missing id in response".to_string());
    Err(ApiError::Json(message))
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, String> {
    let bytes = http_client::read_response_bytes(response, max_bytes)
        .map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}
