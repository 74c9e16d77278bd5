use serde::{Deserialize, Serialize};

/// JSON error body some servers attach to non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "error", alias = "detail")]
    pub message: String,
}

/// Best-effort message for a failed response.
///
/// Prefers a JSON `message` field, then the raw body text, then the
/// status reason phrase.
pub fn extract_error_message(body: &str, reason_phrase: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return reason_phrase.to_string();
    }
    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(parsed) if !parsed.message.trim().is_empty() => parsed.message,
        _ => trimmed.to_string(),
    }
}
