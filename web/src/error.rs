use serde_json::Value;
use thiserror::Error;

/// Every failure the booking flows can surface to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    /// Caught before any request is sent.
    #[error("{0}")]
    Validation(String),
    /// HTTP 409: the chosen slot was taken in the meantime.
    #[error("{0}")]
    Conflict(String),
    /// Transport failure or client-side timeout.
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The primary write succeeded but a follow-up did not.
    #[error("{completed}, but {failed}")]
    PartialFailure { completed: String, failed: String },
    #[error("Unexpected response from the server: {0}")]
    Decode(String),
}

pub const CONFLICT_FALLBACK: &str = "That time was just booked by someone else. Please pick another slot.";

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BookingError::Validation(message.into())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, BookingError::Conflict(_))
    }

    /// Maps a non-2xx response onto an error, preferring the server's own
    /// `message`/`error` text.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = error_message(body);
        match status {
            409 => BookingError::Conflict(message.unwrap_or_else(|| CONFLICT_FALLBACK.to_string())),
            _ => BookingError::Rejected {
                status,
                message: message.unwrap_or_else(|| format!("Request failed with status {status}")),
            },
        }
    }
}

impl From<reqwest::Error> for BookingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BookingError::Network("the request timed out".to_string())
        } else if err.is_decode() {
            BookingError::Decode(err.to_string())
        } else {
            BookingError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Decode(err.to_string())
    }
}

fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| match map.get(*key) {
                Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
                Some(Value::Null) | None => None,
                Some(Value::String(_)) => None,
                Some(other) => Some(other.to_string()),
            }),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}
