use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure body returned by the link API on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Server message, ignoring empty strings.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }
}

/// A request the server answered with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("server rejected request with status {status}{}", message_suffix(.body))]
pub struct ApiRejection {
    pub status: u16,
    pub body: ApiErrorBody,
}

impl ApiRejection {
    pub fn new(status: u16, body: ApiErrorBody) -> Self {
        Self { status, body }
    }

    pub fn message(&self) -> Option<&str> {
        self.body.message()
    }
}

fn message_suffix(body: &ApiErrorBody) -> String {
    body.message()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}
