use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{LinkId, ShortCode};

/// One row of the server's link directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: LinkId,
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_clicked_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/links`. The `code` key is only present when the user
/// asked for a custom code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreateLinkRequest {
    WithCode { url: String, code: ShortCode },
    WithoutCode { url: String },
}

impl CreateLinkRequest {
    pub fn from_inputs(url: &str, code: &str) -> Self {
        let url = url.to_string();
        match ShortCode::from_input(code) {
            Some(code) => Self::WithCode { url, code },
            None => Self::WithoutCode { url },
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::WithCode { url, .. } | Self::WithoutCode { url } => url,
        }
    }

    pub fn code(&self) -> Option<&ShortCode> {
        match self {
            Self::WithCode { code, .. } => Some(code),
            Self::WithoutCode { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLinkResponse {
    pub short_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}
