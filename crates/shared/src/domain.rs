use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound on custom code length accepted by the input surface.
pub const SHORT_CODE_MAX_LEN: usize = 8;

/// Server-assigned record identifier. Backends hand these out either as
/// integers or as strings; both are kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// A user-requested short code, trimmed and known to be non-empty.
///
/// Character set and uniqueness are checked by the server, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Returns `None` when the input is blank after trimming, which callers
    /// treat as "let the server pick a code".
    pub fn from_input(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code fits the length the input surfaces accept.
    pub fn within_input_limit(&self) -> bool {
        self.0.chars().count() <= SHORT_CODE_MAX_LEN
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
