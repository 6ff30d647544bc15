use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Trace IDs ---

/// Opaque correlation id attached to one request/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(String);

impl TraceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Use the caller's id when it has one, otherwise mint a fresh one.
    pub fn from_caller(supplied: Option<&str>) -> Self {
        match supplied.map(str::trim) {
            Some(id) if !id.is_empty() => Self(id.to_string()),
            _ => Self::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Briefs and strategies ---

/// Cleaned seller text plus a heuristic quality score in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedBrief {
    pub text: String,
    pub confidence: f64,
}

/// The six-field marketing content every caller expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStrategy {
    pub title: String,
    pub description: String,
    pub slogan: String,
    pub hashtags: Vec<String>,
    pub image_description: String,
    pub video_description: String,
}

/// Outcome flag reported alongside every pipeline response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_id_keeps_caller_value() {
        let id = TraceId::from_caller(Some("req-42"));
        assert_eq!(id.as_str(), "req-42");
    }

    #[test]
    fn trace_id_minted_for_blank_or_missing() {
        let blank = TraceId::from_caller(Some("   "));
        assert!(Uuid::parse_str(blank.as_str()).is_ok());

        let missing = TraceId::from_caller(None);
        assert!(Uuid::parse_str(missing.as_str()).is_ok());
        assert_ne!(blank, missing);
    }

    #[test]
    fn trace_id_serializes_as_plain_string() {
        let id = TraceId::from_caller(Some("abc"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn status_is_snake_case() {
        assert_eq!(serde_json::to_string(&Status::Success).unwrap(), "\"success\"");
        assert_eq!(serde_json::to_string(&Status::Error).unwrap(), "\"error\"");
    }
}
