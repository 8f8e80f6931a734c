//! Widget configuration types.
//!
//! Field names are camelCase on the wire to match the option keys embedders
//! pass at initialization. The container carries `#[serde(default)]`, so any
//! subset of keys deserializes with the remaining fields at their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8001/api";

/// Default surface anchor id.
pub const DEFAULT_WIDGET_ID: &str = "chatbot-widget";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Lower bound applied to the request timeout.
pub const MIN_REQUEST_TIMEOUT_MS: u64 = 1_000;

/// Screen corner the closed widget docks to.
///
/// Only `"bottom-left"` selects the left corner; every other string,
/// including unknown ones, means bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    /// Docked to the bottom-right corner.
    #[default]
    BottomRight,
    /// Docked to the bottom-left corner.
    BottomLeft,
}

impl Position {
    /// Surface class name for this position.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
        }
    }

    /// Parse leniently: anything but `bottom-left` is bottom-right.
    pub fn parse_lossy(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("bottom-left") {
            Self::BottomLeft
        } else {
            Self::BottomRight
        }
    }
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        Self::parse_lossy(&s)
    }
}

impl From<Position> for String {
    fn from(p: Position) -> Self {
        p.as_str().to_owned()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved widget configuration.
///
/// Immutable once produced by [`resolve`](crate::resolve); the widget only
/// ever reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// Credential sent as the `X-API-Key` header.
    pub api_key: String,
    /// Backend base URL; endpoint paths are appended to it.
    pub api_url: String,
    /// Surface anchor id, also the registry key.
    pub widget_id: String,
    /// Docking corner.
    pub position: Position,
    /// Header and user bubble color.
    pub primary_color: String,
    /// Text color on primary-colored elements.
    pub text_color: String,
    /// Window background color.
    pub background_color: String,
    /// Window corner radius (CSS length).
    pub border_radius: String,
    /// Header title.
    pub title: String,
    /// Header subtitle.
    pub subtitle: String,
    /// First bot bubble shown on render.
    pub welcome_message: String,
    /// Per-request HTTP timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Unrecognized keys, kept but never interpreted.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            widget_id: DEFAULT_WIDGET_ID.to_string(),
            position: Position::BottomRight,
            primary_color: "#2563eb".to_string(),
            text_color: "#ffffff".to_string(),
            background_color: "#ffffff".to_string(),
            border_radius: "12px".to_string(),
            title: "Assistant".to_string(),
            subtitle: "How can I help you?".to_string(),
            welcome_message: "Hello! How can I assist you today?".to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            extra: serde_json::Map::new(),
        }
    }
}

impl WidgetConfig {
    /// Join an endpoint path onto the configured base URL.
    pub fn api_endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Request timeout, never below [`MIN_REQUEST_TIMEOUT_MS`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(MIN_REQUEST_TIMEOUT_MS))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
