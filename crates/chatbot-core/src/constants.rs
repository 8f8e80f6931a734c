//! Wire-level constants shared by the client and the widget.

/// Header carrying the static widget API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Header carrying the backend session id on chat requests.
pub const SESSION_ID_HEADER: &str = "X-Session-ID";

/// Origin reported when the host cannot provide one (sandboxed frames, CLI).
pub const NULL_ORIGIN: &str = "null";

/// Path of the session creation endpoint, relative to the API base URL.
pub const SESSION_PATH: &str = "/widget/session";

/// Path of the chat endpoint, relative to the API base URL.
pub const CHAT_PATH: &str = "/chat";

/// Resolve the origin to report, falling back to [`NULL_ORIGIN`].
pub fn origin_or_null(origin: Option<&str>) -> &str {
    match origin {
        Some(o) if !o.trim().is_empty() => o,
        _ => NULL_ORIGIN,
    }
}
