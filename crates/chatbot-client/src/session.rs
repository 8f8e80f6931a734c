//! Session ownership.
//!
//! [`SessionManager`] holds the single "current session" slot. It is the
//! only writer; the conversation controller only reads it. A successful
//! creation overwrites the slot (last write wins) and the id is reused for
//! every later message.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info};

use chatbot_core::SessionId;
use chatbot_core::constants::origin_or_null;

use crate::backend::ChatBackend;
use crate::errors::{ClientError, ClientResult};

/// Creates and holds the backend session for one widget instance.
pub struct SessionManager {
    backend: Arc<dyn ChatBackend>,
    origin: String,
    current: RwLock<Option<SessionId>>,
}

impl SessionManager {
    /// Create a manager with no session yet.
    ///
    /// `origin` is the host page origin; `None` or blank reports `"null"`.
    pub fn new(backend: Arc<dyn ChatBackend>, origin: Option<&str>) -> Self {
        Self {
            backend,
            origin: origin_or_null(origin).to_string(),
            current: RwLock::new(None),
        }
    }

    /// Origin sent with session requests.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The current session id, if one has been created.
    pub fn session_id(&self) -> Option<SessionId> {
        self.current.read().clone()
    }

    /// Whether a session id is present.
    pub fn has_session(&self) -> bool {
        self.current.read().is_some()
    }

    /// Request a new session and store it on success.
    ///
    /// On failure the slot is left as it was and the error is logged; the
    /// returned `Err` is informational and may be ignored; an absent
    /// [`session_id`](Self::session_id) is the signal callers act on.
    pub async fn create_session(&self) -> ClientResult<SessionId> {
        info!(origin = %self.origin, "creating chat session");

        match self.backend.create_session(&self.origin).await {
            Ok(id) => {
                info!(session_id = %id, "chat session created");
                *self.current.write() = Some(id.clone());
                Ok(id)
            }
            Err(e) => {
                report_failure(&e, "failed to create chat session");
                Err(e)
            }
        }
    }
}

/// Log a backend failure with structured fields.
pub fn report_failure(err: &ClientError, what: &str) {
    match err {
        ClientError::Status { status, body } => {
            error!(status = *status, body = %body, category = err.category(), "{what}");
        }
        other => {
            error!(error = %other, category = other.category(), "{what}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
