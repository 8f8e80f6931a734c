//! Wire bodies for the two backend endpoints.

use chatbot_core::SessionId;
use serde::{Deserialize, Serialize};

/// Body of `POST {apiUrl}/widget/session`.
#[derive(Clone, Debug, Serialize)]
pub struct SessionRequest<'a> {
    /// Host page origin, or `"null"`.
    pub origin: &'a str,
}

/// Success body of the session endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct SessionResponse {
    /// Newly issued session id.
    pub session_id: SessionId,
}

/// Body of `POST {apiUrl}/chat`.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest<'a> {
    /// User text, already trimmed.
    pub message: &'a str,
    /// Session the message belongs to; mirrors the `X-Session-ID` header.
    pub session_id: &'a str,
}

/// Success body of the chat endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatResponse {
    /// Bot reply text.
    pub response: String,
}
