//! Backend transport.
//!
//! [`ChatBackend`] is the seam between the widget and the network. The
//! production implementation, [`HttpChatBackend`], posts JSON with reqwest;
//! tests substitute in-memory fakes.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN};
use serde::de::DeserializeOwned;
use tracing::debug;

use chatbot_core::SessionId;
use chatbot_core::constants::{API_KEY_HEADER, CHAT_PATH, SESSION_ID_HEADER, SESSION_PATH};
use chatbot_settings::WidgetConfig;

use crate::errors::{ClientError, ClientResult};
use crate::types::{ChatRequest, ChatResponse, SessionRequest, SessionResponse};

/// Backend operations the widget depends on.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Open a conversation session for `origin`.
    async fn create_session(&self, origin: &str) -> ClientResult<SessionId>;

    /// Send one user message and return the bot reply.
    async fn send_chat(&self, session_id: &SessionId, message: &str) -> ClientResult<String>;
}

/// reqwest-backed [`ChatBackend`].
pub struct HttpChatBackend {
    /// HTTP client (reused across requests).
    client: reqwest::Client,
    api_key: String,
    session_url: String,
    chat_url: String,
}

impl HttpChatBackend {
    /// Build a backend for the configured API URL, key, and timeout.
    pub fn new(config: &WidgetConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("chatbot-widget/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            session_url: config.api_endpoint(SESSION_PATH),
            chat_url: config.api_endpoint(CHAT_PATH),
        })
    }

    /// Headers common to both endpoints.
    fn base_headers(&self) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let _ = headers.insert(API_KEY_HEADER, header_value(API_KEY_HEADER, &self.api_key)?);
        Ok(headers)
    }

    /// POST a JSON body and decode a 2xx JSON reply.
    async fn post_json<B, R>(&self, url: &str, headers: HeaderMap, body: &B) -> ClientResult<R>
    where
        B: serde::Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "backend responded");

        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })
    }
}

fn header_value(name: &str, value: &str) -> ClientResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
        message: format!("{name}: {e}"),
    })
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn create_session(&self, origin: &str) -> ClientResult<SessionId> {
        let mut headers = self.base_headers()?;
        let _ = headers.insert(ORIGIN, header_value("Origin", origin)?);

        let resp: SessionResponse = self
            .post_json(&self.session_url, headers, &SessionRequest { origin })
            .await?;
        Ok(resp.session_id)
    }

    async fn send_chat(&self, session_id: &SessionId, message: &str) -> ClientResult<String> {
        let mut headers = self.base_headers()?;
        let _ = headers.insert(
            SESSION_ID_HEADER,
            header_value(SESSION_ID_HEADER, session_id.as_str())?,
        );

        let resp: ChatResponse = self
            .post_json(
                &self.chat_url,
                headers,
                &ChatRequest {
                    message,
                    session_id: session_id.as_str(),
                },
            )
            .await?;
        Ok(resp.response)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
