//! In-memory backend fake shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use chatbot_client::{ChatBackend, ClientError, ClientResult};
use chatbot_core::SessionId;

/// Backend whose session and chat results are scripted in order.
///
/// An exhausted session script answers 503; an exhausted reply script
/// echoes the message.
#[derive(Default)]
pub(crate) struct FakeBackend {
    sessions: Mutex<VecDeque<ClientResult<SessionId>>>,
    replies: Mutex<VecDeque<ClientResult<String>>>,
    session_delay: Option<Duration>,
    chat_delay: Option<Duration>,
    session_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    sent: Mutex<Vec<(SessionId, String)>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_session(self, result: ClientResult<SessionId>) -> Self {
        self.sessions.lock().push_back(result);
        self
    }

    pub(crate) fn with_reply(self, result: ClientResult<String>) -> Self {
        self.replies.lock().push_back(result);
        self
    }

    pub(crate) fn with_session_delay(mut self, delay: Duration) -> Self {
        self.session_delay = Some(delay);
        self
    }

    pub(crate) fn with_chat_delay(mut self, delay: Duration) -> Self {
        self.chat_delay = Some(delay);
        self
    }

    pub(crate) fn session_calls(&self) -> usize {
        self.session_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn sent(&self) -> Vec<(SessionId, String)> {
        self.sent.lock().clone()
    }
}

pub(crate) fn status_error(status: u16) -> ClientError {
    ClientError::Status {
        status,
        body: "backend says no".to_string(),
    }
}

pub(crate) fn decode_error() -> ClientError {
    ClientError::Decode {
        message: "missing field `response`".to_string(),
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn create_session(&self, _origin: &str) -> ClientResult<SessionId> {
        let _ = self.session_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.session_delay {
            tokio::time::sleep(delay).await;
        }
        self.sessions
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(status_error(503)))
    }

    async fn send_chat(&self, session_id: &SessionId, message: &str) -> ClientResult<String> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.sent
            .lock()
            .push((session_id.clone(), message.to_string()));

        if let Some(delay) = self.chat_delay {
            tokio::time::sleep(delay).await;
        }

        let _ = self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(format!("echo: {message}")))
    }
}
