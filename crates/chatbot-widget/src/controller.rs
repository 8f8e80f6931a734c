//! Conversation controller.
//!
//! Turns one user submission into at most one backend exchange:
//!
//! ```text
//! Idle -> EnsuringSession -> Sending -> Idle
//!            |                  |
//!            v                  v
//!        NoSession           Failed
//! ```
//!
//! Every path ends back in `Idle`. A failed exchange affects nothing but its
//! own transcript entries; the next submission starts fresh.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use chatbot_client::{ChatBackend, ClientError, SessionManager, report_failure};
use chatbot_core::{SessionId, Sender};

use crate::surface::PresentationSurface;

/// Shown when no session exists after the reattempt.
pub const NO_SESSION_APOLOGY: &str =
    "Sorry, I cannot connect to the chat service right now. Please try again.";

/// Shown when the backend answers with a non-2xx status.
pub const SERVICE_APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// Shown when the backend is unreachable or its reply is unreadable.
pub const CONNECTION_APOLOGY: &str = "Sorry, I'm having trouble connecting. Please try again.";

/// What a submission resolved to.
#[derive(Debug)]
pub enum SendOutcome {
    /// Empty or whitespace-only input; nothing happened.
    Ignored,
    /// The backend replied and the reply was shown.
    Replied {
        /// Reply text as shown.
        reply: String,
    },
    /// No session could be obtained; the no-session apology was shown.
    NoSession {
        /// Failure from the reattempt.
        error: ClientError,
    },
    /// The chat request failed; an apology was shown.
    Failed {
        /// Failure from the chat request.
        error: ClientError,
    },
}

impl SendOutcome {
    /// Whether the backend produced a reply.
    pub fn is_replied(&self) -> bool {
        matches!(self, Self::Replied { .. })
    }
}

/// Observable widget state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WidgetState {
    /// Window visible.
    pub is_open: bool,
    /// Typing indicator visible.
    pub is_typing: bool,
}

/// Drives a [`PresentationSurface`] from user input and backend replies.
pub struct ConversationController {
    session: Arc<SessionManager>,
    backend: Arc<dyn ChatBackend>,
    surface: Arc<dyn PresentationSurface>,
    state: Mutex<WidgetState>,
    /// Held for the whole send flow; one attempt in flight at a time.
    send_lock: tokio::sync::Mutex<()>,
}

impl ConversationController {
    /// Create a controller for a closed, idle widget.
    pub fn new(
        session: Arc<SessionManager>,
        backend: Arc<dyn ChatBackend>,
        surface: Arc<dyn PresentationSurface>,
    ) -> Self {
        Self {
            session,
            backend,
            surface,
            state: Mutex::new(WidgetState::default()),
            send_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Current open/typing state.
    pub fn state(&self) -> WidgetState {
        *self.state.lock()
    }

    /// Open or close the window. Returns the new open state.
    pub fn toggle(&self) -> bool {
        let is_open = {
            let mut state = self.state.lock();
            state.is_open = !state.is_open;
            state.is_open
        };
        self.surface.toggle_open_state();
        debug!(is_open, "widget toggled");
        is_open
    }

    /// Submit the surface's pending input.
    ///
    /// The input field is cleared only once a session is in hand; blank
    /// input and a no-session failure leave it as typed.
    pub async fn handle_submit(&self) -> SendOutcome {
        let text = self.surface.input_value();
        self.send(&text, true).await
    }

    /// Submit `text` as a user message.
    pub async fn submit(&self, text: &str) -> SendOutcome {
        self.send(text, false).await
    }

    async fn send(&self, text: &str, from_input: bool) -> SendOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SendOutcome::Ignored;
        }

        let _in_flight = self.send_lock.lock().await;

        let session_id = match self.ensure_session().await {
            Ok(id) => id,
            Err(error) => {
                warn!("no chat session available, message not sent");
                self.surface.append_message(NO_SESSION_APOLOGY, Sender::Bot);
                return SendOutcome::NoSession { error };
            }
        };

        if from_input {
            self.surface.clear_input();
        }
        self.surface.append_message(message, Sender::User);
        self.set_typing(true);
        debug!(session_id = %session_id, chars = message.chars().count(), "sending chat message");

        match self.backend.send_chat(&session_id, message).await {
            Ok(reply) => {
                self.set_typing(false);
                self.surface.append_message(&reply, Sender::Bot);
                SendOutcome::Replied { reply }
            }
            Err(error) => {
                report_failure(&error, "chat request failed");
                self.set_typing(false);
                self.surface.append_message(apology_for(&error), Sender::Bot);
                SendOutcome::Failed { error }
            }
        }
    }

    /// Reuse the current session, or make exactly one attempt to create one.
    async fn ensure_session(&self) -> Result<SessionId, ClientError> {
        if let Some(id) = self.session.session_id() {
            return Ok(id);
        }
        debug!("no session yet, reattempting creation");
        self.session.create_session().await
    }

    fn set_typing(&self, visible: bool) {
        {
            let mut state = self.state.lock();
            if state.is_typing == visible {
                return;
            }
            state.is_typing = visible;
        }
        self.surface.set_typing_indicator(visible);
    }
}

/// Fixed user-facing text for a failed chat request.
pub fn apology_for(error: &ClientError) -> &'static str {
    if error.is_connection_failure() {
        CONNECTION_APOLOGY
    } else {
        SERVICE_APOLOGY
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;
    use chatbot_core::Message;
    use chatbot_core::logging::capture_logs;
    use tracing::Level;

    use super::*;
    use crate::surface::MemorySurface;
    use crate::test_support::{FakeBackend, decode_error, status_error};

    struct Harness {
        backend: Arc<FakeBackend>,
        surface: Arc<MemorySurface>,
        session: Arc<SessionManager>,
        controller: ConversationController,
    }

    fn harness(backend: FakeBackend) -> Harness {
        let backend = Arc::new(backend);
        let surface = Arc::new(MemorySurface::new());
        let session = Arc::new(SessionManager::new(backend.clone(), Some("https://shop.example")));
        let controller = ConversationController::new(session.clone(), backend.clone(), surface.clone());
        Harness {
            backend,
            surface,
            session,
            controller,
        }
    }

    async fn connected(backend: FakeBackend) -> Harness {
        let h = harness(backend.with_session(Ok(SessionId::from("s1"))));
        let _ = h.session.create_session().await;
        h
    }

    #[tokio::test]
    async fn whitespace_input_is_ignored() {
        let h = connected(FakeBackend::new()).await;

        for text in ["", "   ", "\n\t "] {
            assert_matches!(h.controller.submit(text).await, SendOutcome::Ignored);
        }

        assert!(h.surface.transcript().is_empty());
        assert!(h.backend.sent().is_empty());
        assert!(h.surface.typing_changes().is_empty());
        assert_eq!(h.controller.state(), WidgetState::default());
    }

    #[tokio::test]
    async fn successful_send_appends_user_then_reply() {
        let h = connected(FakeBackend::new().with_reply(Ok("Hi there".into()))).await;

        let outcome = h.controller.submit("  Hello  ").await;

        assert_matches!(outcome, SendOutcome::Replied { ref reply } if reply == "Hi there");
        assert_eq!(
            h.surface.transcript(),
            vec![Message::user("Hello"), Message::bot("Hi there")]
        );
        assert_eq!(h.backend.sent(), vec![(SessionId::from("s1"), "Hello".to_string())]);
        assert_eq!(h.surface.typing_changes(), vec![true, false]);
        assert!(!h.controller.state().is_typing);
    }

    #[tokio::test]
    async fn session_is_reused_across_sends() {
        let h = connected(FakeBackend::new()).await;

        for text in ["one", "two", "three"] {
            assert!(h.controller.submit(text).await.is_replied());
        }

        assert_eq!(h.backend.session_calls(), 1);
        assert!(h.backend.sent().iter().all(|(id, _)| id.as_str() == "s1"));
    }

    #[tokio::test]
    async fn status_error_shows_service_apology() {
        let (logs, _guard) = capture_logs();
        let h = connected(FakeBackend::new().with_reply(Err(status_error(500)))).await;

        let outcome = h.controller.submit("Hello").await;

        assert_matches!(outcome, SendOutcome::Failed { error: ClientError::Status { status: 500, .. } });
        assert_eq!(h.surface.last_message(), Some(Message::bot(SERVICE_APOLOGY)));
        assert_eq!(h.surface.typing_changes(), vec![true, false]);
        assert!(logs.has_event(Level::ERROR, "chat request failed"));
    }

    #[tokio::test]
    async fn malformed_reply_shows_connection_apology() {
        let h = connected(FakeBackend::new().with_reply(Err(decode_error()))).await;

        let outcome = h.controller.submit("Hello").await;

        assert_matches!(outcome, SendOutcome::Failed { error: ClientError::Decode { .. } });
        assert_eq!(h.surface.last_message(), Some(Message::bot(CONNECTION_APOLOGY)));
        assert!(!h.controller.state().is_typing);
    }

    #[tokio::test]
    async fn failure_does_not_poison_next_send() {
        let h = connected(
            FakeBackend::new()
                .with_reply(Err(status_error(502)))
                .with_reply(Ok("Back again".into())),
        )
        .await;

        assert_matches!(h.controller.submit("first").await, SendOutcome::Failed { .. });
        assert_matches!(h.controller.submit("second").await, SendOutcome::Replied { .. });

        assert_eq!(h.surface.last_message(), Some(Message::bot("Back again")));
        assert_eq!(h.surface.typing_changes(), vec![true, false, true, false]);
    }

    #[tokio::test]
    async fn missing_session_reattempts_once_then_sends() {
        let h = harness(FakeBackend::new().with_session(Ok(SessionId::from("late"))));

        let outcome = h.controller.submit("Hello").await;

        assert!(outcome.is_replied());
        assert_eq!(h.backend.session_calls(), 1);
        assert_eq!(h.backend.sent()[0].0.as_str(), "late");
        assert_eq!(h.session.session_id(), Some(SessionId::from("late")));
    }

    #[tokio::test]
    async fn missing_session_after_reattempt_shows_apology() {
        let (logs, _guard) = capture_logs();
        let h = harness(FakeBackend::new().with_session(Err(status_error(500))));

        let outcome = h.controller.submit("Hello").await;

        assert_matches!(outcome, SendOutcome::NoSession { .. });
        assert_eq!(h.surface.transcript(), vec![Message::bot(NO_SESSION_APOLOGY)]);
        assert_eq!(h.backend.session_calls(), 1);
        assert!(h.backend.sent().is_empty());
        assert!(h.surface.typing_changes().is_empty());
        assert!(logs.has_event(Level::ERROR, "failed to create chat session"));
    }

    #[tokio::test]
    async fn each_submission_without_session_reattempts() {
        let h = harness(
            FakeBackend::new()
                .with_session(Err(status_error(500)))
                .with_session(Ok(SessionId::from("s2"))),
        );

        assert_matches!(h.controller.submit("one").await, SendOutcome::NoSession { .. });
        assert!(h.controller.submit("two").await.is_replied());
        assert_eq!(h.backend.session_calls(), 2);
    }

    #[tokio::test]
    async fn handle_submit_reads_and_clears_input() {
        let h = connected(FakeBackend::new()).await;
        h.surface.set_input("  from the field ");

        let outcome = h.controller.handle_submit().await;

        assert_matches!(outcome, SendOutcome::Replied { ref reply } if reply == "echo: from the field");
        assert_eq!(h.surface.input(), "");
    }

    #[tokio::test]
    async fn handle_submit_leaves_whitespace_input_alone() {
        let h = connected(FakeBackend::new()).await;
        h.surface.set_input("   ");

        assert_matches!(h.controller.handle_submit().await, SendOutcome::Ignored);
        assert_eq!(h.surface.input(), "   ");
        assert!(h.surface.transcript().is_empty());
    }

    #[tokio::test]
    async fn handle_submit_keeps_input_when_no_session() {
        let h = harness(FakeBackend::new().with_session(Err(status_error(500))));
        h.surface.set_input("my important question");

        let outcome = h.controller.handle_submit().await;

        assert_matches!(outcome, SendOutcome::NoSession { .. });
        assert_eq!(h.surface.input(), "my important question");
        assert_eq!(h.surface.transcript(), vec![Message::bot(NO_SESSION_APOLOGY)]);
    }

    #[tokio::test]
    async fn handle_submit_clears_input_when_send_fails() {
        let h = connected(FakeBackend::new().with_reply(Err(status_error(500)))).await;
        h.surface.set_input("hello");

        assert_matches!(h.controller.handle_submit().await, SendOutcome::Failed { .. });
        assert_eq!(h.surface.input(), "");
    }

    #[tokio::test]
    async fn concurrent_submissions_are_serialized() {
        let h = connected(FakeBackend::new().with_chat_delay(Duration::from_millis(20))).await;

        let (a, b) = tokio::join!(h.controller.submit("a"), h.controller.submit("b"));

        assert!(a.is_replied());
        assert!(b.is_replied());
        assert_eq!(h.backend.max_in_flight(), 1);
        assert_eq!(h.surface.typing_changes(), vec![true, false, true, false]);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let h = harness(FakeBackend::new());
        let before = h.controller.state();

        assert!(h.controller.toggle());
        assert!(h.surface.is_open());
        assert!(!h.controller.toggle());

        assert_eq!(h.controller.state(), before);
        assert!(!h.surface.is_open());
    }

    #[test]
    fn apology_depends_on_error_kind() {
        assert_eq!(apology_for(&status_error(404)), SERVICE_APOLOGY);
        assert_eq!(apology_for(&decode_error()), CONNECTION_APOLOGY);
    }
}
