//! Widget composition.
//!
//! [`ChatWidget`] wires one resolved config, one backend, and one surface
//! into a running widget. Startup renders the surface and kicks off session
//! creation in the background; the first submission waits for that attempt
//! before deciding whether a session exists.

use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use chatbot_client::{ChatBackend, HttpChatBackend, SessionManager};
use chatbot_core::{InitError, SessionId};
use chatbot_settings::{WidgetConfig, resolve};

use crate::controller::{ConversationController, SendOutcome, WidgetState};
use crate::errors::WidgetError;
use crate::surface::{PresentationSurface, RenderOutcome};

/// A running chat widget.
pub struct ChatWidget {
    config: Arc<WidgetConfig>,
    session: Arc<SessionManager>,
    surface: Arc<dyn PresentationSurface>,
    controller: ConversationController,
    startup: tokio::sync::Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("widget_id", &self.config.widget_id)
            .field("session_id", &self.session.session_id())
            .finish_non_exhaustive()
    }
}

impl ChatWidget {
    /// Resolve `options`, build the HTTP backend, and start the widget.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn init(
        options: Value,
        surface: Arc<dyn PresentationSurface>,
        origin: Option<&str>,
    ) -> Result<Self, WidgetError> {
        Self::start_http(resolve(options), surface, origin)
    }

    /// Start with an [`HttpChatBackend`] built from `config`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_http(
        config: WidgetConfig,
        surface: Arc<dyn PresentationSurface>,
        origin: Option<&str>,
    ) -> Result<Self, WidgetError> {
        let backend: Arc<dyn ChatBackend> = Arc::new(HttpChatBackend::new(&config)?);
        Ok(Self::start(config, backend, surface, origin)?)
    }

    /// Render the widget and start creating a session.
    ///
    /// Fails with [`InitError::AnchorExists`] if the surface already holds
    /// this widget's id; nothing is rendered and no session is requested.
    /// Must be called from within a Tokio runtime.
    pub fn start(
        config: WidgetConfig,
        backend: Arc<dyn ChatBackend>,
        surface: Arc<dyn PresentationSurface>,
        origin: Option<&str>,
    ) -> Result<Self, InitError> {
        if surface.render(&config) == RenderOutcome::AnchorExists {
            warn!(widget_id = %config.widget_id, "widget anchor already exists, skipping init");
            return Err(InitError::AnchorExists {
                widget_id: config.widget_id,
            });
        }

        let session = Arc::new(SessionManager::new(backend.clone(), origin));
        let startup = {
            let session = session.clone();
            tokio::spawn(async move {
                let _ = session.create_session().await;
            })
        };

        info!(
            widget_id = %config.widget_id,
            position = %config.position,
            api_url = %config.api_url,
            "chat widget started"
        );

        let controller = ConversationController::new(session.clone(), backend, surface.clone());
        Ok(Self {
            config: Arc::new(config),
            session,
            surface,
            controller,
            startup: tokio::sync::Mutex::new(Some(startup)),
        })
    }

    /// Resolved configuration.
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Widget id (registry key).
    pub fn widget_id(&self) -> &str {
        &self.config.widget_id
    }

    /// Current session id, if any.
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.session_id()
    }

    /// Current open/typing state.
    pub fn state(&self) -> WidgetState {
        self.controller.state()
    }

    /// Open or close the window. Returns the new open state.
    pub fn toggle(&self) -> bool {
        self.controller.toggle()
    }

    /// Wait for the startup session attempt to finish.
    ///
    /// Returns immediately once it has been awaited.
    pub async fn wait_for_startup(&self) {
        let mut startup = self.startup.lock().await;
        if let Some(handle) = startup.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "startup session task did not complete");
            }
        }
    }

    /// Submit the surface's pending input.
    ///
    /// The field is cleared only when the message goes out.
    pub async fn handle_submit(&self) -> SendOutcome {
        if self.surface.input_value().trim().is_empty() {
            return SendOutcome::Ignored;
        }
        self.wait_for_startup().await;
        self.controller.handle_submit().await
    }

    /// Submit `text` as a user message.
    pub async fn submit(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }
        self.wait_for_startup().await;
        self.controller.submit(text).await
    }
}

impl Drop for ChatWidget {
    fn drop(&mut self) {
        if let Some(handle) = self.startup.get_mut().take() {
            handle.abort();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
