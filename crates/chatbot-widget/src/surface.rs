//! Presentation boundary.
//!
//! The controller never touches a concrete UI. It drives a
//! [`PresentationSurface`], which may be an in-memory transcript
//! ([`MemorySurface`]), a terminal, or any other renderer an embedder
//! supplies.

use std::collections::HashSet;

use parking_lot::Mutex;

use chatbot_core::{Message, Sender};
use chatbot_settings::{Position, WidgetConfig};

/// Result of rendering a widget onto a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The widget was drawn and the welcome message shown.
    Rendered,
    /// An element with the widget's id is already present; nothing was drawn.
    AnchorExists,
}

/// Rendering operations the conversation controller depends on.
///
/// Methods take `&self`; implementations use interior mutability so one
/// surface can be shared between the widget and its host.
pub trait PresentationSurface: Send + Sync {
    /// Draw the closed widget (launcher plus hidden window) and show the
    /// configured welcome message as the first bot bubble.
    fn render(&self, config: &WidgetConfig) -> RenderOutcome;

    /// Flip the window between open and closed.
    fn toggle_open_state(&self);

    /// Append one bubble to the transcript and scroll to it.
    fn append_message(&self, content: &str, sender: Sender);

    /// Show or hide the "bot is typing" indicator.
    fn set_typing_indicator(&self, visible: bool);

    /// Pending input text, left in place.
    fn input_value(&self) -> String;

    /// Empty the input field.
    fn clear_input(&self);

    /// Take the pending input text, leaving the input empty.
    fn get_and_clear_input_value(&self) -> String {
        let text = self.input_value();
        self.clear_input();
        text
    }
}

#[derive(Default)]
struct MemoryState {
    anchors: HashSet<String>,
    position: Option<Position>,
    title: Option<String>,
    transcript: Vec<Message>,
    is_open: bool,
    is_typing: bool,
    typing_changes: Vec<bool>,
    input: String,
}

/// In-memory [`PresentationSurface`].
///
/// Records everything the controller does so hosts and tests can inspect it.
#[derive(Default)]
pub struct MemorySurface {
    state: Mutex<MemoryState>,
}

impl MemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface that already contains an element with `id`.
    pub fn with_anchor(id: impl Into<String>) -> Self {
        let surface = Self::default();
        let _ = surface.state.lock().anchors.insert(id.into());
        surface
    }

    /// Type `text` into the input field, replacing what was there.
    pub fn set_input(&self, text: impl Into<String>) {
        self.state.lock().input = text.into();
    }

    /// Current input field contents.
    pub fn input(&self) -> String {
        self.state.lock().input.clone()
    }

    /// Snapshot of the transcript, oldest first.
    pub fn transcript(&self) -> Vec<Message> {
        self.state.lock().transcript.clone()
    }

    /// The newest bubble, if any.
    pub fn last_message(&self) -> Option<Message> {
        self.state.lock().transcript.last().cloned()
    }

    /// Whether the window is open.
    pub fn is_open(&self) -> bool {
        self.state.lock().is_open
    }

    /// Whether the typing indicator is visible.
    pub fn is_typing(&self) -> bool {
        self.state.lock().is_typing
    }

    /// Every typing indicator change, in order.
    pub fn typing_changes(&self) -> Vec<bool> {
        self.state.lock().typing_changes.clone()
    }

    /// Docking corner from the last successful render.
    pub fn position(&self) -> Option<Position> {
        self.state.lock().position
    }

    /// Header title from the last successful render.
    pub fn title(&self) -> Option<String> {
        self.state.lock().title.clone()
    }
}

impl PresentationSurface for MemorySurface {
    fn render(&self, config: &WidgetConfig) -> RenderOutcome {
        let mut state = self.state.lock();
        if !state.anchors.insert(config.widget_id.clone()) {
            return RenderOutcome::AnchorExists;
        }
        state.position = Some(config.position);
        state.title = Some(config.title.clone());
        state.transcript.push(Message::bot(config.welcome_message.clone()));
        RenderOutcome::Rendered
    }

    fn toggle_open_state(&self) {
        let mut state = self.state.lock();
        state.is_open = !state.is_open;
    }

    fn append_message(&self, content: &str, sender: Sender) {
        self.state.lock().transcript.push(Message {
            content: content.to_string(),
            sender,
        });
    }

    fn set_typing_indicator(&self, visible: bool) {
        let mut state = self.state.lock();
        state.is_typing = visible;
        state.typing_changes.push(visible);
    }

    fn input_value(&self) -> String {
        self.state.lock().input.clone()
    }

    fn clear_input(&self) {
        self.state.lock().input.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
