//! Line-oriented [`PresentationSurface`] for terminals.

use std::io::Write;

use parking_lot::Mutex;

use chatbot_core::Sender;
use chatbot_settings::WidgetConfig;
use chatbot_widget::{PresentationSurface, RenderOutcome};

#[derive(Default)]
struct TerminalState {
    rendered: bool,
    is_open: bool,
    input: String,
}

/// Writes the transcript as prefixed lines.
///
/// Write errors are ignored.
pub struct TerminalSurface<W> {
    out: Mutex<W>,
    state: Mutex<TerminalState>,
}

impl<W: Write + Send> TerminalSurface<W> {
    /// Surface writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            state: Mutex::new(TerminalState::default()),
        }
    }

    /// Stage a line read from the user as the pending input.
    pub fn set_input(&self, text: impl Into<String>) {
        self.state.lock().input = text.into();
    }

    /// Print a host notice outside the transcript.
    pub fn notice(&self, text: &str) {
        self.line(&format!("({text})"));
    }

    fn line(&self, text: &str) {
        let mut out = self.out.lock();
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}

impl<W: Write + Send> PresentationSurface for TerminalSurface<W> {
    fn render(&self, config: &WidgetConfig) -> RenderOutcome {
        {
            let mut state = self.state.lock();
            if state.rendered {
                return RenderOutcome::AnchorExists;
            }
            state.rendered = true;
        }
        self.line(&format!("== {} ==", config.title));
        self.line(&config.subtitle);
        self.append_message(&config.welcome_message, Sender::Bot);
        RenderOutcome::Rendered
    }

    fn toggle_open_state(&self) {
        let is_open = {
            let mut state = self.state.lock();
            state.is_open = !state.is_open;
            state.is_open
        };
        self.notice(if is_open { "window opened" } else { "window closed" });
    }

    fn append_message(&self, content: &str, sender: Sender) {
        let label = match sender {
            Sender::User => "you",
            Sender::Bot => "bot",
        };
        self.line(&format!("[{label}] {content}"));
    }

    fn set_typing_indicator(&self, visible: bool) {
        if visible {
            self.line("[bot] ...");
        }
    }

    fn input_value(&self) -> String {
        self.state.lock().input.clone()
    }

    fn clear_input(&self) {
        self.state.lock().input.clear();
    }
}
