//! # chatbot
//!
//! Terminal host for the chatbot widget. Loads a widget config, starts a
//! widget on a [`TerminalSurface`], and feeds it lines from stdin.
//!
//! Stdin is read on a dedicated thread, outside the runtime, so ctrl-c exits
//! without waiting on a pending read.

#![deny(unsafe_code)]

mod terminal;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tokio::sync::mpsc;

use chatbot_core::logging::init_subscriber;
use chatbot_settings::load_config_from_path;
use chatbot_widget::{ChatWidget, SendOutcome};

use crate::terminal::TerminalSurface;

/// Chat with a widget backend from the terminal.
#[derive(Parser, Debug)]
#[command(name = "chatbot", about = "Chat with a widget backend from the terminal")]
struct Cli {
    /// Path to a JSON widget config (camelCase option keys).
    #[arg(long, default_value = "chatbot.json")]
    config: PathBuf,

    /// Backend base URL (overrides the config file).
    #[arg(long)]
    api_url: Option<String>,

    /// API key (overrides the config file).
    #[arg(long)]
    api_key: Option<String>,

    /// Origin reported when creating a session.
    #[arg(long)]
    origin: Option<String>,

    /// Log level when `RUST_LOG` is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Toggle,
    Text(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "/quit" => Self::Quit,
            "/toggle" => Self::Toggle,
            _ => Self::Text(line),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_subscriber(&args.log_level);

    let overrides = json!({ "apiUrl": args.api_url, "apiKey": args.api_key });
    let config = load_config_from_path(&args.config, overrides)
        .with_context(|| format!("Failed to load config: {}", args.config.display()))?;

    let surface = Arc::new(TerminalSurface::new(std::io::stdout()));
    let widget = ChatWidget::start_http(config, surface.clone(), args.origin.as_deref())
        .context("Failed to start chat widget")?;
    let _ = widget.toggle();

    let lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()));
    tokio::select! {
        result = run(&widget, surface.as_ref(), lines) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted"),
    }

    tracing::info!(session_id = ?widget.session_id(), "chat ended");
    Ok(())
}

/// Forward lines from `reader` over a channel from a dedicated thread.
///
/// The channel closes at EOF, on a read error (sent first), or when the
/// receiver is dropped.
fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<std::io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    let spawned = std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "failed to spawn input reader thread");
    }
    rx
}

/// Read commands from `lines` until the channel closes or `/quit`.
async fn run<W>(
    widget: &ChatWidget,
    surface: &TerminalSurface<W>,
    mut lines: mpsc::Receiver<std::io::Result<String>>,
) -> Result<()>
where
    W: Write + Send,
{
    while let Some(line) = lines.recv().await {
        let line = line.context("Failed to read stdin")?;
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Toggle => {
                let _ = widget.toggle();
            }
            Command::Text(text) => {
                if !widget.state().is_open {
                    surface.notice("window is closed, type /toggle to open it");
                    continue;
                }
                surface.set_input(text);
                if let SendOutcome::Replied { reply } = widget.handle_submit().await {
                    tracing::debug!(chars = reply.chars().count(), "reply shown");
                }
            }
        }
    }
    Ok(())
}
