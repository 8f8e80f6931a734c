//! Widget-level error type.

use chatbot_client::ClientError;
use chatbot_core::InitError;
use thiserror::Error;

/// Errors returned while bringing up a widget.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Composition misuse (duplicate id or anchor).
    #[error(transparent)]
    Init(#[from] InitError),

    /// The HTTP backend could not be constructed.
    #[error("failed to build chat backend: {0}")]
    Client(#[from] ClientError),
}
