//! Widget composition errors.
//!
//! Initialization misuse is never fatal to the host: callers log the error
//! and keep whatever instance already exists.

use thiserror::Error;

/// Errors raised while composing a widget instance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InitError {
    /// A widget with this id is already registered.
    #[error("widget '{widget_id}' is already initialized")]
    AlreadyRegistered {
        /// Configured widget id.
        widget_id: String,
    },

    /// The surface already holds an anchor with this id.
    #[error("widget anchor '{widget_id}' already exists")]
    AnchorExists {
        /// Configured widget id.
        widget_id: String,
    },
}

impl InitError {
    /// The widget id the error refers to.
    pub fn widget_id(&self) -> &str {
        match self {
            Self::AlreadyRegistered { widget_id } | Self::AnchorExists { widget_id } => widget_id,
        }
    }
}
