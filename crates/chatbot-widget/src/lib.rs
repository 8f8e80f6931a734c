//! # chatbot-widget
//!
//! The interactive half of the chatbot widget:
//!
//! - [`surface`]: [`PresentationSurface`], the rendering boundary, plus the
//!   in-memory [`MemorySurface`]
//! - [`controller`]: [`ConversationController`], which turns a user
//!   submission into a backend call and transcript updates
//! - [`widget`]: [`ChatWidget`], composition of config, session, surface,
//!   and controller
//! - [`registry`]: [`WidgetRegistry`], explicit one-instance-per-id ownership
//!
//! No failure path is fatal: every error resolves to a still-interactive
//! widget plus a log event.

#![deny(unsafe_code)]

pub mod controller;
pub mod errors;
pub mod registry;
pub mod surface;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use controller::{
    CONNECTION_APOLOGY, ConversationController, NO_SESSION_APOLOGY, SERVICE_APOLOGY, SendOutcome,
    WidgetState,
};
pub use errors::WidgetError;
pub use registry::WidgetRegistry;
pub use surface::{MemorySurface, PresentationSurface, RenderOutcome};
pub use widget::ChatWidget;
