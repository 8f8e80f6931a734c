//! # chatbot-client
//!
//! Talks to the chat backend on behalf of the widget:
//!
//! - [`backend`]: the [`ChatBackend`] trait and its reqwest implementation
//! - [`session`]: [`SessionManager`], owner of the current session id
//! - [`types`]: JSON request/response bodies
//! - [`errors`]: [`ClientError`]
//!
//! Both endpoints authenticate with the static `X-API-Key` header. Failures
//! are returned as values and logged; nothing here panics or is fatal to
//! the host.

#![deny(unsafe_code)]

pub mod backend;
pub mod errors;
pub mod session;
pub mod types;

pub use backend::{ChatBackend, HttpChatBackend};
pub use errors::{ClientError, ClientResult};
pub use session::{SessionManager, report_failure};
