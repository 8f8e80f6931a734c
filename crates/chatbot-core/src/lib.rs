//! # chatbot-core
//!
//! Foundation types shared by every chatbot widget crate:
//!
//! - **IDs**: [`SessionId`], the backend-issued conversation handle
//! - **Messages**: [`Message`] and [`Sender`] for transcript entries
//! - **Errors**: [`InitError`] for widget composition misuse
//! - **Logging**: `tracing` subscriber bootstrap and test capture helpers
//! - **Constants**: wire header names and the origin fallback

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod ids;
pub mod logging;
pub mod messages;

pub use errors::InitError;
pub use ids::SessionId;
pub use messages::{Message, Sender};
