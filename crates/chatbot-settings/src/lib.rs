//! # chatbot-settings
//!
//! Resolves caller-supplied widget options into a complete, immutable
//! [`WidgetConfig`].
//!
//! Two entry points:
//! 1. [`resolve`]: the embedder path. Takes a partial JSON object and never
//!    fails: missing, `null`, or mistyped keys fall back to defaults.
//! 2. [`load_config_from_path`]: the host path. Reads a JSON file, merges
//!    command-line overrides over it, resolves, then applies `CHATBOT_*`
//!    environment overrides (highest priority).
//!
//! # Usage
//!
//! ```no_run
//! use chatbot_settings::resolve;
//!
//! let config = resolve(serde_json::json!({ "apiKey": "pk_live", "position": "bottom-left" }));
//! println!("posting to {}", config.api_endpoint("/chat"));
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod resolver;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{apply_env_overrides, deep_merge, load_config_from_path};
pub use resolver::resolve;
pub use types::*;
