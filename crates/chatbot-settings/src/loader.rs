//! Host-side configuration loading.
//!
//! Loading flow:
//! 1. Read the JSON config file (missing file -> empty object)
//! 2. Deep-merge caller overrides (e.g. command-line flags) over it
//! 3. [`resolve`] into a complete [`WidgetConfig`]
//! 4. Apply `CHATBOT_*` environment overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::resolver::resolve;
use crate::types::{Position, WidgetConfig};

/// Load a widget configuration from a JSON file with overrides.
///
/// A missing file is not an error. Invalid JSON, or JSON that is not an
/// object, is.
pub fn load_config_from_path(path: &Path, overrides: Value) -> Result<WidgetConfig> {
    let file_value = if path.exists() {
        debug!(?path, "loading widget config from file");
        let content = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        if !value.is_object() {
            return Err(SettingsError::InvalidValue(format!(
                "expected a JSON object in {}",
                path.display()
            )));
        }
        value
    } else {
        debug!(?path, "widget config file not found, using defaults");
        Value::Object(serde_json::Map::new())
    };

    let mut config = resolve(deep_merge(file_value, overrides));
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (target, Value::Null) => target,
        (_, source) => source,
    }
}

/// Apply `CHATBOT_*` environment variable overrides.
pub fn apply_env_overrides(config: &mut WidgetConfig) {
    apply_overrides_with(config, |name| std::env::var(name).ok());
}

/// Apply overrides from an arbitrary variable lookup.
///
/// Empty values are ignored. An out-of-range or non-numeric timeout is
/// ignored with a warning.
pub fn apply_overrides_with<F>(config: &mut WidgetConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(v) = read("CHATBOT_API_KEY") {
        config.api_key = v;
    }
    if let Some(v) = read("CHATBOT_API_URL") {
        config.api_url = v;
    }
    if let Some(v) = read("CHATBOT_WIDGET_ID") {
        config.widget_id = v;
    }
    if let Some(v) = read("CHATBOT_POSITION") {
        config.position = Position::parse_lossy(&v);
    }
    if let Some(v) = read("CHATBOT_REQUEST_TIMEOUT_MS") {
        match parse_u64_range(&v, 1_000, 600_000) {
            Some(ms) => config.request_timeout_ms = ms,
            None => {
                tracing::warn!(key = "CHATBOT_REQUEST_TIMEOUT_MS", value = %v, "invalid u64 env var, ignoring");
            }
        }
    }
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
