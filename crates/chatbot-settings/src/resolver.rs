//! Embedder-facing configuration resolution.

use serde_json::{Map, Value};
use tracing::warn;

use crate::types::WidgetConfig;

/// Resolve a partial option object into a complete [`WidgetConfig`].
///
/// Never fails and performs no I/O:
/// - a non-object input yields pure defaults
/// - `null` values are treated as omitted
/// - a value that does not fit its key's type is dropped with a warning and
///   the default is kept
/// - unrecognized keys are kept in [`WidgetConfig::extra`]
pub fn resolve(user: Value) -> WidgetConfig {
    let user_map = match user {
        Value::Object(map) => map,
        Value::Null => return WidgetConfig::default(),
        other => {
            warn!(kind = %json_kind(&other), "widget options are not an object, using defaults");
            return WidgetConfig::default();
        }
    };

    // Accept keys one at a time so a single bad value cannot discard the rest.
    let mut accepted = Map::new();
    for (key, value) in user_map {
        if value.is_null() {
            continue;
        }
        let mut candidate = accepted.clone();
        let _ = candidate.insert(key.clone(), value.clone());
        if serde_json::from_value::<WidgetConfig>(Value::Object(candidate)).is_ok() {
            let _ = accepted.insert(key, value);
        } else {
            warn!(key = %key, kind = %json_kind(&value), "ignoring widget option with unexpected type");
        }
    }

    serde_json::from_value(Value::Object(accepted)).unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;
    use chatbot_core::logging::capture_logs;
    use serde_json::json;
    use tracing::Level;

    const RECOGNIZED: [&str; 12] = [
        "apiKey",
        "apiUrl",
        "widgetId",
        "position",
        "primaryColor",
        "textColor",
        "backgroundColor",
        "borderRadius",
        "title",
        "subtitle",
        "welcomeMessage",
        "requestTimeoutMs",
    ];

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(resolve(json!({})), WidgetConfig::default());
    }

    #[test]
    fn every_recognized_key_is_defined_for_partial_input() {
        let partials = [
            json!({}),
            json!({"apiKey": "k"}),
            json!({"title": "Support", "position": "bottom-left"}),
            json!({"apiUrl": "https://x.example", "welcomeMessage": "Hi"}),
        ];
        for partial in partials {
            let resolved = serde_json::to_value(resolve(partial.clone())).unwrap();
            for key in RECOGNIZED {
                assert!(
                    resolved.get(key).is_some_and(|v| !v.is_null()),
                    "{key} missing for {partial}"
                );
            }
        }
    }

    #[test]
    fn caller_values_override_defaults() {
        let c = resolve(json!({
            "apiKey": "pk_test",
            "apiUrl": "https://bot.example/api",
            "position": "bottom-left",
            "title": "Help desk",
            "requestTimeoutMs": 5000
        }));
        assert_eq!(c.api_key, "pk_test");
        assert_eq!(c.api_url, "https://bot.example/api");
        assert_eq!(c.position, Position::BottomLeft);
        assert_eq!(c.title, "Help desk");
        assert_eq!(c.request_timeout_ms, 5000);
        assert_eq!(c.subtitle, "How can I help you?");
    }

    #[test]
    fn unknown_position_is_bottom_right() {
        let c = resolve(json!({"position": "top-center"}));
        assert_eq!(c.position, Position::BottomRight);
    }

    #[test]
    fn null_values_are_omitted() {
        let c = resolve(json!({"title": null, "apiKey": "k"}));
        assert_eq!(c.title, "Assistant");
        assert_eq!(c.api_key, "k");
    }

    #[test]
    fn mistyped_value_falls_back_and_warns() {
        let (logs, _guard) = capture_logs();
        let c = resolve(json!({"apiKey": 42, "title": "Kept"}));
        assert_eq!(c.api_key, "");
        assert_eq!(c.title, "Kept");
        assert!(logs.has_event(Level::WARN, "unexpected type"));
    }

    #[test]
    fn unrecognized_keys_pass_through() {
        let c = resolve(json!({"theme": {"dark": true}, "apiKey": "k"}));
        assert_eq!(c.api_key, "k");
        assert_eq!(c.extra["theme"]["dark"], true);
    }

    #[test]
    fn non_object_input_yields_defaults() {
        assert_eq!(resolve(json!("apiKey")), WidgetConfig::default());
        assert_eq!(resolve(json!([1, 2])), WidgetConfig::default());
        assert_eq!(resolve(Value::Null), WidgetConfig::default());
    }
}
