//! The name-resolution engine: turns a bound call into the lock key.

use super::path::resolve_path;
use super::types::{LockName, Selector};
use crate::call::BoundCall;
use serde_json::Value;

/// Resolve the lock key for one invocation.
///
/// The key is `<function>:<fragment>:…`. Auto mode *omits* values with no
/// meaningful textual form; explicit selector lists keep unresolvable
/// fragments as empty segments, since the author curates those keys for
/// uniqueness, not readability.
pub fn resolve_lock_key(function: &str, name: &LockName, call: &BoundCall) -> String {
    let mut key = function.to_string();

    match name {
        LockName::Auto => {
            for value in call.values_in_call_order() {
                if let Some(text) = scalar_text(value) {
                    key.push(':');
                    key.push_str(&text);
                }
            }
        }
        LockName::Literal(literal) => {
            key.push(':');
            key.push_str(literal);
        }
        LockName::Selectors(selectors) => {
            for selector in selectors {
                key.push(':');
                key.push_str(&selector_fragment(selector, call));
            }
        }
    }

    key
}

/// Compute one selector's key fragment. Unresolvable selectors degrade to
/// the empty string; they never abort the whole name.
fn selector_fragment(selector: &Selector, call: &BoundCall) -> String {
    match selector {
        Selector::Param(name) => call.value(name).map(fragment_text).unwrap_or_default(),
        Selector::Path { root, steps } => call
            .value(root)
            .and_then(|value| resolve_path(value, steps).ok())
            .map(fragment_text)
            .unwrap_or_default(),
        Selector::Priority(names) => names
            .iter()
            .filter_map(|name| call.value(name))
            .find(|value| is_truthy(value))
            .map(fragment_text)
            .unwrap_or_default(),
    }
}

/// Textual form of a scalar value; `None` for composites, whose only
/// rendering is a structural dump rather than a value-representative
/// string.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Textual form of an explicitly-selected value. Scalars render bare;
/// composites render as compact JSON, since the author asked for the value
/// by name.
fn fragment_text(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| value.to_string())
}

/// Conventional boolean coercion over argument values: null, false, zero,
/// and empty strings/arrays/objects are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
