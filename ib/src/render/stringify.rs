//! Node stringifier

use serde_json::Value;

/// Shown in place of a null value
pub const EMPTY_PLACEHOLDER: &str = "—";

/// Joins the elements of a list
pub const LIST_SEPARATOR: &str = " • ";

/// Convert an arbitrary JSON value into display text
///
/// Scalars render inline, lists render as a single line joined by
/// [`LIST_SEPARATOR`], and objects fall back to an indented JSON dump so no
/// key or value is lost.
pub fn stringify(node: &Value) -> String {
    match node {
        Value::Null => EMPTY_PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(LIST_SEPARATOR),
        Value::Object(_) => pretty_dump(node),
    }
}

fn pretty_dump(node: &Value) -> String {
    // Only fails on non-string map keys, which a Value cannot hold
    serde_json::to_string_pretty(node).unwrap_or_else(|_| node.to_string())
}
