//! Walks over decoded JSON-LD of arbitrary shape.
//!
//! Both walks use an explicit stack, so hostile nesting depth costs heap,
//! not call stack. Children are pushed in reverse to keep document order.

use serde_json::{Map, Value};

/// Every image URL declared anywhere in `value`.
///
/// Accepts `image` as a string, a `{url}`/`{contentUrl}` object (e.g.
/// `ImageObject`), or an array mixing both.
pub(crate) fn image_urls(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![value];

    while let Some(node) = stack.pop() {
        match node {
            Value::Object(map) => {
                if let Some(image) = map.get("image") {
                    collect_image_value(image, &mut out);
                }
                stack.extend(map.values().rev());
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }

    out
}

fn collect_image_value(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => push_non_blank(s, out),
        Value::Object(map) => {
            if let Some(url) = image_object_url(map) {
                push_non_blank(url, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(s) => push_non_blank(s, out),
                    Value::Object(map) => {
                        if let Some(url) = image_object_url(map) {
                            push_non_blank(url, out);
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn image_object_url(map: &Map<String, Value>) -> Option<&str> {
    map.get("url")
        .or_else(|| map.get("contentUrl"))
        .and_then(Value::as_str)
}

fn push_non_blank(s: &str, out: &mut Vec<String>) {
    let trimmed = s.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

/// Every object whose `@type` is (or includes) `Product`, in document
/// order. Covers top-level arrays and `@graph` containers.
pub(crate) fn product_nodes(value: &Value) -> Vec<&Map<String, Value>> {
    let mut out = Vec::new();
    let mut stack = vec![value];

    while let Some(node) = stack.pop() {
        match node {
            Value::Object(map) => {
                if is_product(map.get("@type")) {
                    out.push(map);
                }
                stack.extend(map.values().rev());
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            _ => {}
        }
    }

    out
}

fn is_product(node_type: Option<&Value>) -> bool {
    match node_type {
        Some(Value::String(s)) => s.eq_ignore_ascii_case("product"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.eq_ignore_ascii_case("product")),
        _ => false,
    }
}

/// A scalar JSON value as a trimmed string; numbers are rendered as-is.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
