//! Compact rendering of a value tree back to JSON text.
//!
//! Peripheral to the parsing core: exists so callers (and the CLI) can turn
//! a [`Value`] back into a document. Output carries no whitespace; object
//! keys come out in `BTreeMap` iteration order, which is deterministic but
//! unrelated to the source document's key order.

use crate::types::Value;

/// Render a value tree as compact JSON.
pub fn render(value: &Value) -> String {
    let mut output = String::new();
    write_value(value, &mut output);
    output
}

/// Serialize a value to the output string.
fn write_value(value: &Value, output: &mut String) {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(true) => output.push_str("true"),
        Value::Bool(false) => output.push_str("false"),
        Value::Number(n) => output.push_str(&write_number(*n)),
        Value::String(s) => write_string(s, output),
        Value::Array(arr) => write_array(arr, output),
        Value::Object(_) => write_object(value, output),
    }
}

/// Serialize a double.
///
/// Integral values print without a fractional part (`30`, not `30.0`).
/// Non-finite values have no JSON representation and render as `null`.
fn write_number(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "null".to_string()
    }
}

/// Serialize a string with JSON escaping.
fn write_string(s: &str, output: &mut String) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\x08' => output.push_str("\\b"),
            '\x0C' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c < '\x20' => {
                // Other control characters as \u00XX
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

/// Serialize an array.
fn write_array(arr: &[Value], output: &mut String) {
    output.push('[');
    for (i, value) in arr.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        write_value(value, output);
    }
    output.push(']');
}

/// Serialize an object.
fn write_object(value: &Value, output: &mut String) {
    let obj = match value {
        Value::Object(o) => o,
        _ => return,
    };

    output.push('{');
    for (i, (key, entry)) in obj.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        write_string(key, output);
        output.push(':');
        write_value(entry, output);
    }
    output.push('}');
}
