//! Inline literal encoding.
//!
//! When primitive inlining is enabled, a value is written into generated
//! source in its JSON literal form instead of being registered. The forms
//! match what a JavaScript host would produce with `JSON.stringify`, except
//! for the infinities: JSON has no literal for them, so they are written as
//! the `Infinity` and `-Infinity` expressions, which keep their value in
//! JavaScript source.

use crate::value::Value;

/// Magnitudes at or above this are written in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;

/// Nonzero magnitudes below this are written in exponent form.
const EXPONENT_BELOW: f64 = 1e-6;

/// Encode `value` as an inline source literal.
///
/// Returns `None` for values that must be registered instead: handles
/// and NaN.
pub fn inline_literal(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) if !n.is_nan() => Some(format_number(*n)),
        Value::Number(_) | Value::Ref(_) => None,
        Value::Str(s) => Some(serde_json::Value::String(s.to_string()).to_string()),
    }
}

/// Canonical text of a number.
///
/// Integral values print without a fraction, `-0` prints as `0`, and very
/// large or very small magnitudes use exponent notation with an explicit
/// sign (`1e+21`, `1.5e-7`). Non-finite values print as `NaN`, `Infinity`
/// and `-Infinity`.
#[allow(clippy::float_cmp)]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n.is_sign_positive() { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if !(EXPONENT_BELOW..EXPONENT_ABOVE).contains(&magnitude) {
        let text = format!("{n:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }

    // Display already prints the shortest round-tripping form.
    format!("{n}")
}

#[cfg(test)]
mod tests;
