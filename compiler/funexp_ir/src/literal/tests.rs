#![allow(
    clippy::approx_constant,
    reason = "3.14 is a sample argument, not an approximation of pi"
)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_inline_primitives() {
    assert_eq!(inline_literal(&Value::Null).as_deref(), Some("null"));
    assert_eq!(inline_literal(&Value::Bool(true)).as_deref(), Some("true"));
    assert_eq!(inline_literal(&Value::from(3.14)).as_deref(), Some("3.14"));
    assert_eq!(inline_literal(&Value::from("str")).as_deref(), Some("\"str\""));
}

#[test]
fn test_inline_string_escaping() {
    let value = Value::from("say \"hi\"\n\\ done");
    assert_eq!(
        inline_literal(&value).as_deref(),
        Some(r#""say \"hi\"\n\\ done""#)
    );
}

#[test]
fn test_inline_rejects_non_literals() {
    assert_eq!(inline_literal(&Value::Number(f64::NAN)), None);
    assert_eq!(inline_literal(&Value::Number(-f64::NAN)), None);
    assert_eq!(inline_literal(&Value::object(vec![1u8])), None);
    assert_eq!(inline_literal(&Value::function(|_| Value::Null)), None);
}

#[test]
fn test_inline_infinities() {
    assert_eq!(
        inline_literal(&Value::Number(f64::INFINITY)).as_deref(),
        Some("Infinity")
    );
    assert_eq!(
        inline_literal(&Value::Number(f64::NEG_INFINITY)).as_deref(),
        Some("-Infinity")
    );
}

#[test]
fn test_inline_number_forms() {
    assert_eq!(inline_literal(&Value::Number(1e21)).as_deref(), Some("1e+21"));
    assert_eq!(inline_literal(&Value::Number(-0.0)).as_deref(), Some("0"));
}

#[test]
fn test_format_integral() {
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(1.0), "1");
    assert_eq!(format_number(-42.0), "-42");
    assert_eq!(format_number(1e20), "100000000000000000000");
}

#[test]
fn test_format_fractional() {
    assert_eq!(format_number(0.75), "0.75");
    assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    assert_eq!(format_number(0.000_001), "0.000001");
}

#[test]
fn test_format_exponent() {
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(-2.5e30), "-2.5e+30");
    assert_eq!(format_number(1.5e-7), "1.5e-7");
}

#[test]
fn test_format_non_finite() {
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::INFINITY), "Infinity");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
}
