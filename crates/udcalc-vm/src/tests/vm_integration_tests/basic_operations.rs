use super::helpers::{double, execute};
use approx::assert_relative_eq;
use udcalc_types::Value;

#[test]
fn test_number_literal() {
    let result = execute("42").unwrap();
    assert_eq!(result, Value::Double(42.0));
}

#[test]
fn test_arithmetic() {
    assert_eq!(execute("2 + 3").unwrap(), Value::Double(5.0));
    assert_eq!(execute("10 - 4").unwrap(), Value::Double(6.0));
    assert_eq!(execute("6 * 7").unwrap(), Value::Double(42.0));
    assert_eq!(execute("7 / 2").unwrap(), Value::Double(3.5));
}

#[test]
fn test_precedence() {
    assert_eq!(execute("2 + 3 * 4").unwrap(), Value::Double(14.0));
    assert_eq!(execute("2 * 3 + 4").unwrap(), Value::Double(10.0));
    assert_eq!(execute("(2 + 3) * 4").unwrap(), Value::Double(20.0));
    assert_eq!(execute("10 - 4 - 3").unwrap(), Value::Double(3.0));
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(execute("2 ^ 3 ^ 2").unwrap(), Value::Double(512.0));
}

#[test]
fn test_negation_binds_before_power() {
    assert_eq!(execute("-5 ^ 2").unwrap(), Value::Double(25.0));
    assert_eq!(execute("--5").unwrap(), Value::Double(5.0));
    assert_eq!(execute("2 - -3").unwrap(), Value::Double(5.0));
}

#[test]
fn test_postfix_operators() {
    assert_eq!(execute("50%").unwrap(), Value::Double(0.5));
    assert_eq!(execute("5!").unwrap(), Value::Double(120.0));
    assert_eq!(execute("0!").unwrap(), Value::Double(1.0));
    assert_eq!(execute("3! + 1").unwrap(), Value::Double(7.0));
}

#[test]
fn test_constants() {
    assert_relative_eq!(double(execute("π")), std::f64::consts::PI);
    assert_relative_eq!(double(execute("2 * e")), 2.0 * std::f64::consts::E);
}
