use super::helpers::{execute, execute_degrees};
use udcalc_types::{ErrorKind, Value};

fn error(kind: ErrorKind) -> Value {
    Value::Error(kind)
}

#[test]
fn test_divide_by_zero() {
    assert_eq!(execute("5 / 0").unwrap(), error(ErrorKind::DivideByZero));
    assert_eq!(execute("0 ^ -1").unwrap(), error(ErrorKind::DivideByZero));
    assert_eq!(execute("yroot(8, 0)").unwrap(), error(ErrorKind::DivideByZero));
    assert_eq!(execute("logy(8, 1)").unwrap(), error(ErrorKind::DivideByZero));
}

#[test]
fn test_errors_propagate_through_later_operations() {
    assert_eq!(execute("5 / 0 + 3").unwrap(), error(ErrorKind::DivideByZero));
    assert_eq!(execute("sqrt(1 / 0) * 2").unwrap(), error(ErrorKind::DivideByZero));
}

#[test]
fn test_first_error_in_evaluation_order_wins() {
    assert_eq!(
        execute("(5 / 0) * (2 ^ 2000)").unwrap(),
        error(ErrorKind::DivideByZero)
    );
    assert_eq!(
        execute("(2 ^ 2000) * (5 / 0)").unwrap(),
        error(ErrorKind::Overflow)
    );
}

#[test]
fn test_overflow() {
    assert_eq!(execute("2 ^ 2000").unwrap(), error(ErrorKind::Overflow));
    assert_eq!(execute("exp(1000)").unwrap(), error(ErrorKind::Overflow));
    assert_eq!(execute("171!").unwrap(), error(ErrorKind::Overflow));
    assert_eq!(execute("1e300 * 1e300").unwrap(), error(ErrorKind::Overflow));
}

#[test]
fn test_logarithm_of_zero_overflows() {
    assert_eq!(execute("ln(0)").unwrap(), error(ErrorKind::Overflow));
}

#[test]
fn test_underflow() {
    assert_eq!(execute("10 ^ -400").unwrap(), error(ErrorKind::Underflow));
    assert_eq!(execute("1e-200 * 1e-200").unwrap(), error(ErrorKind::Underflow));
    assert_eq!(execute("1e-300 / 1e300").unwrap(), error(ErrorKind::Underflow));
    assert_eq!(execute("exp(-1000)").unwrap(), error(ErrorKind::Underflow));
    assert_eq!(execute("1e-307%").unwrap(), error(ErrorKind::Underflow));
}

#[test]
fn test_exact_zero_is_not_underflow() {
    assert_eq!(execute("0 * 5").unwrap(), Value::Double(0.0));
    assert_eq!(execute("0 / 5").unwrap(), Value::Double(0.0));
    assert_eq!(execute("3 - 3").unwrap(), Value::Double(0.0));
}

#[test]
fn test_domain_errors_are_unknown() {
    assert_eq!(execute("sqrt(-1)").unwrap(), error(ErrorKind::Unknown));
    assert_eq!(execute("(-3)!").unwrap(), error(ErrorKind::Unknown));
    assert_eq!(execute("(-8) ^ 0.5").unwrap(), error(ErrorKind::Unknown));
    assert_eq!(execute("asin(2)").unwrap(), error(ErrorKind::Unknown));
}

#[test]
fn test_tangent_of_right_angle() {
    assert_eq!(execute_degrees("tan(90)").unwrap(), error(ErrorKind::DivideByZero));
    assert_eq!(execute_degrees("tan(-270)").unwrap(), error(ErrorKind::DivideByZero));
    assert_eq!(execute_degrees("tan(180)").unwrap(), Value::Double(0.0));
}
