use super::helpers::{double, execute, execute_degrees};
use approx::assert_relative_eq;
use std::f64::consts::PI;
use udcalc_types::Value;

#[test]
fn test_roots() {
    assert_eq!(execute("sqrt(16)").unwrap(), Value::Double(4.0));
    assert_relative_eq!(double(execute("cbrt(-27)")), -3.0);
    assert_relative_eq!(double(execute("yroot(27, 3)")), 3.0);
    assert_relative_eq!(double(execute("yroot(-32, 5)")), -2.0, max_relative = 1e-12);
    assert_relative_eq!(double(execute("yroot(16, 4)")), 2.0, max_relative = 1e-12);
}

#[test]
fn test_logarithms() {
    assert_relative_eq!(double(execute("log10(1000)")), 3.0);
    assert_eq!(execute("log2(1024)").unwrap(), Value::Double(10.0));
    assert_eq!(execute("logy(8, 2)").unwrap(), Value::Double(3.0));
    assert_relative_eq!(double(execute("logy(81, 3)")), 4.0, max_relative = 1e-12);
    assert_relative_eq!(double(execute("ln(e)")), 1.0);
    assert_relative_eq!(double(execute("exp(1)")), std::f64::consts::E);
}

#[test]
fn test_radian_trigonometry() {
    assert_relative_eq!(double(execute("sin(π / 2)")), 1.0);
    assert_relative_eq!(double(execute("cos(π)")), -1.0);
    assert_relative_eq!(double(execute("atan(1)")), PI / 4.0);
}

#[test]
fn test_degree_trigonometry_is_exact_on_quadrants() {
    assert_eq!(execute_degrees("sin(180)").unwrap(), Value::Double(0.0));
    assert_eq!(execute_degrees("sin(90)").unwrap(), Value::Double(1.0));
    assert_eq!(execute_degrees("sin(-90)").unwrap(), Value::Double(-1.0));
    assert_eq!(execute_degrees("cos(90)").unwrap(), Value::Double(0.0));
    assert_eq!(execute_degrees("cos(540)").unwrap(), Value::Double(-1.0));
}

#[test]
fn test_degree_trigonometry_in_between() {
    assert_relative_eq!(double(execute_degrees("sin(30)")), 0.5, epsilon = 1e-15);
    assert_relative_eq!(double(execute_degrees("cos(60)")), 0.5, epsilon = 1e-15);
}

#[test]
fn test_inverse_degree_trigonometry() {
    assert_eq!(execute_degrees("asin(1)").unwrap(), Value::Double(90.0));
    assert_eq!(execute_degrees("asin(0.5)").unwrap(), Value::Double(30.0));
    assert_eq!(execute_degrees("acos(0.5)").unwrap(), Value::Double(60.0));
    assert_eq!(execute_degrees("acos(-1)").unwrap(), Value::Double(180.0));
    assert_eq!(execute_degrees("atan(1)").unwrap(), Value::Double(45.0));
}

#[test]
fn test_hyperbolic() {
    assert_eq!(execute("tanh(0)").unwrap(), Value::Double(0.0));
    assert_eq!(execute("cosh(0)").unwrap(), Value::Double(1.0));
    assert_eq!(execute("acosh(1)").unwrap(), Value::Double(0.0));
    assert_relative_eq!(double(execute("asinh(sinh(2))")), 2.0, max_relative = 1e-12);
}

#[test]
fn test_factorial_of_reals_uses_gamma() {
    assert_eq!(execute("10!").unwrap(), Value::Double(3_628_800.0));
    assert_relative_eq!(double(execute("0.5!")), PI.sqrt() / 2.0, max_relative = 1e-10);
    assert_relative_eq!(double(execute("(-0.5)!")), PI.sqrt(), max_relative = 1e-10);
}
