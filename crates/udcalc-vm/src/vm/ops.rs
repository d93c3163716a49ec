//! Value operation helpers

use udcalc_types::{ErrorKind, Value};

/// Result classification shared by the execution handlers
pub(crate) struct ValueOperations;

impl ValueOperations {
    /// First error operand in evaluation order
    pub(crate) fn first_error(operands: &[Value]) -> Option<Value> {
        operands.iter().copied().find(Value::is_error)
    }

    /// Map a raw double result onto a value, turning non-finite and
    /// subnormal results into errors
    pub(crate) fn check_double(result: f64) -> Value {
        if result.is_nan() {
            Value::Error(ErrorKind::Unknown)
        } else if result.is_infinite() {
            Value::Error(ErrorKind::Overflow)
        } else if result != 0.0 && result.abs() < f64::MIN_POSITIVE {
            Value::Error(ErrorKind::Underflow)
        } else {
            Value::Double(result)
        }
    }

    /// Like [`check_double`](Self::check_double), but a zero produced from
    /// non-zero inputs means the true result was too small to represent
    pub(crate) fn check_scaled(result: f64, inputs_nonzero: bool) -> Value {
        if result == 0.0 && inputs_nonzero {
            Value::Error(ErrorKind::Underflow)
        } else {
            Self::check_double(result)
        }
    }

    pub(crate) fn divide_by_zero() -> Value {
        Value::Error(ErrorKind::DivideByZero)
    }
}
