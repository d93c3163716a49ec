use crate::mode::Domain;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason a computation failed. Carried inside [`Value::Error`] so that
/// failures flow through the VM like ordinary numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Unknown,
    DivideByZero,
    Overflow,
    Underflow,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 4] = [
        ErrorKind::Unknown,
        ErrorKind::DivideByZero,
        ErrorKind::Overflow,
        ErrorKind::Underflow,
    ];

    /// Inverse of [`ErrorKind::message`]
    pub fn from_message(message: &str) -> Option<ErrorKind> {
        Self::ALL.into_iter().find(|kind| kind.message() == message)
    }

    /// Message shown on the calculator display
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Unknown => "Error",
            ErrorKind::DivideByZero => "Cannot divide by zero",
            ErrorKind::Overflow => "Overflow",
            ErrorKind::Underflow => "Underflow",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A calculator value. Exactly one representation is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Basic and scientific mode numbers
    Double(f64),
    /// Programmer mode numbers, 64-bit two's complement
    Integer(i64),
    /// A failed computation; propagated unchanged by every consumer
    Error(ErrorKind),
}

impl Value {
    /// Zero in the representation used by `domain`
    pub fn zero(domain: Domain) -> Self {
        match domain {
            Domain::Double => Value::Double(0.0),
            Domain::Integer => Value::Integer(0),
        }
    }

    /// Best-effort conversion for display. Errors read as NaN.
    pub fn as_double(&self) -> f64 {
        match self {
            Value::Double(d) => *d,
            Value::Integer(i) => *i as f64,
            Value::Error(_) => f64::NAN,
        }
    }

    /// Best-effort conversion for display. Doubles truncate toward zero
    /// (saturating at the i64 range), errors read as 0.
    pub fn as_int(&self) -> i64 {
        match self {
            Value::Double(d) => *d as i64,
            Value::Integer(i) => *i,
            Value::Error(_) => 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Value::Double(d) => *d == 0.0,
            Value::Integer(i) => *i == 0,
            Value::Error(_) => false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Value::Error(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Domain of a non-error value
    pub fn domain(&self) -> Option<Domain> {
        match self {
            Value::Double(_) => Some(Domain::Double),
            Value::Integer(_) => Some(Domain::Integer),
            Value::Error(_) => None,
        }
    }

    /// Re-express the value in `domain`. Errors pass through untouched.
    pub fn coerce(self, domain: Domain) -> Value {
        match (self, domain) {
            (Value::Error(_), _) => self,
            (Value::Double(_), Domain::Double) | (Value::Integer(_), Domain::Integer) => self,
            (Value::Integer(i), Domain::Double) => Value::Double(i as f64),
            (Value::Double(d), Domain::Integer) => {
                if d.is_finite() {
                    Value::Integer(d as i64)
                } else {
                    Value::Error(ErrorKind::Overflow)
                }
            }
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Double(0.0)
    }
}

// Conversions
impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<ErrorKind> for Value {
    fn from(kind: ErrorKind) -> Self {
        Value::Error(kind)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Double(d) => f.write_str(&crate::format::format_double(*d, false, None)),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Error(kind) => write!(f, "{}", kind),
        }
    }
}
