//! Error types for the VM and compiler
//!
//! Arithmetic failures are not errors here: they travel through the VM as
//! [`udcalc_types::Value::Error`]. These types describe malformed trees and
//! programs, which only a bug upstream can produce.

use thiserror::Error;
use udcalc_types::Domain;

/// VM runtime errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    /// Pop from empty stack
    #[error("Stack underflow")]
    StackUnderflow,

    /// Program finished with other than one value on the stack
    #[error("Unbalanced stack: {depth} value(s) left after execution")]
    UnbalancedStack { depth: usize },

    /// Push instruction without an inline value
    #[error("{0} instruction has no operand")]
    MissingOperand(&'static str),
}

/// Compiler errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("{name} expects {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Operator has no opcode in the active domain
    #[error("'{op}' is not supported in the {domain} domain")]
    UnsupportedOperator { op: String, domain: Domain },
}
