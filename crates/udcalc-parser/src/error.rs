//! Error types for tree construction and text parsing

use thiserror::Error;

/// Rejected operator presses. The frontend leaves its context untouched
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error("'{op}' needs {needed} operand(s), found {found}")]
    InsufficientOperands {
        op: &'static str,
        needed: usize,
        found: usize,
    },

    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    #[error("'{op}' is not available in {context}")]
    OperatorUnavailable { op: &'static str, context: String },

    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,

    #[error("incomplete expression")]
    IncompleteExpression,

    #[error("empty expression")]
    EmptyExpression,
}

/// Errors from reading a printed expression back into a tree
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error(transparent)]
    Frontend(#[from] FrontendError),
}
