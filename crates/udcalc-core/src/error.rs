//! Error types for the calculator core
//!
//! Arithmetic failures are values, not errors; see [`udcalc_types::ErrorKind`].
//! A `CalcError` means a tree could not be built, compiled or executed.

use thiserror::Error;
use udcalc_parser::{FrontendError, ParseError};
use udcalc_vm::{CompileError, VmError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Frontend(#[from] FrontendError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("runtime error: {0}")]
    Vm(#[from] VmError),
}
