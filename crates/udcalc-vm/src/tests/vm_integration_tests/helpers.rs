//! Helper functions and common imports for integration tests.

use crate::bytecode::Program;
use crate::compiler::Compiler;
use crate::error::CompileError;
use crate::vm::VM;
use udcalc_parser::{parse_expression, ParseOptions};
use udcalc_types::{AngleUnit, CalcMode, Value};

/// Parse, compile and execute `source` in scientific mode
pub fn execute(source: &str) -> Result<Value, String> {
    execute_in(source, CalcMode::Scientific, AngleUnit::Radians)
}

/// Parse, compile and execute `source` in degrees
pub fn execute_degrees(source: &str) -> Result<Value, String> {
    execute_in(source, CalcMode::Scientific, AngleUnit::Degrees)
}

/// Parse, compile and execute `source` in programmer mode
pub fn execute_int(source: &str) -> Result<Value, String> {
    execute_in(source, CalcMode::Programmer, AngleUnit::Radians)
}

pub fn execute_in(source: &str, mode: CalcMode, angle: AngleUnit) -> Result<Value, String> {
    let program = compile_in(source, mode, angle)?;

    let mut vm = VM::new();
    vm.execute(&program)
        .map_err(|e| format!("Runtime error: {}", e))
}

/// Parse and compile `source`, reporting compile errors as strings
pub fn compile_in(source: &str, mode: CalcMode, angle: AngleUnit) -> Result<Program, String> {
    try_compile(source, mode, angle).map_err(|e| format!("Compile error: {}", e))
}

/// Parse and compile `source`, keeping the typed compile error
pub fn try_compile(source: &str, mode: CalcMode, angle: AngleUnit) -> Result<Program, CompileError> {
    let tree = parse_expression(source, ParseOptions::new(mode, angle))
        .unwrap_or_else(|e| panic!("Parse error in {:?}: {}", source, e));

    let mut compiler = Compiler::new("<test>", mode.domain());
    compiler.compile(&tree)
}

/// Unwrap a double result
pub fn double(result: Result<Value, String>) -> f64 {
    match result {
        Ok(Value::Double(d)) => d,
        other => panic!("expected a double, got {:?}", other),
    }
}
