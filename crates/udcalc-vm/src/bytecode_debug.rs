//! Bytecode debugging utilities

use crate::bytecode::{Instruction, Program};
use std::fmt::Write;
use udcalc_types::{format_value, Base, Value};

/// Render a program as numbered, human-readable lines
pub fn disassemble(program: &Program) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "========== Program: {} ({}, {} instructions) ==========",
        program.name,
        program.domain,
        program.len()
    );
    for (i, instruction) in program.code.iter().enumerate() {
        let _ = writeln!(out, "{:04}  {}", i, disassemble_instruction(instruction));
    }
    out
}

/// Disassemble a single instruction
pub fn disassemble_instruction(instruction: &Instruction) -> String {
    match instruction.operand {
        Some(value) => format!("{:<8} {}", instruction.opcode.name(), operand(&value)),
        None => instruction.opcode.name().to_string(),
    }
}

fn operand(value: &Value) -> String {
    match value {
        Value::Integer(i) => format!("{} (0x{:X})", i, *i as u64),
        _ => format_value(value, Base::Dec, false, None),
    }
}
