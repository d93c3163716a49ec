//! Bytecode format and data structures

use crate::opcode::OpCode;
use udcalc_types::{Domain, Value};

/// A single stack instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction {
    pub opcode: OpCode,
    /// Inline value, present only on push instructions
    pub operand: Option<Value>,
}

impl Instruction {
    /// Push a literal. Integers use the integer family, everything else the
    /// double family.
    pub fn push(value: Value) -> Self {
        let opcode = match value {
            Value::Integer(_) => OpCode::PushI,
            Value::Double(_) | Value::Error(_) => OpCode::Push,
        };
        Self {
            opcode,
            operand: Some(value),
        }
    }

    /// Push a literal with the push opcode of `domain`
    pub fn push_in(domain: Domain, value: Value) -> Self {
        let opcode = match domain {
            Domain::Double => OpCode::Push,
            Domain::Integer => OpCode::PushI,
        };
        Self {
            opcode,
            operand: Some(value),
        }
    }

    pub fn op(opcode: OpCode) -> Self {
        Self {
            opcode,
            operand: None,
        }
    }
}

/// Compiled expression, produced once per evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Label used in disassembly
    pub name: String,
    pub domain: Domain,
    pub code: Vec<Instruction>,
}

impl Program {
    pub fn new(name: impl Into<String>, domain: Domain) -> Self {
        Self {
            name: name.into(),
            domain,
            code: Vec::new(),
        }
    }

    /// Append an instruction
    pub fn emit(&mut self, instruction: Instruction) {
        self.code.push(instruction);
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}
