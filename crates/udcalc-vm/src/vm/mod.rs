//! Virtual Machine implementation
//!
//! A single operand stack, executed front to back. There are no jumps, so a
//! program runs in time linear in its length.

use crate::bytecode::{Instruction, Program};
use crate::error::VmError;
use crate::opcode::OpCode;
use udcalc_types::Value;

mod execution;
mod ops;

pub use execution::gamma;

/// Typical stack depth for keypad expressions
const INITIAL_STACK_CAPACITY: usize = 16;

/// Virtual Machine
#[derive(Debug, Default)]
pub struct VM {
    /// Operand stack
    stack: Vec<Value>,
}

impl VM {
    /// Create a new VM
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(INITIAL_STACK_CAPACITY),
        }
    }

    /// Execute a program and return the single value it leaves behind
    pub fn execute(&mut self, program: &Program) -> Result<Value, VmError> {
        self.stack.clear();

        for instruction in &program.code {
            self.step(instruction)?;
        }

        if self.stack.len() != 1 {
            let depth = self.stack.len();
            self.stack.clear();
            return Err(VmError::UnbalancedStack { depth });
        }
        let result = self.pop()?;
        log::trace!("{} -> {:?}", program.name, result);
        Ok(result)
    }

    /// Execute one instruction
    fn step(&mut self, instruction: &Instruction) -> Result<(), VmError> {
        match instruction.opcode {
            OpCode::Push | OpCode::PushI => {
                let value = instruction
                    .operand
                    .ok_or(VmError::MissingOperand(instruction.opcode.name()))?;
                self.push(value);
                Ok(())
            }
            opcode => self.execute_operation(opcode),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Result<Value, VmError> {
        self.stack.pop().ok_or(VmError::StackUnderflow)
    }

    /// Pop `count` operands, returned in the order they were pushed
    pub(crate) fn pop_operands(&mut self, count: usize) -> Result<Vec<Value>, VmError> {
        if self.stack.len() < count {
            return Err(VmError::StackUnderflow);
        }
        let split = self.stack.len() - count;
        Ok(self.stack.split_off(split))
    }
}

/// Execute `program` on a fresh VM
pub fn run(program: &Program) -> Result<Value, VmError> {
    VM::new().execute(program)
}
