//! UDCalc stack machine
//!
//! Compiles expression trees into a flat instruction stream and runs it on a
//! single operand stack.
//!
//! # Modules
//!
//! - `opcode`: Instruction set, split into a double and an integer family
//! - `bytecode`: Instructions and compiled programs
//! - `compiler`: Tree to bytecode compiler
//! - `vm`: Execution engine
//! - `bytecode_debug`: Disassembler
//! - `error`: Error types for VM and compiler

pub mod bytecode;
pub mod bytecode_debug;
pub mod compiler;
pub mod error;
pub mod opcode;
pub mod vm;

// Re-export main types
pub use bytecode::{Instruction, Program};
pub use bytecode_debug::disassemble;
pub use compiler::{compile, Compiler};
pub use error::{CompileError, VmError};
pub use opcode::OpCode;
pub use vm::{gamma, run, VM};

#[cfg(test)]
mod tests;
