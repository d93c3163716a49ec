//! Operator and function call compilation

use crate::bytecode::Instruction;
use crate::compiler::intrinsics::intrinsic;
use crate::compiler::Compiler;
use crate::error::CompileError;
use crate::opcode::OpCode;
use std::rc::Rc;
use udcalc_parser::ast::Node;
use udcalc_parser::ops::{OpInfo, OpTag};
use udcalc_types::Domain;

impl Compiler {
    /// Compile a prefix or postfix operator
    pub(crate) fn compile_unary_op(
        &mut self,
        op: &OpInfo,
        operand: &Node,
    ) -> Result<(), CompileError> {
        let opcode = match (self.domain, op.tag) {
            (Domain::Double, OpTag::Negate) => OpCode::Neg,
            (Domain::Double, OpTag::Percent) => OpCode::Percent,
            (Domain::Double, OpTag::Factorial) => OpCode::Fact,
            (Domain::Integer, OpTag::Negate) => OpCode::NegI,
            (Domain::Integer, OpTag::BitNot) => OpCode::BitNot,
            _ => return Err(self.unsupported(op.symbol)),
        };

        self.compile_node(operand)?;
        self.program.emit(Instruction::op(opcode));
        Ok(())
    }

    /// Compile binary operation
    pub(crate) fn compile_binary_op(
        &mut self,
        op: &OpInfo,
        left: &Node,
        right: &Node,
    ) -> Result<(), CompileError> {
        let opcode = match (self.domain, op.tag) {
            (Domain::Double, OpTag::Add) => OpCode::Add,
            (Domain::Double, OpTag::Sub) => OpCode::Sub,
            (Domain::Double, OpTag::Mul) => OpCode::Mul,
            (Domain::Double, OpTag::Div) => OpCode::Div,
            (Domain::Double, OpTag::Pow) => OpCode::Pow,
            (Domain::Integer, OpTag::Add) => OpCode::AddI,
            (Domain::Integer, OpTag::Sub) => OpCode::SubI,
            (Domain::Integer, OpTag::Mul) => OpCode::MulI,
            (Domain::Integer, OpTag::Div) => OpCode::DivI,
            (Domain::Integer, OpTag::Pow) => OpCode::PowI,
            (Domain::Integer, OpTag::BitAnd) => OpCode::BitAnd,
            (Domain::Integer, OpTag::BitOr) => OpCode::BitOr,
            (Domain::Integer, OpTag::BitXor) => OpCode::BitXor,
            (Domain::Integer, OpTag::ShiftLeft) => OpCode::ShiftLeft,
            (Domain::Integer, OpTag::ShiftRight) => OpCode::ShiftRight,
            _ => return Err(self.unsupported(op.symbol)),
        };

        self.compile_node(left)?;
        self.compile_node(right)?;
        self.program.emit(Instruction::op(opcode));
        Ok(())
    }

    /// Compile a call to an intrinsic function
    pub(crate) fn compile_call(
        &mut self,
        name: &str,
        args: &[Rc<Node>],
    ) -> Result<(), CompileError> {
        let opcode = match intrinsic(name, self.domain) {
            Some(opcode) => opcode,
            // known, but only in the other domain
            None if intrinsic(name, other(self.domain)).is_some() => {
                return Err(self.unsupported(name))
            }
            None => return Err(CompileError::UnknownFunction(name.to_string())),
        };

        if args.len() != opcode.arity() {
            return Err(CompileError::ArityMismatch {
                name: name.to_string(),
                expected: opcode.arity(),
                found: args.len(),
            });
        }

        for arg in args {
            self.compile_node(arg)?;
        }
        self.program.emit(Instruction::op(opcode));
        Ok(())
    }

    fn unsupported(&self, op: &str) -> CompileError {
        CompileError::UnsupportedOperator {
            op: op.to_string(),
            domain: self.domain,
        }
    }
}

fn other(domain: Domain) -> Domain {
    match domain {
        Domain::Double => Domain::Integer,
        Domain::Integer => Domain::Double,
    }
}
