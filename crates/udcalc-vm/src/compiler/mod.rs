//! Bytecode compiler (tree to stack instructions)
//!
//! Lowers an expression tree to a linear [`Program`] with a post-order walk.
//! The numeric domain is fixed when the compiler is created and decides every
//! opcode it emits; literal values are coerced to it rather than trusted.

use crate::bytecode::{Instruction, Program};
use crate::error::CompileError;
use udcalc_parser::ast::Node;
use udcalc_types::Domain;

mod intrinsics;
mod operators;

pub use intrinsics::intrinsic;

/// Bytecode compiler
#[derive(Debug)]
pub struct Compiler {
    /// Label for the produced program
    name: String,

    /// Domain every emitted opcode belongs to
    domain: Domain,

    /// Program under construction
    program: Program,
}

impl Compiler {
    /// Create a new compiler for one domain
    pub fn new(name: impl Into<String>, domain: Domain) -> Self {
        let name = name.into();
        Self {
            program: Program::new(name.clone(), domain),
            name,
            domain,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Compile a tree into a fresh program
    pub fn compile(&mut self, tree: &Node) -> Result<Program, CompileError> {
        self.program = Program::new(self.name.clone(), self.domain);
        self.compile_node(tree)?;
        let program = std::mem::replace(
            &mut self.program,
            Program::new(self.name.clone(), self.domain),
        );
        log::trace!(
            "compiled '{}' to {} instruction(s) ({})",
            tree,
            program.len(),
            self.domain
        );
        Ok(program)
    }

    /// Compile a node, leaving its value on top of the stack
    pub(crate) fn compile_node(&mut self, node: &Node) -> Result<(), CompileError> {
        match node {
            Node::Number(value) | Node::Constant { value, .. } => {
                let literal = value.coerce(self.domain);
                self.program.emit(Instruction::push_in(self.domain, literal));
                Ok(())
            }
            Node::UnaryPrefix { op, operand } | Node::UnaryPostfix { op, operand } => {
                self.compile_unary_op(op, operand)
            }
            Node::BinaryOp { op, left, right } => self.compile_binary_op(op, left, right),
            Node::FunctionCall { name, args } => self.compile_call(name, args),
            Node::ParenWrap(inner) => self.compile_node(inner),
        }
    }
}

/// Compile `tree` in `domain` with a default program name
pub fn compile(tree: &Node, domain: Domain) -> Result<Program, CompileError> {
    Compiler::new("<expr>", domain).compile(tree)
}
