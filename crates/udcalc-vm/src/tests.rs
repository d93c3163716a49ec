//! Integration tests for the VM

mod vm_integration_tests;

use crate::bytecode::{Instruction, Program};
use crate::error::VmError;
use crate::opcode::OpCode;
use crate::vm::VM;
use udcalc_types::{Domain, ErrorKind, Value};

fn program(domain: Domain, code: Vec<Instruction>) -> Program {
    let mut program = Program::new("<test>", domain);
    for instruction in code {
        program.emit(instruction);
    }
    program
}

#[test]
fn test_single_push() {
    let p = program(Domain::Double, vec![Instruction::push(Value::Double(42.0))]);
    assert_eq!(VM::new().execute(&p), Ok(Value::Double(42.0)));
}

#[test]
fn test_operand_order() {
    let p = program(
        Domain::Double,
        vec![
            Instruction::push(Value::Double(10.0)),
            Instruction::push(Value::Double(4.0)),
            Instruction::op(OpCode::Sub),
        ],
    );
    assert_eq!(VM::new().execute(&p), Ok(Value::Double(6.0)));
}

#[test]
fn test_stack_underflow() {
    let p = program(
        Domain::Double,
        vec![Instruction::push(Value::Double(1.0)), Instruction::op(OpCode::Add)],
    );
    assert_eq!(VM::new().execute(&p), Err(VmError::StackUnderflow));
}

#[test]
fn test_unbalanced_stack() {
    let p = program(
        Domain::Integer,
        vec![
            Instruction::push(Value::Integer(1)),
            Instruction::push(Value::Integer(2)),
        ],
    );
    assert_eq!(
        VM::new().execute(&p),
        Err(VmError::UnbalancedStack { depth: 2 })
    );

    let empty = program(Domain::Double, vec![]);
    assert_eq!(
        VM::new().execute(&empty),
        Err(VmError::UnbalancedStack { depth: 0 })
    );
}

#[test]
fn test_push_without_operand() {
    let p = program(Domain::Double, vec![Instruction::op(OpCode::Push)]);
    assert_eq!(VM::new().execute(&p), Err(VmError::MissingOperand("PUSH")));
}

#[test]
fn test_error_operand_short_circuits() {
    let p = program(
        Domain::Double,
        vec![
            Instruction::push(Value::Error(ErrorKind::Overflow)),
            Instruction::push(Value::Error(ErrorKind::DivideByZero)),
            Instruction::op(OpCode::Add),
            Instruction::op(OpCode::Sqrt),
        ],
    );
    assert_eq!(VM::new().execute(&p), Ok(Value::Error(ErrorKind::Overflow)));
}

#[test]
fn test_vm_is_reusable() {
    let mut vm = VM::new();
    let bad = program(Domain::Double, vec![
        Instruction::push(Value::Double(1.0)),
        Instruction::push(Value::Double(2.0)),
    ]);
    assert!(vm.execute(&bad).is_err());

    let good = program(Domain::Double, vec![Instruction::push(Value::Double(3.0))]);
    assert_eq!(vm.execute(&good), Ok(Value::Double(3.0)));
}
