use super::helpers::{compile_in, try_compile};
use crate::bytecode::Instruction;
use crate::compiler::{compile, Compiler};
use crate::error::CompileError;
use crate::opcode::OpCode;
use udcalc_parser::Node;
use udcalc_types::{AngleUnit, CalcMode, Domain, Value};

fn opcodes(source: &str, mode: CalcMode, angle: AngleUnit) -> Vec<OpCode> {
    compile_in(source, mode, angle)
        .unwrap()
        .code
        .iter()
        .map(|instruction| instruction.opcode)
        .collect()
}

#[test]
fn test_post_order_emission() {
    let program = compile_in("2 + 3 * 4", CalcMode::Scientific, AngleUnit::Radians).unwrap();
    assert_eq!(
        program.code,
        vec![
            Instruction::push(Value::Double(2.0)),
            Instruction::push(Value::Double(3.0)),
            Instruction::push(Value::Double(4.0)),
            Instruction::op(OpCode::Mul),
            Instruction::op(OpCode::Add),
        ]
    );
    assert_eq!(program.domain, Domain::Double);
}

#[test]
fn test_integer_mode_emits_integer_family() {
    let ops = opcodes("2 + 3 * 4 & ~1 << 2", CalcMode::Programmer, AngleUnit::Radians);
    assert!(ops.iter().all(|op| op.domain() == Domain::Integer), "{:?}", ops);
    assert!(ops.contains(&OpCode::BitNot));
    assert_eq!(ops.last(), Some(&OpCode::AddI));
}

#[test]
fn test_double_mode_emits_double_family() {
    let ops = opcodes(
        "sqrt(2) + sin(1) * 3! - logy(8, 2) / 50%",
        CalcMode::Scientific,
        AngleUnit::Radians,
    );
    assert!(ops.iter().all(|op| op.domain() == Domain::Double), "{:?}", ops);
}

#[test]
fn test_degree_calls_use_degree_opcodes() {
    let ops = opcodes("sin(30) + atan(1)", CalcMode::Scientific, AngleUnit::Degrees);
    assert!(ops.contains(&OpCode::SinD));
    assert!(ops.contains(&OpCode::ATanD));
    assert!(!ops.contains(&OpCode::Sin));
}

#[test]
fn test_parentheses_emit_nothing() {
    let ops = opcodes("((7))", CalcMode::Scientific, AngleUnit::Radians);
    assert_eq!(ops, vec![OpCode::Push]);
}

#[test]
fn test_literals_are_coerced_to_the_domain() {
    let program = compile(&Node::Number(Value::Integer(3)), Domain::Double).unwrap();
    assert_eq!(program.code, vec![Instruction::push(Value::Double(3.0))]);

    let program = compile(&Node::Number(Value::Double(2.9)), Domain::Integer).unwrap();
    assert_eq!(program.code, vec![Instruction::push(Value::Integer(2))]);
}

#[test]
fn test_operator_outside_its_domain() {
    let err = try_compile("1 & 2", CalcMode::Scientific, AngleUnit::Radians).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnsupportedOperator {
            op: "&".to_string(),
            domain: Domain::Double,
        }
    );

    let err = try_compile("5!", CalcMode::Programmer, AngleUnit::Radians).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedOperator { domain: Domain::Integer, .. }));
}

#[test]
fn test_function_outside_its_domain() {
    let err = try_compile("sin(1)", CalcMode::Programmer, AngleUnit::Radians).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnsupportedOperator {
            op: "sin".to_string(),
            domain: Domain::Integer,
        }
    );

    let err = try_compile("rol(1)", CalcMode::Scientific, AngleUnit::Radians).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedOperator { domain: Domain::Double, .. }));
}

#[test]
fn test_unknown_function() {
    let tree = Node::FunctionCall {
        name: "frob".to_string(),
        args: vec![Node::number(1.0)],
    };
    let err = Compiler::new("<test>", Domain::Double).compile(&tree).unwrap_err();
    assert_eq!(err, CompileError::UnknownFunction("frob".to_string()));
}

#[test]
fn test_arity_mismatch() {
    let tree = Node::FunctionCall {
        name: "logy".to_string(),
        args: vec![Node::number(8.0)],
    };
    assert_eq!(
        compile(&tree, Domain::Double).unwrap_err(),
        CompileError::ArityMismatch {
            name: "logy".to_string(),
            expected: 2,
            found: 1,
        }
    );

    let tree = Node::FunctionCall {
        name: "rol".to_string(),
        args: vec![Node::number(1_i64), Node::number(2_i64)],
    };
    assert!(matches!(
        compile(&tree, Domain::Integer),
        Err(CompileError::ArityMismatch { expected: 1, found: 2, .. })
    ));
}

#[test]
fn test_compiler_is_reusable() {
    let mut compiler = Compiler::new("<repl>", Domain::Double);
    let first = compiler.compile(&Node::Number(Value::Double(1.0))).unwrap();
    let second = compiler.compile(&Node::Number(Value::Double(2.0))).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(second.name, "<repl>");
    assert_eq!(compiler.domain(), Domain::Double);
}
