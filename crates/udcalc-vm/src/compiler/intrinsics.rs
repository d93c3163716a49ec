//! Function names understood by the compiler

use crate::opcode::OpCode;
use udcalc_types::Domain;

/// Opcode implementing the function `name` in `domain`
pub fn intrinsic(name: &str, domain: Domain) -> Option<OpCode> {
    match domain {
        Domain::Double => double_intrinsic(name),
        Domain::Integer => integer_intrinsic(name),
    }
}

fn double_intrinsic(name: &str) -> Option<OpCode> {
    let opcode = match name {
        "sqrt" => OpCode::Sqrt,
        "cbrt" => OpCode::Cbrt,
        "exp" => OpCode::Exp,
        "ln" => OpCode::Ln,
        "log10" => OpCode::Log10,
        "log2" => OpCode::Log2,
        "sin" => OpCode::Sin,
        "cos" => OpCode::Cos,
        "tan" => OpCode::Tan,
        "asin" => OpCode::ASin,
        "acos" => OpCode::ACos,
        "atan" => OpCode::ATan,
        "sind" => OpCode::SinD,
        "cosd" => OpCode::CosD,
        "tand" => OpCode::TanD,
        "asind" => OpCode::ASinD,
        "acosd" => OpCode::ACosD,
        "atand" => OpCode::ATanD,
        "sinh" => OpCode::Sinh,
        "cosh" => OpCode::Cosh,
        "tanh" => OpCode::Tanh,
        "asinh" => OpCode::ASinh,
        "acosh" => OpCode::ACosh,
        "atanh" => OpCode::ATanh,
        "yroot" => OpCode::YRoot,
        "logy" => OpCode::LogY,
        _ => return None,
    };
    Some(opcode)
}

fn integer_intrinsic(name: &str) -> Option<OpCode> {
    let opcode = match name {
        "rol" => OpCode::RotateLeft,
        "ror" => OpCode::RotateRight,
        "flipb" => OpCode::FlipByte,
        "flipw" => OpCode::FlipWord,
        _ => return None,
    };
    Some(opcode)
}
