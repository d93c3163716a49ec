//! Integer-domain instruction execution
//!
//! Values are 64-bit two's complement. Arithmetic wraps; bit operations
//! act on the raw pattern.

use crate::opcode::OpCode;
use crate::vm::ops::ValueOperations;
use udcalc_types::{ErrorKind, Value};

const WORD_BITS: i64 = 64;

/// Execute an integer opcode on already-unwrapped operands
pub(super) fn execute(opcode: OpCode, args: &[i64]) -> Value {
    match opcode {
        OpCode::AddI => Value::Integer(args[0].wrapping_add(args[1])),
        OpCode::SubI => Value::Integer(args[0].wrapping_sub(args[1])),
        OpCode::MulI => Value::Integer(args[0].wrapping_mul(args[1])),
        OpCode::DivI => {
            if args[1] == 0 {
                ValueOperations::divide_by_zero()
            } else {
                Value::Integer(args[0].wrapping_div(args[1]))
            }
        }
        OpCode::NegI => Value::Integer(args[0].wrapping_neg()),
        OpCode::PowI => pow(args[0], args[1]),

        OpCode::BitAnd => Value::Integer(args[0] & args[1]),
        OpCode::BitOr => Value::Integer(args[0] | args[1]),
        OpCode::BitXor => Value::Integer(args[0] ^ args[1]),
        OpCode::BitNot => Value::Integer(!args[0]),
        OpCode::ShiftLeft => shift(args[0], args[1], |bits, n| bits << n),
        OpCode::ShiftRight => shift(args[0], args[1], |bits, n| bits >> n),
        OpCode::RotateLeft => Value::Integer(args[0].rotate_left(1)),
        OpCode::RotateRight => Value::Integer(args[0].rotate_right(1)),
        OpCode::FlipByte => Value::Integer(args[0].swap_bytes()),
        OpCode::FlipWord => Value::Integer(flip_words(args[0] as u64) as i64),

        _ => unreachable!("Non-integer opcode {} in integer handler", opcode),
    }
}

/// Wrapping exponentiation. Negative exponents truncate toward zero.
fn pow(base: i64, exponent: i64) -> Value {
    if exponent < 0 {
        return match base {
            0 => ValueOperations::divide_by_zero(),
            1 => Value::Integer(1),
            -1 if exponent % 2 == 0 => Value::Integer(1),
            -1 => Value::Integer(-1),
            _ => Value::Integer(0),
        };
    }

    let mut result: i64 = 1;
    let mut square = base;
    let mut remaining = exponent as u64;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result.wrapping_mul(square);
        }
        square = square.wrapping_mul(square);
        remaining >>= 1;
    }
    Value::Integer(result)
}

/// Logical shift of the 64-bit pattern
fn shift(value: i64, amount: i64, op: impl Fn(u64, u32) -> u64) -> Value {
    if !(0..WORD_BITS).contains(&amount) {
        return Value::Error(ErrorKind::Overflow);
    }
    Value::Integer(op(value as u64, amount as u32) as i64)
}

/// Reverse the order of the four 16-bit words
fn flip_words(bits: u64) -> u64 {
    (bits << 48) | ((bits & 0xFFFF_0000) << 16) | ((bits >> 16) & 0xFFFF_0000) | (bits >> 48)
}
