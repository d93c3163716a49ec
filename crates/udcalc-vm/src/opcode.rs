//! OpCode definitions for the UDCalc VM
//!
//! The instruction set is split into two disjoint families, one per numeric
//! domain. Double opcodes live in `0..64`, integer opcodes in `64..128`, so
//! the domain of any opcode can be read from its byte value.
//!
//! Every instruction pops its operands from the value stack and pushes exactly
//! one result. Only the push instructions carry an inline operand.

use std::fmt;
use udcalc_types::Domain;

/// Virtual machine instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    // ===== Double: stack =====
    /// Push the inline operand
    Push = 0,

    // ===== Double: arithmetic =====
    /// a + b
    Add = 1,
    /// a - b
    Sub = 2,
    /// a * b
    Mul = 3,
    /// a / b
    Div = 4,
    /// -a
    Neg = 5,
    /// a ^ b
    Pow = 6,
    /// a / 100
    Percent = 7,
    /// a!
    Fact = 8,

    // ===== Double: roots, exponentials & logarithms =====
    Sqrt = 9,
    Cbrt = 10,
    /// e ^ a
    Exp = 11,
    Ln = 12,
    Log10 = 13,
    Log2 = 14,

    // ===== Double: trigonometry (radians) =====
    Sin = 15,
    Cos = 16,
    Tan = 17,
    ASin = 18,
    ACos = 19,
    ATan = 20,

    // ===== Double: trigonometry (degrees) =====
    SinD = 21,
    CosD = 22,
    TanD = 23,
    ASinD = 24,
    ACosD = 25,
    ATanD = 26,

    // ===== Double: hyperbolic =====
    Sinh = 27,
    Cosh = 28,
    Tanh = 29,
    ASinh = 30,
    ACosh = 31,
    ATanh = 32,

    // ===== Double: binary functions =====
    /// a ^ (1 / b)
    YRoot = 33,
    /// log base b of a
    LogY = 34,

    // ===== Integer: stack =====
    /// Push the inline operand
    PushI = 64,

    // ===== Integer: arithmetic (wrapping) =====
    AddI = 65,
    SubI = 66,
    MulI = 67,
    /// Truncating division
    DivI = 68,
    NegI = 69,
    PowI = 70,

    // ===== Integer: bitwise =====
    BitAnd = 71,
    BitOr = 72,
    BitXor = 73,
    BitNot = 74,
    /// Logical shift of the 64-bit pattern
    ShiftLeft = 75,
    /// Logical shift of the 64-bit pattern
    ShiftRight = 76,
    /// Rotate left by one bit
    RotateLeft = 77,
    /// Rotate right by one bit
    RotateRight = 78,
    /// Reverse the eight bytes
    FlipByte = 79,
    /// Reverse the four 16-bit words
    FlipWord = 80,
}

/// First byte value of the integer family
const INTEGER_BASE: u8 = 64;

impl OpCode {
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(OpCode::Push),
            1 => Some(OpCode::Add),
            2 => Some(OpCode::Sub),
            3 => Some(OpCode::Mul),
            4 => Some(OpCode::Div),
            5 => Some(OpCode::Neg),
            6 => Some(OpCode::Pow),
            7 => Some(OpCode::Percent),
            8 => Some(OpCode::Fact),
            9 => Some(OpCode::Sqrt),
            10 => Some(OpCode::Cbrt),
            11 => Some(OpCode::Exp),
            12 => Some(OpCode::Ln),
            13 => Some(OpCode::Log10),
            14 => Some(OpCode::Log2),
            15 => Some(OpCode::Sin),
            16 => Some(OpCode::Cos),
            17 => Some(OpCode::Tan),
            18 => Some(OpCode::ASin),
            19 => Some(OpCode::ACos),
            20 => Some(OpCode::ATan),
            21 => Some(OpCode::SinD),
            22 => Some(OpCode::CosD),
            23 => Some(OpCode::TanD),
            24 => Some(OpCode::ASinD),
            25 => Some(OpCode::ACosD),
            26 => Some(OpCode::ATanD),
            27 => Some(OpCode::Sinh),
            28 => Some(OpCode::Cosh),
            29 => Some(OpCode::Tanh),
            30 => Some(OpCode::ASinh),
            31 => Some(OpCode::ACosh),
            32 => Some(OpCode::ATanh),
            33 => Some(OpCode::YRoot),
            34 => Some(OpCode::LogY),
            64 => Some(OpCode::PushI),
            65 => Some(OpCode::AddI),
            66 => Some(OpCode::SubI),
            67 => Some(OpCode::MulI),
            68 => Some(OpCode::DivI),
            69 => Some(OpCode::NegI),
            70 => Some(OpCode::PowI),
            71 => Some(OpCode::BitAnd),
            72 => Some(OpCode::BitOr),
            73 => Some(OpCode::BitXor),
            74 => Some(OpCode::BitNot),
            75 => Some(OpCode::ShiftLeft),
            76 => Some(OpCode::ShiftRight),
            77 => Some(OpCode::RotateLeft),
            78 => Some(OpCode::RotateRight),
            79 => Some(OpCode::FlipByte),
            80 => Some(OpCode::FlipWord),
            _ => None,
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Numeric domain this opcode operates in
    pub fn domain(self) -> Domain {
        if self.as_u8() < INTEGER_BASE {
            Domain::Double
        } else {
            Domain::Integer
        }
    }

    /// Number of values popped from the stack
    pub fn arity(self) -> usize {
        match self {
            OpCode::Push | OpCode::PushI => 0,
            OpCode::Add
            | OpCode::Sub
            | OpCode::Mul
            | OpCode::Div
            | OpCode::Pow
            | OpCode::YRoot
            | OpCode::LogY
            | OpCode::AddI
            | OpCode::SubI
            | OpCode::MulI
            | OpCode::DivI
            | OpCode::PowI
            | OpCode::BitAnd
            | OpCode::BitOr
            | OpCode::BitXor
            | OpCode::ShiftLeft
            | OpCode::ShiftRight => 2,
            _ => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OpCode::Push => "PUSH",
            OpCode::Add => "ADD",
            OpCode::Sub => "SUB",
            OpCode::Mul => "MUL",
            OpCode::Div => "DIV",
            OpCode::Neg => "NEG",
            OpCode::Pow => "POW",
            OpCode::Percent => "PERCENT",
            OpCode::Fact => "FACT",
            OpCode::Sqrt => "SQRT",
            OpCode::Cbrt => "CBRT",
            OpCode::Exp => "EXP",
            OpCode::Ln => "LN",
            OpCode::Log10 => "LOG10",
            OpCode::Log2 => "LOG2",
            OpCode::Sin => "SIN",
            OpCode::Cos => "COS",
            OpCode::Tan => "TAN",
            OpCode::ASin => "ASIN",
            OpCode::ACos => "ACOS",
            OpCode::ATan => "ATAN",
            OpCode::SinD => "SIND",
            OpCode::CosD => "COSD",
            OpCode::TanD => "TAND",
            OpCode::ASinD => "ASIND",
            OpCode::ACosD => "ACOSD",
            OpCode::ATanD => "ATAND",
            OpCode::Sinh => "SINH",
            OpCode::Cosh => "COSH",
            OpCode::Tanh => "TANH",
            OpCode::ASinh => "ASINH",
            OpCode::ACosh => "ACOSH",
            OpCode::ATanh => "ATANH",
            OpCode::YRoot => "YROOT",
            OpCode::LogY => "LOGY",
            OpCode::PushI => "PUSHI",
            OpCode::AddI => "ADDI",
            OpCode::SubI => "SUBI",
            OpCode::MulI => "MULI",
            OpCode::DivI => "DIVI",
            OpCode::NegI => "NEGI",
            OpCode::PowI => "POWI",
            OpCode::BitAnd => "AND",
            OpCode::BitOr => "OR",
            OpCode::BitXor => "XOR",
            OpCode::BitNot => "NOT",
            OpCode::ShiftLeft => "SHL",
            OpCode::ShiftRight => "SHR",
            OpCode::RotateLeft => "ROL",
            OpCode::RotateRight => "ROR",
            OpCode::FlipByte => "FLIPB",
            OpCode::FlipWord => "FLIPW",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
