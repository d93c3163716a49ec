//! Input events accepted by the calculator

use std::fmt;
use std::str::FromStr;
use udcalc_parser::OpTag;
use udcalc_types::{AngleUnit, Base, CalcMode, EntryStyle};

/// Memory register keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryOp {
    /// M+
    Add,
    /// M-
    Subtract,
    /// MR
    Recall,
    /// MC
    Clear,
}

impl fmt::Display for MemoryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MemoryOp::Add => "m+",
            MemoryOp::Subtract => "m-",
            MemoryOp::Recall => "mr",
            MemoryOp::Clear => "mc",
        };
        f.write_str(name)
    }
}

impl FromStr for MemoryOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m+" => Ok(MemoryOp::Add),
            "m-" => Ok(MemoryOp::Subtract),
            "mr" => Ok(MemoryOp::Recall),
            "mc" => Ok(MemoryOp::Clear),
            _ => Err(format!("unknown memory key '{}'", s)),
        }
    }
}

/// One key press or setting change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Digit(u8),
    DecimalPoint,
    /// EE: start typing the exponent
    Exponent,
    Operator(OpTag),
    Evaluate,
    Clear,
    ClearEntry,
    ToggleSign,
    Backspace,
    SetMode(CalcMode),
    SetBase(Base),
    SetAngleUnit(AngleUnit),
    SetEntryStyle(EntryStyle),
    Memory(MemoryOp),

    // RPN stack keys
    Enter,
    Swap,
    Drop,
    RollDown,
    RollUp,

    Random,
}

impl From<OpTag> for Event {
    fn from(tag: OpTag) -> Self {
        Event::Operator(tag)
    }
}

impl From<MemoryOp> for Event {
    fn from(op: MemoryOp) -> Self {
        Event::Memory(op)
    }
}
