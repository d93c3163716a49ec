//! Calculator modes, numeric domains and number bases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a mode name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    pub kind: &'static str,
    pub input: String,
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.input)
    }
}

impl std::error::Error for ParseModeError {}

/// Numeric domain the compiler and VM operate in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    Double,
    Integer,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Double => write!(f, "double"),
            Domain::Integer => write!(f, "integer"),
        }
    }
}

/// Positional base used for entry and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Base {
    Bin = 2,
    Oct = 8,
    #[default]
    Dec = 10,
    Hex = 16,
}

impl Base {
    #[inline]
    pub fn radix(self) -> u32 {
        self as u32
    }

    /// Character for digit `d` (uppercase for hex). `d` must be below the radix.
    pub fn digit_char(self, d: u32) -> char {
        std::char::from_digit(d, self.radix())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    /// Digit value of `c` in this base
    pub fn parse_digit(self, c: char) -> Option<u8> {
        c.to_digit(self.radix()).map(|d| d as u8)
    }

    /// Digits per separator group when thousands separators are shown
    pub fn group_size(self) -> usize {
        match self {
            Base::Bin | Base::Hex => 4,
            Base::Oct | Base::Dec => 3,
        }
    }

    pub fn separator(self) -> char {
        match self {
            Base::Dec => ',',
            _ => ' ',
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Base::Bin => "bin",
            Base::Oct => "oct",
            Base::Dec => "dec",
            Base::Hex => "hex",
        };
        f.write_str(name)
    }
}

impl FromStr for Base {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bin" | "2" | "binary" => Ok(Base::Bin),
            "oct" | "8" | "octal" => Ok(Base::Oct),
            "dec" | "10" | "decimal" => Ok(Base::Dec),
            "hex" | "16" | "hexadecimal" => Ok(Base::Hex),
            _ => Err(ParseModeError {
                kind: "base",
                input: s.to_string(),
            }),
        }
    }
}

/// Calculator keypad layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CalcMode {
    Basic,
    #[default]
    Scientific,
    Programmer,
}

impl CalcMode {
    pub fn domain(self) -> Domain {
        match self {
            CalcMode::Programmer => Domain::Integer,
            CalcMode::Basic | CalcMode::Scientific => Domain::Double,
        }
    }
}

impl fmt::Display for CalcMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalcMode::Basic => "basic",
            CalcMode::Scientific => "scientific",
            CalcMode::Programmer => "programmer",
        };
        f.write_str(name)
    }
}

impl FromStr for CalcMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(CalcMode::Basic),
            "scientific" | "sci" => Ok(CalcMode::Scientific),
            "programmer" | "prog" => Ok(CalcMode::Programmer),
            _ => Err(ParseModeError {
                kind: "mode",
                input: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AngleUnit {
    Degrees,
    #[default]
    Radians,
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleUnit::Degrees => write!(f, "deg"),
            AngleUnit::Radians => write!(f, "rad"),
        }
    }
}

impl FromStr for AngleUnit {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deg" | "degrees" => Ok(AngleUnit::Degrees),
            "rad" | "radians" => Ok(AngleUnit::Radians),
            _ => Err(ParseModeError {
                kind: "angle unit",
                input: s.to_string(),
            }),
        }
    }
}

/// How operators combine with operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntryStyle {
    /// Infix with precedence and parentheses
    #[default]
    Algebraic,
    /// Reverse Polish: operators apply to the stack immediately
    Rpn,
}

impl fmt::Display for EntryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStyle::Algebraic => write!(f, "algebraic"),
            EntryStyle::Rpn => write!(f, "rpn"),
        }
    }
}

impl FromStr for EntryStyle {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "algebraic" | "infix" => Ok(EntryStyle::Algebraic),
            "rpn" => Ok(EntryStyle::Rpn),
            _ => Err(ParseModeError {
                kind: "entry style",
                input: s.to_string(),
            }),
        }
    }
}
