//! Operator metadata registry
//!
//! Every key the calculator can press that combines or transforms operands is
//! an [`OpTag`]. The registry maps each tag to a static [`OpInfo`] record that
//! tells the frontend how to place it, how tightly it binds and which tree
//! node it builds. The table is built once and shared for the life of the
//! process.

use crate::error::FrontendError;
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use udcalc_types::{AngleUnit, CalcMode};

/// Operator identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpTag {
    // ===== Arithmetic =====
    Add,
    Sub,
    Mul,
    Div,
    Negate,
    Percent,

    // ===== Powers =====
    Square,
    Cube,
    Pow,
    /// y^x with the operands entered in reverse order
    PowRev,
    Exp,
    Pow10,
    Pow2,

    // ===== Roots & logarithms =====
    Invert,
    Sqrt,
    Cbrt,
    YRoot,
    Ln,
    Log10,
    Log2,
    LogY,

    // ===== Trigonometry =====
    Factorial,
    Sin,
    ASin,
    Cos,
    ACos,
    Tan,
    ATan,

    // ===== Hyperbolic =====
    Sinh,
    ASinh,
    Cosh,
    ACosh,
    Tanh,
    ATanh,

    // ===== Constants =====
    ConstPi,
    ConstE,

    // ===== Grouping =====
    ParenLeft,
    ParenRight,

    // ===== Programmer =====
    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    ShiftLeft,
    ShiftRight,
    RotateLeft,
    RotateRight,
    FlipByte,
    FlipWord,
}

impl OpTag {
    /// Every tag, in registry order
    pub const ALL: [OpTag; 48] = [
        OpTag::Add,
        OpTag::Sub,
        OpTag::Mul,
        OpTag::Div,
        OpTag::Negate,
        OpTag::Percent,
        OpTag::Square,
        OpTag::Cube,
        OpTag::Pow,
        OpTag::PowRev,
        OpTag::Exp,
        OpTag::Pow10,
        OpTag::Pow2,
        OpTag::Invert,
        OpTag::Sqrt,
        OpTag::Cbrt,
        OpTag::YRoot,
        OpTag::Ln,
        OpTag::Log10,
        OpTag::Log2,
        OpTag::LogY,
        OpTag::Factorial,
        OpTag::Sin,
        OpTag::ASin,
        OpTag::Cos,
        OpTag::ACos,
        OpTag::Tan,
        OpTag::ATan,
        OpTag::Sinh,
        OpTag::ASinh,
        OpTag::Cosh,
        OpTag::ACosh,
        OpTag::Tanh,
        OpTag::ATanh,
        OpTag::ConstPi,
        OpTag::ConstE,
        OpTag::ParenLeft,
        OpTag::ParenRight,
        OpTag::BitAnd,
        OpTag::BitOr,
        OpTag::BitXor,
        OpTag::BitNot,
        OpTag::ShiftLeft,
        OpTag::ShiftRight,
        OpTag::RotateLeft,
        OpTag::RotateRight,
        OpTag::FlipByte,
        OpTag::FlipWord,
    ];

    /// Stable lowercase key name, used by scripts and the REPL
    pub fn name(self) -> &'static str {
        match self {
            OpTag::Add => "add",
            OpTag::Sub => "sub",
            OpTag::Mul => "mul",
            OpTag::Div => "div",
            OpTag::Negate => "neg",
            OpTag::Percent => "percent",
            OpTag::Square => "square",
            OpTag::Cube => "cube",
            OpTag::Pow => "pow",
            OpTag::PowRev => "powrev",
            OpTag::Exp => "exp",
            OpTag::Pow10 => "pow10",
            OpTag::Pow2 => "pow2",
            OpTag::Invert => "inv",
            OpTag::Sqrt => "sqrt",
            OpTag::Cbrt => "cbrt",
            OpTag::YRoot => "yroot",
            OpTag::Ln => "ln",
            OpTag::Log10 => "log10",
            OpTag::Log2 => "log2",
            OpTag::LogY => "logy",
            OpTag::Factorial => "fact",
            OpTag::Sin => "sin",
            OpTag::ASin => "asin",
            OpTag::Cos => "cos",
            OpTag::ACos => "acos",
            OpTag::Tan => "tan",
            OpTag::ATan => "atan",
            OpTag::Sinh => "sinh",
            OpTag::ASinh => "asinh",
            OpTag::Cosh => "cosh",
            OpTag::ACosh => "acosh",
            OpTag::Tanh => "tanh",
            OpTag::ATanh => "atanh",
            OpTag::ConstPi => "pi",
            OpTag::ConstE => "e",
            OpTag::ParenLeft => "(",
            OpTag::ParenRight => ")",
            OpTag::BitAnd => "and",
            OpTag::BitOr => "or",
            OpTag::BitXor => "xor",
            OpTag::BitNot => "not",
            OpTag::ShiftLeft => "shl",
            OpTag::ShiftRight => "shr",
            OpTag::RotateLeft => "rol",
            OpTag::RotateRight => "ror",
            OpTag::FlipByte => "flipb",
            OpTag::FlipWord => "flipw",
        }
    }
}

impl fmt::Display for OpTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OpTag {
    type Err = FrontendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        OpTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.name() == lower)
            .ok_or_else(|| FrontendError::UnknownOperator(s.to_string()))
    }
}

/// Where the operator sits relative to its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Prefix,
    Infix,
    Postfix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Binding strength, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    None = 0,
    Additive = 1,
    Multiplicative = 2,
    Power = 3,
    Function = 4,
    Value = 5,
}

/// How a tag turns its operands into a tree node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildRule {
    /// `BinaryOp(tag, a, b)`
    Binary,
    /// `BinaryOp(target, b, a)`
    Swapped(OpTag),
    Prefix,
    Postfix,
    /// `name(x)`
    Function(&'static str),
    /// `name(x)` with the name chosen by the angle unit
    AngleFunction {
        radians: &'static str,
        degrees: &'static str,
    },
    /// `name(a, b)`
    BinaryFunction(&'static str),
    /// `x ^ n`
    RaiseTo(i64),
    /// `b ^ x`
    PowerOf(i64),
    /// `1 / x`
    Reciprocal,
    Constant(f64),
    /// Parentheses, handled by the frontend itself
    Group,
}

/// Calculator modes that expose an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Everywhere,
    /// Basic and scientific
    Decimal,
    Scientific,
    Programmer,
}

impl Availability {
    pub fn allows(self, mode: CalcMode) -> bool {
        match self {
            Availability::Everywhere => true,
            Availability::Decimal => mode != CalcMode::Programmer,
            Availability::Scientific => mode == CalcMode::Scientific,
            Availability::Programmer => mode == CalcMode::Programmer,
        }
    }
}

/// Static description of one operator
#[derive(Debug, Clone, PartialEq)]
pub struct OpInfo {
    pub tag: OpTag,
    pub symbol: &'static str,
    pub placement: Placement,
    pub associativity: Associativity,
    pub precedence: Precedence,
    pub rule: BuildRule,
    pub availability: Availability,
}

impl OpInfo {
    /// Number of operands consumed from the tree stack
    pub fn arity(&self) -> usize {
        match self.rule {
            BuildRule::Constant(_) | BuildRule::Group => 0,
            BuildRule::Binary | BuildRule::Swapped(_) | BuildRule::BinaryFunction(_) => 2,
            _ => 1,
        }
    }

    pub fn is_available(&self, mode: CalcMode) -> bool {
        self.availability.allows(mode)
    }

    pub fn is_binary(&self) -> bool {
        self.arity() == 2
    }
}

static REGISTRY: Lazy<OpRegistry> = Lazy::new(OpRegistry::build);

/// Read-only operator table
#[derive(Debug)]
pub struct OpRegistry {
    entries: Vec<OpInfo>,
}

impl OpRegistry {
    /// The process-wide registry
    pub fn global() -> &'static OpRegistry {
        &REGISTRY
    }

    fn build() -> Self {
        OpRegistry {
            entries: OpTag::ALL.iter().map(|tag| describe(*tag)).collect(),
        }
    }

    pub fn lookup(&self, tag: OpTag) -> Result<&OpInfo, FrontendError> {
        self.entries
            .iter()
            .find(|info| info.tag == tag)
            .ok_or_else(|| FrontendError::UnknownOperator(tag.to_string()))
    }

    /// Find an operator by its printed symbol, e.g. `("-", Prefix)` is Negate
    pub fn find_symbol(&self, placement: Placement, symbol: &str) -> Option<&OpInfo> {
        self.entries
            .iter()
            .find(|info| info.placement == placement && info.symbol == symbol)
    }

    /// Find the operator that builds calls to `name` (either angle variant)
    pub fn find_function(&self, name: &str) -> Option<&OpInfo> {
        self.entries.iter().find(|info| match info.rule {
            BuildRule::Function(n) | BuildRule::BinaryFunction(n) => n == name,
            BuildRule::AngleFunction { radians, degrees } => radians == name || degrees == name,
            _ => false,
        })
    }

    /// Map a function name to the variant used under `angle`
    pub fn function_name<'a>(&self, name: &'a str, angle: AngleUnit) -> &'a str {
        if angle == AngleUnit::Radians {
            return name;
        }
        self.entries
            .iter()
            .find_map(|info| match info.rule {
                BuildRule::AngleFunction { radians, degrees } if radians == name => Some(degrees),
                _ => None,
            })
            .unwrap_or(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpInfo> {
        self.entries.iter()
    }
}

fn describe(tag: OpTag) -> OpInfo {
    use Associativity as A;
    use Availability as Av;
    use BuildRule as R;
    use Placement as P;
    use Precedence as Pr;

    let (symbol, placement, associativity, precedence, rule, availability) = match tag {
        OpTag::Add => ("+", P::Infix, A::Left, Pr::Additive, R::Binary, Av::Everywhere),
        OpTag::Sub => ("-", P::Infix, A::Left, Pr::Additive, R::Binary, Av::Everywhere),
        OpTag::Mul => ("*", P::Infix, A::Left, Pr::Multiplicative, R::Binary, Av::Everywhere),
        OpTag::Div => ("/", P::Infix, A::Left, Pr::Multiplicative, R::Binary, Av::Everywhere),
        OpTag::Negate => ("-", P::Prefix, A::Right, Pr::Function, R::Prefix, Av::Everywhere),
        OpTag::Percent => ("%", P::Postfix, A::Left, Pr::Function, R::Postfix, Av::Decimal),

        OpTag::Square => ("x²", P::Postfix, A::Left, Pr::Power, R::RaiseTo(2), Av::Everywhere),
        OpTag::Cube => ("x³", P::Postfix, A::Left, Pr::Power, R::RaiseTo(3), Av::Everywhere),
        OpTag::Pow => ("^", P::Infix, A::Right, Pr::Power, R::Binary, Av::Everywhere),
        OpTag::PowRev => (
            "yˣ",
            P::Infix,
            A::Right,
            Pr::Power,
            R::Swapped(OpTag::Pow),
            Av::Scientific,
        ),
        OpTag::Exp => fun("exp"),
        OpTag::Pow10 => ("10ˣ", P::Prefix, A::Right, Pr::Power, R::PowerOf(10), Av::Scientific),
        OpTag::Pow2 => ("2ˣ", P::Prefix, A::Right, Pr::Power, R::PowerOf(2), Av::Everywhere),

        OpTag::Invert => ("1/x", P::Postfix, A::Left, Pr::Multiplicative, R::Reciprocal, Av::Decimal),
        OpTag::Sqrt => fun("sqrt"),
        OpTag::Cbrt => fun("cbrt"),
        OpTag::YRoot => binary_fun("yroot"),
        OpTag::Ln => fun("ln"),
        OpTag::Log10 => fun("log10"),
        OpTag::Log2 => fun("log2"),
        OpTag::LogY => binary_fun("logy"),

        OpTag::Factorial => ("!", P::Postfix, A::Left, Pr::Function, R::Postfix, Av::Scientific),
        OpTag::Sin => angle_fun("sin", "sind"),
        OpTag::ASin => angle_fun("asin", "asind"),
        OpTag::Cos => angle_fun("cos", "cosd"),
        OpTag::ACos => angle_fun("acos", "acosd"),
        OpTag::Tan => angle_fun("tan", "tand"),
        OpTag::ATan => angle_fun("atan", "atand"),

        OpTag::Sinh => fun("sinh"),
        OpTag::ASinh => fun("asinh"),
        OpTag::Cosh => fun("cosh"),
        OpTag::ACosh => fun("acosh"),
        OpTag::Tanh => fun("tanh"),
        OpTag::ATanh => fun("atanh"),

        OpTag::ConstPi => constant("π", std::f64::consts::PI),
        OpTag::ConstE => constant("e", std::f64::consts::E),

        OpTag::ParenLeft => ("(", P::Prefix, A::None, Pr::None, R::Group, Av::Everywhere),
        OpTag::ParenRight => (")", P::Postfix, A::None, Pr::None, R::Group, Av::Everywhere),

        OpTag::BitAnd => ("&", P::Infix, A::Left, Pr::Multiplicative, R::Binary, Av::Programmer),
        OpTag::BitOr => ("|", P::Infix, A::Left, Pr::Additive, R::Binary, Av::Programmer),
        OpTag::BitXor => ("xor", P::Infix, A::Left, Pr::Additive, R::Binary, Av::Programmer),
        OpTag::BitNot => ("~", P::Prefix, A::Right, Pr::Function, R::Prefix, Av::Programmer),
        OpTag::ShiftLeft => ("<<", P::Infix, A::Left, Pr::Multiplicative, R::Binary, Av::Programmer),
        OpTag::ShiftRight => (">>", P::Infix, A::Left, Pr::Multiplicative, R::Binary, Av::Programmer),
        OpTag::RotateLeft => programmer_fun("rol"),
        OpTag::RotateRight => programmer_fun("ror"),
        OpTag::FlipByte => programmer_fun("flipb"),
        OpTag::FlipWord => programmer_fun("flipw"),
    };

    OpInfo {
        tag,
        symbol,
        placement,
        associativity,
        precedence,
        rule,
        availability,
    }
}

type Row = (
    &'static str,
    Placement,
    Associativity,
    Precedence,
    BuildRule,
    Availability,
);

fn fun(name: &'static str) -> Row {
    (
        name,
        Placement::Prefix,
        Associativity::Right,
        Precedence::Function,
        BuildRule::Function(name),
        Availability::Scientific,
    )
}

fn angle_fun(radians: &'static str, degrees: &'static str) -> Row {
    (
        radians,
        Placement::Prefix,
        Associativity::Right,
        Precedence::Function,
        BuildRule::AngleFunction { radians, degrees },
        Availability::Scientific,
    )
}

fn binary_fun(name: &'static str) -> Row {
    (
        name,
        Placement::Infix,
        Associativity::Right,
        Precedence::Power,
        BuildRule::BinaryFunction(name),
        Availability::Scientific,
    )
}

fn programmer_fun(name: &'static str) -> Row {
    (
        name,
        Placement::Prefix,
        Associativity::Right,
        Precedence::Function,
        BuildRule::Function(name),
        Availability::Programmer,
    )
}

fn constant(symbol: &'static str, value: f64) -> Row {
    (
        symbol,
        Placement::Prefix,
        Associativity::None,
        Precedence::Value,
        BuildRule::Constant(value),
        Availability::Scientific,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_has_an_entry() {
        let registry = OpRegistry::global();
        for tag in OpTag::ALL {
            let info = registry.lookup(tag).unwrap();
            assert_eq!(info.tag, tag);
        }
        assert_eq!(registry.iter().count(), OpTag::ALL.len());
    }

    #[test]
    fn test_precedence_order() {
        assert!(Precedence::None < Precedence::Additive);
        assert!(Precedence::Additive < Precedence::Multiplicative);
        assert!(Precedence::Power < Precedence::Function);
        assert!(Precedence::Function < Precedence::Value);
    }

    #[test]
    fn test_find_symbol_respects_placement() {
        let registry = OpRegistry::global();
        assert_eq!(registry.find_symbol(Placement::Infix, "-").unwrap().tag, OpTag::Sub);
        assert_eq!(registry.find_symbol(Placement::Prefix, "-").unwrap().tag, OpTag::Negate);
        assert_eq!(registry.find_symbol(Placement::Infix, "^").unwrap().tag, OpTag::Pow);
        assert!(registry.find_symbol(Placement::Postfix, "+").is_none());
    }

    #[test]
    fn test_function_names() {
        let registry = OpRegistry::global();
        assert_eq!(registry.function_name("sin", AngleUnit::Degrees), "sind");
        assert_eq!(registry.function_name("sin", AngleUnit::Radians), "sin");
        assert_eq!(registry.function_name("sqrt", AngleUnit::Degrees), "sqrt");
        assert_eq!(registry.find_function("atand").unwrap().tag, OpTag::ATan);
        assert_eq!(registry.find_function("yroot").unwrap().tag, OpTag::YRoot);
        assert!(registry.find_function("frobnicate").is_none());
    }

    #[test]
    fn test_availability() {
        let registry = OpRegistry::global();
        let sin = registry.lookup(OpTag::Sin).unwrap();
        assert!(sin.is_available(CalcMode::Scientific));
        assert!(!sin.is_available(CalcMode::Basic));

        let percent = registry.lookup(OpTag::Percent).unwrap();
        assert!(percent.is_available(CalcMode::Basic));
        assert!(!percent.is_available(CalcMode::Programmer));

        let and = registry.lookup(OpTag::BitAnd).unwrap();
        assert!(and.is_available(CalcMode::Programmer));
        assert!(!and.is_available(CalcMode::Scientific));

        let square = registry.lookup(OpTag::Square).unwrap();
        assert!(square.is_available(CalcMode::Programmer));
    }

    #[test]
    fn test_arity() {
        let registry = OpRegistry::global();
        assert_eq!(registry.lookup(OpTag::Add).unwrap().arity(), 2);
        assert_eq!(registry.lookup(OpTag::LogY).unwrap().arity(), 2);
        assert_eq!(registry.lookup(OpTag::Sqrt).unwrap().arity(), 1);
        assert_eq!(registry.lookup(OpTag::ConstPi).unwrap().arity(), 0);
    }

    #[test]
    fn test_tag_names_parse_back() {
        for tag in OpTag::ALL {
            assert_eq!(tag.name().parse::<OpTag>().unwrap(), tag);
        }
        assert!("nope".parse::<OpTag>().is_err());
    }
}
