//! Keystroke script tokens
//!
//! A script is a whitespace-separated list of keys. Key names are matched
//! first: calculator keys (`=`, `enter`, `m+`, `hex`, ...), operator symbols
//! (`+`, `<<`, ...) and operator names (`sin`, `and`, ...). Anything else
//! that is made of digits of the current base and `.` is typed one digit at
//! a time. A hex number that spells a key name needs a leading zero (`0c`).

use thiserror::Error;
use udcalc_core::{Event, MemoryOp};
use udcalc_parser::OpTag;
use udcalc_types::{AngleUnit, Base, CalcMode, EntryStyle};

/// Keys that are not operators
const CALCULATOR_KEYS: &[(&str, Event)] = &[
    ("=", Event::Evaluate),
    ("enter", Event::Enter),
    ("ee", Event::Exponent),
    ("+/-", Event::ToggleSign),
    ("bs", Event::Backspace),
    ("c", Event::ClearEntry),
    ("ac", Event::Clear),
    ("swap", Event::Swap),
    ("drop", Event::Drop),
    ("rdn", Event::RollDown),
    ("rup", Event::RollUp),
    ("m+", Event::Memory(MemoryOp::Add)),
    ("m-", Event::Memory(MemoryOp::Subtract)),
    ("mr", Event::Memory(MemoryOp::Recall)),
    ("mc", Event::Memory(MemoryOp::Clear)),
    ("rand", Event::Random),
    ("basic", Event::SetMode(CalcMode::Basic)),
    ("scientific", Event::SetMode(CalcMode::Scientific)),
    ("programmer", Event::SetMode(CalcMode::Programmer)),
    ("bin", Event::SetBase(Base::Bin)),
    ("oct", Event::SetBase(Base::Oct)),
    ("dec", Event::SetBase(Base::Dec)),
    ("hex", Event::SetBase(Base::Hex)),
    ("deg", Event::SetAngleUnit(AngleUnit::Degrees)),
    ("rad", Event::SetAngleUnit(AngleUnit::Radians)),
    ("rpn", Event::SetEntryStyle(EntryStyle::Rpn)),
    ("algebraic", Event::SetEntryStyle(EntryStyle::Algebraic)),
];

/// Operator symbols accepted besides the operator names
const SYMBOLS: &[(&str, OpTag)] = &[
    ("+", OpTag::Add),
    ("-", OpTag::Sub),
    ("*", OpTag::Mul),
    ("/", OpTag::Div),
    ("^", OpTag::Pow),
    ("%", OpTag::Percent),
    ("!", OpTag::Factorial),
    ("&", OpTag::BitAnd),
    ("|", OpTag::BitOr),
    ("~", OpTag::BitNot),
    ("<<", OpTag::ShiftLeft),
    (">>", OpTag::ShiftRight),
];

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown key '{key}'{}", did_you_mean(.suggestion))]
pub struct UnknownKey {
    pub key: String,
    pub suggestion: Option<&'static str>,
}

fn did_you_mean(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{}'?)", name),
        None => String::new(),
    }
}

/// Translate one token into the events it stands for
pub fn parse_token(token: &str, base: Base) -> Result<Vec<Event>, UnknownKey> {
    if let Some(event) = key_event(token) {
        return Ok(vec![event]);
    }
    if let Some(events) = number_events(token, base) {
        return Ok(events);
    }
    Err(UnknownKey {
        key: token.to_string(),
        suggestion: suggest(token),
    })
}

/// Every key name, for completion and suggestions
pub fn key_names() -> impl Iterator<Item = &'static str> {
    CALCULATOR_KEYS
        .iter()
        .map(|(name, _)| *name)
        .chain(SYMBOLS.iter().map(|(symbol, _)| *symbol))
        .chain(OpTag::ALL.iter().map(|tag| tag.name()))
}

fn key_event(token: &str) -> Option<Event> {
    let lower = token.to_ascii_lowercase();
    if let Some((_, event)) = CALCULATOR_KEYS.iter().find(|(name, _)| *name == lower) {
        return Some(*event);
    }
    if let Some((_, tag)) = SYMBOLS.iter().find(|(symbol, _)| *symbol == token) {
        return Some(Event::Operator(*tag));
    }
    lower.parse::<OpTag>().ok().map(Event::Operator)
}

fn number_events(token: &str, base: Base) -> Option<Vec<Event>> {
    token
        .chars()
        .map(|c| match c {
            '.' => Some(Event::DecimalPoint),
            _ => c.to_digit(base.radix()).map(|d| Event::Digit(d as u8)),
        })
        .collect()
}

/// Closest key name to an unknown token
pub fn suggest(token: &str) -> Option<&'static str> {
    let lower = token.to_ascii_lowercase();
    key_names()
        .map(|name| (strsim::jaro_winkler(name, &lower), name))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, name)| name)
}
