//! Result notification
//!
//! Every completed evaluation is returned to the caller as an [`Evaluation`]
//! and also handed to each registered [`ResultListener`], such as a paper
//! tape. Listeners run synchronously, in registration order, after the
//! calculator state has been updated.

use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use udcalc_parser::Node;
use udcalc_types::{format_value, Base, Value};

/// Observer of completed evaluations
pub trait ResultListener {
    fn on_result(&mut self, value: &Value, tree: &Rc<Node>) -> anyhow::Result<()>;
}

/// Shared listener, so the owner can read what it collected
impl<L: ResultListener> ResultListener for Rc<RefCell<L>> {
    fn on_result(&mut self, value: &Value, tree: &Rc<Node>) -> anyhow::Result<()> {
        self.try_borrow_mut()
            .map_err(|_| anyhow::anyhow!("listener is already borrowed"))?
            .on_result(value, tree)
    }
}

/// Outcome of one `=` press
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: Value,
    /// Root of the tree that produced `value`
    pub tree: Rc<Node>,
}

impl Evaluation {
    pub fn new(value: Value, tree: Rc<Node>) -> Self {
        Self { value, tree }
    }

    pub fn transcript_line(&self, base: Base, separators: bool) -> TranscriptLine {
        TranscriptLine::new(&self.value, &self.tree, base, separators)
    }
}

/// `expression = result`, as printed on a paper tape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    pub expression: String,
    pub result: String,
}

impl TranscriptLine {
    pub fn new(value: &Value, tree: &Node, base: Base, separators: bool) -> Self {
        Self {
            expression: tree.pretty_print(),
            result: format_value(value, base, separators, None),
        }
    }
}

impl fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

/// Listener that records a transcript line per evaluation
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    base: Base,
    separators: bool,
    lines: Vec<TranscriptLine>,
}

impl Transcript {
    pub fn new(base: Base, separators: bool) -> Self {
        Self {
            base,
            separators,
            lines: Vec::new(),
        }
    }

    /// Render later results in `base`
    pub fn set_base(&mut self, base: Base) {
        self.base = base;
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl ResultListener for Transcript {
    fn on_result(&mut self, value: &Value, tree: &Rc<Node>) -> anyhow::Result<()> {
        self.lines
            .push(TranscriptLine::new(value, tree, self.base, self.separators));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use udcalc_parser::{parse_expression, ParseOptions};

    #[test]
    fn test_transcript_line() {
        let tree = parse_expression("2 + 3 * 4", ParseOptions::default()).unwrap();
        let line = TranscriptLine::new(&Value::Double(14.0), &tree, Base::Dec, false);
        assert_eq!(line.to_string(), "2 + 3 * 4 = 14");
    }

    #[test]
    fn test_shared_transcript_records() {
        let transcript = Rc::new(RefCell::new(Transcript::new(Base::Hex, false)));
        let mut listener = Rc::clone(&transcript);
        listener
            .on_result(&Value::Integer(255), &Node::number(255_i64))
            .unwrap();
        assert_eq!(transcript.borrow().lines()[0].result, "FF");
    }
}
