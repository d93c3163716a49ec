//! A calculator plus the paper tape it prints to

use crate::keys::{self, UnknownKey};
use anyhow::Context;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use udcalc_core::{Calculator, CalculatorSettings, Evaluation, Transcript, TranscriptLine};
use udcalc_types::{format_value, EntryStyle, Value};
use udcalc_vm::disassemble;

pub struct Session {
    calc: Calculator,
    transcript: Rc<RefCell<Transcript>>,
}

/// Snapshot of what the calculator shows, for printing
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub display: String,
    pub value: Value,
    /// Rendered stack, X first; only filled in RPN
    pub stack: Vec<String>,
    pub transcript: Vec<TranscriptLine>,
}

impl Session {
    pub fn new(settings: CalculatorSettings) -> Self {
        let calc = Calculator::with_settings(settings);
        let transcript = Rc::new(RefCell::new(Transcript::new(
            calc.base(),
            settings.thousands_separators,
        )));

        let mut session = Self { calc, transcript };
        session.calc.add_listener(Rc::clone(&session.transcript));
        session
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calc
    }

    /// Run a keystroke script. Keys before an unknown one stay applied.
    pub fn run_keys(&mut self, script: &str) -> Result<Vec<Evaluation>, UnknownKey> {
        let mut evaluations = Vec::new();
        for token in script.split_whitespace() {
            let events = keys::parse_token(token, self.calc.base())?;
            log::debug!("key '{}' -> {:?}", token, events);
            for event in events {
                self.transcript.borrow_mut().set_base(self.calc.base());
                if let Some(evaluation) = self.calc.handle(event) {
                    evaluations.push(evaluation);
                }
            }
        }
        Ok(evaluations)
    }

    /// Evaluate a typed-out expression
    pub fn eval(&mut self, source: &str) -> anyhow::Result<Evaluation> {
        self.transcript.borrow_mut().set_base(self.calc.base());
        self.calc
            .evaluate_expression(source)
            .with_context(|| format!("cannot evaluate '{}'", source))
    }

    /// Disassembly of the program an evaluation ran
    pub fn bytecode(&self, evaluation: &Evaluation) -> anyhow::Result<String> {
        let program = self.calc.compile_tree(&evaluation.tree)?;
        Ok(disassemble(&program))
    }

    pub fn report(&self) -> Report {
        let settings = self.calc.settings();
        let stack = if self.calc.entry_style() == EntryStyle::Rpn {
            self.calc
                .current_stack_values()
                .iter()
                .map(|value| format_value(value, self.calc.base(), settings.thousands_separators, None))
                .collect()
        } else {
            Vec::new()
        };

        Report {
            display: self.calc.current_display_string(),
            value: self.calc.display_value(),
            stack,
            transcript: self.transcript.borrow().lines().to_vec(),
        }
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use udcalc_types::{Base, CalcMode};

    #[test]
    fn test_keys_fill_transcript() {
        let mut session = Session::new(CalculatorSettings::default());
        let evaluations = session.run_keys("2 + 3 * 4 =").unwrap();
        assert_eq!(evaluations.len(), 1);

        let report = session.report();
        assert_eq!(report.display, "14");
        assert_eq!(report.transcript[0].to_string(), "2 + 3 * 4 = 14");
        assert!(report.stack.is_empty());
    }

    #[test]
    fn test_transcript_follows_base() {
        let mut session =
            Session::new(CalculatorSettings::default().with_mode(CalcMode::Programmer));
        session.run_keys("hex ff and 0f =").unwrap();
        assert_eq!(session.calculator().base(), Base::Hex);
        assert_eq!(session.report().transcript[0].result, "F");
    }

    #[test]
    fn test_rpn_report_lists_stack() {
        let mut session = Session::new(CalculatorSettings::default());
        session.run_keys("rpn 1 enter 2").unwrap();
        assert_eq!(session.report().stack, vec!["2", "1"]);
    }

    #[test]
    fn test_unknown_key_stops_script() {
        let mut session = Session::new(CalculatorSettings::default());
        let err = session.run_keys("7 frob 8").unwrap_err();
        assert_eq!(err.key, "frob");
        assert_eq!(session.report().display, "7");
    }

    #[test]
    fn test_eval_and_bytecode() {
        let mut session = Session::new(CalculatorSettings::default());
        let evaluation = session.eval("2 ^ 10").unwrap();
        assert_eq!(evaluation.value, Value::Double(1024.0));

        let text = session.bytecode(&evaluation).unwrap();
        assert!(text.contains("POW"));
        assert!(session.eval("2 +").is_err());
    }
}
