//! RPN stack keys, memory register and Rand

use super::{CalcState, Calculator};
use crate::event::MemoryOp;
use crate::listener::Evaluation;
use rand::Rng;
use udcalc_parser::FrontendContext;
use udcalc_types::{Domain, EntryStyle, Value};

impl Calculator {
    /// Enter
    ///
    /// In RPN this commits the typed number, or duplicates X when nothing is
    /// being typed (the next typed number then replaces the copy). In
    /// algebraic entry it behaves like `=`.
    pub fn enter(&mut self) -> Option<Evaluation> {
        if self.settings.entry_style == EntryStyle::Algebraic {
            return self.evaluate();
        }

        if self.state == CalcState::Typing {
            self.commit_buffer();
        } else if self.context.duplicate_top() {
            self.replace_x = true;
        } else {
            log::debug!("enter ignored: stack is empty");
        }
        self.refresh_display();
        None
    }

    /// Exchange X and Y
    pub fn swap(&mut self) -> bool {
        self.stack_op("swap", FrontendContext::swap_top)
    }

    /// Remove X. While typing, discards the typed number instead.
    pub fn drop_x(&mut self) -> bool {
        if self.settings.entry_style == EntryStyle::Rpn && self.state == CalcState::Typing {
            self.buffer.perform_clear_entry();
            self.state = CalcState::Idle;
            self.refresh_display();
            return true;
        }
        self.stack_op("drop", |ctx| ctx.drop_top().is_some())
    }

    /// R↓: X moves to the bottom of the stack
    pub fn roll_down(&mut self) -> bool {
        self.stack_op("roll down", FrontendContext::roll_down)
    }

    /// R↑: the bottom of the stack becomes X
    pub fn roll_up(&mut self) -> bool {
        self.stack_op("roll up", FrontendContext::roll_up)
    }

    fn stack_op(&mut self, name: &str, op: impl FnOnce(&mut FrontendContext) -> bool) -> bool {
        if self.settings.entry_style != EntryStyle::Rpn {
            log::debug!("{} ignored in algebraic entry", name);
            return false;
        }
        if self.state == CalcState::Typing {
            self.commit_buffer();
        }

        let applied = op(&mut self.context);
        if !applied {
            log::debug!("{} ignored: not enough values on the stack", name);
        }
        self.replace_x = false;
        self.refresh_display();
        applied
    }

    pub fn memory(&mut self, op: MemoryOp) {
        match op {
            MemoryOp::Add | MemoryOp::Subtract => {
                let value = self.display_value();
                if value.is_error() {
                    log::debug!("{} ignored: display shows an error", op);
                    return;
                }
                if self.state == CalcState::Typing {
                    self.commit_buffer();
                    self.refresh_display();
                }
                match op {
                    MemoryOp::Add => self.memory += value.as_double(),
                    _ => self.memory -= value.as_double(),
                }
            }
            MemoryOp::Recall => {
                let recalled = Value::Double(self.memory).coerce(self.settings.mode.domain());
                self.push_value(recalled);
            }
            MemoryOp::Clear => self.memory = 0.0,
        }
    }

    /// Rand: a double in [0, 1), or any 64-bit pattern in programmer mode
    pub fn random(&mut self) {
        let value = match self.settings.mode.domain() {
            Domain::Double => Value::Double(self.rng.gen::<f64>()),
            Domain::Integer => Value::Integer(self.rng.gen::<i64>()),
        };
        self.push_value(value);
    }
}
