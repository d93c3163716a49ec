//! Instruction execution handlers

mod double;
mod integer;

pub use double::gamma;

use crate::error::VmError;
use crate::opcode::OpCode;
use crate::vm::ops::ValueOperations;
use crate::vm::VM;
use udcalc_types::{Domain, Value};

impl VM {
    /// Pop the operands of `opcode`, compute, push the result
    pub(crate) fn execute_operation(&mut self, opcode: OpCode) -> Result<(), VmError> {
        let operands = self.pop_operands(opcode.arity())?;

        let result = match ValueOperations::first_error(&operands) {
            Some(error) => error,
            None => match opcode.domain() {
                Domain::Double => {
                    let args: Vec<f64> = operands.iter().map(Value::as_double).collect();
                    double::execute(opcode, &args)
                }
                Domain::Integer => {
                    let args: Vec<i64> = operands.iter().map(Value::as_int).collect();
                    integer::execute(opcode, &args)
                }
            },
        };

        self.push(result);
        Ok(())
    }
}
