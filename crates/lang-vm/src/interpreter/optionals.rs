use std::rc::Rc;

use crate::bytecode::Opcode;
use crate::error::{FatalError, FatalResult};
use crate::object::Object;

use super::Interpreter;

impl<'p> Interpreter<'p> {
  pub(super) fn dispatch_optional(&mut self, op: Opcode) -> FatalResult<()> {
    match op {
      Opcode::ValueOptionalNewMissing => {
        self.registers.x = Some(Rc::new(Object::ValueOptional(None)));
      }
      Opcode::ValueOptionalNewPresent => {
        self.registers.x = Some(Rc::new(Object::ValueOptional(Some(self.registers.a))));
      }
      Opcode::ObjectOptionalNewMissing => {
        self.registers.x = Some(Rc::new(Object::ObjectOptional(None)));
      }
      Opcode::ObjectOptionalNewPresent => {
        let y = self.registers.y.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ObjectOptionalNewPresent" })?;
        self.registers.x = Some(Rc::new(Object::ObjectOptional(Some(y))));
      }
      other => unreachable!("{other:?} is not an optional opcode"),
    }
    Ok(())
  }
}
