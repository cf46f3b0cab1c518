use std::rc::Rc;

use im::Vector;

use crate::bytecode::Opcode;
use crate::error::{FatalError, FatalResult};
use crate::object::Object;

use super::builders::Builder;
use super::Interpreter;

impl<'p> Interpreter<'p> {
  pub(super) fn dispatch_record(&mut self, op: Opcode, code: &[u8]) -> FatalResult<()> {
    match op {
      Opcode::RecordBuilderBegin => {
        let value_slots = self.read_u16(code)?;
        let object_slots = self.read_u16(code)?;
        self.builder_stack.push(Builder::new_record(value_slots, object_slots));
      }
      Opcode::RecordBuilderStoreA => {
        let slot = self.read_u16(code)? as usize;
        let a = self.registers.a;
        match self.builder_stack.last_mut() {
          Some(Builder::Record { values, .. }) => {
            *values.get_mut(slot).ok_or(FatalError::MalformedBytecode { offset: self.ip as usize })? = a;
          }
          _ => return Err(FatalError::MalformedBytecode { offset: self.ip as usize }),
        }
      }
      Opcode::RecordBuilderStoreX => {
        let slot = self.read_u16(code)? as usize;
        let x = self.registers.x.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "RecordBuilderStoreX" })?;
        match self.builder_stack.last_mut() {
          Some(Builder::Record { objects, .. }) => {
            *objects.get_mut(slot).ok_or(FatalError::MalformedBytecode { offset: self.ip as usize })? = Some(x);
          }
          _ => return Err(FatalError::MalformedBytecode { offset: self.ip as usize }),
        }
      }
      Opcode::RecordBuilderEnd => {
        let builder = self.builder_stack.pop().ok_or(FatalError::MalformedBytecode { offset: self.ip as usize })?;
        let Builder::Record { values, objects } = builder else {
          return Err(FatalError::MalformedBytecode { offset: self.ip as usize });
        };
        let objects: Option<Vec<_>> = objects.into_iter().collect();
        let objects = objects.ok_or(FatalError::MalformedBytecode { offset: self.ip as usize })?;
        self.registers.x =
          Some(Rc::new(Object::Record { values: Vector::from_iter(values), objects: Vector::from_iter(objects) }));
      }
      Opcode::RecordLoadA => {
        let slot = self.read_u16(code)? as usize;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "Record", op: "RecordLoadA" })?;
        let (values, _) = obj.as_record("RecordLoadA")?;
        self.registers.a = *values.get(slot).ok_or(FatalError::MalformedBytecode { offset: self.ip as usize })?;
      }
      Opcode::RecordLoadX => {
        let slot = self.read_u16(code)? as usize;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "Record", op: "RecordLoadX" })?;
        let (_, objects) = obj.as_record("RecordLoadX")?;
        self.registers.x = Some(objects.get(slot).ok_or(FatalError::MalformedBytecode { offset: self.ip as usize })?.clone());
      }
      Opcode::RecordStoreA => {
        let slot = self.read_u16(code)? as usize;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "Record", op: "RecordStoreA" })?;
        let (values, objects) = obj.as_record("RecordStoreA")?;
        if slot >= values.len() {
          return Err(FatalError::MalformedBytecode { offset: self.ip as usize });
        }
        let mut values = values.clone();
        values.set(slot, self.registers.a);
        self.registers.x = Some(Rc::new(Object::Record { values, objects: objects.clone() }));
      }
      Opcode::RecordStoreY => {
        let slot = self.read_u16(code)? as usize;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "Record", op: "RecordStoreY" })?;
        let (values, objects) = obj.as_record("RecordStoreY")?;
        if slot >= objects.len() {
          return Err(FatalError::MalformedBytecode { offset: self.ip as usize });
        }
        let replacement = self.registers.y.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "RecordStoreY" })?;
        let mut objects = objects.clone();
        objects.set(slot, replacement);
        self.registers.x = Some(Rc::new(Object::Record { values: values.clone(), objects }));
      }
      other => unreachable!("{other:?} is not a record opcode"),
    }
    Ok(())
  }
}
