use std::rc::Rc;

use im::Vector;

use crate::bytecode::Opcode;
use crate::error::{FatalError, FatalResult};
use crate::object::Object;
use crate::value::Value;

use super::builders::Builder;
use super::Interpreter;

impl<'p> Interpreter<'p> {
  fn index_from_a(&self, op: &'static str) -> FatalResult<usize> {
    let i = self.registers.a.to_i64_truncated().ok_or(FatalError::TypeMismatch { expected: "integer", op })?;
    usize::try_from(i).map_err(|_| FatalError::TypeMismatch { expected: "non-negative index", op })
  }

  pub(super) fn dispatch_list(&mut self, op: Opcode) -> FatalResult<()> {
    match op {
      Opcode::ValueListBuilderBegin => self.builder_stack.push(Builder::new_value_list()),
      Opcode::ValueListBuilderAddA => {
        let a = self.registers.a;
        match self.builder_stack.last_mut() {
          Some(Builder::ValueList(items)) => items.push(a),
          _ => return Err(FatalError::MalformedBytecode { offset: self.ip as usize }),
        }
      }
      Opcode::ValueListBuilderEnd => {
        let Some(Builder::ValueList(items)) = self.builder_stack.pop() else {
          return Err(FatalError::MalformedBytecode { offset: self.ip as usize });
        };
        self.registers.x = Some(Rc::new(Object::ValueList(Vector::from_iter(items))));
      }
      Opcode::ValueListGet => {
        let idx = self.index_from_a("ValueListGet")?;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ValueList", op: "ValueListGet" })?;
        let list = obj.as_value_list("ValueListGet")?;
        self.registers.a = *list.get(idx).ok_or(FatalError::TypeMismatch { expected: "in-range index", op: "ValueListGet" })?;
      }
      Opcode::ValueListSet => {
        let idx = self.index_from_a("ValueListSet")?;
        let value = self.registers.b;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ValueList", op: "ValueListSet" })?;
        let mut list = obj.as_value_list("ValueListSet")?.clone();
        if idx >= list.len() {
          return Err(FatalError::TypeMismatch { expected: "in-range index", op: "ValueListSet" });
        }
        list.set(idx, value);
        self.registers.x = Some(Rc::new(Object::ValueList(list)));
      }
      Opcode::ValueListCount => {
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ValueList", op: "ValueListCount" })?;
        self.registers.a = Value::from_i64(obj.as_value_list("ValueListCount")?.len() as i64);
      }
      Opcode::ValueListInsert => {
        let idx = self.index_from_a("ValueListInsert")?;
        let value = self.registers.b;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ValueList", op: "ValueListInsert" })?;
        let mut list = obj.as_value_list("ValueListInsert")?.clone();
        if idx > list.len() {
          return Err(FatalError::TypeMismatch { expected: "in-range index", op: "ValueListInsert" });
        }
        list.insert(idx, value);
        self.registers.x = Some(Rc::new(Object::ValueList(list)));
      }
      Opcode::ValueListRemove => {
        let idx = self.index_from_a("ValueListRemove")?;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ValueList", op: "ValueListRemove" })?;
        let mut list = obj.as_value_list("ValueListRemove")?.clone();
        if idx >= list.len() {
          return Err(FatalError::TypeMismatch { expected: "in-range index", op: "ValueListRemove" });
        }
        list.remove(idx);
        self.registers.x = Some(Rc::new(Object::ValueList(list)));
      }

      Opcode::ObjectListBuilderBegin => self.builder_stack.push(Builder::new_object_list()),
      Opcode::ObjectListBuilderAddX => {
        let x = self.registers.x.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ObjectListBuilderAddX" })?;
        match self.builder_stack.last_mut() {
          Some(Builder::ObjectList(items)) => items.push(x),
          _ => return Err(FatalError::MalformedBytecode { offset: self.ip as usize }),
        }
      }
      Opcode::ObjectListBuilderEnd => {
        let Some(Builder::ObjectList(items)) = self.builder_stack.pop() else {
          return Err(FatalError::MalformedBytecode { offset: self.ip as usize });
        };
        self.registers.x = Some(Rc::new(Object::ObjectList(Vector::from_iter(items))));
      }
      Opcode::ObjectListGet => {
        let idx = self.index_from_a("ObjectListGet")?;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ObjectList", op: "ObjectListGet" })?;
        let list = obj.as_object_list("ObjectListGet")?;
        self.registers.x = Some(list.get(idx).ok_or(FatalError::TypeMismatch { expected: "in-range index", op: "ObjectListGet" })?.clone());
      }
      Opcode::ObjectListSet => {
        let idx = self.index_from_a("ObjectListSet")?;
        let value = self.registers.y.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ObjectListSet" })?;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ObjectList", op: "ObjectListSet" })?;
        let mut list = obj.as_object_list("ObjectListSet")?.clone();
        if idx >= list.len() {
          return Err(FatalError::TypeMismatch { expected: "in-range index", op: "ObjectListSet" });
        }
        list.set(idx, value);
        self.registers.x = Some(Rc::new(Object::ObjectList(list)));
      }
      Opcode::ObjectListCount => {
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ObjectList", op: "ObjectListCount" })?;
        self.registers.a = Value::from_i64(obj.as_object_list("ObjectListCount")?.len() as i64);
      }
      Opcode::ObjectListInsert => {
        let idx = self.index_from_a("ObjectListInsert")?;
        let value = self.registers.y.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ObjectListInsert" })?;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ObjectList", op: "ObjectListInsert" })?;
        let mut list = obj.as_object_list("ObjectListInsert")?.clone();
        if idx > list.len() {
          return Err(FatalError::TypeMismatch { expected: "in-range index", op: "ObjectListInsert" });
        }
        list.insert(idx, value);
        self.registers.x = Some(Rc::new(Object::ObjectList(list)));
      }
      Opcode::ObjectListRemove => {
        let idx = self.index_from_a("ObjectListRemove")?;
        let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ObjectList", op: "ObjectListRemove" })?;
        let mut list = obj.as_object_list("ObjectListRemove")?.clone();
        if idx >= list.len() {
          return Err(FatalError::TypeMismatch { expected: "in-range index", op: "ObjectListRemove" });
        }
        list.remove(idx);
        self.registers.x = Some(Rc::new(Object::ObjectList(list)));
      }
      other => unreachable!("{other:?} is not a list opcode"),
    }
    Ok(())
  }
}
