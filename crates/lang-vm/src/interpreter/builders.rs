//! Transient mutable staging for the `*BuilderBegin/.../End` opcode
//! families. Builders never escape the interpreter loop: `End` freezes
//! one into an immutable `im` collection and pops it off the builder
//! stack.

use im::Vector;

use crate::object::{ObjRef, Object};
use crate::value::Value;

pub enum Builder {
  Record { values: Vec<Value>, objects: Vec<Option<ObjRef>> },
  ValueList(Vec<Value>),
  ObjectList(Vec<ObjRef>),
}

impl Builder {
  pub fn new_record(value_slots: u16, object_slots: u16) -> Self {
    Builder::Record { values: vec![Value::ZERO; value_slots as usize], objects: vec![None; object_slots as usize] }
  }

  pub fn new_value_list() -> Self {
    Builder::ValueList(Vec::new())
  }

  pub fn new_object_list() -> Self {
    Builder::ObjectList(Vec::new())
  }
}
