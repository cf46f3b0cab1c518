//! The register file: two scalar registers and three object registers,
//! plus the two stacks they spill to. Represented as growable `Vec`s
//! rather than a fixed buffer with a raw shrinking index — the same
//! addressing semantics (frame-relative offset from a saved base), but
//! idiomatic for a safe Rust rendition; `max_depth` enforces the
//! "fixed maximum depth" bound from the design.

use crate::error::{FatalError, FatalResult};
use crate::object::ObjRef;
use crate::value::Value;

pub struct Registers {
  pub a: Value,
  pub b: Value,
  pub x: Option<ObjRef>,
  pub y: Option<ObjRef>,
  pub z: Option<ObjRef>,

  pub values: Vec<Value>,
  pub objects: Vec<Option<ObjRef>>,
  max_value_depth: usize,
  max_object_depth: usize,
}

impl Registers {
  pub fn new(max_value_depth: usize, max_object_depth: usize) -> Self {
    Self {
      a: Value::ZERO,
      b: Value::ZERO,
      x: None,
      y: None,
      z: None,
      values: Vec::new(),
      objects: Vec::new(),
      max_value_depth,
      max_object_depth,
    }
  }

  pub fn push_values(&mut self, count: u16) -> FatalResult<()> {
    if self.values.len() + count as usize > self.max_value_depth {
      return Err(FatalError::ValueStackOverflow);
    }
    self.values.resize(self.values.len() + count as usize, Value::ZERO);
    Ok(())
  }

  pub fn pop_values(&mut self, count: u16) -> FatalResult<()> {
    let count = count as usize;
    if self.values.len() < count {
      return Err(FatalError::ValueStackUnderflow);
    }
    self.values.truncate(self.values.len() - count);
    Ok(())
  }

  pub fn push_objects(&mut self, count: u16) -> FatalResult<()> {
    if self.objects.len() + count as usize > self.max_object_depth {
      return Err(FatalError::ObjectStackOverflow);
    }
    self.objects.resize(self.objects.len() + count as usize, None);
    Ok(())
  }

  pub fn pop_objects(&mut self, count: u16) -> FatalResult<()> {
    let count = count as usize;
    if self.objects.len() < count {
      return Err(FatalError::ObjectStackUnderflow);
    }
    self.objects.truncate(self.objects.len() - count);
    Ok(())
  }

  fn slot(len: usize, base: usize, offset: i16) -> FatalResult<usize> {
    let index = base as i64 + offset as i64;
    if index < 0 || index as usize >= len {
      return Err(FatalError::MalformedBytecode { offset: 0 });
    }
    Ok(index as usize)
  }

  pub fn load_value(&self, base: usize, offset: i16) -> FatalResult<Value> {
    let idx = Self::slot(self.values.len(), base, offset)?;
    Ok(self.values[idx])
  }

  pub fn store_value(&mut self, base: usize, offset: i16, value: Value) -> FatalResult<()> {
    let idx = Self::slot(self.values.len(), base, offset)?;
    self.values[idx] = value;
    Ok(())
  }

  pub fn load_object(&self, base: usize, offset: i16) -> FatalResult<Option<ObjRef>> {
    let idx = Self::slot(self.objects.len(), base, offset)?;
    Ok(self.objects[idx].clone())
  }

  pub fn store_object(&mut self, base: usize, offset: i16, object: Option<ObjRef>) -> FatalResult<()> {
    let idx = Self::slot(self.objects.len(), base, offset)?;
    self.objects[idx] = object;
    Ok(())
  }
}
