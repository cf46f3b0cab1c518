//! Free functions that append one fixed-width little-endian field to a
//! byte vector. Mirrors of these are what `decode` reads back; the two
//! must be kept in sync by hand since there is no schema in between.

use super::opcode::Opcode;

pub fn insert_op(bc: &mut Vec<u8>, op: Opcode) {
  bc.push(op as u8);
}

pub fn insert_u8(bc: &mut Vec<u8>, v: u8) {
  bc.push(v);
}

pub fn insert_i16_le(bc: &mut Vec<u8>, v: i16) {
  bc.extend_from_slice(&v.to_le_bytes());
}

pub fn insert_u16_le(bc: &mut Vec<u8>, v: u16) {
  bc.extend_from_slice(&v.to_le_bytes());
}

pub fn insert_u32_le(bc: &mut Vec<u8>, v: u32) {
  bc.extend_from_slice(&v.to_le_bytes());
}

pub fn insert_i64_le(bc: &mut Vec<u8>, v: i64) {
  bc.extend_from_slice(&v.to_le_bytes());
}

/// Length-prefixed (`u32`) UTF-8 string, used by the `LoadConstantString*` opcodes.
pub fn insert_string(bc: &mut Vec<u8>, s: &str) {
  insert_u32_le(bc, s.len() as u32);
  bc.extend_from_slice(s.as_bytes());
}

/// Small builder for hand-assembling a procedure's instruction stream,
/// used by tests and by `lang-cli`'s demo program.
#[derive(Debug, Default)]
pub struct InstructionWriter {
  bytes: Vec<u8>,
}

impl InstructionWriter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn offset(&self) -> u32 {
    self.bytes.len() as u32
  }

  pub fn op(&mut self, op: Opcode) -> &mut Self {
    insert_op(&mut self.bytes, op);
    self
  }

  pub fn u8(&mut self, v: u8) -> &mut Self {
    insert_u8(&mut self.bytes, v);
    self
  }

  pub fn i16(&mut self, v: i16) -> &mut Self {
    insert_i16_le(&mut self.bytes, v);
    self
  }

  pub fn u16(&mut self, v: u16) -> &mut Self {
    insert_u16_le(&mut self.bytes, v);
    self
  }

  pub fn u32(&mut self, v: u32) -> &mut Self {
    insert_u32_le(&mut self.bytes, v);
    self
  }

  pub fn i64(&mut self, v: i64) -> &mut Self {
    insert_i64_le(&mut self.bytes, v);
    self
  }

  pub fn string(&mut self, s: &str) -> &mut Self {
    insert_string(&mut self.bytes, s);
    self
  }

  pub fn finish(self) -> Vec<u8> {
    self.bytes
  }
}
