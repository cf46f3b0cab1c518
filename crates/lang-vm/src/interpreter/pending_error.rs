//! The single program-visible error slot. Distinct from `FatalError`:
//! this is ordinary control flow the source program can observe and
//! clear, not a bug in the interpreter itself.

use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct PendingError {
  pub flag: bool,
  pub code: Value,
  pub message: std::string::String,
}

impl PendingError {
  pub fn set(&mut self, code: Value, message: impl Into<std::string::String>) {
    self.flag = true;
    self.code = code;
    self.message = message.into();
  }

  pub fn clear(&mut self) {
    self.flag = false;
    self.code = Value::ZERO;
    self.message.clear();
  }

  /// `Rethrow` in the source language: re-asserts the flag without
  /// touching the payload, so an outer `catch` sees the same error.
  pub fn bubble(&mut self) {
    self.flag = true;
  }
}
