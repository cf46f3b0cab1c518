//! The host system-call table: a closed set of indices the bytecode
//! addresses opaquely. The interpreter never inspects what a call does;
//! it just hands over read access to the current stacks and applies
//! whatever the host returns.

use crate::object::ObjRef;
use crate::value::Value;

/// What a system call is allowed to see: the live register file and
/// stack contents, read-only. Mirrors the interpreter's own addressing
/// so a host function can pop its own arguments off the stack tops.
pub struct SyscallContext<'a> {
  pub a: Value,
  pub b: Value,
  pub x: Option<&'a ObjRef>,
  pub y: Option<&'a ObjRef>,
  pub z: Option<&'a ObjRef>,
  pub values: &'a [Value],
  pub objects: &'a [Option<ObjRef>],
}

/// What a system call hands back: optional new register contents, how
/// many stack slots it consumed, and an optional program-visible error.
#[derive(Default)]
pub struct SyscallOutcome {
  pub new_a: Option<Value>,
  pub new_x: Option<ObjRef>,
  pub values_popped: u16,
  pub objects_popped: u16,
  pub error: Option<(Value, std::string::String)>,
}

pub type SyscallFn = fn(&SyscallContext) -> SyscallOutcome;

#[derive(Default)]
pub struct SyscallTable {
  calls: Vec<SyscallFn>,
}

impl SyscallTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, f: SyscallFn) -> u16 {
    self.calls.push(f);
    (self.calls.len() - 1) as u16
  }

  pub fn get(&self, index: u16) -> Option<SyscallFn> {
    self.calls.get(index as usize).copied()
  }
}

/// `Chr(Number) -> String`: the code unit named by A, as a one-character string.
pub fn syscall_chr(ctx: &SyscallContext) -> SyscallOutcome {
  let Some(code) = ctx.a.to_i64_truncated() else {
    return SyscallOutcome { error: Some((Value::from_i64(1), "Chr: argument out of range".to_string())), ..Default::default() };
  };
  let Ok(unit) = u16::try_from(code) else {
    return SyscallOutcome { error: Some((Value::from_i64(1), "Chr: argument out of range".to_string())), ..Default::default() };
  };
  let text = std::string::String::from_utf16_lossy(&[unit]);
  SyscallOutcome { new_x: Some(std::rc::Rc::new(crate::object::string_object(&text))), ..Default::default() }
}
