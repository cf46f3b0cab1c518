//! The dispatch loop: decode one instruction, mutate interpreter state,
//! repeat. Bounded by a cycle count so a host can time-slice a program
//! instead of trusting it to terminate.

use crate::bytecode::decode;
use crate::bytecode::Opcode;
use crate::error::{FatalError, FatalResult};
use crate::object::string_object;
use crate::value::Value;

use super::frame::CallFrame;
use super::Interpreter;

/// What one dispatched instruction asks the loop to do next.
enum Control {
  Continue,
  Exit,
}

impl<'p> Interpreter<'p> {
  pub(super) fn read_u8(&mut self, code: &[u8]) -> FatalResult<u8> {
    let (v, next) = decode::read_u8(code, self.ip as usize)?;
    self.ip = next as u32;
    Ok(v)
  }

  pub(super) fn read_i16(&mut self, code: &[u8]) -> FatalResult<i16> {
    let (v, next) = decode::read_i16_le(code, self.ip as usize)?;
    self.ip = next as u32;
    Ok(v)
  }

  pub(super) fn read_u16(&mut self, code: &[u8]) -> FatalResult<u16> {
    let (v, next) = decode::read_u16_le(code, self.ip as usize)?;
    self.ip = next as u32;
    Ok(v)
  }

  pub(super) fn read_u32(&mut self, code: &[u8]) -> FatalResult<u32> {
    let (v, next) = decode::read_u32_le(code, self.ip as usize)?;
    self.ip = next as u32;
    Ok(v)
  }

  pub(super) fn read_i64(&mut self, code: &[u8]) -> FatalResult<i64> {
    let (v, next) = decode::read_i64_le(code, self.ip as usize)?;
    self.ip = next as u32;
    Ok(v)
  }

  pub(super) fn read_string(&mut self, code: &[u8]) -> FatalResult<std::string::String> {
    let (v, next) = decode::read_string(code, self.ip as usize)?;
    self.ip = next as u32;
    Ok(v)
  }

  /// Shared by `Return` and `ReturnIfError`: pops the call stack and
  /// restores the caller's frame. Popping the outermost frame (the entry
  /// procedure itself returning) halts the run rather than erroring.
  fn do_return(&mut self) -> FatalResult<Control> {
    if !self.builder_stack.is_empty() {
      return Err(FatalError::BuilderStackNotEmptyOnReturn);
    }
    match self.call_stack.pop() {
      None => Ok(Control::Exit),
      Some(frame) => {
        let procedure = &self.program.procedures[self.current_procedure];
        self.registers.pop_values(procedure.value_frame_size)?;
        self.registers.pop_objects(procedure.object_frame_size)?;
        self.current_procedure = frame.return_procedure;
        self.ip = frame.return_offset;
        self.value_base = frame.caller_value_base;
        self.object_base = frame.caller_object_base;
        Ok(Control::Continue)
      }
    }
  }

  /// Runs up to `max_cycles` instructions. Returns `Ok(true)` if the
  /// program has more work to do, `Ok(false)` once it has halted.
  pub fn run(&mut self, max_cycles: u64) -> FatalResult<bool> {
    if self.halted {
      return Ok(false);
    }
    for _ in 0..max_cycles {
      let program = self.program;
      let code = &program.procedures[self.current_procedure].code;
      let opcode_offset = self.ip as usize;
      let byte = self.read_u8(code)?;
      let op = Opcode::from_u8(byte).ok_or(FatalError::UnknownOpcode { offset: opcode_offset, byte })?;
      match self.dispatch(op, code)? {
        Control::Continue => {}
        Control::Exit => {
          self.halted = true;
          return Ok(false);
        }
      }
    }
    Ok(true)
  }

  fn dispatch(&mut self, op: Opcode, code: &[u8]) -> FatalResult<Control> {
    match op {
      // --- register moves --------------------------------------------
      Opcode::LoadConstantA => {
        let v = self.read_i64(code)?;
        self.registers.a = Value::from_i64(v);
      }
      Opcode::LoadConstantB => {
        let v = self.read_i64(code)?;
        self.registers.b = Value::from_i64(v);
      }
      Opcode::LoadConstantStringX => {
        let s = self.read_string(code)?;
        self.registers.x = Some(std::rc::Rc::new(string_object(&s)));
      }
      Opcode::LoadConstantStringY => {
        let s = self.read_string(code)?;
        self.registers.y = Some(std::rc::Rc::new(string_object(&s)));
      }
      Opcode::LoadConstantStringZ => {
        let s = self.read_string(code)?;
        self.registers.z = Some(std::rc::Rc::new(string_object(&s)));
      }
      Opcode::SetAFromB => self.registers.a = self.registers.b,
      Opcode::SetBFromA => self.registers.b = self.registers.a,
      Opcode::SetXFromY => self.registers.x = self.registers.y.clone(),
      Opcode::SetYFromX => self.registers.y = self.registers.x.clone(),
      Opcode::ClearX => self.registers.x = None,
      Opcode::ClearY => self.registers.y = None,
      Opcode::ClearZ => self.registers.z = None,

      // --- stack access -------------------------------------------------
      Opcode::PushValues => {
        let n = self.read_u16(code)?;
        self.registers.push_values(n)?;
      }
      Opcode::PopValues => {
        let n = self.read_u16(code)?;
        self.registers.pop_values(n)?;
      }
      Opcode::PushObjects => {
        let n = self.read_u16(code)?;
        self.registers.push_objects(n)?;
      }
      Opcode::PopObjects => {
        let n = self.read_u16(code)?;
        self.registers.pop_objects(n)?;
      }
      Opcode::LoadA => {
        let offset = self.read_i16(code)?;
        self.registers.a = self.registers.load_value(self.value_base, offset)?;
      }
      Opcode::LoadB => {
        let offset = self.read_i16(code)?;
        self.registers.b = self.registers.load_value(self.value_base, offset)?;
      }
      Opcode::LoadX => {
        let offset = self.read_i16(code)?;
        self.registers.x = self.registers.load_object(self.object_base, offset)?;
      }
      Opcode::LoadY => {
        let offset = self.read_i16(code)?;
        self.registers.y = self.registers.load_object(self.object_base, offset)?;
      }
      Opcode::LoadZ => {
        let offset = self.read_i16(code)?;
        self.registers.z = self.registers.load_object(self.object_base, offset)?;
      }
      Opcode::StoreA => {
        let offset = self.read_i16(code)?;
        let a = self.registers.a;
        self.registers.store_value(self.value_base, offset, a)?;
      }
      Opcode::StoreB => {
        let offset = self.read_i16(code)?;
        let b = self.registers.b;
        self.registers.store_value(self.value_base, offset, b)?;
      }
      Opcode::StoreX => {
        let offset = self.read_i16(code)?;
        let x = self.registers.x.clone();
        self.registers.store_object(self.object_base, offset, x)?;
      }
      Opcode::StoreY => {
        let offset = self.read_i16(code)?;
        let y = self.registers.y.clone();
        self.registers.store_object(self.object_base, offset, y)?;
      }
      Opcode::StoreZ => {
        let offset = self.read_i16(code)?;
        let z = self.registers.z.clone();
        self.registers.store_object(self.object_base, offset, z)?;
      }

      // --- arithmetic / logic ---------------------------------------------
      Opcode::Add => self.registers.a = Value(self.registers.a.0 + self.registers.b.0),
      Opcode::Subtract => self.registers.a = Value(self.registers.a.0 - self.registers.b.0),
      Opcode::Multiply => self.registers.a = Value(self.registers.a.0 * self.registers.b.0),
      Opcode::Divide => {
        let divisor = self.registers.b.0;
        let quotient =
          self.registers.a.0.checked_div(divisor).ok_or(FatalError::TypeMismatch { expected: "nonzero divisor", op: "Divide" })?;
        self.registers.a = Value(quotient);
      }
      Opcode::Modulo => {
        if self.registers.b.0.is_zero() {
          return Err(FatalError::TypeMismatch { expected: "nonzero divisor", op: "Modulo" });
        }
        self.registers.a = Value(self.registers.a.0 % self.registers.b.0);
      }
      Opcode::LogicalOr => self.registers.a = Value::from_bool(self.registers.a.is_truthy() || self.registers.b.is_truthy()),
      Opcode::LogicalAnd => self.registers.a = Value::from_bool(self.registers.a.is_truthy() && self.registers.b.is_truthy()),
      Opcode::Equals => self.registers.a = Value::from_bool(self.registers.a == self.registers.b),
      Opcode::NotEquals => self.registers.a = Value::from_bool(self.registers.a != self.registers.b),
      Opcode::LessThan => self.registers.a = Value::from_bool(self.registers.a.0 < self.registers.b.0),
      Opcode::LessThanEquals => self.registers.a = Value::from_bool(self.registers.a.0 <= self.registers.b.0),
      Opcode::GreaterThan => self.registers.a = Value::from_bool(self.registers.a.0 > self.registers.b.0),
      Opcode::GreaterThanEquals => self.registers.a = Value::from_bool(self.registers.a.0 >= self.registers.b.0),
      Opcode::AEqualsConstant => {
        let v = self.read_i64(code)?;
        self.registers.a = Value::from_i64(v);
      }
      Opcode::BEqualsConstant => {
        let v = self.read_i64(code)?;
        self.registers.b = Value::from_i64(v);
      }

      // --- strings --------------------------------------------------------
      op @ (Opcode::StringXEqualsY
      | Opcode::StringXConcatenateY
      | Opcode::StringMid
      | Opcode::StringIndexOf
      | Opcode::StringAsc
      | Opcode::StringPrint
      | Opcode::StringInputLine
      | Opcode::NumberToString
      | Opcode::StringToNumber) => self.dispatch_string(op)?,

      // --- control flow -------------------------------------------------
      Opcode::Jump => {
        let target = self.read_u32(code)?;
        self.ip = target;
      }
      Opcode::BranchIfA => {
        let target = self.read_u32(code)?;
        if self.registers.a.is_truthy() {
          self.ip = target;
        }
      }
      Opcode::BranchIfNotA => {
        let target = self.read_u32(code)?;
        if !self.registers.a.is_truthy() {
          self.ip = target;
        }
      }
      Opcode::Call => {
        let index = self.read_u16(code)?;
        self.call_depth_ok()?;
        let callee =
          self.program.procedures.get(index as usize).ok_or(FatalError::UnknownProcedure { index })?;
        self.call_stack.push(CallFrame {
          return_procedure: self.current_procedure,
          return_offset: self.ip,
          caller_value_base: self.value_base,
          caller_object_base: self.object_base,
        });
        self.value_base = self.registers.values.len();
        self.object_base = self.registers.objects.len();
        self.current_procedure = index as usize;
        self.ip = 0;
        self.registers.push_values(callee.value_frame_size)?;
        self.registers.push_objects(callee.object_frame_size)?;
      }
      Opcode::SystemCall => {
        let index = self.read_u16(code)?;
        let call = self.syscalls.get(index).ok_or(FatalError::UnknownSystemCall { index })?;
        let ctx = crate::syscall::SyscallContext {
          a: self.registers.a,
          b: self.registers.b,
          x: self.registers.x.as_ref(),
          y: self.registers.y.as_ref(),
          z: self.registers.z.as_ref(),
          values: &self.registers.values,
          objects: &self.registers.objects,
        };
        let outcome = call(&ctx);
        self.registers.pop_values(outcome.values_popped)?;
        self.registers.pop_objects(outcome.objects_popped)?;
        if let Some(a) = outcome.new_a {
          self.registers.a = a;
        }
        if let Some(x) = outcome.new_x {
          self.registers.x = Some(x);
        }
        if let Some((code, message)) = outcome.error {
          self.pending_error.set(code, message);
        }
      }
      Opcode::Return => return self.do_return(),
      Opcode::Exit => return Ok(Control::Exit),

      // --- errors -----------------------------------------------------
      Opcode::SetError => {
        let code_value = self.registers.a;
        let message = self.x_string("SetError")?;
        self.pending_error.set(code_value, message);
      }
      Opcode::ClearError => self.pending_error.clear(),
      Opcode::BubbleError => self.pending_error.bubble(),
      Opcode::ReturnIfError => {
        if self.pending_error.flag {
          return self.do_return();
        }
      }
      Opcode::PopBranchIfError => {
        let values_popped = self.read_u16(code)?;
        let objects_popped = self.read_u16(code)?;
        let target = self.read_u32(code)?;
        if self.pending_error.flag {
          self.registers.pop_values(values_popped)?;
          self.registers.pop_objects(objects_popped)?;
          self.ip = target;
        }
      }
      Opcode::BranchIfNotError => {
        let target = self.read_u32(code)?;
        if !self.pending_error.flag {
          self.ip = target;
        }
      }
      Opcode::LoadErrorMessageX => {
        self.registers.x = Some(std::rc::Rc::new(string_object(&self.pending_error.message)));
      }
      Opcode::LoadErrorCodeA => self.registers.a = self.pending_error.code,

      // --- records / lists / maps / optionals -----------------------------
      op @ (Opcode::RecordBuilderBegin
      | Opcode::RecordBuilderStoreA
      | Opcode::RecordBuilderStoreX
      | Opcode::RecordBuilderEnd
      | Opcode::RecordLoadA
      | Opcode::RecordLoadX
      | Opcode::RecordStoreA
      | Opcode::RecordStoreY) => self.dispatch_record(op, code)?,

      op @ (Opcode::ValueListBuilderBegin
      | Opcode::ValueListBuilderAddA
      | Opcode::ValueListBuilderEnd
      | Opcode::ValueListGet
      | Opcode::ValueListSet
      | Opcode::ValueListCount
      | Opcode::ValueListInsert
      | Opcode::ValueListRemove
      | Opcode::ObjectListBuilderBegin
      | Opcode::ObjectListBuilderAddX
      | Opcode::ObjectListBuilderEnd
      | Opcode::ObjectListGet
      | Opcode::ObjectListSet
      | Opcode::ObjectListCount
      | Opcode::ObjectListInsert
      | Opcode::ObjectListRemove) => self.dispatch_list(op)?,

      op @ (Opcode::ValueToValueMapNew
      | Opcode::ValueToValueMapTryGet
      | Opcode::ValueToValueMapCount
      | Opcode::ValueToValueMapSet
      | Opcode::ValueToValueMapRemove
      | Opcode::ValueToValueMapKeys
      | Opcode::ValueToValueMapValues
      | Opcode::ValueToObjectMapNew
      | Opcode::ValueToObjectMapTryGet
      | Opcode::ValueToObjectMapCount
      | Opcode::ValueToObjectMapSet
      | Opcode::ValueToObjectMapRemove
      | Opcode::ValueToObjectMapKeys
      | Opcode::ValueToObjectMapValues
      | Opcode::ObjectToValueMapNew
      | Opcode::ObjectToValueMapTryGet
      | Opcode::ObjectToValueMapCount
      | Opcode::ObjectToValueMapSet
      | Opcode::ObjectToValueMapRemove
      | Opcode::ObjectToValueMapKeys
      | Opcode::ObjectToValueMapValues
      | Opcode::ObjectToObjectMapNew
      | Opcode::ObjectToObjectMapTryGet
      | Opcode::ObjectToObjectMapCount
      | Opcode::ObjectToObjectMapSet
      | Opcode::ObjectToObjectMapRemove
      | Opcode::ObjectToObjectMapKeys
      | Opcode::ObjectToObjectMapValues) => self.dispatch_map(op)?,

      op @ (Opcode::ValueOptionalNewMissing
      | Opcode::ValueOptionalNewPresent
      | Opcode::ObjectOptionalNewMissing
      | Opcode::ObjectOptionalNewPresent) => self.dispatch_optional(op)?,

      // --- globals --------------------------------------------------------
      Opcode::ValueGlobalLoad => {
        let index = self.read_u16(code)? as usize;
        self.registers.a =
          *self.global_values.get(index).ok_or(FatalError::MalformedBytecode { offset: self.ip as usize })?;
      }
      Opcode::ValueGlobalStore => {
        let index = self.read_u16(code)? as usize;
        let a = self.registers.a;
        *self.global_values.get_mut(index).ok_or(FatalError::MalformedBytecode { offset: self.ip as usize })? = a;
      }
      Opcode::ObjectGlobalLoad => {
        let index = self.read_u16(code)? as usize;
        self.registers.x =
          self.global_objects.get(index).ok_or(FatalError::MalformedBytecode { offset: self.ip as usize })?.clone();
      }
      Opcode::ObjectGlobalStore => {
        let index = self.read_u16(code)? as usize;
        let x = self.registers.x.clone();
        *self.global_objects.get_mut(index).ok_or(FatalError::MalformedBytecode { offset: self.ip as usize })? = x;
      }
    }
    Ok(Control::Continue)
  }

}

#[cfg(test)]
mod tests {
  use std::io::{BufReader, Cursor};

  use crate::bytecode::{InstructionWriter, Opcode, Procedure, Program};
  use crate::syscall::{syscall_chr, SyscallContext, SyscallOutcome};
  use crate::value::Value;

  use super::Interpreter;

  fn interpreter(program: &Program) -> Interpreter<'_> {
    Interpreter::new(program, Box::new(BufReader::new(Cursor::new(Vec::new()))), Box::new(Vec::new()))
  }

  #[test]
  fn load_store_and_return_round_trip_a_value() {
    let code = InstructionWriter::new()
      .op(Opcode::LoadConstantA)
      .i64(42)
      .op(Opcode::StoreA)
      .i16(0)
      .op(Opcode::LoadA)
      .i16(0)
      .op(Opcode::Return)
      .finish();
    let program = Program::new(vec![Procedure::new("main", 0, 0, 1, 0, code)], Vec::new(), Vec::new());
    let mut interp = interpreter(&program);
    interp.init(0).unwrap();
    let more = interp.run(100).unwrap();
    assert!(!more);
    assert_eq!(interp.registers.a, Value::from_i64(42));
  }

  #[test]
  fn string_concatenation_builds_a_new_string_object() {
    let code = InstructionWriter::new()
      .op(Opcode::LoadConstantStringX)
      .string("ab")
      .op(Opcode::LoadConstantStringY)
      .string("cd")
      .op(Opcode::StringXConcatenateY)
      .op(Opcode::Exit)
      .finish();
    let program = Program::new(vec![Procedure::new("main", 0, 0, 0, 0, code)], Vec::new(), Vec::new());
    let mut interp = interpreter(&program);
    interp.init(0).unwrap();
    interp.run(100).unwrap();
    let x = interp.registers.x.as_ref().unwrap();
    assert_eq!(crate::object::string_to_utf8(x.as_string("test").unwrap()), "abcd");
  }

  #[test]
  fn a_system_call_can_set_the_pending_error() {
    fn failing_syscall(_ctx: &SyscallContext) -> SyscallOutcome {
      SyscallOutcome { error: Some((Value::from_i64(1), "division by zero".to_string())), ..Default::default() }
    }
    let code = InstructionWriter::new()
      .op(Opcode::SystemCall)
      .u16(0)
      .op(Opcode::ReturnIfError)
      .op(Opcode::LoadConstantA)
      .i64(999)
      .op(Opcode::Return)
      .finish();
    let program = Program::new(vec![Procedure::new("main", 0, 0, 0, 0, code)], Vec::new(), Vec::new());
    let mut interp = interpreter(&program);
    interp.syscalls.register(failing_syscall);
    interp.init(0).unwrap();
    let more = interp.run(100).unwrap();
    assert!(!more);
    assert!(interp.has_error());
    assert_eq!(interp.error_message(), "division by zero");
    assert_eq!(interp.registers.a, Value::ZERO);
  }

  #[test]
  fn chr_syscall_builds_a_one_character_string() {
    let ctx = SyscallContext { a: Value::from_i64(65), b: Value::ZERO, x: None, y: None, z: None, values: &[], objects: &[] };
    let outcome = syscall_chr(&ctx);
    let obj = outcome.new_x.unwrap();
    assert_eq!(crate::object::string_to_utf8(obj.as_string("test").unwrap()), "A");
  }

  #[test]
  fn call_and_return_restore_the_caller_frame() {
    let mut callee = InstructionWriter::new();
    callee.op(Opcode::LoadConstantA).i64(7).op(Opcode::StoreA).i16(0).op(Opcode::LoadA).i16(0).op(Opcode::Return);
    let callee_code = callee.finish();

    let mut caller = InstructionWriter::new();
    caller.op(Opcode::Call).u16(1).op(Opcode::Return);
    let caller_code = caller.finish();

    let program = Program::new(
      vec![Procedure::new("main", 0, 0, 0, 0, caller_code), Procedure::new("callee", 0, 0, 1, 0, callee_code)],
      Vec::new(),
      Vec::new(),
    );
    let mut interp = interpreter(&program);
    interp.init(0).unwrap();
    let more = interp.run(100).unwrap();
    assert!(!more);
    assert_eq!(interp.registers.a, Value::from_i64(7));
    assert!(interp.registers.values.is_empty());
  }
}
