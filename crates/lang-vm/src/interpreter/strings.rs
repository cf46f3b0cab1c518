use std::io::Write;
use std::rc::Rc;

use crate::bytecode::Opcode;
use crate::error::{FatalError, FatalResult};
use crate::object::{string_object, string_to_utf8};
use crate::value::Value;

use super::Interpreter;

impl<'p> Interpreter<'p> {
  pub(super) fn x_string(&self, op: &'static str) -> FatalResult<std::string::String> {
    let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "String", op })?;
    Ok(string_to_utf8(obj.as_string(op)?))
  }

  fn y_string(&self, op: &'static str) -> FatalResult<std::string::String> {
    let obj = self.registers.y.as_ref().ok_or(FatalError::TypeMismatch { expected: "String", op })?;
    Ok(string_to_utf8(obj.as_string(op)?))
  }

  pub(super) fn dispatch_string(&mut self, op: Opcode) -> FatalResult<()> {
    match op {
      Opcode::StringXEqualsY => {
        let x = self.x_string("StringXEqualsY")?;
        let y = self.y_string("StringXEqualsY")?;
        self.registers.b = Value::from_bool(x == y);
      }
      Opcode::StringXConcatenateY => {
        let mut x = self.x_string("StringXConcatenateY")?;
        x.push_str(&self.y_string("StringXConcatenateY")?);
        self.registers.x = Some(Rc::new(string_object(&x)));
      }
      Opcode::StringMid => {
        let x = self.x_string("StringMid")?;
        let start = self.registers.a.to_i64_truncated().ok_or(FatalError::TypeMismatch { expected: "integer", op: "StringMid" })?.max(0) as usize;
        let len = self.registers.b.to_i64_truncated().ok_or(FatalError::TypeMismatch { expected: "integer", op: "StringMid" })?.max(0) as usize;
        let units: Vec<u16> = x.encode_utf16().collect();
        let end = (start + len).min(units.len());
        let slice = if start <= end { &units[start.min(units.len())..end] } else { &[] };
        let sub = std::string::String::from_utf16_lossy(slice);
        self.registers.x = Some(Rc::new(string_object(&sub)));
      }
      Opcode::StringIndexOf => {
        let x = self.x_string("StringIndexOf")?;
        let y = self.y_string("StringIndexOf")?;
        self.registers.a = match x.find(&y) {
          Some(byte_idx) => Value::from_i64(x[..byte_idx].encode_utf16().count() as i64),
          None => Value::from_i64(-1),
        };
      }
      Opcode::StringAsc => {
        let x = self.x_string("StringAsc")?;
        let offset = self.registers.a.to_i64_truncated().ok_or(FatalError::TypeMismatch { expected: "integer", op: "StringAsc" })?;
        let units: Vec<u16> = x.encode_utf16().collect();
        let code_unit = usize::try_from(offset).ok().and_then(|i| units.get(i)).copied().ok_or(FatalError::TypeMismatch {
          expected: "in-range index",
          op: "StringAsc",
        })?;
        self.registers.a = Value::from_i64(code_unit as i64);
      }
      Opcode::StringPrint => {
        let x = self.x_string("StringPrint")?;
        self.console_out.write_all(x.as_bytes()).map_err(|_| FatalError::TypeMismatch { expected: "writable console", op: "StringPrint" })?;
      }
      Opcode::StringInputLine => {
        use std::io::BufRead;
        let mut line = std::string::String::new();
        self.console_in.read_line(&mut line).map_err(|_| FatalError::TypeMismatch { expected: "readable console", op: "StringInputLine" })?;
        if line.ends_with('\n') {
          line.pop();
          if line.ends_with('\r') {
            line.pop();
          }
        }
        self.registers.x = Some(Rc::new(string_object(&line)));
      }
      Opcode::NumberToString => {
        let text = self.registers.a.to_string();
        self.registers.x = Some(Rc::new(string_object(&text)));
      }
      Opcode::StringToNumber => {
        let x = self.x_string("StringToNumber")?;
        match x.trim().parse::<rust_decimal::Decimal>() {
          Ok(d) => {
            self.registers.a = Value(d);
            self.registers.b = Value::ONE;
          }
          Err(_) => {
            self.registers.a = Value::ZERO;
            self.registers.b = Value::ZERO;
          }
        }
      }
      other => unreachable!("{other:?} is not a string opcode"),
    }
    Ok(())
  }
}
