//! The four key/value flavor combinations share one shape: `New`,
//! `TryGet`, `Count`, `Set`, `Remove`, `Keys`, `Values`. Only which
//! registers carry the key/value differ (`Value` keys read A, `ObjRef`
//! keys read Y; `Value` payloads go through A/B, `ObjRef` payloads
//! through X).

use std::rc::Rc;

use im::{HashMap, Vector};

use crate::bytecode::Opcode;
use crate::error::{FatalError, FatalResult};
use crate::object::Object;
use crate::value::Value;

use super::Interpreter;

impl<'p> Interpreter<'p> {
  fn value_to_value_map(&self) -> FatalResult<&HashMap<Value, Value>> {
    let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ValueToValueMap", op: "map op" })?;
    match obj.as_ref() {
      Object::ValueToValueMap(m) => Ok(m),
      _ => Err(FatalError::TypeMismatch { expected: "ValueToValueMap", op: "map op" }),
    }
  }

  fn value_to_object_map(&self) -> FatalResult<&HashMap<Value, crate::object::ObjRef>> {
    let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ValueToObjectMap", op: "map op" })?;
    match obj.as_ref() {
      Object::ValueToObjectMap(m) => Ok(m),
      _ => Err(FatalError::TypeMismatch { expected: "ValueToObjectMap", op: "map op" }),
    }
  }

  fn object_to_value_map(&self) -> FatalResult<&HashMap<crate::object::ObjRef, Value>> {
    let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ObjectToValueMap", op: "map op" })?;
    match obj.as_ref() {
      Object::ObjectToValueMap(m) => Ok(m),
      _ => Err(FatalError::TypeMismatch { expected: "ObjectToValueMap", op: "map op" }),
    }
  }

  fn object_to_object_map(&self) -> FatalResult<&HashMap<crate::object::ObjRef, crate::object::ObjRef>> {
    let obj = self.registers.x.as_ref().ok_or(FatalError::TypeMismatch { expected: "ObjectToObjectMap", op: "map op" })?;
    match obj.as_ref() {
      Object::ObjectToObjectMap(m) => Ok(m),
      _ => Err(FatalError::TypeMismatch { expected: "ObjectToObjectMap", op: "map op" }),
    }
  }

  pub(super) fn dispatch_map(&mut self, op: Opcode) -> FatalResult<()> {
    match op {
      // --- value -> value ------------------------------------------------
      Opcode::ValueToValueMapNew => self.registers.x = Some(Rc::new(Object::ValueToValueMap(HashMap::new()))),
      Opcode::ValueToValueMapTryGet => {
        let key = self.registers.a;
        let map = self.value_to_value_map()?;
        match map.get(&key) {
          Some(v) => {
            self.registers.a = *v;
            self.registers.b = Value::ONE;
          }
          None => self.registers.b = Value::ZERO,
        }
      }
      Opcode::ValueToValueMapCount => self.registers.a = Value::from_i64(self.value_to_value_map()?.len() as i64),
      Opcode::ValueToValueMapSet => {
        let key = self.registers.a;
        let value = self.registers.b;
        let mut map = self.value_to_value_map()?.clone();
        map.insert(key, value);
        self.registers.x = Some(Rc::new(Object::ValueToValueMap(map)));
      }
      Opcode::ValueToValueMapRemove => {
        let key = self.registers.a;
        let mut map = self.value_to_value_map()?.clone();
        map.remove(&key);
        self.registers.x = Some(Rc::new(Object::ValueToValueMap(map)));
      }
      Opcode::ValueToValueMapKeys => {
        let keys: Vector<Value> = self.value_to_value_map()?.keys().copied().collect();
        self.registers.x = Some(Rc::new(Object::ValueList(keys)));
      }
      Opcode::ValueToValueMapValues => {
        let values: Vector<Value> = self.value_to_value_map()?.values().copied().collect();
        self.registers.x = Some(Rc::new(Object::ValueList(values)));
      }

      // --- value -> object ------------------------------------------------
      Opcode::ValueToObjectMapNew => self.registers.x = Some(Rc::new(Object::ValueToObjectMap(HashMap::new()))),
      Opcode::ValueToObjectMapTryGet => {
        let key = self.registers.a;
        let map = self.value_to_object_map()?;
        match map.get(&key) {
          Some(v) => {
            self.registers.x = Some(v.clone());
            self.registers.b = Value::ONE;
          }
          None => self.registers.b = Value::ZERO,
        }
      }
      Opcode::ValueToObjectMapCount => self.registers.a = Value::from_i64(self.value_to_object_map()?.len() as i64),
      Opcode::ValueToObjectMapSet => {
        let key = self.registers.a;
        let value = self.registers.x.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ValueToObjectMapSet" })?;
        let mut map = self.value_to_object_map()?.clone();
        map.insert(key, value);
        self.registers.x = Some(Rc::new(Object::ValueToObjectMap(map)));
      }
      Opcode::ValueToObjectMapRemove => {
        let key = self.registers.a;
        let mut map = self.value_to_object_map()?.clone();
        map.remove(&key);
        self.registers.x = Some(Rc::new(Object::ValueToObjectMap(map)));
      }
      Opcode::ValueToObjectMapKeys => {
        let keys: Vector<Value> = self.value_to_object_map()?.keys().copied().collect();
        self.registers.x = Some(Rc::new(Object::ValueList(keys)));
      }
      Opcode::ValueToObjectMapValues => {
        let values: Vector<_> = self.value_to_object_map()?.values().cloned().collect();
        self.registers.x = Some(Rc::new(Object::ObjectList(values)));
      }

      // --- object -> value ------------------------------------------------
      Opcode::ObjectToValueMapNew => self.registers.x = Some(Rc::new(Object::ObjectToValueMap(HashMap::new()))),
      Opcode::ObjectToValueMapTryGet => {
        let key = self.registers.y.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ObjectToValueMapTryGet" })?;
        let map = self.object_to_value_map()?;
        match map.get(&key) {
          Some(v) => {
            self.registers.a = *v;
            self.registers.b = Value::ONE;
          }
          None => self.registers.b = Value::ZERO,
        }
      }
      Opcode::ObjectToValueMapCount => self.registers.a = Value::from_i64(self.object_to_value_map()?.len() as i64),
      Opcode::ObjectToValueMapSet => {
        let key = self.registers.y.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ObjectToValueMapSet" })?;
        let value = self.registers.a;
        let mut map = self.object_to_value_map()?.clone();
        map.insert(key, value);
        self.registers.x = Some(Rc::new(Object::ObjectToValueMap(map)));
      }
      Opcode::ObjectToValueMapRemove => {
        let key = self.registers.y.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ObjectToValueMapRemove" })?;
        let mut map = self.object_to_value_map()?.clone();
        map.remove(&key);
        self.registers.x = Some(Rc::new(Object::ObjectToValueMap(map)));
      }
      Opcode::ObjectToValueMapKeys => {
        let keys: Vector<_> = self.object_to_value_map()?.keys().cloned().collect();
        self.registers.x = Some(Rc::new(Object::ObjectList(keys)));
      }
      Opcode::ObjectToValueMapValues => {
        let values: Vector<Value> = self.object_to_value_map()?.values().copied().collect();
        self.registers.x = Some(Rc::new(Object::ValueList(values)));
      }

      // --- object -> object -----------------------------------------------
      Opcode::ObjectToObjectMapNew => self.registers.x = Some(Rc::new(Object::ObjectToObjectMap(HashMap::new()))),
      Opcode::ObjectToObjectMapTryGet => {
        let key = self.registers.y.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ObjectToObjectMapTryGet" })?;
        let map = self.object_to_object_map()?;
        match map.get(&key) {
          Some(v) => {
            self.registers.x = Some(v.clone());
            self.registers.b = Value::ONE;
          }
          None => self.registers.b = Value::ZERO,
        }
      }
      Opcode::ObjectToObjectMapCount => self.registers.a = Value::from_i64(self.object_to_object_map()?.len() as i64),
      Opcode::ObjectToObjectMapSet => {
        let key = self.registers.y.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ObjectToObjectMapSet" })?;
        let value = self.registers.x.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ObjectToObjectMapSet" })?;
        let mut map = self.object_to_object_map()?.clone();
        map.insert(key, value);
        self.registers.x = Some(Rc::new(Object::ObjectToObjectMap(map)));
      }
      Opcode::ObjectToObjectMapRemove => {
        let key = self.registers.y.clone().ok_or(FatalError::TypeMismatch { expected: "object", op: "ObjectToObjectMapRemove" })?;
        let mut map = self.object_to_object_map()?.clone();
        map.remove(&key);
        self.registers.x = Some(Rc::new(Object::ObjectToObjectMap(map)));
      }
      Opcode::ObjectToObjectMapKeys => {
        let keys: Vector<_> = self.object_to_object_map()?.keys().cloned().collect();
        self.registers.x = Some(Rc::new(Object::ObjectList(keys)));
      }
      Opcode::ObjectToObjectMapValues => {
        let values: Vector<_> = self.object_to_object_map()?.values().cloned().collect();
        self.registers.x = Some(Rc::new(Object::ObjectList(values)));
      }

      other => unreachable!("{other:?} is not a map opcode"),
    }
    Ok(())
  }
}
