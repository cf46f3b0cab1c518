//! Reference-counted immutable runtime objects. Every update-shaped
//! operation (`set`, `insert`, `remove`, ...) returns a new `Object`
//! built from `im`'s structural sharing rather than mutating in place.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use im::{HashMap, Vector};

use lang_core::kind::Kind;

use crate::error::{FatalError, FatalResult};
use crate::value::Value;

pub type ObjRef = Rc<Object>;

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
  String(Vec<u16>),
  Record { values: Vector<Value>, objects: Vector<ObjRef> },
  ValueList(Vector<Value>),
  ObjectList(Vector<ObjRef>),
  ValueToValueMap(HashMap<Value, Value>),
  ValueToObjectMap(HashMap<Value, ObjRef>),
  ObjectToValueMap(HashMap<ObjRef, Value>),
  ObjectToObjectMap(HashMap<ObjRef, ObjRef>),
  ValueOptional(Option<Value>),
  ObjectOptional(Option<ObjRef>),
}

impl Eq for Object {}

/// `HashMap`'s own iteration order is unspecified, so its contribution to
/// the enclosing hash must be order-independent: fold each entry's hash
/// with addition rather than feeding entries into `state` one at a time.
fn hash_unordered<K: Hash, V: Hash>(map: &HashMap<K, V>) -> u64 {
  map.iter().fold(0u64, |acc, (k, v)| {
    let mut h = std::collections::hash_map::DefaultHasher::new();
    k.hash(&mut h);
    v.hash(&mut h);
    acc.wrapping_add(h.finish())
  })
}

impl Hash for Object {
  fn hash<H: Hasher>(&self, state: &mut H) {
    match self {
      Object::String(units) => {
        0u8.hash(state);
        units.hash(state);
      }
      Object::Record { values, objects } => {
        1u8.hash(state);
        values.hash(state);
        objects.hash(state);
      }
      Object::ValueList(v) => {
        2u8.hash(state);
        v.hash(state);
      }
      Object::ObjectList(v) => {
        3u8.hash(state);
        v.hash(state);
      }
      Object::ValueToValueMap(m) => {
        4u8.hash(state);
        hash_unordered(m).hash(state);
      }
      Object::ValueToObjectMap(m) => {
        5u8.hash(state);
        hash_unordered(m).hash(state);
      }
      Object::ObjectToValueMap(m) => {
        6u8.hash(state);
        hash_unordered(m).hash(state);
      }
      Object::ObjectToObjectMap(m) => {
        7u8.hash(state);
        hash_unordered(m).hash(state);
      }
      Object::ValueOptional(v) => {
        8u8.hash(state);
        v.hash(state);
      }
      Object::ObjectOptional(v) => {
        9u8.hash(state);
        v.hash(state);
      }
    }
  }
}

impl Object {
  pub fn kind(&self) -> Kind {
    match self {
      Object::String(_) => Kind::String,
      // Element/key/value kinds aren't recoverable from an empty
      // collection alone; callers that need the full `Kind` (list/map
      // element types) track it separately, keyed off the declaring
      // record/procedure's static type.
      Object::Record { .. } => Kind::Record(Vec::new()),
      Object::ValueList(_) | Object::ObjectList(_) => Kind::List(Box::new(Kind::Void)),
      Object::ValueToValueMap(_) | Object::ValueToObjectMap(_) | Object::ObjectToValueMap(_) | Object::ObjectToObjectMap(_) => {
        Kind::Map(Box::new(Kind::Void), Box::new(Kind::Void))
      }
      Object::ValueOptional(_) | Object::ObjectOptional(_) => Kind::Optional(Box::new(Kind::Void)),
    }
  }

  pub fn equals(&self, other: &Object) -> bool {
    self == other
  }

  pub fn content_hash(&self) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    self.hash(&mut hasher);
    hasher.finish()
  }

  /// `op` names the opcode making the request, for the error message if
  /// `self` isn't actually a `String` — a mismatch here is a compiler bug,
  /// surfaced as `FatalError`, never a Rust panic.
  pub fn as_string(&self, op: &'static str) -> FatalResult<&[u16]> {
    match self {
      Object::String(units) => Ok(units),
      _ => Err(FatalError::TypeMismatch { expected: "String", op }),
    }
  }

  pub fn as_record(&self, op: &'static str) -> FatalResult<(&Vector<Value>, &Vector<ObjRef>)> {
    match self {
      Object::Record { values, objects } => Ok((values, objects)),
      _ => Err(FatalError::TypeMismatch { expected: "Record", op }),
    }
  }

  pub fn as_value_list(&self, op: &'static str) -> FatalResult<&Vector<Value>> {
    match self {
      Object::ValueList(v) => Ok(v),
      _ => Err(FatalError::TypeMismatch { expected: "ValueList", op }),
    }
  }

  pub fn as_object_list(&self, op: &'static str) -> FatalResult<&Vector<ObjRef>> {
    match self {
      Object::ObjectList(v) => Ok(v),
      _ => Err(FatalError::TypeMismatch { expected: "ObjectList", op }),
    }
  }
}

/// UTF-16 round trip, matching the source language's string object.
pub fn string_object(text: &str) -> Object {
  Object::String(text.encode_utf16().collect())
}

pub fn string_to_utf8(units: &[u16]) -> std::string::String {
  std::string::String::from_utf16_lossy(units)
}
