//! The one scalar runtime type: a 128-bit decimal. Booleans are encoded
//! as 0/1; integers are decimals with zero fractional part.

use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Value(pub Decimal);

impl Value {
  pub const ZERO: Value = Value(Decimal::ZERO);
  pub const ONE: Value = Value(Decimal::ONE);

  pub fn from_bool(b: bool) -> Self {
    if b {
      Value::ONE
    } else {
      Value::ZERO
    }
  }

  pub fn is_truthy(self) -> bool {
    self.0 != Decimal::ZERO
  }

  pub fn from_i64(v: i64) -> Self {
    Value(Decimal::from(v))
  }

  /// Truncates toward zero; `None` if the value has no integral i64 representation.
  pub fn to_i64_truncated(self) -> Option<i64> {
    use rust_decimal::prelude::ToPrimitive;
    self.0.trunc().to_i64()
  }
}

impl std::fmt::Display for Value {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}
