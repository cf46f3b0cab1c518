//! The closed set of type tags shared by the AST's type references and the
//! VM's runtime objects.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
  Boolean,
  Number,
  String,
  Date,
  DateTime,
  DateTimeOffset,
  TimeSpan,
  TimeZone,
  List(Box<Kind>),
  Map(Box<Kind>, Box<Kind>),
  Optional(Box<Kind>),
  Record(Vec<(std::string::String, Kind)>),
  Void,
}

impl Kind {
  pub fn is_value_kind(&self) -> bool {
    matches!(
      self,
      Kind::Boolean | Kind::Number | Kind::Date | Kind::DateTime | Kind::DateTimeOffset | Kind::TimeSpan | Kind::TimeZone
    )
  }
}
