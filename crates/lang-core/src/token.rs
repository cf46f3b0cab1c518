//! Token and token-kind definitions shared by the grammar and parse engine.

use std::fmt;

/// The closed set of lexical symbols the parser consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  Error,
  EndOfLine,
  EndOfFile,
  Identifier,
  Comment,

  // literals
  BooleanLiteral,
  NumberLiteral,
  StringLiteral,

  // punctuation
  LeftParenthesis,
  RightParenthesis,
  LeftBracket,
  RightBracket,
  LeftBrace,
  RightBrace,
  Colon,
  Comma,
  Dot,
  PlusSign,
  MinusSign,
  MultiplicationSign,
  DivisionSign,
  EqualsSign,
  NotEqualsSign,
  LessThanSign,
  LessThanEqualsSign,
  GreaterThanSign,
  GreaterThanEqualsSign,

  // keywords
  And,
  As,
  Boolean,
  By,
  Case,
  Catch,
  Const,
  Continue,
  Date,
  DateTime,
  DateTimeOffset,
  Dim,
  Do,
  Each,
  Else,
  End,
  Exit,
  False,
  Finally,
  For,
  From,
  Function,
  Group,
  If,
  In,
  Into,
  Join,
  Key,
  List,
  Loop,
  Map,
  Mod,
  Next,
  Not,
  Number,
  Of,
  On,
  Optional,
  Or,
  Record,
  Rethrow,
  Return,
  Select,
  Step,
  Sub,
  String,
  Then,
  Throw,
  TimeSpan,
  TimeZone,
  To,
  True,
  Try,
  Type,
  Until,
  Wend,
  Where,
  While,
  With,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:?}", self)
  }
}

/// A single lexical token. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub line: u32,
  pub column: u32,
  pub kind: TokenKind,
  pub text: std::string::String,
}

impl Token {
  pub fn new(line: u32, column: u32, kind: TokenKind, text: impl Into<std::string::String>) -> Self {
    Self { line, column, kind, text: text.into() }
  }

  /// A synthetic end-of-file sentinel, used when a token stream doesn't
  /// already end with one.
  pub fn eof_sentinel(line: u32, column: u32) -> Self {
    Self::new(line, column, TokenKind::EndOfFile, "")
  }

  pub fn is_eof(&self) -> bool {
    self.kind == TokenKind::EndOfFile
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({}:{})", self.kind, self.line, self.column)
  }
}
