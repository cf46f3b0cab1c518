//! Parse-time error type. Hand-rolled rather than derived: a parse error is
//! always exactly a message plus the offending token, and the call sites
//! that build one outnumber the variants enough that a derive macro buys
//! nothing here.

use std::fmt;

use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  /// A production expected one of its terms to match and none did.
  UnexpectedToken { message: std::string::String, token: Token },
  /// A `Cut` was taken and a later sibling still failed to match.
  CutViolation { message: std::string::String, token: Token },
  /// The root production matched but tokens remained afterward.
  TrailingInput { token: Token },
}

impl ParseError {
  pub fn token(&self) -> &Token {
    match self {
      ParseError::UnexpectedToken { token, .. } => token,
      ParseError::CutViolation { token, .. } => token,
      ParseError::TrailingInput { token } => token,
    }
  }

  pub fn message(&self) -> std::string::String {
    match self {
      ParseError::UnexpectedToken { message, .. } => message.clone(),
      ParseError::CutViolation { message, .. } => message.clone(),
      ParseError::TrailingInput { .. } => "unexpected trailing input".to_string(),
    }
  }
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} at {}", self.message(), self.token())
  }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;
