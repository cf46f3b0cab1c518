//! A named grammar rule: a term tree plus the callback that turns a
//! completed capture array into an AST node.

use crate::ast::Node;
use crate::grammar::capture::Captures;
use crate::grammar::term::Term;
use crate::token::Token;

pub type BuildFn = fn(&Captures, &Token) -> Node;

pub struct Production {
  pub name: &'static str,
  pub term: Term,
  pub build: BuildFn,
}

impl Production {
  pub fn new(name: &'static str, term: Term, build: BuildFn) -> Self {
    Self { name, term, build }
  }
}

impl std::fmt::Debug for Production {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Production").field("name", &self.name).finish()
  }
}
