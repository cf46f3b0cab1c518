//! Frame kinds pushed onto the parse engine's explicit stack. Each frame is
//! a small step-counter state machine; the engine drives it by feeding back
//! the outcome of whatever child frame it most recently pushed.

use crate::ast::Node;
use crate::grammar::ProductionId;
use crate::grammar::Term;
use crate::parse::checkpoint::Checkpoint;
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone)]
pub enum Produced {
  None,
  Token(Token),
  Node(Node),
}

#[derive(Debug, Clone)]
pub enum Outcome {
  Match(Produced),
  Mismatch,
}

pub struct AndState {
  pub terms: &'static [Term],
  pub index: usize,
}

pub struct OrState {
  pub terms: &'static [Term],
  pub index: usize,
  pub checkpoint: Checkpoint,
}

pub struct OptionalState {
  pub terms: &'static [Term],
  pub index: usize,
  pub checkpoint: Checkpoint,
}

pub struct ZeroOrMoreState {
  pub inner: &'static Term,
  pub checkpoint: Checkpoint,
}

pub struct CaptureState {
  pub slot: usize,
  pub inner: &'static Term,
  pub entered: bool,
}

pub struct ProdExitState {
  pub id: ProductionId,
  pub start_token_index: usize,
}

pub enum Frame {
  And(AndState),
  Or(OrState),
  Optional(OptionalState),
  ZeroOrMore(ZeroOrMoreState),
  Capture(CaptureState),
  Terminal(TokenKind),
  Cut,
  ProdExit(ProdExitState),
}
