//! Capture storage: the five-slot array each production fills while its
//! term tree runs, plus the two concrete box shapes a slot can hold.

use crate::ast::Node;
use crate::token::Token;

/// Productions decompose into sub-productions rather than grow past this;
/// see the grammar combinator core notes.
pub const NUM_CAPTURES: usize = 5;

#[derive(Debug, Clone, Default)]
pub enum CaptureBox {
  #[default]
  Empty,
  Nodes(Vec<Node>),
  Tokens(Vec<Token>),
}

impl CaptureBox {
  pub fn len(&self) -> usize {
    match self {
      CaptureBox::Empty => 0,
      CaptureBox::Nodes(v) => v.len(),
      CaptureBox::Tokens(v) => v.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn truncate(&mut self, len: usize) {
    if len == 0 {
      // Reverting all the way back to nothing also clears which kind this
      // slot holds, so a different grammar alternative can reuse it.
      *self = CaptureBox::Empty;
      return;
    }
    match self {
      CaptureBox::Empty => {}
      CaptureBox::Nodes(v) => v.truncate(len),
      CaptureBox::Tokens(v) => v.truncate(len),
    }
  }

  pub fn push_node(&mut self, node: Node) {
    match self {
      CaptureBox::Empty => *self = CaptureBox::Nodes(vec![node]),
      CaptureBox::Nodes(v) => v.push(node),
      CaptureBox::Tokens(_) => panic!("capture slot already holds tokens, cannot push a node"),
    }
  }

  pub fn push_token(&mut self, token: Token) {
    match self {
      CaptureBox::Empty => *self = CaptureBox::Tokens(vec![token]),
      CaptureBox::Tokens(v) => v.push(token),
      CaptureBox::Nodes(_) => panic!("capture slot already holds nodes, cannot push a token"),
    }
  }

  pub fn nodes(&self) -> &[Node] {
    match self {
      CaptureBox::Nodes(v) => v,
      CaptureBox::Empty => &[],
      CaptureBox::Tokens(_) => panic!("capture slot holds tokens, not nodes"),
    }
  }

  pub fn tokens(&self) -> &[Token] {
    match self {
      CaptureBox::Tokens(v) => v,
      CaptureBox::Empty => &[],
      CaptureBox::Nodes(_) => panic!("capture slot holds nodes, not tokens"),
    }
  }
}

/// Fixed-width capture array carried by a single production invocation.
#[derive(Debug, Clone, Default)]
pub struct Captures {
  slots: [CaptureBox; NUM_CAPTURES],
}

impl Captures {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn slot(&self, id: usize) -> &CaptureBox {
    &self.slots[id]
  }

  pub fn slot_mut(&mut self, id: usize) -> &mut CaptureBox {
    &mut self.slots[id]
  }

  pub fn lengths(&self) -> [usize; NUM_CAPTURES] {
    let mut out = [0usize; NUM_CAPTURES];
    for i in 0..NUM_CAPTURES {
      out[i] = self.slots[i].len();
    }
    out
  }

  pub fn truncate_to(&mut self, lengths: [usize; NUM_CAPTURES]) {
    for i in 0..NUM_CAPTURES {
      self.slots[i].truncate(lengths[i]);
    }
  }
}

// --- typed extractors, mirroring captureNodeArray/captureSingleNode/... ---

pub fn capture_single_node(captures: &Captures, slot: usize) -> &Node {
  let nodes = captures.slot(slot).nodes();
  nodes.first().expect("expected exactly one captured node, found none")
}

pub fn capture_single_node_or_null(captures: &Captures, slot: usize) -> Option<&Node> {
  captures.slot(slot).nodes().first()
}

pub fn capture_node_array(captures: &Captures, slot: usize) -> &[Node] {
  captures.slot(slot).nodes()
}

pub fn capture_token(captures: &Captures, slot: usize) -> &Token {
  captures.slot(slot).tokens().first().expect("expected exactly one captured token, found none")
}

pub fn capture_token_text(captures: &Captures, slot: usize) -> &str {
  &capture_token(captures, slot).text
}

pub fn capture_token_kind(captures: &Captures, slot: usize) -> crate::token::TokenKind {
  capture_token(captures, slot).kind
}

pub fn capture_tokens(captures: &Captures, slot: usize) -> &[Token] {
  captures.slot(slot).tokens()
}
