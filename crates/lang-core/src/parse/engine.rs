//! The parse driver: an explicit heap stack of frames evaluated
//! iteratively, so deeply nested expressions can't overflow the host
//! stack. Each loop iteration advances exactly one frame one step.

use crate::ast::Node;
use crate::error::{ParseError, ParseResult};
use crate::grammar::{production, Captures, ProductionId, Term};
use crate::parse::checkpoint::Checkpoint;
use crate::parse::frame::{AndState, CaptureState, Frame, OptionalState, OrState, Outcome, ProdExitState, Produced, ZeroOrMoreState};
use crate::token::Token;

struct ProdCtx {
  captures: Captures,
  cut: bool,
  first_token: Token,
}

enum Step {
  /// Something was pushed onto the stack (a frame, or a whole production);
  /// the engine should advance the new top next, starting fresh.
  Continue,
  /// The top frame finished; pop it and feed this result to its parent.
  Done(Result<Outcome, ParseError>),
}

pub struct Engine<'t> {
  tokens: &'t [Token],
  pos: usize,
  term_stack: Vec<Frame>,
  prod_stack: Vec<ProdCtx>,
}

impl<'t> Engine<'t> {
  fn new(tokens: &'t [Token]) -> Self {
    Self { tokens, pos: 0, term_stack: Vec::new(), prod_stack: Vec::new() }
  }

  fn peek(&self) -> &Token {
    self.tokens.get(self.pos).unwrap_or_else(|| self.tokens.last().expect("token stream must not be empty"))
  }

  fn ctx(&self) -> &ProdCtx {
    self.prod_stack.last().expect("term frame active without an enclosing production")
  }

  fn ctx_mut(&mut self) -> &mut ProdCtx {
    self.prod_stack.last_mut().expect("term frame active without an enclosing production")
  }

  fn checkpoint(&self) -> Checkpoint {
    let ctx = self.ctx();
    Checkpoint { token_index: self.pos, cut: ctx.cut, capture_lengths: ctx.captures.lengths() }
  }

  fn revert(&mut self, checkpoint: Checkpoint) {
    self.pos = checkpoint.token_index;
    let ctx = self.ctx_mut();
    ctx.cut = checkpoint.cut;
    ctx.captures.truncate_to(checkpoint.capture_lengths);
  }

  /// Runs `id` as the root production against `tokens`, requiring the
  /// whole stream (up to the trailing end-of-file sentinel) to be
  /// consumed.
  pub fn parse_root(tokens: &'t [Token], id: ProductionId) -> ParseResult<Node> {
    let mut engine = Engine::new(tokens);
    let node = engine.run(id)?;
    let trailing = engine.peek();
    if !trailing.is_eof() {
      return Err(ParseError::TrailingInput { token: trailing.clone() });
    }
    Ok(node)
  }

  fn run(&mut self, id: ProductionId) -> ParseResult<Node> {
    self.enter_production(id);
    let mut resume: Option<Result<Outcome, ParseError>> = None;
    loop {
      if self.term_stack.is_empty() {
        break;
      }
      match self.advance_top(resume.take()) {
        Step::Continue => {}
        Step::Done(result) => {
          self.term_stack.pop();
          resume = Some(result);
        }
      }
    }
    match resume.expect("root production must yield a result") {
      Ok(Outcome::Match(Produced::Node(node))) => Ok(node),
      Ok(Outcome::Match(_)) => unreachable!("a production's ProdExit always yields a Node on match"),
      Ok(Outcome::Mismatch) => Err(ParseError::UnexpectedToken {
        message: format!("expected {}", production(id).name),
        token: self.peek().clone(),
      }),
      Err(e) => Err(e),
    }
  }

  fn enter_production(&mut self, id: ProductionId) {
    let start_token_index = self.pos;
    let first_token = self.peek().clone();
    self.prod_stack.push(ProdCtx { captures: Captures::new(), cut: false, first_token });
    self.term_stack.push(Frame::ProdExit(ProdExitState { id, start_token_index }));
    let term = &production(id).term;
    self.push_child(term);
  }

  /// Pushes whatever `term` needs onto the stack: a production (via
  /// `enter_production`) for `NonTerminal`, or a plain frame otherwise.
  fn push_child(&mut self, term: &'static Term) {
    match term {
      Term::NonTerminal(id) => self.enter_production(*id),
      other => {
        let frame = self.build_frame(other);
        self.term_stack.push(frame);
      }
    }
  }

  fn build_frame(&mut self, term: &'static Term) -> Frame {
    match term {
      Term::Terminal(kind) => Frame::Terminal(*kind),
      Term::And(terms) => Frame::And(AndState { terms, index: 0 }),
      Term::Or(terms) => Frame::Or(OrState { terms, index: 0, checkpoint: self.checkpoint() }),
      Term::Optional(terms) => Frame::Optional(OptionalState { terms, index: 0, checkpoint: self.checkpoint() }),
      Term::ZeroOrMore(inner) => Frame::ZeroOrMore(ZeroOrMoreState { inner, checkpoint: self.checkpoint() }),
      Term::Capture(slot, inner) => Frame::Capture(CaptureState { slot: *slot, inner, entered: false }),
      Term::Cut => Frame::Cut,
      Term::NonTerminal(_) => unreachable!("NonTerminal is routed through push_child"),
    }
  }

  fn advance_top(&mut self, resume: Option<Result<Outcome, ParseError>>) -> Step {
    if let Some(Err(e)) = resume {
      return self.unwind_error(e);
    }
    let resume = resume.map(|r| r.unwrap());

    match self.term_stack.last().unwrap() {
      Frame::Terminal(kind) => {
        let kind = *kind;
        let tok = self.peek().clone();
        if tok.kind == kind {
          self.pos += 1;
          Step::Done(Ok(Outcome::Match(Produced::Token(tok))))
        } else {
          self.finish_mismatch()
        }
      }
      Frame::Cut => {
        self.ctx_mut().cut = true;
        Step::Done(Ok(Outcome::Match(Produced::None)))
      }
      Frame::Capture(_) => self.advance_capture(resume),
      Frame::And(_) => self.advance_and(resume),
      Frame::Or(_) => self.advance_or(resume),
      Frame::Optional(_) => self.advance_optional(resume),
      Frame::ZeroOrMore(_) => self.advance_zero_or_more(resume),
      Frame::ProdExit(_) => self.advance_prod_exit(resume),
    }
  }

  fn unwind_error(&mut self, e: ParseError) -> Step {
    if let Frame::ProdExit(_) = self.term_stack.last().unwrap() {
      self.prod_stack.pop();
    }
    Step::Done(Err(e))
  }

  fn finish_mismatch(&mut self) -> Step {
    if self.ctx().cut {
      let token = self.peek().clone();
      Step::Done(Err(ParseError::CutViolation { message: "unexpected token after cut".to_string(), token }))
    } else {
      Step::Done(Ok(Outcome::Mismatch))
    }
  }

  fn advance_capture(&mut self, resume: Option<Outcome>) -> Step {
    let (slot, inner, entered) = match self.term_stack.last().unwrap() {
      Frame::Capture(s) => (s.slot, s.inner, s.entered),
      _ => unreachable!(),
    };
    if !entered {
      if let Frame::Capture(s) = self.term_stack.last_mut().unwrap() {
        s.entered = true;
      }
      self.push_child(inner);
      return Step::Continue;
    }
    match resume.unwrap() {
      Outcome::Mismatch => Step::Done(Ok(Outcome::Mismatch)),
      Outcome::Match(produced) => {
        match produced {
          Produced::Token(t) => self.ctx_mut().captures.slot_mut(slot).push_token(t),
          Produced::Node(n) => self.ctx_mut().captures.slot_mut(slot).push_node(n),
          Produced::None => {}
        }
        Step::Done(Ok(Outcome::Match(Produced::None)))
      }
    }
  }

  fn advance_and(&mut self, resume: Option<Outcome>) -> Step {
    let (terms, mut index) = match self.term_stack.last().unwrap() {
      Frame::And(s) => (s.terms, s.index),
      _ => unreachable!(),
    };
    if let Some(outcome) = resume {
      match outcome {
        Outcome::Mismatch => return Step::Done(Ok(Outcome::Mismatch)),
        Outcome::Match(_) => {
          index += 1;
          if let Frame::And(s) = self.term_stack.last_mut().unwrap() {
            s.index = index;
          }
        }
      }
    }
    if index >= terms.len() {
      Step::Done(Ok(Outcome::Match(Produced::None)))
    } else {
      self.push_child(&terms[index]);
      Step::Continue
    }
  }

  fn advance_or(&mut self, resume: Option<Outcome>) -> Step {
    let (terms, mut index, checkpoint) = match self.term_stack.last().unwrap() {
      Frame::Or(s) => (s.terms, s.index, s.checkpoint),
      _ => unreachable!(),
    };
    if let Some(outcome) = resume {
      match outcome {
        Outcome::Match(p) => return Step::Done(Ok(Outcome::Match(p))),
        Outcome::Mismatch => {
          self.revert(checkpoint);
          index += 1;
          if let Frame::Or(s) = self.term_stack.last_mut().unwrap() {
            s.index = index;
          }
        }
      }
    }
    if index >= terms.len() {
      Step::Done(Ok(Outcome::Mismatch))
    } else {
      self.push_child(&terms[index]);
      Step::Continue
    }
  }

  fn advance_optional(&mut self, resume: Option<Outcome>) -> Step {
    let (terms, mut index, checkpoint) = match self.term_stack.last().unwrap() {
      Frame::Optional(s) => (s.terms, s.index, s.checkpoint),
      _ => unreachable!(),
    };
    if let Some(outcome) = resume {
      match outcome {
        Outcome::Mismatch => {
          self.revert(checkpoint);
          return Step::Done(Ok(Outcome::Match(Produced::None)));
        }
        Outcome::Match(_) => {
          index += 1;
          if let Frame::Optional(s) = self.term_stack.last_mut().unwrap() {
            s.index = index;
          }
        }
      }
    }
    if index >= terms.len() {
      Step::Done(Ok(Outcome::Match(Produced::None)))
    } else {
      self.push_child(&terms[index]);
      Step::Continue
    }
  }

  fn advance_zero_or_more(&mut self, resume: Option<Outcome>) -> Step {
    let (inner, checkpoint) = match self.term_stack.last().unwrap() {
      Frame::ZeroOrMore(s) => (s.inner, s.checkpoint),
      _ => unreachable!(),
    };
    if let Some(outcome) = resume {
      match outcome {
        Outcome::Mismatch => {
          self.revert(checkpoint);
          return Step::Done(Ok(Outcome::Match(Produced::None)));
        }
        Outcome::Match(_) => {
          // Advance position/captures, but keep the cut flag pinned to
          // whatever it was before this loop started: a cut taken during
          // one iteration must not leak into whether the next iteration's
          // natural non-match is treated as a hard failure.
          let mut next_checkpoint = self.checkpoint();
          next_checkpoint.cut = checkpoint.cut;
          if let Frame::ZeroOrMore(s) = self.term_stack.last_mut().unwrap() {
            s.checkpoint = next_checkpoint;
          }
        }
      }
    }
    // Each iteration attempt (including the first) starts with a clean cut
    // flag; the original flag is restored by `revert` once the loop as a
    // whole terminates, so terms after the loop still see it.
    self.ctx_mut().cut = false;
    self.push_child(inner);
    Step::Continue
  }

  fn advance_prod_exit(&mut self, resume: Option<Outcome>) -> Step {
    let (id, start_token_index) = match self.term_stack.last().unwrap() {
      Frame::ProdExit(s) => (s.id, s.start_token_index),
      _ => unreachable!(),
    };
    match resume.unwrap() {
      Outcome::Match(_) => {
        let ctx = self.prod_stack.pop().expect("ProdExit without a matching production context");
        let node = (production(id).build)(&ctx.captures, &ctx.first_token);
        Step::Done(Ok(Outcome::Match(Produced::Node(node))))
      }
      Outcome::Mismatch => {
        self.prod_stack.pop();
        self.pos = start_token_index;
        Step::Done(Ok(Outcome::Mismatch))
      }
    }
  }
}
