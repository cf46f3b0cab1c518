use crate::ast::Node;
use crate::grammar::{and, capture_node_array, capture_single_node, capture_single_node_or_null, capture_term, capture_token, cut, one_of, optional, prod, term, zero_or_more, Captures, Production, ProductionId};
use crate::token::{Token, TokenKind};

pub(crate) fn install(set: &mut impl FnMut(ProductionId, Production)) {
  set(super::PROGRAM, program());
  set(super::MEMBER, member());
  set(super::PARAMETER, parameter());
}

fn program() -> Production {
  let t = and(vec![
    zero_or_more(term(TokenKind::EndOfLine)),
    zero_or_more(and(vec![capture_term(0, prod(super::MEMBER)), zero_or_more(term(TokenKind::EndOfLine))])),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::Program { token: first.clone(), members: capture_node_array(c, 0).to_vec() }
  }
  Production::new("Program", t, build)
}

fn parameter() -> Production {
  let t = and(vec![capture_term(0, term(TokenKind::Identifier)), term(TokenKind::As), cut(), capture_term(1, prod(super::TYPE))]);
  fn build(c: &Captures, _first: &Token) -> Node {
    let name = capture_token(c, 0).clone();
    Node::Parameter { token: name.clone(), name, type_ref: Box::new(capture_single_node(c, 1).clone()) }
  }
  Production::new("Parameter", t, build)
}

fn member() -> Production {
  let params = optional(vec![
    capture_term(1, prod(super::PARAMETER)),
    zero_or_more(and(vec![term(TokenKind::Comma), capture_term(1, prod(super::PARAMETER))])),
  ]);
  let t = one_of(vec![
    and(vec![
      term(TokenKind::Sub),
      cut(),
      capture_term(0, term(TokenKind::Identifier)),
      term(TokenKind::LeftParenthesis),
      params.clone(),
      term(TokenKind::RightParenthesis),
      zero_or_more(term(TokenKind::EndOfLine)),
      capture_term(3, prod(super::BODY)),
      term(TokenKind::End),
      term(TokenKind::Sub),
    ]),
    and(vec![
      term(TokenKind::Function),
      cut(),
      capture_term(0, term(TokenKind::Identifier)),
      term(TokenKind::LeftParenthesis),
      params,
      term(TokenKind::RightParenthesis),
      term(TokenKind::As),
      capture_term(2, prod(super::TYPE)),
      zero_or_more(term(TokenKind::EndOfLine)),
      capture_term(3, prod(super::BODY)),
      term(TokenKind::End),
      term(TokenKind::Function),
    ]),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::Procedure {
      token: first.clone(),
      name: capture_token(c, 0).clone(),
      parameters: capture_node_array(c, 1).to_vec(),
      return_type: capture_single_node_or_null(c, 2).map(|n| Box::new(n.clone())),
      body: Box::new(capture_single_node(c, 3).clone()),
    }
  }
  Production::new("Member", t, build)
}
