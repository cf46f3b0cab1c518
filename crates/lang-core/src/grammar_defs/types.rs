use crate::ast::Node;
use crate::grammar::{
  and, capture_node_array, capture_single_node, capture_term, capture_token, cut, one_of, optional, prod, term, zero_or_more, Captures,
  Production, ProductionId,
};
use crate::token::{Token, TokenKind};

use super::passthrough;

pub(crate) fn install(set: &mut impl FnMut(ProductionId, Production)) {
  set(super::TYPE, type_production());
  set(super::NAMED_TYPE, named_type());
  set(super::LIST_TYPE, list_type());
  set(super::MAP_TYPE, map_type());
  set(super::OPTIONAL_TYPE, optional_type());
  set(super::RECORD_TYPE, record_type());
  set(super::RECORD_FIELD, record_field());
}

fn type_production() -> Production {
  let term = one_of(vec![
    capture_term(0, prod(super::LIST_TYPE)),
    capture_term(0, prod(super::MAP_TYPE)),
    capture_term(0, prod(super::OPTIONAL_TYPE)),
    capture_term(0, prod(super::RECORD_TYPE)),
    capture_term(0, prod(super::NAMED_TYPE)),
  ]);
  Production::new("Type", term, passthrough)
}

fn named_type() -> Production {
  let kind = one_of(vec![
    term(TokenKind::Boolean),
    term(TokenKind::Number),
    term(TokenKind::String),
    term(TokenKind::Date),
    term(TokenKind::DateTime),
    term(TokenKind::DateTimeOffset),
    term(TokenKind::TimeSpan),
    term(TokenKind::TimeZone),
  ]);
  let t = capture_term(0, kind);
  fn build(c: &Captures, _first: &Token) -> Node {
    let tok = capture_token(c, 0).clone();
    Node::NamedType { token: tok.clone(), name: tok }
  }
  Production::new("NamedType", t, build)
}

fn list_type() -> Production {
  let t = and(vec![term(TokenKind::List), term(TokenKind::Of), cut(), capture_term(0, prod(super::TYPE))]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::ListType { token: first.clone(), element: Box::new(capture_single_node(c, 0).clone()) }
  }
  Production::new("ListType", t, build)
}

fn map_type() -> Production {
  let t = and(vec![
    term(TokenKind::Map),
    term(TokenKind::From),
    cut(),
    capture_term(0, prod(super::TYPE)),
    term(TokenKind::To),
    capture_term(1, prod(super::TYPE)),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::MapType {
      token: first.clone(),
      key: Box::new(capture_single_node(c, 0).clone()),
      value: Box::new(capture_single_node(c, 1).clone()),
    }
  }
  Production::new("MapType", t, build)
}

fn optional_type() -> Production {
  let t = and(vec![term(TokenKind::Optional), cut(), capture_term(0, prod(super::TYPE))]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::OptionalType { token: first.clone(), inner: Box::new(capture_single_node(c, 0).clone()) }
  }
  Production::new("OptionalType", t, build)
}

fn record_type() -> Production {
  let field = capture_term(0, prod(super::RECORD_FIELD));
  let more_fields = zero_or_more(and(vec![term(TokenKind::Comma), capture_term(0, prod(super::RECORD_FIELD))]));
  let t = and(vec![term(TokenKind::Record), cut(), optional(vec![field, more_fields]), term(TokenKind::End), term(TokenKind::Record)]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::RecordType { token: first.clone(), fields: capture_node_array(c, 0).to_vec() }
  }
  Production::new("RecordType", t, build)
}

fn record_field() -> Production {
  let t = and(vec![capture_term(0, term(TokenKind::Identifier)), term(TokenKind::As), cut(), capture_term(1, prod(super::TYPE))]);
  fn build(c: &Captures, _first: &Token) -> Node {
    let name = capture_token(c, 0).clone();
    Node::Field { token: name.clone(), name, type_ref: Box::new(capture_single_node(c, 1).clone()) }
  }
  Production::new("RecordField", t, build)
}
