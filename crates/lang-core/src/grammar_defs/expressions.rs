use crate::ast::{BinaryOperator, Node};
use crate::grammar::{
  and, capture_node_array, capture_single_node, capture_single_node_or_null, capture_term, capture_token, capture_tokens, cut, one_of,
  optional, prod, term, zero_or_more, Captures, Production, ProductionId,
};
use crate::token::{Token, TokenKind};

use super::passthrough;

pub(crate) fn install(set: &mut impl FnMut(ProductionId, Production)) {
  set(super::EXPRESSION, expression());
  set(super::OR_EXPR, binary_level("Or", super::AND_EXPR, one_of(vec![term(TokenKind::Or)])));
  set(super::AND_EXPR, binary_level("And", super::EQUALITY_EXPR, one_of(vec![term(TokenKind::And)])));
  set(
    super::EQUALITY_EXPR,
    binary_level("Equality", super::RELATIONAL_EXPR, one_of(vec![term(TokenKind::EqualsSign), term(TokenKind::NotEqualsSign)])),
  );
  set(
    super::RELATIONAL_EXPR,
    binary_level(
      "Relational",
      super::ADD_EXPR,
      one_of(vec![
        term(TokenKind::LessThanEqualsSign),
        term(TokenKind::GreaterThanEqualsSign),
        term(TokenKind::LessThanSign),
        term(TokenKind::GreaterThanSign),
      ]),
    ),
  );
  set(super::ADD_EXPR, binary_level("Add", super::MULTIPLY_EXPR, one_of(vec![term(TokenKind::PlusSign), term(TokenKind::MinusSign)])));
  set(
    super::MULTIPLY_EXPR,
    binary_level(
      "Multiply",
      super::UNARY_EXPR,
      one_of(vec![term(TokenKind::MultiplicationSign), term(TokenKind::DivisionSign), term(TokenKind::Mod)]),
    ),
  );
  set(super::UNARY_EXPR, unary_expr());
  set(super::PRIMARY_EXPR, primary_expr());
  set(super::CALL_EXPR, call_expr());
  set(super::LITERAL_ARRAY, literal_array());
  set(super::LITERAL_RECORD, literal_record());
  set(super::LITERAL_BOOL, literal_bool());
  set(super::LITERAL_NUMBER, literal_number());
  set(super::LITERAL_STRING, literal_string());
  set(super::SYMBOL_REFERENCE, symbol_reference());
}

fn expression() -> Production {
  Production::new("Expression", capture_term(0, prod(super::OR_EXPR)), passthrough)
}

fn token_kind_to_operator(kind: TokenKind) -> BinaryOperator {
  match kind {
    TokenKind::PlusSign => BinaryOperator::Add,
    TokenKind::MinusSign => BinaryOperator::Subtract,
    TokenKind::MultiplicationSign => BinaryOperator::Multiply,
    TokenKind::DivisionSign => BinaryOperator::Divide,
    TokenKind::Mod => BinaryOperator::Modulo,
    TokenKind::EqualsSign => BinaryOperator::Equals,
    TokenKind::NotEqualsSign => BinaryOperator::NotEquals,
    TokenKind::LessThanSign => BinaryOperator::LessThan,
    TokenKind::LessThanEqualsSign => BinaryOperator::LessThanEquals,
    TokenKind::GreaterThanSign => BinaryOperator::GreaterThan,
    TokenKind::GreaterThanEqualsSign => BinaryOperator::GreaterThanEquals,
    TokenKind::And => BinaryOperator::And,
    TokenKind::Or => BinaryOperator::Or,
    other => unreachable!("{other:?} is not a binary operator token"),
  }
}

fn fold_binary(head: Node, operators: &[Token], rights: &[Node]) -> Node {
  let mut result = head;
  for (op_token, right) in operators.iter().zip(rights.iter()) {
    result = Node::BinaryExpression {
      token: op_token.clone(),
      operator: token_kind_to_operator(op_token.kind),
      left: Box::new(result),
      right: Box::new(right.clone()),
    };
  }
  result
}

/// One level of the precedence chain: `next (op next)*`, left-associative.
fn binary_level(name: &'static str, next: ProductionId, op: crate::grammar::Term) -> Production {
  let t = and(vec![capture_term(0, prod(next)), zero_or_more(and(vec![capture_term(1, op), capture_term(2, prod(next))]))]);
  fn build(c: &Captures, _first: &Token) -> Node {
    let head = capture_single_node(c, 0).clone();
    fold_binary(head, capture_tokens(c, 1), capture_node_array(c, 2))
  }
  Production::new(name, t, build)
}

fn unary_expr() -> Production {
  let t = one_of(vec![
    and(vec![capture_term(0, term(TokenKind::Not)), cut(), capture_term(1, prod(super::UNARY_EXPR))]),
    and(vec![capture_term(2, prod(super::PRIMARY_EXPR))]),
  ]);
  fn build(c: &Captures, _first: &Token) -> Node {
    if let Some(operand) = capture_single_node_or_null(c, 1) {
      let not_token = capture_token(c, 0).clone();
      Node::NotExpression { token: not_token, operand: Box::new(operand.clone()) }
    } else {
      capture_single_node(c, 2).clone()
    }
  }
  Production::new("UnaryExpression", t, build)
}

fn primary_expr() -> Production {
  let base = one_of(vec![
    capture_term(0, prod(super::LITERAL_BOOL)),
    capture_term(0, prod(super::LITERAL_NUMBER)),
    capture_term(0, prod(super::LITERAL_STRING)),
    capture_term(0, prod(super::LITERAL_ARRAY)),
    capture_term(0, prod(super::LITERAL_RECORD)),
    and(vec![term(TokenKind::LeftParenthesis), cut(), capture_term(0, prod(super::EXPRESSION)), term(TokenKind::RightParenthesis)]),
    capture_term(0, prod(super::CALL_EXPR)),
    capture_term(0, prod(super::SYMBOL_REFERENCE)),
  ]);
  let dotted = zero_or_more(and(vec![term(TokenKind::Dot), cut(), capture_term(1, term(TokenKind::Identifier))]));
  let convert = optional(vec![term(TokenKind::As), cut(), capture_term(2, prod(super::TYPE))]);
  let t = and(vec![base, dotted, convert]);

  fn build(c: &Captures, first: &Token) -> Node {
    let mut result = capture_single_node(c, 0).clone();
    for member in capture_tokens(c, 1) {
      result = Node::DottedAccess { token: member.clone(), target: Box::new(result), member: member.clone() };
    }
    if let Some(type_node) = capture_single_node_or_null(c, 2) {
      result = Node::ConvertAs { token: first.clone(), value: Box::new(result), type_ref: Box::new(type_node.clone()) };
    }
    result
  }
  Production::new("PrimaryExpression", t, build)
}

fn call_expr() -> Production {
  let args = optional(vec![
    capture_term(1, prod(super::EXPRESSION)),
    zero_or_more(and(vec![term(TokenKind::Comma), capture_term(1, prod(super::EXPRESSION))])),
  ]);
  let t = and(vec![capture_term(0, term(TokenKind::Identifier)), term(TokenKind::LeftParenthesis), cut(), args, term(TokenKind::RightParenthesis)]);
  fn build(c: &Captures, _first: &Token) -> Node {
    let callee = capture_token(c, 0).clone();
    Node::CallExpression { token: callee.clone(), callee, arguments: capture_node_array(c, 1).to_vec() }
  }
  Production::new("CallExpression", t, build)
}

fn literal_array() -> Production {
  let elements = optional(vec![
    capture_term(0, prod(super::EXPRESSION)),
    zero_or_more(and(vec![term(TokenKind::Comma), capture_term(0, prod(super::EXPRESSION))])),
  ]);
  let t = and(vec![term(TokenKind::LeftBracket), cut(), elements, term(TokenKind::RightBracket)]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::LiteralArray { token: first.clone(), elements: capture_node_array(c, 0).to_vec() }
  }
  Production::new("LiteralArray", t, build)
}

fn record_field_value() -> crate::grammar::Term {
  and(vec![capture_term(0, term(TokenKind::Identifier)), term(TokenKind::Colon), capture_term(1, prod(super::EXPRESSION))])
}

fn literal_record() -> Production {
  let fields = optional(vec![record_field_value(), zero_or_more(and(vec![term(TokenKind::Comma), record_field_value()]))]);
  let t = and(vec![term(TokenKind::LeftBrace), cut(), fields, term(TokenKind::RightBrace)]);
  fn build(c: &Captures, first: &Token) -> Node {
    let names = capture_tokens(c, 0);
    let values = capture_node_array(c, 1);
    let fields = names.iter().cloned().zip(values.iter().cloned()).collect();
    Node::LiteralRecord { token: first.clone(), fields }
  }
  Production::new("LiteralRecord", t, build)
}

fn literal_bool() -> Production {
  let t = capture_term(0, one_of(vec![term(TokenKind::True), term(TokenKind::False)]));
  fn build(c: &Captures, _first: &Token) -> Node {
    let tok = capture_token(c, 0).clone();
    let value = tok.kind == TokenKind::True;
    Node::LiteralBool { token: tok, value }
  }
  Production::new("LiteralBool", t, build)
}

fn literal_number() -> Production {
  let t = capture_term(0, term(TokenKind::NumberLiteral));
  fn build(c: &Captures, _first: &Token) -> Node {
    let tok = capture_token(c, 0).clone();
    Node::LiteralNumber { token: tok.clone(), text: tok.text }
  }
  Production::new("LiteralNumber", t, build)
}

fn literal_string() -> Production {
  let t = capture_term(0, term(TokenKind::StringLiteral));
  fn build(c: &Captures, _first: &Token) -> Node {
    let tok = capture_token(c, 0).clone();
    let raw = tok.text.as_str();
    let inner = if raw.len() >= 2 { &raw[1..raw.len() - 1] } else { "" };
    let value = inner.replace("\"\"", "\"");
    Node::LiteralString { token: tok, value }
  }
  Production::new("LiteralString", t, build)
}

fn symbol_reference() -> Production {
  let t = capture_term(0, term(TokenKind::Identifier));
  fn build(c: &Captures, _first: &Token) -> Node {
    let tok = capture_token(c, 0).clone();
    Node::SymbolReference { token: tok.clone(), name: tok }
  }
  Production::new("SymbolReference", t, build)
}
