mod checkpoint;
mod engine;
mod frame;

use crate::ast::Node;
use crate::error::ParseResult;
use crate::grammar_defs;
use crate::token::Token;
use engine::Engine;

/// Parses a single top-level member (a procedure/function declaration).
pub fn parse_member(tokens: &[Token]) -> ParseResult<Node> {
  Engine::parse_root(tokens, grammar_defs::MEMBER)
}

/// Parses a whole program: a sequence of members.
pub fn parse_program(tokens: &[Token]) -> ParseResult<Node> {
  Engine::parse_root(tokens, grammar_defs::PROGRAM)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::{BinaryOperator, Node};
  use crate::token::TokenKind;

  fn tok(kind: TokenKind, text: &str) -> Token {
    Token::new(1, 1, kind, text)
  }

  fn tokens(mut kinds: Vec<Token>) -> Vec<Token> {
    kinds.push(Token::eof_sentinel(1, 1));
    kinds
  }

  fn parse(id: crate::grammar::ProductionId, ts: Vec<Token>) -> ParseResult<Node> {
    Engine::parse_root(&tokens(ts), id)
  }

  #[test]
  fn dim_statement_parses_a_plain_variable() {
    let node = parse(
      grammar_defs::DIM_STATEMENT,
      vec![tok(TokenKind::Dim, "Dim"), tok(TokenKind::Identifier, "x"), tok(TokenKind::As, "As"), tok(TokenKind::Number, "Number")],
    )
    .expect("should parse");
    match node {
      Node::DimStatement { name, value, .. } => {
        assert_eq!(name.text, "x");
        assert!(value.is_none());
      }
      other => panic!("expected DimStatement, got {other:?}"),
    }
  }

  #[test]
  fn dim_statement_recognizes_a_list_type_and_produces_dim_list() {
    let node = parse(
      grammar_defs::DIM_STATEMENT,
      vec![
        tok(TokenKind::Dim, "Dim"),
        tok(TokenKind::Identifier, "items"),
        tok(TokenKind::As, "As"),
        tok(TokenKind::List, "List"),
        tok(TokenKind::Of, "Of"),
        tok(TokenKind::Number, "Number"),
      ],
    )
    .expect("should parse");
    assert!(matches!(node, Node::DimListStatement { .. }));
  }

  #[test]
  fn dim_statement_missing_identifier_after_dim_is_a_cut_violation() {
    let err = parse(grammar_defs::DIM_STATEMENT, vec![tok(TokenKind::Dim, "Dim"), tok(TokenKind::As, "As")]).unwrap_err();
    assert!(matches!(err, ParseError::CutViolation { .. }));
  }

  #[test]
  fn expression_honors_operator_precedence() {
    // 1 + 2 * 3  ==  1 + (2 * 3)
    let node = parse(
      grammar_defs::EXPRESSION,
      vec![
        tok(TokenKind::NumberLiteral, "1"),
        tok(TokenKind::PlusSign, "+"),
        tok(TokenKind::NumberLiteral, "2"),
        tok(TokenKind::MultiplicationSign, "*"),
        tok(TokenKind::NumberLiteral, "3"),
      ],
    )
    .expect("should parse");
    match node {
      Node::BinaryExpression { operator: BinaryOperator::Add, left, right, .. } => {
        assert!(matches!(*left, Node::LiteralNumber { .. }));
        match *right {
          Node::BinaryExpression { operator: BinaryOperator::Multiply, .. } => {}
          other => panic!("expected the multiply to bind tighter, got {other:?}"),
        }
      }
      other => panic!("expected a top-level Add, got {other:?}"),
    }
  }

  #[test]
  fn statement_disambiguates_call_from_assignment() {
    let call = parse(
      grammar_defs::STATEMENT,
      vec![tok(TokenKind::Identifier, "foo"), tok(TokenKind::LeftParenthesis, "("), tok(TokenKind::RightParenthesis, ")")],
    )
    .expect("call should parse");
    assert!(matches!(call, Node::CallStatement { .. }));

    let assign = parse(
      grammar_defs::STATEMENT,
      vec![tok(TokenKind::Identifier, "foo"), tok(TokenKind::EqualsSign, "="), tok(TokenKind::NumberLiteral, "1")],
    )
    .expect("assignment should parse");
    assert!(matches!(assign, Node::AssignStatement { .. }));
  }

  #[test]
  fn try_statement_parses_catch_and_finally() {
    let node = parse(
      grammar_defs::TRY_STATEMENT,
      vec![
        tok(TokenKind::Try, "Try"),
        tok(TokenKind::Catch, "Catch"),
        tok(TokenKind::Finally, "Finally"),
        tok(TokenKind::End, "End"),
        tok(TokenKind::Try, "Try"),
      ],
    )
    .expect("should parse");
    match node {
      Node::TryStatement { catch_body, finally_body, .. } => {
        assert!(catch_body.is_some());
        assert!(finally_body.is_some());
      }
      other => panic!("expected TryStatement, got {other:?}"),
    }
  }

  #[test]
  fn do_statement_distinguishes_test_at_start_from_test_at_end() {
    let at_start = parse(
      grammar_defs::DO_STATEMENT,
      vec![tok(TokenKind::Do, "Do"), tok(TokenKind::While, "While"), tok(TokenKind::True, "True"), tok(TokenKind::Loop, "Loop")],
    )
    .expect("should parse");
    assert!(matches!(at_start, Node::DoStatement { test_at_end: false, until: false, .. }));

    let at_end = parse(
      grammar_defs::DO_STATEMENT,
      vec![tok(TokenKind::Do, "Do"), tok(TokenKind::Loop, "Loop"), tok(TokenKind::Until, "Until"), tok(TokenKind::True, "True")],
    )
    .expect("should parse");
    assert!(matches!(at_end, Node::DoStatement { test_at_end: true, until: true, .. }));
  }
}
