use crate::ast::Node;
use crate::grammar::{
  and, capture_node_array, capture_single_node, capture_single_node_or_null, capture_term, capture_token, capture_tokens, cut, one_of,
  optional, prod, term, zero_or_more, Captures, Production, ProductionId,
};
use crate::token::{Token, TokenKind};

use super::passthrough;

pub(crate) fn install(set: &mut impl FnMut(ProductionId, Production)) {
  set(super::STATEMENT, statement());
  set(super::BODY, body());
  set(super::DIM_STATEMENT, dim_statement());
  set(super::CONST_STATEMENT, const_statement());
  set(super::ASSIGN_STATEMENT, assign_statement());
  set(super::CALL_STATEMENT, call_statement());
  set(super::RETURN_STATEMENT, return_statement());
  set(super::IF_STATEMENT, if_statement());
  set(super::SELECT_CASE_STATEMENT, select_case_statement());
  set(super::CASE_VALUES, case_values());
  set(super::FOR_STATEMENT, for_statement());
  set(super::FOR_EACH_STATEMENT, for_each_statement());
  set(super::WHILE_STATEMENT, while_statement());
  set(super::DO_STATEMENT, do_statement());
  set(super::TRY_STATEMENT, try_statement());
  set(super::THROW_STATEMENT, throw_statement());
  set(super::RETHROW_STATEMENT, rethrow_statement());
  set(super::EXIT_STATEMENT, exit_statement());
  set(super::CONTINUE_STATEMENT, continue_statement());
  set(super::GROUP_STATEMENT, group_statement());
  set(super::JOIN_STATEMENT, join_statement());
}

fn statement() -> Production {
  // `For Each` and plain `For` both start with `For`; try the more
  // specific one first so the ordered choice disambiguates correctly.
  // Likewise `CallStatement` before `AssignStatement`, since both can
  // start with a bare identifier.
  let t = one_of(vec![
    capture_term(0, prod(super::DIM_STATEMENT)),
    capture_term(0, prod(super::CONST_STATEMENT)),
    capture_term(0, prod(super::IF_STATEMENT)),
    capture_term(0, prod(super::SELECT_CASE_STATEMENT)),
    capture_term(0, prod(super::FOR_EACH_STATEMENT)),
    capture_term(0, prod(super::FOR_STATEMENT)),
    capture_term(0, prod(super::WHILE_STATEMENT)),
    capture_term(0, prod(super::DO_STATEMENT)),
    capture_term(0, prod(super::TRY_STATEMENT)),
    capture_term(0, prod(super::THROW_STATEMENT)),
    capture_term(0, prod(super::RETHROW_STATEMENT)),
    capture_term(0, prod(super::RETURN_STATEMENT)),
    capture_term(0, prod(super::EXIT_STATEMENT)),
    capture_term(0, prod(super::CONTINUE_STATEMENT)),
    capture_term(0, prod(super::GROUP_STATEMENT)),
    capture_term(0, prod(super::JOIN_STATEMENT)),
    capture_term(0, prod(super::CALL_STATEMENT)),
    capture_term(0, prod(super::ASSIGN_STATEMENT)),
  ]);
  Production::new("Statement", t, passthrough)
}

fn body() -> Production {
  let t = zero_or_more(and(vec![zero_or_more(term(TokenKind::EndOfLine)), capture_term(0, prod(super::STATEMENT))]));
  fn build(c: &Captures, first: &Token) -> Node {
    Node::Body { token: first.clone(), statements: capture_node_array(c, 0).to_vec() }
  }
  Production::new("Body", t, build)
}

fn dim_statement() -> Production {
  let t = and(vec![
    term(TokenKind::Dim),
    cut(),
    capture_term(0, term(TokenKind::Identifier)),
    term(TokenKind::As),
    capture_term(1, prod(super::TYPE)),
    optional(vec![term(TokenKind::EqualsSign), capture_term(2, prod(super::EXPRESSION))]),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    let name = capture_token(c, 0).clone();
    let type_node = capture_single_node(c, 1).clone();
    match type_node {
      Node::ListType { element, .. } => Node::DimListStatement { token: first.clone(), name, element_type: element },
      Node::MapType { key, value, .. } => Node::DimMapStatement { token: first.clone(), name, key_type: key, value_type: value },
      other => {
        let value = capture_single_node_or_null(c, 2).map(|n| Box::new(n.clone()));
        Node::DimStatement { token: first.clone(), name, type_ref: Box::new(other), value }
      }
    }
  }
  Production::new("DimStatement", t, build)
}

fn const_statement() -> Production {
  let t = and(vec![
    term(TokenKind::Const),
    cut(),
    capture_term(0, term(TokenKind::Identifier)),
    term(TokenKind::EqualsSign),
    capture_term(1, prod(super::EXPRESSION)),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::ConstStatement { token: first.clone(), name: capture_token(c, 0).clone(), value: Box::new(capture_single_node(c, 1).clone()) }
  }
  Production::new("ConstStatement", t, build)
}

fn assign_statement() -> Production {
  let t = and(vec![
    capture_term(0, term(TokenKind::Identifier)),
    zero_or_more(and(vec![term(TokenKind::Dot), cut(), capture_term(1, term(TokenKind::Identifier))])),
    term(TokenKind::EqualsSign),
    cut(),
    capture_term(2, prod(super::EXPRESSION)),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    let name = capture_token(c, 0).clone();
    let mut target = Node::SymbolReference { token: name.clone(), name };
    for member in capture_tokens(c, 1) {
      target = Node::DottedAccess { token: member.clone(), target: Box::new(target), member: member.clone() };
    }
    Node::AssignStatement { token: first.clone(), target: Box::new(target), value: Box::new(capture_single_node(c, 2).clone()) }
  }
  Production::new("AssignStatement", t, build)
}

fn call_statement() -> Production {
  let t = capture_term(0, prod(super::CALL_EXPR));
  fn build(c: &Captures, first: &Token) -> Node {
    Node::CallStatement { token: first.clone(), call: Box::new(capture_single_node(c, 0).clone()) }
  }
  Production::new("CallStatement", t, build)
}

fn return_statement() -> Production {
  let t = and(vec![term(TokenKind::Return), cut(), optional(vec![capture_term(0, prod(super::EXPRESSION))])]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::ReturnStatement { token: first.clone(), value: capture_single_node_or_null(c, 0).map(|n| Box::new(n.clone())) }
  }
  Production::new("ReturnStatement", t, build)
}

fn if_statement() -> Production {
  let t = and(vec![
    term(TokenKind::If),
    cut(),
    capture_term(0, prod(super::EXPRESSION)),
    term(TokenKind::Then),
    cut(),
    capture_term(1, prod(super::BODY)),
    zero_or_more(and(vec![
      term(TokenKind::Else),
      term(TokenKind::If),
      cut(),
      capture_term(2, prod(super::EXPRESSION)),
      term(TokenKind::Then),
      cut(),
      capture_term(3, prod(super::BODY)),
    ])),
    optional(vec![term(TokenKind::Else), cut(), capture_term(4, prod(super::BODY))]),
    term(TokenKind::End),
    term(TokenKind::If),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    let condition = Box::new(capture_single_node(c, 0).clone());
    let then_body = Box::new(capture_single_node(c, 1).clone());
    let conditions = capture_node_array(c, 2);
    let bodies = capture_node_array(c, 3);
    let else_if_clauses = conditions.iter().cloned().zip(bodies.iter().cloned()).collect();
    let else_body = capture_single_node_or_null(c, 4).map(|n| Box::new(n.clone()));
    Node::IfStatement { token: first.clone(), condition, then_body, else_if_clauses, else_body }
  }
  Production::new("IfStatement", t, build)
}

fn case_values() -> Production {
  let t = and(vec![capture_term(0, prod(super::EXPRESSION)), zero_or_more(and(vec![term(TokenKind::Comma), capture_term(0, prod(super::EXPRESSION))]))]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::LiteralArray { token: first.clone(), elements: capture_node_array(c, 0).to_vec() }
  }
  Production::new("CaseValues", t, build)
}

fn select_case_statement() -> Production {
  let t = and(vec![
    term(TokenKind::Select),
    term(TokenKind::Case),
    cut(),
    capture_term(0, prod(super::EXPRESSION)),
    zero_or_more(and(vec![
      term(TokenKind::Case),
      cut(),
      capture_term(1, prod(super::CASE_VALUES)),
      capture_term(2, prod(super::BODY)),
    ])),
    optional(vec![term(TokenKind::Case), term(TokenKind::Else), cut(), capture_term(3, prod(super::BODY))]),
    term(TokenKind::End),
    term(TokenKind::Select),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    let subject = Box::new(capture_single_node(c, 0).clone());
    let values = capture_node_array(c, 1);
    let bodies = capture_node_array(c, 2);
    let cases = values
      .iter()
      .zip(bodies.iter())
      .map(|(v, b)| {
        let elements = match v {
          Node::LiteralArray { elements, .. } => elements.clone(),
          _ => unreachable!("CaseValues always yields a LiteralArray"),
        };
        (elements, b.clone())
      })
      .collect();
    let else_body = capture_single_node_or_null(c, 3).map(|n| Box::new(n.clone()));
    Node::SelectCaseStatement { token: first.clone(), subject, cases, else_body }
  }
  Production::new("SelectCaseStatement", t, build)
}

fn for_statement() -> Production {
  let t = and(vec![
    term(TokenKind::For),
    cut(),
    capture_term(0, term(TokenKind::Identifier)),
    term(TokenKind::EqualsSign),
    capture_term(1, prod(super::EXPRESSION)),
    term(TokenKind::To),
    capture_term(2, prod(super::EXPRESSION)),
    optional(vec![term(TokenKind::Step), cut(), capture_term(3, prod(super::EXPRESSION))]),
    capture_term(4, prod(super::BODY)),
    term(TokenKind::Next),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::ForStatement {
      token: first.clone(),
      loop_variable: capture_token(c, 0).clone(),
      start: Box::new(capture_single_node(c, 1).clone()),
      end: Box::new(capture_single_node(c, 2).clone()),
      step: capture_single_node_or_null(c, 3).map(|n| Box::new(n.clone())),
      body: Box::new(capture_single_node(c, 4).clone()),
    }
  }
  Production::new("ForStatement", t, build)
}

fn for_each_statement() -> Production {
  let t = and(vec![
    term(TokenKind::For),
    term(TokenKind::Each),
    cut(),
    capture_term(0, term(TokenKind::Identifier)),
    term(TokenKind::In),
    capture_term(1, prod(super::EXPRESSION)),
    capture_term(2, prod(super::BODY)),
    term(TokenKind::Next),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::ForEachStatement {
      token: first.clone(),
      loop_variable: capture_token(c, 0).clone(),
      collection: Box::new(capture_single_node(c, 1).clone()),
      body: Box::new(capture_single_node(c, 2).clone()),
    }
  }
  Production::new("ForEachStatement", t, build)
}

fn while_statement() -> Production {
  let t = and(vec![term(TokenKind::While), cut(), capture_term(0, prod(super::EXPRESSION)), capture_term(1, prod(super::BODY)), term(TokenKind::Wend)]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::WhileStatement { token: first.clone(), condition: Box::new(capture_single_node(c, 0).clone()), body: Box::new(capture_single_node(c, 1).clone()) }
  }
  Production::new("WhileStatement", t, build)
}

fn do_statement() -> Production {
  let test_first = and(vec![
    capture_term(3, term(TokenKind::Do)),
    cut(),
    capture_term(2, one_of(vec![term(TokenKind::While), term(TokenKind::Until)])),
    capture_term(0, prod(super::EXPRESSION)),
    capture_term(1, prod(super::BODY)),
    term(TokenKind::Loop),
  ]);
  let test_last = and(vec![
    term(TokenKind::Do),
    cut(),
    capture_term(1, prod(super::BODY)),
    term(TokenKind::Loop),
    capture_term(2, one_of(vec![term(TokenKind::While), term(TokenKind::Until)])),
    capture_term(0, prod(super::EXPRESSION)),
  ]);
  let t = one_of(vec![test_first, test_last]);
  fn build(c: &Captures, first: &Token) -> Node {
    let condition = Box::new(capture_single_node(c, 0).clone());
    let body = Box::new(capture_single_node(c, 1).clone());
    let keyword = capture_token(c, 2).clone();
    let until = keyword.kind == TokenKind::Until;
    let test_at_end = capture_tokens(c, 3).is_empty();
    Node::DoStatement { token: first.clone(), body, condition, test_at_end, until }
  }
  Production::new("DoStatement", t, build)
}

fn try_statement() -> Production {
  let t = and(vec![
    term(TokenKind::Try),
    cut(),
    capture_term(0, prod(super::BODY)),
    optional(vec![term(TokenKind::Catch), cut(), capture_term(1, prod(super::BODY))]),
    optional(vec![term(TokenKind::Finally), cut(), capture_term(2, prod(super::BODY))]),
    term(TokenKind::End),
    term(TokenKind::Try),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::TryStatement {
      token: first.clone(),
      body: Box::new(capture_single_node(c, 0).clone()),
      catch_body: capture_single_node_or_null(c, 1).map(|n| Box::new(n.clone())),
      finally_body: capture_single_node_or_null(c, 2).map(|n| Box::new(n.clone())),
    }
  }
  Production::new("TryStatement", t, build)
}

fn throw_statement() -> Production {
  let t = and(vec![
    term(TokenKind::Throw),
    cut(),
    capture_term(0, prod(super::EXPRESSION)),
    term(TokenKind::Comma),
    capture_term(1, prod(super::EXPRESSION)),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::ThrowStatement { token: first.clone(), code: Box::new(capture_single_node(c, 0).clone()), message: Box::new(capture_single_node(c, 1).clone()) }
  }
  Production::new("ThrowStatement", t, build)
}

fn rethrow_statement() -> Production {
  let t = term(TokenKind::Rethrow);
  fn build(_c: &Captures, first: &Token) -> Node {
    Node::RethrowStatement { token: first.clone() }
  }
  Production::new("RethrowStatement", t, build)
}

fn exit_statement() -> Production {
  let t = term(TokenKind::Exit);
  fn build(_c: &Captures, first: &Token) -> Node {
    Node::ExitStatement { token: first.clone() }
  }
  Production::new("ExitStatement", t, build)
}

fn continue_statement() -> Production {
  // Uses the `Continue` keyword, matching its name; treating `Exit` as a
  // continue-statement keyword (as an earlier grammar draft did) would
  // make it indistinguishable from `ExitStatement`.
  let t = term(TokenKind::Continue);
  fn build(_c: &Captures, first: &Token) -> Node {
    Node::ContinueStatement { token: first.clone() }
  }
  Production::new("ContinueStatement", t, build)
}

fn group_statement() -> Production {
  let t = and(vec![
    term(TokenKind::Group),
    cut(),
    capture_term(0, term(TokenKind::Identifier)),
    term(TokenKind::In),
    capture_term(1, prod(super::EXPRESSION)),
    term(TokenKind::By),
    capture_term(2, prod(super::EXPRESSION)),
    term(TokenKind::Into),
    capture_term(3, term(TokenKind::Identifier)),
    capture_term(4, prod(super::BODY)),
    term(TokenKind::End),
    term(TokenKind::Group),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    Node::GroupStatement {
      token: first.clone(),
      name: capture_token(c, 0).clone(),
      source: Box::new(capture_single_node(c, 1).clone()),
      key: Box::new(capture_single_node(c, 2).clone()),
      into: capture_token(c, 3).clone(),
      body: Box::new(capture_single_node(c, 4).clone()),
    }
  }
  Production::new("GroupStatement", t, build)
}

fn join_statement() -> Production {
  let t = and(vec![
    term(TokenKind::Join),
    cut(),
    capture_term(0, term(TokenKind::Identifier)),
    term(TokenKind::In),
    capture_term(1, prod(super::EXPRESSION)),
    capture_term(2, prod(super::BODY)),
    term(TokenKind::End),
    term(TokenKind::Join),
  ]);
  fn build(c: &Captures, first: &Token) -> Node {
    // The join body gets its own slot (2) rather than reusing the
    // collection expression's slot (1): an earlier grammar draft
    // collapsed these, which silently discarded the collection
    // expression whenever a join body was also present.
    Node::JoinStatement {
      token: first.clone(),
      name: capture_token(c, 0).clone(),
      collection: Box::new(capture_single_node(c, 1).clone()),
      join_body: Box::new(capture_single_node(c, 2).clone()),
    }
  }
  Production::new("JoinStatement", t, build)
}
