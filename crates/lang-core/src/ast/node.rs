//! The abstract syntax tree. One flat enum rather than a trait-object
//! hierarchy: every variant carries its originating token for diagnostics,
//! and ownership is strictly a tree (`Box`/`Vec`, no shared or cyclic
//! references).

use crate::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum BinaryOperator {
  Add,
  Subtract,
  Multiply,
  Divide,
  Modulo,
  Equals,
  NotEquals,
  LessThan,
  LessThanEquals,
  GreaterThan,
  GreaterThanEquals,
  And,
  Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
  // --- top level ---------------------------------------------------
  Program { token: Token, members: Vec<Node> },
  Procedure {
    token: Token,
    name: Token,
    parameters: Vec<Node>,
    return_type: Option<Box<Node>>,
    body: Box<Node>,
  },
  Parameter { token: Token, name: Token, type_ref: Box<Node> },
  Field { token: Token, name: Token, type_ref: Box<Node> },
  Body { token: Token, statements: Vec<Node> },

  // --- type references ----------------------------------------------
  NamedType { token: Token, name: Token },
  ListType { token: Token, element: Box<Node> },
  MapType { token: Token, key: Box<Node>, value: Box<Node> },
  OptionalType { token: Token, inner: Box<Node> },
  RecordType { token: Token, fields: Vec<Node> },

  // --- statements ----------------------------------------------------
  AssignStatement { token: Token, target: Box<Node>, value: Box<Node> },
  DimStatement { token: Token, name: Token, type_ref: Box<Node>, value: Option<Box<Node>> },
  DimListStatement { token: Token, name: Token, element_type: Box<Node> },
  DimMapStatement { token: Token, name: Token, key_type: Box<Node>, value_type: Box<Node> },
  ConstStatement { token: Token, name: Token, value: Box<Node> },
  CallStatement { token: Token, call: Box<Node> },
  ReturnStatement { token: Token, value: Option<Box<Node>> },
  IfStatement {
    token: Token,
    condition: Box<Node>,
    then_body: Box<Node>,
    else_if_clauses: Vec<(Node, Node)>,
    else_body: Option<Box<Node>>,
  },
  SelectCaseStatement {
    token: Token,
    subject: Box<Node>,
    cases: Vec<(Vec<Node>, Node)>,
    else_body: Option<Box<Node>>,
  },
  ForStatement {
    token: Token,
    loop_variable: Token,
    start: Box<Node>,
    end: Box<Node>,
    step: Option<Box<Node>>,
    body: Box<Node>,
  },
  ForEachStatement { token: Token, loop_variable: Token, collection: Box<Node>, body: Box<Node> },
  WhileStatement { token: Token, condition: Box<Node>, body: Box<Node> },
  DoStatement { token: Token, body: Box<Node>, condition: Box<Node>, test_at_end: bool, until: bool },
  TryStatement {
    token: Token,
    body: Box<Node>,
    catch_body: Option<Box<Node>>,
    finally_body: Option<Box<Node>>,
  },
  ThrowStatement { token: Token, code: Box<Node>, message: Box<Node> },
  RethrowStatement { token: Token },
  ExitStatement { token: Token },
  ContinueStatement { token: Token },
  GroupStatement { token: Token, name: Token, source: Box<Node>, key: Box<Node>, into: Token, body: Box<Node> },
  JoinStatement {
    token: Token,
    name: Token,
    collection: Box<Node>,
    join_body: Box<Node>,
  },

  // --- expressions -----------------------------------------------------
  LiteralBool { token: Token, value: bool },
  LiteralNumber { token: Token, text: std::string::String },
  LiteralString { token: Token, value: std::string::String },
  LiteralArray { token: Token, elements: Vec<Node> },
  LiteralRecord { token: Token, fields: Vec<(Token, Node)> },
  SymbolReference { token: Token, name: Token },
  CallExpression { token: Token, callee: Token, arguments: Vec<Node> },
  DottedAccess { token: Token, target: Box<Node>, member: Token },
  ConvertAs { token: Token, value: Box<Node>, type_ref: Box<Node> },
  NotExpression { token: Token, operand: Box<Node> },
  BinaryExpression { token: Token, operator: BinaryOperator, left: Box<Node>, right: Box<Node> },
}

impl Node {
  pub fn token(&self) -> &Token {
    match self {
      Node::Program { token, .. }
      | Node::Procedure { token, .. }
      | Node::Parameter { token, .. }
      | Node::Field { token, .. }
      | Node::Body { token, .. }
      | Node::NamedType { token, .. }
      | Node::ListType { token, .. }
      | Node::MapType { token, .. }
      | Node::OptionalType { token, .. }
      | Node::RecordType { token, .. }
      | Node::AssignStatement { token, .. }
      | Node::DimStatement { token, .. }
      | Node::DimListStatement { token, .. }
      | Node::DimMapStatement { token, .. }
      | Node::ConstStatement { token, .. }
      | Node::CallStatement { token, .. }
      | Node::ReturnStatement { token, .. }
      | Node::IfStatement { token, .. }
      | Node::SelectCaseStatement { token, .. }
      | Node::ForStatement { token, .. }
      | Node::ForEachStatement { token, .. }
      | Node::WhileStatement { token, .. }
      | Node::DoStatement { token, .. }
      | Node::TryStatement { token, .. }
      | Node::ThrowStatement { token, .. }
      | Node::RethrowStatement { token, .. }
      | Node::ExitStatement { token, .. }
      | Node::ContinueStatement { token, .. }
      | Node::GroupStatement { token, .. }
      | Node::JoinStatement { token, .. }
      | Node::LiteralBool { token, .. }
      | Node::LiteralNumber { token, .. }
      | Node::LiteralString { token, .. }
      | Node::LiteralArray { token, .. }
      | Node::LiteralRecord { token, .. }
      | Node::SymbolReference { token, .. }
      | Node::CallExpression { token, .. }
      | Node::DottedAccess { token, .. }
      | Node::ConvertAs { token, .. }
      | Node::NotExpression { token, .. }
      | Node::BinaryExpression { token, .. } => token,
    }
  }
}
