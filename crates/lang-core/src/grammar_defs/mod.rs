//! Concrete grammar: every `Production` the language needs, addressed by a
//! fixed `ProductionId` so productions can refer to each other (directly,
//! or through mutual recursion via `TYPE`/`EXPRESSION`) before the whole
//! table exists. See `crate::grammar::registry` for why this indirection
//! is necessary.

mod expressions;
mod program;
mod statements;
mod types;

use crate::ast::Node;
use crate::grammar::{capture_single_node, Captures, Production, ProductionId};
use crate::token::Token;

pub const PROGRAM: ProductionId = ProductionId(0);
pub const MEMBER: ProductionId = ProductionId(1);
pub const PARAMETER: ProductionId = ProductionId(2);
pub const BODY: ProductionId = ProductionId(3);
pub const NAMED_TYPE: ProductionId = ProductionId(4);
pub const TYPE: ProductionId = ProductionId(5);
pub const LIST_TYPE: ProductionId = ProductionId(6);
pub const MAP_TYPE: ProductionId = ProductionId(7);
pub const OPTIONAL_TYPE: ProductionId = ProductionId(8);
pub const RECORD_TYPE: ProductionId = ProductionId(9);
pub const RECORD_FIELD: ProductionId = ProductionId(10);
pub const STATEMENT: ProductionId = ProductionId(11);
pub const DIM_STATEMENT: ProductionId = ProductionId(12);
pub const CONST_STATEMENT: ProductionId = ProductionId(13);
pub const ASSIGN_STATEMENT: ProductionId = ProductionId(14);
pub const CALL_STATEMENT: ProductionId = ProductionId(15);
pub const RETURN_STATEMENT: ProductionId = ProductionId(16);
pub const IF_STATEMENT: ProductionId = ProductionId(17);
pub const SELECT_CASE_STATEMENT: ProductionId = ProductionId(18);
pub const CASE_VALUES: ProductionId = ProductionId(19);
pub const FOR_STATEMENT: ProductionId = ProductionId(20);
pub const FOR_EACH_STATEMENT: ProductionId = ProductionId(21);
pub const WHILE_STATEMENT: ProductionId = ProductionId(22);
pub const DO_STATEMENT: ProductionId = ProductionId(23);
pub const TRY_STATEMENT: ProductionId = ProductionId(24);
pub const THROW_STATEMENT: ProductionId = ProductionId(25);
pub const RETHROW_STATEMENT: ProductionId = ProductionId(26);
pub const EXIT_STATEMENT: ProductionId = ProductionId(27);
pub const CONTINUE_STATEMENT: ProductionId = ProductionId(28);
pub const GROUP_STATEMENT: ProductionId = ProductionId(29);
pub const JOIN_STATEMENT: ProductionId = ProductionId(30);
pub const EXPRESSION: ProductionId = ProductionId(31);
pub const OR_EXPR: ProductionId = ProductionId(32);
pub const AND_EXPR: ProductionId = ProductionId(33);
pub const EQUALITY_EXPR: ProductionId = ProductionId(34);
pub const RELATIONAL_EXPR: ProductionId = ProductionId(35);
pub const ADD_EXPR: ProductionId = ProductionId(36);
pub const MULTIPLY_EXPR: ProductionId = ProductionId(37);
pub const UNARY_EXPR: ProductionId = ProductionId(38);
pub const PRIMARY_EXPR: ProductionId = ProductionId(39);
pub const CALL_EXPR: ProductionId = ProductionId(40);
pub const LITERAL_ARRAY: ProductionId = ProductionId(41);
pub const LITERAL_RECORD: ProductionId = ProductionId(42);
pub const LITERAL_BOOL: ProductionId = ProductionId(43);
pub const LITERAL_NUMBER: ProductionId = ProductionId(44);
pub const LITERAL_STRING: ProductionId = ProductionId(45);
pub const SYMBOL_REFERENCE: ProductionId = ProductionId(46);

const PRODUCTION_COUNT: usize = 47;

/// Shared by every production whose whole job is picking one of several
/// sub-productions and handing its node through unchanged (`TYPE`,
/// `STATEMENT`, `EXPRESSION`, and the binary-operator chain's own
/// top alias).
pub(crate) fn passthrough(captures: &Captures, _first_token: &Token) -> Node {
  capture_single_node(captures, 0).clone()
}

pub(crate) fn build_registry() -> Vec<Production> {
  let mut table: Vec<Option<Production>> = (0..PRODUCTION_COUNT).map(|_| None).collect();

  let mut set = |id: ProductionId, p: Production| {
    let idx: usize = id.into();
    table[idx] = Some(p);
  };

  program::install(&mut set);
  types::install(&mut set);
  statements::install(&mut set);
  expressions::install(&mut set);

  table.into_iter().enumerate().map(|(i, p)| p.unwrap_or_else(|| panic!("production id {i} was never installed"))).collect()
}
