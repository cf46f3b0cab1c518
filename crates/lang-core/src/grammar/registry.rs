//! Process-wide production table. `TypeProduction` and `ExpressionProduction`
//! refer to each other (a type can name a record field whose type is itself,
//! an expression can contain a type in a `ConvertAs`), so productions can't
//! simply be built bottom-up in Rust's ordinary initialization order. Instead
//! every production is addressed by a fixed `ProductionId` constant, and the
//! table mapping those ids to actual `Production` values is built once,
//! lazily, the first time anything is parsed.

use once_cell::sync::Lazy;

use crate::grammar::production::Production;
use crate::grammar::term::ProductionId;
use crate::grammar_defs;

static REGISTRY: Lazy<Vec<Production>> = Lazy::new(grammar_defs::build_registry);

pub fn production(id: ProductionId) -> &'static Production {
  let idx: usize = id.into();
  &REGISTRY[idx]
}
