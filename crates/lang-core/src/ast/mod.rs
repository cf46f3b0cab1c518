mod node;

pub use node::{BinaryOperator, Node};
