pub mod capture;
pub mod production;
pub mod registry;
pub mod term;

pub use capture::{
  capture_node_array, capture_single_node, capture_single_node_or_null, capture_token, capture_token_text, capture_tokens, CaptureBox,
  Captures, NUM_CAPTURES,
};
pub use production::Production;
pub use registry::production;
pub use term::{and, capture as capture_term, cut, one_of, optional, prod, term, zero_or_more, ProductionId, Term};
