//! Backtracking snapshot: enough state to undo everything a term tried
//! since the checkpoint was taken.

use crate::grammar::NUM_CAPTURES;

#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
  pub token_index: usize,
  pub cut: bool,
  pub capture_lengths: [usize; NUM_CAPTURES],
}
