//! The state `Call` saves and `Return` restores.

#[derive(Debug, Clone, Copy)]
pub struct CallFrame {
  pub return_procedure: usize,
  pub return_offset: u32,
  pub caller_value_base: usize,
  pub caller_object_base: usize,
}
