//! A compiled procedure: its instruction stream plus the frame-shape
//! counts the interpreter needs to reserve stack space on `Call`.

#[derive(Debug, Clone)]
pub struct Procedure {
  pub name: std::string::String,
  pub value_parameter_count: u16,
  pub object_parameter_count: u16,
  pub value_frame_size: u16,
  pub object_frame_size: u16,
  pub code: Vec<u8>,
}

impl Procedure {
  pub fn new(
    name: impl Into<std::string::String>,
    value_parameter_count: u16,
    object_parameter_count: u16,
    value_frame_size: u16,
    object_frame_size: u16,
    code: Vec<u8>,
  ) -> Self {
    Self { name: name.into(), value_parameter_count, object_parameter_count, value_frame_size, object_frame_size, code }
  }
}
