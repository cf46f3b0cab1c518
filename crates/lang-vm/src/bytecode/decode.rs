//! Counterparts to `encode`'s field writers: read one fixed-width
//! little-endian field out of a procedure's code vector at a given
//! offset, returning the value plus the offset just past it.
//!
//! Malformed bytecode (reading past the end of `code`) is a fatal
//! interpreter error, not a recoverable one; callers propagate it via
//! `FatalError::MalformedBytecode`.

use crate::error::FatalError;

type DecodeResult<T> = Result<T, FatalError>;

fn take<'c>(code: &'c [u8], offset: usize, len: usize) -> DecodeResult<&'c [u8]> {
  code.get(offset..offset + len).ok_or(FatalError::MalformedBytecode { offset })
}

pub fn read_u8(code: &[u8], offset: usize) -> DecodeResult<(u8, usize)> {
  let bytes = take(code, offset, 1)?;
  Ok((bytes[0], offset + 1))
}

pub fn read_i16_le(code: &[u8], offset: usize) -> DecodeResult<(i16, usize)> {
  let bytes = take(code, offset, 2)?;
  Ok((i16::from_le_bytes([bytes[0], bytes[1]]), offset + 2))
}

pub fn read_u16_le(code: &[u8], offset: usize) -> DecodeResult<(u16, usize)> {
  let bytes = take(code, offset, 2)?;
  Ok((u16::from_le_bytes([bytes[0], bytes[1]]), offset + 2))
}

pub fn read_u32_le(code: &[u8], offset: usize) -> DecodeResult<(u32, usize)> {
  let bytes = take(code, offset, 4)?;
  Ok((u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), offset + 4))
}

pub fn read_i64_le(code: &[u8], offset: usize) -> DecodeResult<(i64, usize)> {
  let bytes = take(code, offset, 8)?;
  let mut buf = [0u8; 8];
  buf.copy_from_slice(bytes);
  Ok((i64::from_le_bytes(buf), offset + 8))
}

pub fn read_string(code: &[u8], offset: usize) -> DecodeResult<(std::string::String, usize)> {
  let (len, offset) = read_u32_le(code, offset)?;
  let bytes = take(code, offset, len as usize)?;
  let text = std::str::from_utf8(bytes).map_err(|_| FatalError::MalformedBytecode { offset })?.to_string();
  Ok((text, offset + len as usize))
}
