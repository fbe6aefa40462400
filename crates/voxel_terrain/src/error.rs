//! Errors surfaced at the serialization boundary.
//!
//! Everything past decoding is total over well-formed grids; invariant
//! violations inside the core are assertions, not error values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
  /// Packed cells are 16-bit words, so the byte stream must have even length.
  #[error("decoded {len} bytes, which is not a whole number of 16-bit cells")]
  OddByteLength { len: usize },

  #[error("chunk grid is not valid base64: {0}")]
  Base64(#[from] base64::DecodeError),

  #[error("expected {expected} packed cells, got {actual}")]
  CellCount { expected: usize, actual: usize },

  #[error("malformed chunk key {0:?}, expected \"x:y:z\"")]
  ChunkKey(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
