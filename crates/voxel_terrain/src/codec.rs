//! Packed cell codec and text serialization of chunk grids.
//!
//! # Packed Cell Layout
//!
//! ```text
//!  15      11 10            4 3      0
//! ┌──────────┬───────────────┬────────┐
//! │  weight  │   material    │ light  │
//! │  5 bits  │    7 bits     │ 4 bits │
//! └──────────┴───────────────┴────────┘
//! ```
//!
//! Weight is quantized linearly over `[-0.5, 0.5]` (32 levels), light over
//! `[0, 1]` (16 levels); material ids are stored as-is. Quantization is lossy
//! but monotonic, and the empty sentinel `-0.5` survives exactly.
//!
//! # Text Encoding
//!
//! A chunk travels as standard base64 of the little-endian byte buffer behind
//! its `GRID_SIZE_CB` packed words.

use base64::Engine;

use crate::constants::{GRID_SIZE_CB, WEIGHT_MAX, WEIGHT_MIN};
use crate::error::{CodecError, Result};
use crate::grid::VoxelGrid;

/// Bits used for each channel.
pub const WEIGHT_BITS: u32 = 5;
pub const MATERIAL_BITS: u32 = 7;
pub const LIGHT_BITS: u32 = 4;

const WEIGHT_MASK: u16 = (1 << WEIGHT_BITS) - 1;
const MATERIAL_MASK: u16 = (1 << MATERIAL_BITS) - 1;
const LIGHT_MASK: u16 = (1 << LIGHT_BITS) - 1;

const WEIGHT_SHIFT: u32 = MATERIAL_BITS + LIGHT_BITS;
const MATERIAL_SHIFT: u32 = LIGHT_BITS;

/// Map `value` onto `0..=2^bits - 1`, clamping to `[min, max]` first.
#[inline]
pub fn quantize(value: f32, min: f32, max: f32, bits: u32) -> u32 {
  let levels = ((1u32 << bits) - 1) as f32;
  let normalized = (value.clamp(min, max) - min) / (max - min);
  (normalized * levels).round() as u32
}

/// Inverse of [`quantize`].
#[inline]
pub fn dequantize(q: u32, min: f32, max: f32, bits: u32) -> f32 {
  let levels = ((1u32 << bits) - 1) as f32;
  (q as f32 / levels) * (max - min) + min
}

/// One voxel packed into a 16-bit word.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PackedCell(pub u16);

impl PackedCell {
  /// Compose a word from already-quantized channels.
  ///
  /// Each input is masked to its bit width; out-of-range values are
  /// truncated, not rejected.
  #[inline]
  pub const fn pack(weight_q: u16, material_q: u16, light_q: u16) -> Self {
    Self(
      ((weight_q & WEIGHT_MASK) << WEIGHT_SHIFT)
        | ((material_q & MATERIAL_MASK) << MATERIAL_SHIFT)
        | (light_q & LIGHT_MASK),
    )
  }

  /// Split a word into `(weight_q, material_q, light_q)`.
  #[inline]
  pub const fn unpack(self) -> (u16, u16, u16) {
    (
      (self.0 >> WEIGHT_SHIFT) & WEIGHT_MASK,
      (self.0 >> MATERIAL_SHIFT) & MATERIAL_MASK,
      self.0 & LIGHT_MASK,
    )
  }

  /// Quantize and pack a voxel.
  #[inline]
  pub fn encode(weight: f32, material: u8, light: f32) -> Self {
    Self::pack(
      quantize(weight, WEIGHT_MIN, WEIGHT_MAX, WEIGHT_BITS) as u16,
      material as u16,
      quantize(light, 0.0, 1.0, LIGHT_BITS) as u16,
    )
  }

  /// Unpack and dequantize a voxel into `(weight, material, light)`.
  #[inline]
  pub fn decode(self) -> (f32, u8, f32) {
    let (w, m, l) = self.unpack();
    (
      dequantize(w as u32, WEIGHT_MIN, WEIGHT_MAX, WEIGHT_BITS),
      m as u8,
      dequantize(l as u32, 0.0, 1.0, LIGHT_BITS),
    )
  }
}

/// Encode packed words as base64 of their little-endian bytes.
pub fn serialize(cells: &[u16]) -> String {
  let bytes: Vec<u8> = cells.iter().flat_map(|c| c.to_le_bytes()).collect();
  base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decode text produced by [`serialize`].
pub fn deserialize(text: &str) -> Result<Vec<u16>> {
  let bytes = base64::engine::general_purpose::STANDARD.decode(text.trim())?;
  if bytes.len() % 2 != 0 {
    return Err(CodecError::OddByteLength { len: bytes.len() });
  }
  Ok(
    bytes
      .chunks_exact(2)
      .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
      .collect(),
  )
}

impl VoxelGrid {
  /// Pack every cell.
  pub fn to_packed(&self) -> Vec<u16> {
    self.assert_invariants();
    self
      .weight
      .iter()
      .zip(&self.material)
      .zip(&self.light)
      .map(|((&w, &m), &l)| PackedCell::encode(w, m, l).0)
      .collect()
  }

  /// Rebuild a grid from packed cells.
  pub fn from_packed(cells: &[u16]) -> Result<Self> {
    if cells.len() != GRID_SIZE_CB {
      return Err(CodecError::CellCount {
        expected: GRID_SIZE_CB,
        actual: cells.len(),
      });
    }

    let mut grid = VoxelGrid::new();
    for (i, &cell) in cells.iter().enumerate() {
      let (w, m, l) = PackedCell(cell).decode();
      grid.weight[i] = w;
      grid.material[i] = m;
      grid.light[i] = l;
    }
    Ok(grid)
  }

  pub fn to_base64(&self) -> String {
    serialize(&self.to_packed())
  }

  pub fn from_base64(text: &str) -> Result<Self> {
    Self::from_packed(&deserialize(text)?)
  }
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;
