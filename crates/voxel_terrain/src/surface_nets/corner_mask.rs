//! Corner classification for one 2x2x2 cell.
//!
//! The corner mask is an 8-bit value where each bit indicates whether a corner
//! of the cell is empty (weight < 0) for the current render pass.

use crate::constants::CORNER_OFFSETS;
use crate::grid::VoxelGrid;
use crate::types::MaterialRange;

/// Filtered corner weights plus the derived mask.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerSamples {
  pub weights: [f32; 8],
  /// Bit `i` set when corner `i` is empty.
  pub mask: u8,
  /// Corner with the largest filtered weight (first one wins ties).
  pub dominant: usize,
}

impl CornerSamples {
  /// No surface passes through the cell.
  #[inline(always)]
  pub fn is_homogeneous(&self) -> bool {
    self.mask == 0 || self.mask == 0xff
  }
}

/// Read the 8 corners of the cell whose corner 0 is `base_idx`.
///
/// Solid corners whose material lies outside `range` read as
/// `filtered_weight` (a small negative value) for this pass only.
#[inline]
pub fn sample(
  grid: &VoxelGrid,
  base_idx: usize,
  range: MaterialRange,
  filtered_weight: f32,
) -> CornerSamples {
  let mut weights = [0.0f32; 8];
  let mut dominant = 0usize;
  let mut max_weight = f32::NEG_INFINITY;

  for (corner, offset) in CORNER_OFFSETS.iter().enumerate() {
    let idx = base_idx + offset;
    let mut w = grid.weight[idx];
    if w >= 0.0 && !range.contains(grid.material[idx]) {
      w = filtered_weight;
    }

    weights[corner] = w;
    if w > max_weight {
      max_weight = w;
      dominant = corner;
    }
  }

  CornerSamples {
    weights,
    mask: build(&weights),
    dominant,
  }
}

/// Build a mask directly from 8 weights (bit set where negative).
#[inline]
pub fn build(weights: &[f32; 8]) -> u8 {
  weights
    .iter()
    .enumerate()
    .fold(0u8, |mask, (i, &w)| if w < 0.0 { mask | (1 << i) } else { mask })
}

#[cfg(test)]
#[path = "corner_mask_test.rs"]
mod corner_mask_test;
