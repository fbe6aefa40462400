//! Voxel grid: three parallel per-cell arrays over the chunk lattice.
//!
//! ```text
//!   weight:   f32  [-0.5, 0.5]   < 0 empty, >= 0 solid
//!   material: u8   opaque id     meaningful only where solid
//!   light:    f32  [0, 1]        0 = unlit, 1 = fully lit
//! ```
//!
//! All three arrays share the index mapping of
//! [`coord_to_index`](crate::constants::coord_to_index).

use crate::constants::*;
use crate::types::MaterialId;

#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
  pub weight: Vec<f32>,
  pub material: Vec<MaterialId>,
  pub light: Vec<f32>,
}

impl Default for VoxelGrid {
  fn default() -> Self {
    Self::new()
  }
}

impl VoxelGrid {
  /// Fully empty, unlit grid.
  pub fn new() -> Self {
    Self {
      weight: vec![EMPTY_WEIGHT; GRID_SIZE_CB],
      material: vec![0; GRID_SIZE_CB],
      light: vec![0.0; GRID_SIZE_CB],
    }
  }

  /// Build a grid from existing arrays.
  ///
  /// # Panics
  ///
  /// If any array is not `GRID_SIZE_CB` long.
  pub fn from_parts(weight: Vec<f32>, material: Vec<MaterialId>, light: Vec<f32>) -> Self {
    let grid = Self {
      weight,
      material,
      light,
    };
    grid.assert_invariants();
    grid
  }

  #[inline]
  pub fn assert_invariants(&self) {
    assert_eq!(self.weight.len(), GRID_SIZE_CB, "weight array length");
    assert_eq!(self.material.len(), GRID_SIZE_CB, "material array length");
    assert_eq!(self.light.len(), GRID_SIZE_CB, "light array length");
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.weight.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.weight.is_empty()
  }

  /// Linear index of signed lattice coordinates, `None` when outside.
  #[inline(always)]
  pub fn index(x: i32, y: i32, z: i32) -> Option<usize> {
    if in_bounds(x, y, z) {
      Some(coord_to_index(x as usize, y as usize, z as usize))
    } else {
      None
    }
  }

  #[inline(always)]
  pub fn is_solid(&self, idx: usize) -> bool {
    self.weight[idx] >= 0.0
  }

  /// True when no cell has been written since construction.
  pub fn is_untouched(&self) -> bool {
    self.weight.iter().all(|&w| w == EMPTY_WEIGHT)
  }

  /// Set a cell's weight and material.
  #[inline]
  pub fn set(&mut self, x: usize, y: usize, z: usize, weight: f32, material: MaterialId) {
    let idx = coord_to_index(x, y, z);
    self.weight[idx] = weight.clamp(WEIGHT_MIN, WEIGHT_MAX);
    self.material[idx] = material;
  }

  /// Fill every cell from a function of lattice coordinates.
  ///
  /// Returned weights are clamped to the representable range.
  pub fn fill_with<F>(&mut self, mut f: F)
  where
    F: FnMut(usize, usize, usize) -> (f32, MaterialId),
  {
    for z in 0..GRID_SIZE {
      for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
          let (weight, material) = f(x, y, z);
          self.set(x, y, z, weight, material);
        }
      }
    }
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
