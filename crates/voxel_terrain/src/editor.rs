//! Stamping SDF shapes into a grid.
//!
//! An edit walks every lattice point inside its (clamped) bounds, moves the
//! point into the shape's local frame, evaluates the distance and combines it
//! with the stored weight:
//!
//! ```text
//!   constructive: replace if (new > old && new > 0) || old == EMPTY_WEIGHT
//!                 and write the shape's material
//!   destructive:  replace if new < old, material untouched
//! ```
//!
//! The constructive rule keeps a weak stroke from eroding a stronger solid
//! region while still letting the first stroke claim untouched space.

use glam::{Quat, Vec3};

use crate::constants::{coord_to_index, EMPTY_WEIGHT, GRID_SIZE, WEIGHT_MAX, WEIGHT_MIN};
use crate::grid::VoxelGrid;
use crate::sdf::{ShapeConfig, ShapeKind};
use crate::types::{MaterialId, MinMaxAABB};

/// A single stamping operation, expressed in one grid's lattice space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditRequest {
  pub center_local: Vec3,
  pub inverse_rotation: Quat,
  pub bounds_local: MinMaxAABB,
  pub shape: ShapeConfig,
}

impl EditRequest {
  /// Unrotated edit with bounds covering the shape under any rotation.
  pub fn new(center_local: Vec3, shape: ShapeConfig) -> Self {
    let reach = shape.half_extents.abs().length();
    Self {
      center_local,
      inverse_rotation: Quat::IDENTITY,
      bounds_local: MinMaxAABB::new(
        (center_local - Vec3::splat(reach)).to_array(),
        (center_local + Vec3::splat(reach)).to_array(),
      ),
      shape,
    }
  }

  pub fn with_inverse_rotation(mut self, inverse_rotation: Quat) -> Self {
    self.inverse_rotation = inverse_rotation;
    self
  }

  pub fn with_bounds(mut self, bounds_local: MinMaxAABB) -> Self {
    self.bounds_local = bounds_local;
    self
  }
}

/// Inclusive per-axis cell range, clamped to the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRange {
  pub min: [usize; 3],
  pub max: [usize; 3],
}

impl CellRange {
  /// Floor the minimum, ceil the maximum, clamp to `[0, GRID_SIZE)`.
  ///
  /// Returns `None` when nothing of the box lies inside the lattice.
  pub fn from_bounds(bounds: &MinMaxAABB) -> Option<Self> {
    let last = GRID_SIZE as i64 - 1;
    let mut min = [0usize; 3];
    let mut max = [0usize; 3];

    for axis in 0..3 {
      let lo = (bounds.min[axis].floor() as i64).max(0);
      let hi = (bounds.max[axis].ceil() as i64).min(last);
      if lo > hi {
        return None;
      }
      min[axis] = lo as usize;
      max[axis] = hi as usize;
    }

    Some(Self { min, max })
  }

  pub fn cell_count(&self) -> usize {
    (0..3).map(|a| self.max[a] - self.min[a] + 1).product()
  }
}

/// Apply an edit. Returns true iff at least one cell changed.
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "editor::stamp"))]
pub fn stamp(grid: &mut VoxelGrid, request: &EditRequest) -> bool {
  grid.assert_invariants();

  let Some(range) = CellRange::from_bounds(&request.bounds_local) else {
    tracing::trace!("edit bounds outside lattice, skipped");
    return false;
  };

  let shape = &request.shape;
  let mut changed = 0usize;

  for z in range.min[2]..=range.max[2] {
    for y in range.min[1]..=range.max[1] {
      for x in range.min[0]..=range.max[0] {
        let cell = Vec3::new(x as f32, y as f32, z as f32);
        let local = request.inverse_rotation * (cell - request.center_local);
        let value = shape.signed_distance(local).clamp(WEIGHT_MIN, WEIGHT_MAX);

        let idx = coord_to_index(x, y, z);
        if apply(grid, idx, value, shape) {
          changed += 1;
        }
      }
    }
  }

  tracing::debug!(
    kind = ?shape.kind,
    constructive = shape.constructive,
    scanned = range.cell_count(),
    changed,
    "stamp"
  );

  changed > 0
}

/// Flat-argument form of [`stamp`] for callers that do not build requests.
#[allow(clippy::too_many_arguments)]
pub fn stamp_shape(
  grid: &mut VoxelGrid,
  kind: ShapeKind,
  half_extents: Vec3,
  center_local: Vec3,
  inverse_rotation: Quat,
  bounds_local: MinMaxAABB,
  constructive: bool,
  material_id: MaterialId,
) -> bool {
  let request = EditRequest {
    center_local,
    inverse_rotation,
    bounds_local,
    shape: ShapeConfig {
      kind,
      half_extents,
      constructive,
      material_id,
    },
  };
  stamp(grid, &request)
}

#[inline]
fn apply(grid: &mut VoxelGrid, idx: usize, value: f32, shape: &ShapeConfig) -> bool {
  let current = grid.weight[idx];

  if shape.constructive {
    if (value > current && value > 0.0) || current == EMPTY_WEIGHT {
      let changed = value != current || grid.material[idx] != shape.material_id;
      grid.weight[idx] = value;
      grid.material[idx] = shape.material_id;
      return changed;
    }
  } else if value < current {
    grid.weight[idx] = value;
    return true;
  }

  false
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;
