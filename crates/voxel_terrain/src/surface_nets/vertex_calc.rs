//! Vertex position calculation for Surface Nets.
//!
//! The vertex of a cell sits at the centroid of the points where the surface
//! crosses the cell's edges, found by linear interpolation of the corner
//! weights.

use glam::Vec3A;

use crate::edge_table::EDGE_CORNERS;

/// Precomputed corner positions within unit cube.
/// Layout matches corner index bits: corner i = (x=bit0, y=bit1, z=bit2)
pub const CORNER_POSITIONS: [Vec3A; 8] = [
  Vec3A::new(0.0, 0.0, 0.0), // 0b000
  Vec3A::new(1.0, 0.0, 0.0), // 0b001
  Vec3A::new(0.0, 1.0, 0.0), // 0b010
  Vec3A::new(1.0, 1.0, 0.0), // 0b011
  Vec3A::new(0.0, 0.0, 1.0), // 0b100
  Vec3A::new(1.0, 0.0, 1.0), // 0b101
  Vec3A::new(0.0, 1.0, 1.0), // 0b110
  Vec3A::new(1.0, 1.0, 1.0), // 0b111
];

/// Cell-local vertex offset in `[0, 1]³`.
///
/// Only edges set in `edge_mask` are considered. An edge whose endpoint
/// weights differ by less than `epsilon` is skipped, and the centroid is taken
/// over the edges that did contribute. Returns `None` when no edge did.
#[inline]
pub fn compute_position(weights: &[f32; 8], edge_mask: u16, epsilon: f32) -> Option<Vec3A> {
  let mut sum = Vec3A::ZERO;
  let mut count = 0u32;

  for (edge, &[c0, c1]) in EDGE_CORNERS.iter().enumerate() {
    if edge_mask & (1 << edge) == 0 {
      continue;
    }

    let g0 = weights[c0 as usize];
    let g1 = weights[c1 as usize];
    let delta = g0 - g1;
    if delta.abs() < epsilon {
      continue;
    }

    let t = g0 / delta;
    let p0 = CORNER_POSITIONS[c0 as usize];
    let p1 = CORNER_POSITIONS[c1 as usize];
    sum += p0 + t * (p1 - p0);
    count += 1;
  }

  if count == 0 {
    return None;
  }

  Some(sum / count as f32)
}

#[cfg(test)]
#[path = "vertex_calc_test.rs"]
mod vertex_calc_test;
