//! Geometry normals from triangle faces.
//!
//! Each triangle's flat normal is added to all three of its vertices. Faces
//! that are suppressed at the chunk boundary still contribute, so vertices on
//! a shared seam get the same smooth normal in both chunks.
//!
//! Where a lattice sample has weight exactly zero, the crossings of the
//! surrounding cells collapse onto it and their faces have no area. Those
//! vertices fall back to the weight gradient of their own cell.

use glam::Vec3A;

/// Unit normal of triangle `(a, b, c)`, counter-clockwise front face.
///
/// Degenerate triangles return zero.
#[inline]
pub fn face_normal(a: Vec3A, b: Vec3A, c: Vec3A) -> Vec3A {
  let n = (b - a).cross(c - a);
  let len_sq = n.length_squared();

  if len_sq < 1e-12 {
    return Vec3A::ZERO;
  }

  n * len_sq.sqrt().recip()
}

#[inline(always)]
pub fn accumulate(sums: &mut [[f32; 3]], face: [u32; 3], normal: Vec3A) {
  for v in face {
    let sum = &mut sums[v as usize];
    sum[0] += normal.x;
    sum[1] += normal.y;
    sum[2] += normal.z;
  }
}

/// Outward unit normal from the 8 corner weights of a cell.
///
/// Weights are positive inside, so the outward direction is the negated
/// gradient. Corner layout matches `CORNER_OFFSETS`:
/// ```text
/// 0: (0,0,0)  4: (0,0,1)
/// 1: (1,0,0)  5: (1,0,1)
/// 2: (0,1,0)  6: (0,1,1)
/// 3: (1,1,0)  7: (1,1,1)
/// ```
#[inline]
pub fn cell_gradient(w: &[f32; 8]) -> [f32; 3] {
  let gx = (w[1] + w[3] + w[5] + w[7]) - (w[0] + w[2] + w[4] + w[6]);
  let gy = (w[2] + w[3] + w[6] + w[7]) - (w[0] + w[1] + w[4] + w[5]);
  let gz = (w[4] + w[5] + w[6] + w[7]) - (w[0] + w[1] + w[2] + w[3]);

  let outward = -Vec3A::new(gx, gy, gz);
  let len_sq = outward.length_squared();

  if len_sq < 1e-8 {
    return [0.0, 1.0, 0.0];
  }

  (outward * len_sq.sqrt().recip()).to_array()
}

/// Normalize accumulated sums, using `fallback` for vertices whose adjacent
/// faces cancel out or have no area.
pub fn finalize(sums: &[[f32; 3]], fallback: &[[f32; 3]]) -> Vec<[f32; 3]> {
  sums
    .iter()
    .zip(fallback)
    .map(|(s, f)| {
      let sum = Vec3A::from_array(*s);
      let len_sq = sum.length_squared();
      if len_sq < 1e-8 {
        *f
      } else {
        (sum * len_sq.sqrt().recip()).to_array()
      }
    })
    .collect()
}

#[cfg(test)]
#[path = "normals_test.rs"]
mod normals_test;
