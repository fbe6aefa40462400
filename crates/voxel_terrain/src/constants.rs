//! Lattice layout constants for 32³ terrain chunks.
//!
//! A chunk spans 30 cells of world space. The lattice stores two extra
//! samples so that isosurface crossings and edits at the chunk boundary can be
//! resolved without looking into neighbouring chunks.
//!
//! # Lattice Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           LATTICE LAYOUT                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Sample index:  0     1     2    ...    28    29    30    31            │
//! │                 │     │                       │     │     │             │
//! │                 └──────── 30 chunk cells ─────┘     │     │             │
//! │                                                     │     └─ margin     │
//! │                                                     └─ origin of the    │
//! │                                                        next chunk (its  │
//! │                                                        sample 0)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sample 30 of one chunk and sample 0 of its +axis neighbour are the same
//! point in world space. The mesher suppresses faces owned by cell 0 so that
//! the shared quad is emitted exactly once.
//!
//! # Memory Layout
//!
//! ```text
//! index = z * 1024 + y * 32 + x
//! ```
//!
//! X is the minor axis, so a row of 32 samples along X is contiguous.
//!
//! # Coordinate System
//!
//! ```text
//!         +Y
//!          │
//!          │
//!          └───────── +X
//!         /
//!        +Z
//!
//! Cell corner indices (binary: ZYX):
//!   0 = (0,0,0)    4 = (0,0,1)
//!   1 = (1,0,0)    5 = (1,0,1)
//!   2 = (0,1,0)    6 = (0,1,1)
//!   3 = (1,1,0)    7 = (1,1,1)
//! ```

/// Number of samples per axis, including the margin.
pub const GRID_SIZE: usize = 32;

/// Samples in one Z slice (32² = 1024).
pub const GRID_SIZE_SQ: usize = GRID_SIZE * GRID_SIZE;

/// Total samples in a chunk (32³ = 32768).
pub const GRID_SIZE_CB: usize = GRID_SIZE * GRID_SIZE * GRID_SIZE;

/// Cells per axis that belong to the chunk itself (world extent in lattice steps).
pub const CHUNK_CELLS: usize = 30;

/// World units per lattice step.
pub const TERRAIN_SCALE: f32 = 0.5;

/// World units covered by one chunk along each axis.
pub const TERRAIN_SIZE: f32 = TERRAIN_SCALE * CHUNK_CELLS as f32;

/// Lowest representable weight.
pub const WEIGHT_MIN: f32 = -0.5;

/// Highest representable weight.
pub const WEIGHT_MAX: f32 = 0.5;

/// Weight of a cell nothing has ever been written to.
pub const EMPTY_WEIGHT: f32 = WEIGHT_MIN;

/// Intensity lost per flood-fill hop.
pub const LIGHT_DECAY: f32 = 0.04;

/// Response curve applied to sampled light before it reaches the renderer.
pub const LIGHT_EXPONENT: i32 = 4;

/// Convert 3D lattice coordinates to a linear index.
#[inline(always)]
pub const fn coord_to_index(x: usize, y: usize, z: usize) -> usize {
  z * GRID_SIZE_SQ + y * GRID_SIZE + x
}

/// Convert a linear index back to lattice coordinates.
#[inline(always)]
pub const fn index_to_coord(idx: usize) -> (usize, usize, usize) {
  let z = idx / GRID_SIZE_SQ;
  let y = (idx / GRID_SIZE) % GRID_SIZE;
  let x = idx % GRID_SIZE;
  (x, y, z)
}

/// Signed coordinates are inside the lattice.
#[inline(always)]
pub const fn in_bounds(x: i32, y: i32, z: i32) -> bool {
  let s = GRID_SIZE as i32;
  x >= 0 && x < s && y >= 0 && y < s && z >= 0 && z < s
}

/// Lattice index offsets for the 8 corners of a cell relative to corner 0.
pub const CORNER_OFFSETS: [usize; 8] = [
  0,                                // (0,0,0)
  1,                                // (1,0,0)
  GRID_SIZE,                        // (0,1,0)
  GRID_SIZE + 1,                    // (1,1,0)
  GRID_SIZE_SQ,                     // (0,0,1)
  GRID_SIZE_SQ + 1,                 // (1,0,1)
  GRID_SIZE_SQ + GRID_SIZE,         // (0,1,1)
  GRID_SIZE_SQ + GRID_SIZE + 1,     // (1,1,1)
];

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
