//! Precomputed edge crossing table for Surface Nets.
//!
//! Maps 8-bit corner masks to 12-bit edge masks indicating which edges
//! have surface crossings.
//!
//! # Cube Topology
//!
//! ```text
//!       6──────7         Corners (binary ZYX):
//!      /│     /│           0=(0,0,0)  1=(1,0,0)  2=(0,1,0)  3=(1,1,0)
//!     4─┼────5 │           4=(0,0,1)  5=(1,0,1)  6=(0,1,1)  7=(1,1,1)
//!     │ 2────┼─3
//!     │/     │/          +Y
//!     0──────1            │  +Z
//!                         │ /
//!                         └───+X
//! ```
//!
//! # Edge Layout
//!
//! Edges are enumerated by walking corners in order and pairing each corner
//! with its +X, +Y and +Z neighbour. Edges 0, 1 and 2 are therefore the X, Y
//! and Z edges leaving corner 0, which is what the triangulation step keys on.
//!
//! ```text
//! Edge  Axis  Corners
//! ────  ────  ───────
//!   0    X    [0, 1]
//!   1    Y    [0, 2]
//!   2    Z    [0, 4]
//!   3    Y    [1, 3]
//!   4    Z    [1, 5]
//!   5    X    [2, 3]
//!   6    Z    [2, 6]
//!   7    Z    [3, 7]
//!   8    X    [4, 5]
//!   9    Y    [4, 6]
//!  10    Y    [5, 7]
//!  11    X    [6, 7]
//! ```
//!
//! # Edge Table Usage
//!
//! ```text
//! Corner mask: 0b00000001 (only corner 0 is empty)
//! Edge mask:   0b00000111 (edges 0, 1, 2 have crossings)
//! ```

/// Edge endpoint corner indices (the 24-entry pair table).
pub const EDGE_CORNERS: [[u8; 2]; 12] = generate_edge_corners();

/// Precomputed edge table.
/// Index: 8-bit corner mask
/// Value: 12-bit edge mask (which edges have crossings)
///
/// An edge has a crossing if its two endpoint corners have different bits.
pub const EDGE_TABLE: [u16; 256] = generate_edge_table();

const fn generate_edge_corners() -> [[u8; 2]; 12] {
  let mut edges = [[0u8; 2]; 12];
  let mut k = 0;
  let mut corner = 0u8;

  while corner < 8 {
    let mut axis_bit = 1u8;
    while axis_bit <= 4 {
      let other = corner ^ axis_bit;
      if corner <= other {
        edges[k] = [corner, other];
        k += 1;
      }
      axis_bit <<= 1;
    }
    corner += 1;
  }

  edges
}

const fn generate_edge_table() -> [u16; 256] {
  let mut table = [0u16; 256];
  let mut corner_mask = 0usize;

  while corner_mask < 256 {
    let mut edge_mask = 0u16;
    let mut edge = 0;

    while edge < 12 {
      let c0 = EDGE_CORNERS[edge][0] as usize;
      let c1 = EDGE_CORNERS[edge][1] as usize;

      if (corner_mask >> c0) & 1 != (corner_mask >> c1) & 1 {
        edge_mask |= 1 << edge;
      }

      edge += 1;
    }

    table[corner_mask] = edge_mask;
    corner_mask += 1;
  }

  table
}

#[cfg(test)]
#[path = "edge_table_test.rs"]
mod edge_table_test;
