//! Naive Surface Nets over the chunk lattice.
//!
//! Surface Nets is a dual contouring method that generates ONE vertex per cell
//! containing a surface crossing, placing it at the centroid of all edge
//! crossings. Quads are emitted across every active edge leaving corner 0 of
//! a cell, connecting the vertices of the four cells that share that edge.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  grid.weight:   [f32; 32768]  < 0 empty, >= 0 solid             │
//! │  grid.material: [u8; 32768]   filtered by the pass range        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 1: Corner Classification               │
//! │  For each 2×2×2 cell:                                           │
//! │    Load 8 weights, out-of-range materials read as empty         │
//! │    Build 8-bit corner mask (bit set = empty)                    │
//! │    Early-out if homogeneous (mask == 0 or mask == 255)          │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 2: Vertex Placement                    │
//! │    Lookup edge mask from table[corner_mask]                     │
//! │    Centroid of interpolated edge crossings                      │
//! │    Record dominant corner for material and light lookup         │
//! │    Store vertex index in the slab buffer                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PHASE 3: Triangulation                       │
//! │  For each of the X, Y and Z edges leaving corner 0:             │
//! │    Lookup the 3 neighbouring vertices behind the cell           │
//! │    Emit 2 triangles, winding chosen by corner 0's side          │
//! │    Accumulate face normals into all 3 vertices                  │
//! │    Drop faces owned by a boundary cell (seam dedup)             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Seams
//!
//! Lattice sample 30 of one chunk is sample 0 of its +axis neighbour, so the
//! quad straddling that plane would be produced by both. Cells with any
//! coordinate equal to 0 still contribute normals but never emit faces. The
//! duplicate is dropped on the neighbour's side.

mod corner_mask;
mod normals;
mod vertex_calc;

use glam::Vec3A;

use crate::config::MeshConfig;
use crate::constants::*;
use crate::edge_table::EDGE_TABLE;
use crate::grid::VoxelGrid;
use crate::types::MaterialRange;

/// Geometry produced for one material range.
///
/// Positions are in lattice units relative to the chunk's sample 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceMesh {
  pub vertices: Vec<[f32; 3]>,
  /// Lattice index of each vertex's dominant corner.
  pub cells: Vec<usize>,
  pub faces: Vec<[u32; 3]>,
  /// Flat normal per emitted face.
  pub face_normals: Vec<[f32; 3]>,
  /// Un-normalized sum of adjacent face normals per vertex.
  pub normal_sums: Vec<[f32; 3]>,
  /// Outward weight gradient of each vertex's cell.
  pub gradients: Vec<[f32; 3]>,
}

impl SurfaceMesh {
  pub fn is_empty(&self) -> bool {
    self.faces.is_empty()
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  pub fn face_count(&self) -> usize {
    self.faces.len()
  }

  /// Unit vertex normals, pointing from solid toward empty space.
  pub fn vertex_normals(&self) -> Vec<[f32; 3]> {
    normals::finalize(&self.normal_sums, &self.gradients)
  }
}

/// Vertex indices for the current and previous Z slice.
///
/// Quads only ever reach one cell back along each axis, so two slices of
/// `GRID_SIZE²` slots are enough. Slices alternate by Z parity.
struct SlabBuffer {
  data: Vec<i32>,
}

impl SlabBuffer {
  fn new() -> Self {
    Self {
      data: vec![-1; GRID_SIZE_SQ * 2],
    }
  }

  #[inline(always)]
  fn slot(x: usize, y: usize, z: usize) -> usize {
    (z & 1) * GRID_SIZE_SQ + y * GRID_SIZE + x
  }

  /// Forget the slice that `z` is about to overwrite.
  fn begin_slice(&mut self, z: usize) {
    let start = (z & 1) * GRID_SIZE_SQ;
    self.data[start..start + GRID_SIZE_SQ].fill(-1);
  }

  #[inline(always)]
  fn get(&self, pos: [usize; 3]) -> i32 {
    self.data[Self::slot(pos[0], pos[1], pos[2])]
  }

  #[inline(always)]
  fn set(&mut self, pos: [usize; 3], value: i32) {
    self.data[Self::slot(pos[0], pos[1], pos[2])] = value;
  }
}

/// Extract the isosurface of cells whose material lies in `range`.
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "surface_nets::generate"))]
pub fn generate(grid: &VoxelGrid, range: MaterialRange, config: &MeshConfig) -> SurfaceMesh {
  grid.assert_invariants();

  let mut mesh = SurfaceMesh::default();
  let mut slab = SlabBuffer::new();

  for z in 0..(GRID_SIZE - 1) {
    slab.begin_slice(z);
    for y in 0..(GRID_SIZE - 1) {
      for x in 0..(GRID_SIZE - 1) {
        process_cell(grid, range, config, [x, y, z], &mut slab, &mut mesh);
      }
    }
  }

  tracing::debug!(
    low = range.low,
    high = range.high,
    vertices = mesh.vertices.len(),
    faces = mesh.faces.len(),
    "surface nets"
  );

  mesh
}

fn process_cell(
  grid: &VoxelGrid,
  range: MaterialRange,
  config: &MeshConfig,
  pos: [usize; 3],
  slab: &mut SlabBuffer,
  mesh: &mut SurfaceMesh,
) {
  let [x, y, z] = pos;
  let base_idx = coord_to_index(x, y, z);

  let samples = corner_mask::sample(grid, base_idx, range, config.filtered_weight);
  if samples.is_homogeneous() {
    return;
  }

  let edge_mask = EDGE_TABLE[samples.mask as usize];
  let Some(offset) =
    vertex_calc::compute_position(&samples.weights, edge_mask, config.interpolation_epsilon)
  else {
    return;
  };

  let position = Vec3A::new(x as f32, y as f32, z as f32) + offset;
  let vertex_index = mesh.vertices.len() as i32;
  slab.set(pos, vertex_index);

  mesh.vertices.push(position.to_array());
  mesh.cells.push(base_idx + CORNER_OFFSETS[samples.dominant]);
  mesh.normal_sums.push([0.0; 3]);
  mesh.gradients.push(normals::cell_gradient(&samples.weights));

  let emit = x != 0 && y != 0 && z != 0;
  emit_quads(pos, edge_mask, samples.mask, emit, slab, mesh);
}

/// Emit the quads crossing the X, Y and Z edges that leave corner 0.
fn emit_quads(
  pos: [usize; 3],
  edge_mask: u16,
  corner_mask: u8,
  emit: bool,
  slab: &SlabBuffer,
  mesh: &mut SurfaceMesh,
) {
  // Corner 0 empty means the solid side is toward +axis
  let corner0_empty = corner_mask & 1 != 0;

  for axis in 0..3 {
    if edge_mask & (1 << axis) == 0 {
      continue;
    }

    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;
    if pos[u] == 0 || pos[v] == 0 {
      continue;
    }

    let mut pos_u = pos;
    pos_u[u] -= 1;
    let mut pos_v = pos;
    pos_v[v] -= 1;
    let mut pos_uv = pos_u;
    pos_uv[v] -= 1;

    let m = slab.get(pos);
    let du = slab.get(pos_u);
    let dv = slab.get(pos_v);
    let duv = slab.get(pos_uv);
    if m < 0 || du < 0 || dv < 0 || duv < 0 {
      continue;
    }

    let (m, du, dv, duv) = (m as u32, du as u32, dv as u32, duv as u32);
    let quad = if corner0_empty {
      [[du, m, duv], [dv, duv, m]]
    } else {
      [[dv, m, duv], [du, duv, m]]
    };

    for face in quad {
      let [a, b, c] = face.map(|i| Vec3A::from_array(mesh.vertices[i as usize]));
      let normal = normals::face_normal(a, b, c);
      normals::accumulate(&mut mesh.normal_sums, face, normal);

      if emit {
        mesh.faces.push(face);
        mesh.face_normals.push(normal.to_array());
      }
    }
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
