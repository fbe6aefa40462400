//! Multi-material face builder.
//!
//! Turns the shared-vertex surface into a flat triangle list where every
//! triangle corner is its own vertex:
//!
//! ```text
//!   surface face (v0, v1, v2), dominant cells (m0, m1, m2)
//!        │
//!        ▼
//!   vertex 3k+0: pos v0, bary (1,0,0), materials (M[m0], M[m1], M[m2])
//!   vertex 3k+1: pos v1, bary (0,1,0), materials (M[m0], M[m1], M[m2])
//!   vertex 3k+2: pos v2, bary (0,0,1), materials (M[m0], M[m1], M[m2])
//! ```
//!
//! A fragment stage blends the three materials with the interpolated
//! barycentric weights.

use glam::Vec3A;

use crate::config::{LightSampling, MeshConfig};
use crate::constants::{coord_to_index, GRID_SIZE};
use crate::grid::VoxelGrid;
use crate::surface_nets::SurfaceMesh;
use crate::types::RenderMesh;

const BARYCENTRIC: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Expand `surface` into a renderable mesh, sampling materials and light
/// from `grid`.
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "face_builder::build"))]
pub fn build_render_mesh(grid: &VoxelGrid, surface: &SurfaceMesh, config: &MeshConfig) -> RenderMesh {
  grid.assert_invariants();

  let normals = surface.vertex_normals();
  let light: Vec<f32> = (0..surface.vertex_count())
    .map(|v| sample_light(grid, surface, v, config))
    .collect();

  let vertex_count = surface.face_count() * 3;
  let mut mesh = RenderMesh {
    indices: Vec::with_capacity(vertex_count),
    positions: Vec::with_capacity(vertex_count),
    normals: Vec::with_capacity(vertex_count),
    materials: Vec::with_capacity(vertex_count),
    barycentric: Vec::with_capacity(vertex_count),
    light: Vec::with_capacity(vertex_count),
    ..RenderMesh::default()
  };

  for face in &surface.faces {
    let materials = face.map(|v| grid.material[surface.cells[v as usize]]);

    for (corner, &v) in face.iter().enumerate() {
      let v = v as usize;
      let position = surface.vertices[v];

      mesh.indices.push(mesh.positions.len() as u32);
      mesh.positions.push(position);
      mesh.normals.push(normals[v]);
      mesh.materials.push(materials);
      mesh.barycentric.push(BARYCENTRIC[corner]);
      mesh.light.push(light[v]);
      mesh.bounds.encapsulate(position);
    }
  }

  tracing::debug!(
    vertices = mesh.vertex_count(),
    triangles = mesh.triangle_count(),
    "render mesh"
  );

  mesh
}

fn sample_light(grid: &VoxelGrid, surface: &SurfaceMesh, vertex: usize, config: &MeshConfig) -> f32 {
  let idx = match config.light_sampling {
    LightSampling::DominantCell => surface.cells[vertex],
    LightSampling::NearestPoint => {
      let max = (GRID_SIZE - 1) as f32;
      // Ties round up. A flat surface between saturated cells sits exactly on
      // k + 0.5 and must sample the empty side.
      let p = (Vec3A::from_array(surface.vertices[vertex]) + Vec3A::splat(0.5))
        .floor()
        .clamp(Vec3A::ZERO, Vec3A::splat(max));
      coord_to_index(p.x as usize, p.y as usize, p.z as usize)
    }
  };

  grid.light[idx].powi(config.light_exponent)
}

#[cfg(test)]
#[path = "face_builder_test.rs"]
mod face_builder_test;
