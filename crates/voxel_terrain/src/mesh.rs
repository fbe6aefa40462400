//! Mesh entry points: one render pass or all three.
//!
//! ```text
//!   grid ──► surface_nets::generate(range) ──► face_builder ──► RenderMesh
//!            (solid 0..=46, liquid 47, transparent 48..=49)
//! ```

use crate::config::MeshConfig;
use crate::face_builder::build_render_mesh;
use crate::grid::VoxelGrid;
use crate::surface_nets;
use crate::types::{MaterialId, MaterialRange, RenderMesh, RenderPass};

/// Mesh the cells whose material lies in `low..=high` with default settings.
pub fn generate_mesh(grid: &VoxelGrid, low: MaterialId, high: MaterialId) -> RenderMesh {
  generate_mesh_with_config(grid, MaterialRange::new(low, high), &MeshConfig::default())
}

pub fn generate_mesh_with_config(
  grid: &VoxelGrid,
  range: MaterialRange,
  config: &MeshConfig,
) -> RenderMesh {
  let surface = surface_nets::generate(grid, range, config);
  build_render_mesh(grid, &surface, config)
}

/// Meshes for every render pass of one grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMeshes {
  pub solid: RenderMesh,
  pub liquid: RenderMesh,
  pub transparent: RenderMesh,
}

impl ChunkMeshes {
  pub fn get(&self, pass: RenderPass) -> &RenderMesh {
    match pass {
      RenderPass::Solid => &self.solid,
      RenderPass::Liquid => &self.liquid,
      RenderPass::Transparent => &self.transparent,
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (RenderPass, &RenderMesh)> {
    RenderPass::ALL.into_iter().map(move |pass| (pass, self.get(pass)))
  }

  pub fn is_empty(&self) -> bool {
    self.iter().all(|(_, mesh)| mesh.is_empty())
  }

  pub fn vertex_count(&self) -> usize {
    self.iter().map(|(_, mesh)| mesh.vertex_count()).sum()
  }

  pub fn triangle_count(&self) -> usize {
    self.iter().map(|(_, mesh)| mesh.triangle_count()).sum()
  }
}

/// Mesh all three render passes from the same grid.
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "mesh::generate_passes"))]
pub fn generate_passes(grid: &VoxelGrid, config: &MeshConfig) -> ChunkMeshes {
  let pass = |pass: RenderPass| generate_mesh_with_config(grid, pass.material_range(), config);

  ChunkMeshes {
    solid: pass(RenderPass::Solid),
    liquid: pass(RenderPass::Liquid),
    transparent: pass(RenderPass::Transparent),
  }
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
