//! A terrain chunk: committed grid, interactive preview, and cached meshes.
//!
//! # Edit flow
//!
//! ```text
//!   world-space edit ──► local_request ──► preview(request)   (scratch copy)
//!                                      └─► place(request)     (committed)
//!                                                │
//!                                         dirty flag set
//!                                                │
//!                                  remesh: relight + generate_passes
//! ```
//!
//! Each chunk owns its grids exclusively. Chunks are independent of one
//! another, so a batch can be remeshed in parallel.

use std::fmt;
use std::str::FromStr;

use glam::{Quat, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::config::{LightConfig, MeshConfig};
use crate::constants::{TERRAIN_SCALE, TERRAIN_SIZE};
use crate::editor::{stamp, EditRequest};
use crate::error::{CodecError, Result};
use crate::grid::VoxelGrid;
use crate::light::{relight, LightSource};
use crate::mesh::{generate_passes, ChunkMeshes};
use crate::metrics::elapsed_us;
use crate::sdf::ShapeConfig;
use crate::types::MinMaxAABB;

/// Integer position of a chunk in the chunk lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
  pub x: i32,
  pub y: i32,
  pub z: i32,
}

impl ChunkCoord {
  #[inline]
  pub const fn new(x: i32, y: i32, z: i32) -> Self {
    Self { x, y, z }
  }

  /// Chunk containing a world-space point.
  pub fn from_world(point: Vec3) -> Self {
    let c = (point / TERRAIN_SIZE).floor();
    Self::new(c.x as i32, c.y as i32, c.z as i32)
  }

  /// Storage key, `"x:y:z"`.
  pub fn key(&self) -> String {
    self.to_string()
  }

  /// World-space position of lattice sample 0.
  pub fn origin(&self) -> Vec3 {
    Vec3::new(self.x as f32, self.y as f32, self.z as f32) * TERRAIN_SIZE
  }

  /// World-space point to this chunk's lattice units.
  #[inline]
  pub fn world_to_local(&self, point: Vec3) -> Vec3 {
    (point - self.origin()) / TERRAIN_SCALE
  }

  #[inline]
  pub fn local_to_world(&self, point: Vec3) -> Vec3 {
    point * TERRAIN_SCALE + self.origin()
  }

  #[inline]
  pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
    Self::new(self.x + dx, self.y + dy, self.z + dz)
  }
}

impl fmt::Display for ChunkCoord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}:{}", self.x, self.y, self.z)
  }
}

impl FromStr for ChunkCoord {
  type Err = CodecError;

  fn from_str(key: &str) -> Result<Self> {
    let malformed = || CodecError::ChunkKey(key.to_string());

    let mut parts = key.split(':').map(|p| p.trim().parse::<i32>());
    let (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) =
      (parts.next(), parts.next(), parts.next(), parts.next())
    else {
      return Err(malformed());
    };

    Ok(Self::new(x, y, z))
  }
}

/// Persistence / network record for one chunk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkData {
  pub id: String,
  pub x: i32,
  pub y: i32,
  pub z: i32,
  /// Base64 packed grid.
  pub grid: String,
}

/// What one `remesh` call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RemeshReport {
  pub light_us: u64,
  pub mesh_us: u64,
  pub vertices: usize,
  pub triangles: usize,
  /// The preview grid was remeshed.
  pub preview: bool,
}

#[derive(Clone, Debug)]
struct Preview {
  grid: VoxelGrid,
  meshes: ChunkMeshes,
  dirty: bool,
}

#[derive(Clone, Debug)]
pub struct Chunk {
  key: String,
  coord: ChunkCoord,
  grid: VoxelGrid,
  meshes: ChunkMeshes,
  emissive: Vec<LightSource>,
  dirty: bool,
  preview: Option<Preview>,
}

impl Chunk {
  /// Empty chunk at `coord`.
  pub fn new(coord: ChunkCoord) -> Self {
    Self::with_grid(coord.key(), coord, VoxelGrid::new())
  }

  pub fn with_grid(key: String, coord: ChunkCoord, grid: VoxelGrid) -> Self {
    grid.assert_invariants();
    Self {
      key,
      coord,
      grid,
      meshes: ChunkMeshes::default(),
      emissive: Vec::new(),
      dirty: true,
      preview: None,
    }
  }

  /// Decode a transport record. The chunk starts dirty.
  pub fn from_data(data: &ChunkData) -> Result<Self> {
    let grid = VoxelGrid::from_base64(&data.grid)?;
    let coord = ChunkCoord::new(data.x, data.y, data.z);
    Ok(Self::with_grid(data.id.clone(), coord, grid))
  }

  pub fn to_data(&self) -> ChunkData {
    ChunkData {
      id: self.key.clone(),
      x: self.coord.x,
      y: self.coord.y,
      z: self.coord.z,
      grid: self.grid.to_base64(),
    }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  pub fn coord(&self) -> ChunkCoord {
    self.coord
  }

  pub fn grid(&self) -> &VoxelGrid {
    &self.grid
  }

  pub fn meshes(&self) -> &ChunkMeshes {
    &self.meshes
  }

  /// Meshes of the pending preview, if one differs from the committed grid.
  pub fn preview_meshes(&self) -> Option<&ChunkMeshes> {
    self.preview.as_ref().map(|p| &p.meshes)
  }

  pub fn preview_grid(&self) -> Option<&VoxelGrid> {
    self.preview.as_ref().map(|p| &p.grid)
  }

  pub fn is_dirty(&self) -> bool {
    self.dirty || self.preview.as_ref().is_some_and(|p| p.dirty)
  }

  /// Replace the emissive light sources used on the next relight.
  pub fn set_emissive(&mut self, sources: Vec<LightSource>) {
    self.emissive = sources;
    self.dirty = true;
  }

  /// Express a world-space edit in this chunk's lattice.
  ///
  /// Bounds are floored on the min side and ceiled plus one cell on the max
  /// side so that the falloff band at the far edge is covered.
  pub fn local_request(
    &self,
    world_center: Vec3,
    rotation: Quat,
    world_bounds: &MinMaxAABB,
    shape: ShapeConfig,
  ) -> EditRequest {
    let min = self.coord.world_to_local(Vec3::from_array(world_bounds.min)).floor();
    let max = self.coord.world_to_local(Vec3::from_array(world_bounds.max)).ceil() + Vec3::ONE;

    EditRequest::new(self.coord.world_to_local(world_center), shape)
      .with_inverse_rotation(rotation.inverse())
      .with_bounds(MinMaxAABB::new(min.to_array(), max.to_array()))
  }

  /// Stamp `request` into a fresh copy of the committed grid.
  ///
  /// Any earlier preview is discarded first. Returns false and keeps no
  /// preview when the edit would not change anything.
  pub fn preview(&mut self, request: &EditRequest) -> bool {
    let mut preview = self.preview.take().unwrap_or_else(|| Preview {
      grid: VoxelGrid::new(),
      meshes: ChunkMeshes::default(),
      dirty: false,
    });
    preview.grid.clone_from(&self.grid);

    let changed = stamp(&mut preview.grid, request);
    if changed {
      preview.dirty = true;
      self.preview = Some(preview);
    }

    tracing::trace!(chunk = %self.key, changed, "preview");
    changed
  }

  pub fn clear_preview(&mut self) {
    self.preview = None;
  }

  /// Commit an edit to the grid. Always discards the preview.
  pub fn place(&mut self, request: &EditRequest) -> bool {
    self.preview = None;

    let changed = stamp(&mut self.grid, request);
    if changed {
      self.dirty = true;
    }

    tracing::debug!(chunk = %self.key, changed, "place");
    changed
  }

  /// Relight and remesh whatever changed since the last call.
  ///
  /// Returns `None` when nothing was dirty.
  #[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "chunk::remesh", fields(chunk = %self.key)))]
  pub fn remesh(&mut self, light: &LightConfig, mesh: &MeshConfig) -> Option<RemeshReport> {
    if !self.is_dirty() {
      return None;
    }

    let mut report = RemeshReport::default();

    if self.dirty {
      let meshes = relight_and_mesh(&mut self.grid, &self.emissive, light, mesh, &mut report);
      self.meshes = meshes;
      self.dirty = false;
    }

    if let Some(preview) = self.preview.as_mut().filter(|p| p.dirty) {
      let meshes = relight_and_mesh(&mut preview.grid, &self.emissive, light, mesh, &mut report);
      preview.meshes = meshes;
      preview.dirty = false;
      report.preview = true;
    }

    tracing::debug!(
      chunk = %self.key,
      light_us = report.light_us,
      mesh_us = report.mesh_us,
      triangles = report.triangles,
      preview = report.preview,
      "remesh"
    );

    Some(report)
  }
}

fn relight_and_mesh(
  grid: &mut VoxelGrid,
  emissive: &[LightSource],
  light: &LightConfig,
  mesh: &MeshConfig,
  report: &mut RemeshReport,
) -> ChunkMeshes {
  {
    let _span = tracing::info_span!("relight").entered();
    let start = Instant::now();
    relight(grid, emissive, light);
    report.light_us += elapsed_us(start);
  }

  let _span = tracing::info_span!("mesh_generation").entered();
  let start = Instant::now();
  let meshes = generate_passes(grid, mesh);
  report.mesh_us += elapsed_us(start);

  report.vertices += meshes.vertex_count();
  report.triangles += meshes.triangle_count();
  meshes
}

/// Remesh many chunks in parallel using rayon.
///
/// Results maintain the same order as inputs.
pub fn remesh_batch(
  chunks: &mut [Chunk],
  light: &LightConfig,
  mesh: &MeshConfig,
) -> Vec<Option<RemeshReport>> {
  if chunks.is_empty() {
    return Vec::new();
  }

  chunks
    .par_iter_mut()
    .map(|chunk| chunk.remesh(light, mesh))
    .collect()
}

#[cfg(test)]
#[path = "chunk_test.rs"]
mod chunk_test;
