//! Core data types shared by the editor, light propagator and mesher.

/// Opaque material identifier (7 bits survive serialization).
pub type MaterialId = u8;

/// Inclusive range of material ids rendered by one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaterialRange {
  pub low: MaterialId,
  pub high: MaterialId,
}

impl MaterialRange {
  pub const fn new(low: MaterialId, high: MaterialId) -> Self {
    Self { low, high }
  }

  /// Every material id.
  pub const fn all() -> Self {
    Self::new(0, MaterialId::MAX)
  }

  #[inline(always)]
  pub fn contains(&self, material: MaterialId) -> bool {
    material >= self.low && material <= self.high
  }
}

/// Render pass, each meshing its own slice of the material palette from the
/// same shared grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderPass {
  /// Opaque terrain.
  Solid,
  /// Water-like materials.
  Liquid,
  /// Glass-like materials.
  Transparent,
}

impl RenderPass {
  pub const ALL: [RenderPass; 3] = [RenderPass::Solid, RenderPass::Liquid, RenderPass::Transparent];

  pub const fn material_range(self) -> MaterialRange {
    match self {
      RenderPass::Solid => MaterialRange::new(0, 46),
      RenderPass::Liquid => MaterialRange::new(47, 47),
      RenderPass::Transparent => MaterialRange::new(48, 49),
    }
  }
}

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Create AABB from min/max corners.
  pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
    Self { min, max }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Renderable triangle list for one render pass.
///
/// All per-vertex arrays are parallel and indexed by `indices`. Vertices are
/// duplicated per triangle corner so each one can carry its own barycentric
/// tag alongside the triangle's three materials. Positions are in lattice
/// units relative to the chunk origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderMesh {
  /// Triangle indices (3 indices per triangle).
  pub indices: Vec<u32>,
  pub positions: Vec<[f32; 3]>,
  /// Unit normals pointing from solid toward empty space.
  pub normals: Vec<[f32; 3]>,
  /// Materials of the triangle's three corners, identical on all three.
  pub materials: Vec<[MaterialId; 3]>,
  /// One-hot tag selecting which corner this vertex is.
  pub barycentric: Vec<[f32; 3]>,
  /// Light after the response curve, in `[0, 1]`.
  pub light: Vec<f32>,
  /// Bounding box encompassing all vertices.
  pub bounds: MinMaxAABB,
}

impl RenderMesh {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.indices.clear();
    self.positions.clear();
    self.normals.clear();
    self.materials.clear();
    self.barycentric.clear();
    self.light.clear();
    self.bounds = MinMaxAABB::empty();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  pub fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
