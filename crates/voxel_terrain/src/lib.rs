//! voxel_terrain - Engine independent sculptable voxel terrain
//!
//! Each chunk is a 32³ lattice of cells holding a signed weight, a material id
//! and a light value. Edits stamp SDF primitives into the lattice, a flood
//! fill spreads sky and emissive light, and Surface Nets turns the weight
//! field into one triangle mesh per render pass.
//!
//! # Features
//!
//! - **Packed grid codec**: 16 bits per cell, base64 text for transport
//! - **SDF stamping**: sphere, box and cylinder, constructive or destructive
//! - **Light flood fill**: sky columns plus emissive sources, per-hop decay
//! - **Naive Surface Nets**: seam-aware isosurface extraction over material
//!   ranges
//! - **Multi-material faces**: per-corner material triples with barycentric
//!   tags for shader-side blending
//!
//! # Example
//!
//! ```ignore
//! use glam::Vec3;
//! use voxel_terrain::{generate_mesh, stamp, EditRequest, ShapeConfig, VoxelGrid};
//!
//! let mut grid = VoxelGrid::new();
//! let sphere = ShapeConfig::sphere(4.0).with_material(7);
//! stamp(&mut grid, &EditRequest::new(Vec3::splat(16.0), sphere));
//!
//! let mesh = generate_mesh(&grid, 0, 46);
//! println!("{} triangles", mesh.triangle_count());
//! ```

pub mod constants;
pub mod edge_table;
pub mod types;

// Re-export commonly used items
pub use constants::{
  coord_to_index, index_to_coord, CORNER_OFFSETS, GRID_SIZE, GRID_SIZE_CB, GRID_SIZE_SQ,
  TERRAIN_SCALE, TERRAIN_SIZE,
};
pub use edge_table::{EDGE_CORNERS, EDGE_TABLE};
pub use types::{MaterialId, MaterialRange, MinMaxAABB, RenderMesh, RenderPass};

pub mod config;
pub use config::{LightConfig, LightSampling, MeshConfig};

pub mod error;
pub use error::{CodecError, Result};

pub mod grid;
pub use grid::VoxelGrid;

// Packed cells and base64 transport
pub mod codec;
pub use codec::PackedCell;

pub mod sdf;
pub use sdf::{ShapeConfig, ShapeKind};

pub mod editor;
pub use editor::{stamp, stamp_shape, EditRequest};

pub mod light;
pub use light::{emissive_sources, propagate, relight, sky_pass, LightSource, LightStats};

// Surface Nets module
pub mod surface_nets;
pub use surface_nets::SurfaceMesh;

pub mod face_builder;
pub use face_builder::build_render_mesh;

pub mod mesh;
pub use mesh::{generate_mesh, generate_mesh_with_config, generate_passes, ChunkMeshes};

pub mod chunk;
pub use chunk::{remesh_batch, Chunk, ChunkCoord, ChunkData, RemeshReport};

pub mod metrics;
