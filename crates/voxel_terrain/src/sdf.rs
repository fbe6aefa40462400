//! Signed distance functions for the sculpting primitives.
//!
//! Every function takes a point already in the shape's local, unrotated frame
//! and returns a **positive-inside** distance: the zero crossing is the shape
//! boundary, values grow inward and fall off outward.
//!
//! ```text
//!   Sphere    r - |p|
//!   Box       -(|max(q, 0)| + min(max(q.x, q.y, q.z), 0)),  q = |p| - h
//!   Cylinder  -(min(max(d.x, d.y), 0) + |max(d, 0)|),
//!             d = (|p.xz| - r, |p.y| - h)            axis = local Y
//! ```
//!
//! Degenerate parameters (zero or negative extents) are accepted and simply
//! produce a field that is everywhere outside or everywhere inside.

use glam::{Vec2, Vec3};

use crate::types::MaterialId;

/// Closed set of sculpting primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
  /// Radius is `half_extents.x`.
  Sphere,
  /// Half-extents per axis.
  Box,
  /// Radius `half_extents.x`, half-height `half_extents.y`, axis local Y.
  Cylinder,
}

/// Shape and write mode for one edit call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeConfig {
  pub kind: ShapeKind,
  pub half_extents: Vec3,
  /// Add material (max-combine) when true, carve (min-combine) when false.
  pub constructive: bool,
  pub material_id: MaterialId,
}

impl ShapeConfig {
  pub fn new(kind: ShapeKind, half_extents: Vec3) -> Self {
    Self {
      kind,
      half_extents,
      constructive: true,
      material_id: 0,
    }
  }

  pub fn sphere(radius: f32) -> Self {
    Self::new(ShapeKind::Sphere, Vec3::splat(radius))
  }

  pub fn cuboid(half_extents: Vec3) -> Self {
    Self::new(ShapeKind::Box, half_extents)
  }

  pub fn cylinder(radius: f32, half_height: f32) -> Self {
    Self::new(ShapeKind::Cylinder, Vec3::new(radius, half_height, radius))
  }

  pub fn with_material(mut self, material_id: MaterialId) -> Self {
    self.material_id = material_id;
    self
  }

  pub fn constructive(mut self) -> Self {
    self.constructive = true;
    self
  }

  pub fn destructive(mut self) -> Self {
    self.constructive = false;
    self
  }

  /// Positive-inside distance for this shape.
  #[inline]
  pub fn distance(&self, p: Vec3) -> f32 {
    evaluate(self.kind, self.half_extents, p)
  }

  /// Distance multiplied by the write sign: `+1` constructive, `-1` destructive.
  #[inline]
  pub fn signed_distance(&self, p: Vec3) -> f32 {
    let d = self.distance(p);
    if self.constructive {
      d
    } else {
      -d
    }
  }
}

/// Evaluate the distance for any shape kind.
#[inline]
pub fn evaluate(kind: ShapeKind, half_extents: Vec3, p: Vec3) -> f32 {
  match kind {
    ShapeKind::Sphere => sphere(half_extents.x, p),
    ShapeKind::Box => cuboid(half_extents, p),
    ShapeKind::Cylinder => cylinder(half_extents.x, half_extents.y, p),
  }
}

#[inline]
pub fn sphere(radius: f32, p: Vec3) -> f32 {
  radius - p.length()
}

#[inline]
pub fn cuboid(half_extents: Vec3, p: Vec3) -> f32 {
  let q = p.abs() - half_extents;
  let outside = q.max(Vec3::ZERO).length();
  let inside = q.max_element().min(0.0);
  -(outside + inside)
}

#[inline]
pub fn cylinder(radius: f32, half_height: f32, p: Vec3) -> f32 {
  let d = Vec2::new(Vec2::new(p.x, p.z).length() - radius, p.y.abs() - half_height);
  -(d.x.max(d.y).min(0.0) + d.max(Vec2::ZERO).length())
}

#[cfg(test)]
#[path = "sdf_test.rs"]
mod sdf_test;
