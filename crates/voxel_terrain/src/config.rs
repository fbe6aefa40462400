//! Tunables for lighting and meshing.

use crate::constants::{LIGHT_DECAY, LIGHT_EXPONENT};

/// Configuration for light propagation.
#[derive(Clone, Debug, PartialEq)]
pub struct LightConfig {
  /// Intensity lost per flood-fill hop.
  pub decay: f32,

  /// Seed lateral sun sources from the top of every column.
  pub sky: bool,

  /// When false, lighting is skipped and every cell is fully lit.
  pub enabled: bool,
}

impl Default for LightConfig {
  fn default() -> Self {
    Self {
      decay: LIGHT_DECAY,
      sky: true,
      enabled: true,
    }
  }
}

impl LightConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_decay(mut self, decay: f32) -> Self {
    self.decay = decay;
    self
  }

  pub fn with_sky(mut self, sky: bool) -> Self {
    self.sky = sky;
    self
  }

  pub fn with_enabled(mut self, enabled: bool) -> Self {
    self.enabled = enabled;
    self
  }
}

/// Where the face builder reads a vertex's light value from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightSampling {
  /// Lattice point nearest to the vertex position.
  #[default]
  NearestPoint,
  /// The dominant (most solid) corner of the vertex's cell.
  DominantCell,
}

/// Configuration for mesh generation.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshConfig {
  /// Exponent applied to sampled light values.
  pub light_exponent: i32,

  /// Edges whose corner weights differ by less than this contribute no
  /// crossing point.
  pub interpolation_epsilon: f32,

  /// Weight substituted for solid corners outside the pass material range.
  pub filtered_weight: f32,

  /// Light lookup for each emitted vertex.
  pub light_sampling: LightSampling,
}

impl Default for MeshConfig {
  fn default() -> Self {
    Self {
      light_exponent: LIGHT_EXPONENT,
      interpolation_epsilon: 1e-6,
      filtered_weight: -1e-5,
      light_sampling: LightSampling::NearestPoint,
    }
  }
}

impl MeshConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_light_exponent(mut self, exponent: i32) -> Self {
    self.light_exponent = exponent;
    self
  }

  pub fn with_interpolation_epsilon(mut self, epsilon: f32) -> Self {
    self.interpolation_epsilon = epsilon;
    self
  }

  pub fn with_filtered_weight(mut self, weight: f32) -> Self {
    debug_assert!(weight < 0.0, "filtered corners must read as empty");
    self.filtered_weight = weight;
    self
  }

  pub fn with_light_sampling(mut self, sampling: LightSampling) -> Self {
    self.light_sampling = sampling;
    self
  }
}
