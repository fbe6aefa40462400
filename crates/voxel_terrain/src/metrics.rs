//! Engine-agnostic metrics collection for terrain chunks.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use voxel_terrain::metrics::{TerrainMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // After each chunk remesh:
//! if let Some(report) = chunk.remesh(&light, &mesh) {
//!   metrics.record_remesh(&report);
//! }
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use web_time::Instant;

use crate::chunk::RemeshReport;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Microseconds elapsed since `start`.
#[inline]
pub fn elapsed_us(start: Instant) -> u64 {
  start.elapsed().as_micros() as u64
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Iterate over values (oldest to newest).
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
  pub fn sum(&self) -> T {
    self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
  }
}

impl RollingWindow<u64> {
  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.sum() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(128)
  }
}

/// Terrain statistics accumulated across edits and remeshes.
#[derive(Debug, Clone, Default)]
pub struct TerrainMetrics {
  /// Light propagation times in microseconds.
  pub light_timings: RollingWindow<u64>,
  /// Mesh generation times (all passes) in microseconds.
  pub mesh_timings: RollingWindow<u64>,

  pub last_light_us: u64,
  pub last_mesh_us: u64,

  /// Edits that changed at least one cell.
  pub edits_applied: u64,
  /// Edits that were no-ops.
  pub edits_ignored: u64,

  pub chunks_meshed: u64,
  pub vertices_emitted: u64,
  pub triangles_emitted: u64,
}

impl TerrainMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reset timings. Cumulative counters are kept.
  pub fn reset(&mut self) {
    self.light_timings.clear();
    self.mesh_timings.clear();
    self.last_light_us = 0;
    self.last_mesh_us = 0;
  }

  pub fn record_edit(&mut self, changed: bool) {
    if !is_enabled() {
      return;
    }
    if changed {
      self.edits_applied += 1;
    } else {
      self.edits_ignored += 1;
    }
  }

  pub fn record_light_timing(&mut self, timing_us: u64) {
    if is_enabled() {
      self.light_timings.push(timing_us);
      self.last_light_us = timing_us;
    }
  }

  pub fn record_mesh_timing(&mut self, timing_us: u64) {
    if is_enabled() {
      self.mesh_timings.push(timing_us);
      self.last_mesh_us = timing_us;
    }
  }

  /// Record everything a chunk remesh produced.
  pub fn record_remesh(&mut self, report: &RemeshReport) {
    if !is_enabled() {
      return;
    }

    self.record_light_timing(report.light_us);
    self.record_mesh_timing(report.mesh_us);
    self.chunks_meshed += 1;
    self.vertices_emitted += report.vertices as u64;
    self.triangles_emitted += report.triangles as u64;
  }

  pub fn avg_light_timing_us(&self) -> f64 {
    self.light_timings.average()
  }

  pub fn avg_mesh_timing_us(&self) -> f64 {
    self.mesh_timings.average()
  }
}
