//! Multi-source light flood fill.
//!
//! Light spreads outward from emissive cells and from the sky, losing a fixed
//! amount of intensity per hop. Solid cells receive light but do not pass it
//! on, so a surface is lit where it faces an open, lit region.
//!
//! # Algorithm
//!
//! ```text
//!   reset all light to 0
//!   sky pass (optional):  per (x, z) column, top-down
//!                           empty cells above the first solid cell = 1.0
//!                           cell above the first solid cell = lateral source
//!   seed:                 light[source] = 1.0, push neighbours at i - decay
//!   fill:                 pop (cell, i)
//!                           outside lattice      -> drop
//!                           i <= light[cell]     -> drop (already as bright)
//!                           light[cell] = i
//!                           solid                -> stop here
//!                           push neighbours at i - decay
//! ```
//!
//! The work list is a LIFO stack. A cell can be relaxed several times before it
//! settles, since the stack does not visit cells in distance order. The final
//! field is valid (no cell exceeds what some path allows) and every cell ends
//! at the brightest value any explored path delivered to it.

use crate::config::LightConfig;
use crate::constants::{coord_to_index, index_to_coord, GRID_SIZE};
use crate::grid::VoxelGrid;

/// A cell that emits light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
  pub index: usize,
  pub intensity: f32,
  /// Spread only along X and Z (sun light entering from above).
  pub lateral_only: bool,
}

impl LightSource {
  pub fn point(index: usize, intensity: f32) -> Self {
    Self {
      index,
      intensity,
      lateral_only: false,
    }
  }

  pub fn lateral(index: usize, intensity: f32) -> Self {
    Self {
      index,
      intensity,
      lateral_only: true,
    }
  }
}

/// Counters from one propagation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LightStats {
  pub sources: usize,
  pub sky_columns: usize,
  /// Entries that raised a cell's light.
  pub relaxed: usize,
  /// Entries dropped for falling outside the lattice.
  pub out_of_bounds: usize,
  /// Entries dropped because the cell was already at least as bright.
  pub already_lit: usize,
  /// Relaxed entries that stopped at a solid cell.
  pub blocked: usize,
}

#[derive(Clone, Copy)]
struct Step {
  pos: [i32; 3],
  intensity: f32,
  lateral_only: bool,
}

const LATERAL: [[i32; 3]; 4] = [[1, 0, 0], [-1, 0, 0], [0, 0, 1], [0, 0, -1]];
const VERTICAL: [[i32; 3]; 2] = [[0, 1, 0], [0, -1, 0]];

/// Reset the light field and flood it from `sources`.
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "light::propagate"))]
pub fn propagate(grid: &mut VoxelGrid, sources: &[LightSource], decay: f32) -> LightStats {
  grid.assert_invariants();
  grid.light.fill(0.0);

  let mut stats = LightStats::default();
  flood(grid, sources, decay, &mut stats);
  stats
}

/// Full lighting pass: reset, optional sky pass, then flood from the sky
/// sources and `emissive`.
///
/// With lighting disabled every cell is set fully lit.
#[cfg_attr(feature = "instrument", tracing::instrument(skip_all, name = "light::relight"))]
pub fn relight(grid: &mut VoxelGrid, emissive: &[LightSource], config: &LightConfig) -> LightStats {
  grid.assert_invariants();

  if !config.enabled {
    grid.light.fill(1.0);
    return LightStats::default();
  }

  grid.light.fill(0.0);

  let mut stats = LightStats::default();
  let mut sources = Vec::with_capacity(emissive.len() + GRID_SIZE * GRID_SIZE);
  sources.extend_from_slice(emissive);

  if config.sky {
    let sky = sky_pass(grid);
    stats.sky_columns = sky.len();
    sources.extend(sky);
  }

  flood(grid, &sources, config.decay, &mut stats);
  stats
}

/// Column scan from the top of the lattice.
///
/// Writes full light into every empty cell above the first solid cell of each
/// `(x, z)` column and returns a lateral source for the cell just above it.
/// Columns with no solid cell are lit top to bottom and yield no source.
pub fn sky_pass(grid: &mut VoxelGrid) -> Vec<LightSource> {
  let mut sources = Vec::new();

  for z in 0..GRID_SIZE {
    for x in 0..GRID_SIZE {
      for y in (0..GRID_SIZE).rev() {
        let idx = coord_to_index(x, y, z);
        if grid.is_solid(idx) {
          if y + 1 < GRID_SIZE {
            sources.push(LightSource::lateral(coord_to_index(x, y + 1, z), 1.0));
          }
          break;
        }
        grid.light[idx] = 1.0;
      }
    }
  }

  sources
}

/// Build sources from a per-cell incident intensity array.
///
/// Solid cells and non-positive intensities are skipped.
pub fn emissive_sources(grid: &VoxelGrid, incidents: &[f32]) -> Vec<LightSource> {
  assert_eq!(incidents.len(), grid.len(), "incident array length");

  incidents
    .iter()
    .enumerate()
    .filter(|&(i, &intensity)| intensity > 0.0 && !grid.is_solid(i))
    .map(|(i, &intensity)| LightSource::point(i, intensity))
    .collect()
}

fn flood(grid: &mut VoxelGrid, sources: &[LightSource], decay: f32, stats: &mut LightStats) {
  assert!(decay > 0.0, "light decay must be positive, got {}", decay);

  let mut stack: Vec<Step> = Vec::with_capacity(sources.len() * 6);

  for source in sources {
    let (x, y, z) = index_to_coord(source.index);
    grid.light[source.index] = 1.0;
    push_neighbours(
      &mut stack,
      [x as i32, y as i32, z as i32],
      source.intensity - decay,
      source.lateral_only,
    );
  }
  stats.sources += sources.len();

  while let Some(step) = stack.pop() {
    let [x, y, z] = step.pos;
    let Some(idx) = VoxelGrid::index(x, y, z) else {
      stats.out_of_bounds += 1;
      continue;
    };

    if step.intensity <= grid.light[idx] {
      stats.already_lit += 1;
      continue;
    }

    grid.light[idx] = step.intensity;
    stats.relaxed += 1;

    if grid.is_solid(idx) {
      stats.blocked += 1;
      continue;
    }

    push_neighbours(&mut stack, step.pos, step.intensity - decay, step.lateral_only);
  }

  tracing::debug!(
    sources = stats.sources,
    sky_columns = stats.sky_columns,
    relaxed = stats.relaxed,
    blocked = stats.blocked,
    "light flood"
  );
}

#[inline]
fn push_neighbours(stack: &mut Vec<Step>, pos: [i32; 3], intensity: f32, lateral_only: bool) {
  let vertical: &[[i32; 3]] = if lateral_only { &[] } else { &VERTICAL };

  for offset in LATERAL.iter().chain(vertical) {
    stack.push(Step {
      pos: [pos[0] + offset[0], pos[1] + offset[1], pos[2] + offset[2]],
      intensity,
      lateral_only,
    });
  }
}

#[cfg(test)]
#[path = "light_test.rs"]
mod light_test;
