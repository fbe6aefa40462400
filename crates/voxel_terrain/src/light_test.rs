use super::*;
use crate::constants::{GRID_SIZE_CB, LIGHT_DECAY};

const EPS: f32 = 1e-5;

fn floor_grid(top: usize) -> VoxelGrid {
  let mut grid = VoxelGrid::new();
  grid.fill_with(|_, y, _| if y <= top { (0.5, 1) } else { (-0.5, 0) });
  grid
}

fn manhattan(a: (usize, usize, usize), b: (usize, usize, usize)) -> usize {
  a.0.abs_diff(b.0) + a.1.abs_diff(b.1) + a.2.abs_diff(b.2)
}

#[test]
fn test_point_source_decays_per_hop() {
  let mut grid = VoxelGrid::new();
  let source = (16, 16, 16);
  let src_idx = coord_to_index(source.0, source.1, source.2);

  let stats = propagate(&mut grid, &[LightSource::point(src_idx, 1.0)], LIGHT_DECAY);

  assert_eq!(stats.sources, 1);
  assert_eq!(stats.blocked, 0);
  assert_eq!(grid.light[src_idx], 1.0);

  for idx in 0..GRID_SIZE_CB {
    let hops = manhattan(index_to_coord(idx), source);
    let bound = (1.0 - hops as f32 * LIGHT_DECAY).max(0.0);
    assert!(
      grid.light[idx] <= bound + EPS,
      "cell {:?} at {} hops has {} > {}",
      index_to_coord(idx),
      hops,
      grid.light[idx],
      bound
    );
  }

  assert!((grid.light[coord_to_index(19, 16, 16)] - (1.0 - 3.0 * LIGHT_DECAY)).abs() < EPS);
  assert!((grid.light[coord_to_index(16, 14, 15)] - (1.0 - 3.0 * LIGHT_DECAY)).abs() < EPS);
  // 25 hops of 0.04 exhausts the light
  assert_eq!(grid.light[coord_to_index(0, 0, 0)], 0.0);
}

#[test]
fn test_propagate_resets_previous_light() {
  let mut grid = VoxelGrid::new();
  grid.light.fill(0.7);

  propagate(&mut grid, &[], LIGHT_DECAY);

  assert!(grid.light.iter().all(|&l| l == 0.0));
}

#[test]
fn test_solid_cells_are_lit_but_block() {
  let mut grid = VoxelGrid::new();
  // Solid wall across the whole lattice at x = 20
  grid.fill_with(|x, _, _| if x == 20 { (0.5, 1) } else { (-0.5, 0) });

  let src_idx = coord_to_index(16, 16, 16);
  let stats = propagate(&mut grid, &[LightSource::point(src_idx, 1.0)], LIGHT_DECAY);

  assert!(stats.blocked > 0);
  let wall = coord_to_index(20, 16, 16);
  assert!((grid.light[wall] - (1.0 - 4.0 * LIGHT_DECAY)).abs() < EPS);

  for z in 0..GRID_SIZE {
    for y in 0..GRID_SIZE {
      for x in 21..GRID_SIZE {
        assert_eq!(grid.light[coord_to_index(x, y, z)], 0.0, "light leaked to x={}", x);
      }
    }
  }
}

#[test]
fn test_lateral_source_never_moves_vertically() {
  let mut grid = VoxelGrid::new();
  let src_idx = coord_to_index(16, 16, 16);

  propagate(&mut grid, &[LightSource::lateral(src_idx, 1.0)], LIGHT_DECAY);

  assert!((grid.light[coord_to_index(17, 16, 16)] - (1.0 - LIGHT_DECAY)).abs() < EPS);
  assert!((grid.light[coord_to_index(16, 16, 13)] - (1.0 - 3.0 * LIGHT_DECAY)).abs() < EPS);
  assert_eq!(grid.light[coord_to_index(16, 17, 16)], 0.0);
  assert_eq!(grid.light[coord_to_index(18, 15, 16)], 0.0);
}

#[test]
fn test_sky_pass_lights_open_columns() {
  let mut grid = floor_grid(10);

  let stats = relight(&mut grid, &[], &LightConfig::default());

  assert_eq!(stats.sky_columns, GRID_SIZE * GRID_SIZE);
  for y in 11..GRID_SIZE {
    assert_eq!(grid.light[coord_to_index(5, y, 7)], 1.0, "y={}", y);
  }
  // The ground itself only receives light that spreads into it
  assert_eq!(grid.light[coord_to_index(5, 10, 7)], 0.0);
  assert_eq!(grid.light[coord_to_index(5, 0, 7)], 0.0);
}

#[test]
fn test_sky_light_spreads_under_overhang() {
  let mut grid = floor_grid(10);
  // Overhang slab at y = 20 covering x < 16
  for z in 0..GRID_SIZE {
    for x in 0..16 {
      grid.set(x, 20, z, 0.5, 1);
    }
  }

  relight(&mut grid, &[], &LightConfig::default());

  let near = grid.light[coord_to_index(15, 11, 8)];
  let far = grid.light[coord_to_index(12, 11, 8)];
  assert!((near - (1.0 - LIGHT_DECAY)).abs() < EPS, "near = {}", near);
  assert!((far - (1.0 - 4.0 * LIGHT_DECAY)).abs() < EPS, "far = {}", far);

  // Above the overhang the columns are open again
  assert_eq!(grid.light[coord_to_index(4, 25, 8)], 1.0);
  assert!(grid.light[coord_to_index(4, 15, 8)] < 1.0);
}

#[test]
fn test_sky_pass_on_empty_grid_lights_everything() {
  let mut grid = VoxelGrid::new();
  let sources = sky_pass(&mut grid);

  assert!(sources.is_empty());
  assert!(grid.light.iter().all(|&l| l == 1.0));
}

#[test]
fn test_disabled_lighting_is_fully_lit() {
  let mut grid = floor_grid(10);
  let stats = relight(&mut grid, &[], &LightConfig::new().with_enabled(false));

  assert_eq!(stats, LightStats::default());
  assert!(grid.light.iter().all(|&l| l == 1.0));
}

#[test]
fn test_emissive_sources_skip_solid_cells() {
  let grid = floor_grid(10);
  let mut incidents = vec![0.0; GRID_SIZE_CB];
  incidents[coord_to_index(3, 5, 3)] = 1.0; // buried
  incidents[coord_to_index(3, 15, 3)] = 0.8; // in the open

  let sources = emissive_sources(&grid, &incidents);

  assert_eq!(sources.len(), 1);
  assert_eq!(sources[0].index, coord_to_index(3, 15, 3));
  assert_eq!(sources[0].intensity, 0.8);
  assert!(!sources[0].lateral_only);
}

#[test]
fn test_emissive_source_in_cave() {
  let mut grid = floor_grid(31);
  // Hollow out a small cave with no sky access
  for z in 10..15 {
    for y in 10..15 {
      for x in 10..15 {
        grid.set(x, y, z, -0.5, 0);
      }
    }
  }
  let src = coord_to_index(12, 12, 12);

  relight(&mut grid, &[LightSource::point(src, 1.0)], &LightConfig::default());

  assert_eq!(grid.light[src], 1.0);
  // Cave wall receives light, the rock behind it does not
  assert!(grid.light[coord_to_index(15, 12, 12)] > 0.0);
  assert_eq!(grid.light[coord_to_index(16, 12, 12)], 0.0);
}

#[test]
#[should_panic(expected = "light decay must be positive")]
fn test_zero_decay_is_rejected() {
  let mut grid = VoxelGrid::new();
  propagate(&mut grid, &[LightSource::point(0, 1.0)], 0.0);
}
