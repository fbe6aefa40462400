use std::collections::HashSet;

use super::*;
use crate::constants::{WEIGHT_MAX, WEIGHT_MIN};

fn sphere_grid(radius: f32, center: [f32; 3], material: u8) -> VoxelGrid {
  let c = Vec3A::from_array(center);
  let mut grid = VoxelGrid::new();
  grid.fill_with(|x, y, z| {
    let d = (Vec3A::new(x as f32, y as f32, z as f32) - c).length();
    ((radius - d).clamp(WEIGHT_MIN, WEIGHT_MAX), material)
  });
  grid
}

/// Solid where `x <= plane`, with the surface at `plane`.
fn x_plane_grid(plane: f32) -> VoxelGrid {
  let mut grid = VoxelGrid::new();
  grid.fill_with(|x, _, _| ((plane - x as f32).clamp(WEIGHT_MIN, WEIGHT_MAX), 1));
  grid
}

fn generate_all(grid: &VoxelGrid) -> SurfaceMesh {
  generate(grid, MaterialRange::all(), &MeshConfig::default())
}

#[test]
fn test_empty_grid_produces_no_mesh() {
  let mesh = generate_all(&VoxelGrid::new());

  assert!(mesh.is_empty());
  assert_eq!(mesh.vertex_count(), 0);
  assert_eq!(mesh.face_count(), 0);
}

#[test]
fn test_solid_grid_produces_no_mesh() {
  let mut grid = VoxelGrid::new();
  grid.weight.fill(WEIGHT_MAX);

  let mesh = generate_all(&grid);
  assert_eq!(mesh.vertex_count(), 0);
}

#[test]
fn test_sphere_produces_mesh() {
  let grid = sphere_grid(6.0, [16.0, 16.0, 16.0], 3);
  let mesh = generate_all(&grid);

  assert!(!mesh.is_empty());
  assert!(mesh.vertex_count() > 100, "got {} vertices", mesh.vertex_count());
  assert_eq!(mesh.vertices.len(), mesh.cells.len());
  assert_eq!(mesh.vertices.len(), mesh.normal_sums.len());
  assert_eq!(mesh.vertices.len(), mesh.gradients.len());
  assert_eq!(mesh.faces.len(), mesh.face_normals.len());

  for face in &mesh.faces {
    for &i in face {
      assert!((i as usize) < mesh.vertex_count());
    }
  }
}

#[test]
fn test_vertices_lie_near_surface() {
  let center = Vec3A::splat(16.0);
  let grid = sphere_grid(6.0, center.to_array(), 3);
  let mesh = generate_all(&grid);

  for v in &mesh.vertices {
    let d = (Vec3A::from_array(*v) - center).length();
    assert!((d - 6.0).abs() < 0.75, "vertex {:?} at distance {}", v, d);
  }
}

#[test]
fn test_dominant_cells_are_solid() {
  let grid = sphere_grid(5.0, [15.0, 16.5, 17.0], 9);
  let mesh = generate_all(&grid);

  for &cell in &mesh.cells {
    assert!(grid.is_solid(cell));
    assert_eq!(grid.material[cell], 9);
  }
}

#[test]
fn test_sphere_normals_point_outward() {
  let center = Vec3A::splat(16.0);
  let grid = sphere_grid(8.0, center.to_array(), 1);
  let mesh = generate_all(&grid);

  for (v, n) in mesh.vertices.iter().zip(mesh.vertex_normals()) {
    let outward = Vec3A::from_array(*v) - center;
    assert!(Vec3A::from_array(n).dot(outward) > 0.0, "normal {:?} at {:?}", n, v);
  }

  for (face, n) in mesh.faces.iter().zip(&mesh.face_normals) {
    let centroid = face
      .iter()
      .map(|&i| Vec3A::from_array(mesh.vertices[i as usize]))
      .sum::<Vec3A>()
      / 3.0;
    assert!(Vec3A::from_array(*n).dot(centroid - center) > 0.0);
  }
}

#[test]
fn test_integer_radius_spheres_have_unit_normals() {
  let center = Vec3A::splat(16.0);

  for radius in [2.0, 8.0] {
    let grid = sphere_grid(radius, center.to_array(), 1);
    let mesh = generate_all(&grid);

    // Samples at exactly the radius collapse the crossings of their cells.
    let collapsed = mesh
      .normal_sums
      .iter()
      .filter(|s| Vec3A::from_array(**s).length_squared() < 1e-8)
      .count();
    assert!(collapsed > 0, "r={} has no collapsed vertices", radius);

    for (v, n) in mesh.vertices.iter().zip(mesh.vertex_normals()) {
      let n = Vec3A::from_array(n);
      assert!((n.length() - 1.0).abs() < 1e-4, "r={} normal {:?} at {:?}", radius, n, v);
      assert!(n.dot(Vec3A::from_array(*v) - center) > 0.0, "r={} normal {:?} at {:?}", radius, n, v);
    }
  }
}

#[test]
fn test_closed_surface_is_consistently_wound() {
  let grid = sphere_grid(7.0, [16.0, 16.0, 16.0], 1);
  let mesh = generate_all(&grid);

  let mut directed = HashSet::new();
  for &[a, b, c] in &mesh.faces {
    for edge in [(a, b), (b, c), (c, a)] {
      assert!(directed.insert(edge), "edge {:?} used twice in one direction", edge);
    }
  }
  for &(a, b) in &directed {
    assert!(directed.contains(&(b, a)), "edge ({}, {}) has no twin", a, b);
  }
}

#[test]
fn test_out_of_range_material_is_not_meshed() {
  let grid = sphere_grid(5.0, [16.0, 16.0, 16.0], 47);
  let config = MeshConfig::default();

  let solid = generate(&grid, MaterialRange::new(0, 46), &config);
  let liquid = generate(&grid, MaterialRange::new(47, 47), &config);

  assert_eq!(solid.vertex_count(), 0);
  assert!(!liquid.is_empty());
}

#[test]
fn test_material_boundary_closes_each_pass() {
  // Two materials split at x = 16 inside one sphere
  let center = Vec3A::splat(16.0);
  let mut grid = VoxelGrid::new();
  grid.fill_with(|x, y, z| {
    let d = (Vec3A::new(x as f32, y as f32, z as f32) - center).length();
    let material = if x < 16 { 2 } else { 47 };
    ((6.0 - d).clamp(WEIGHT_MIN, WEIGHT_MAX), material)
  });

  let config = MeshConfig::default();
  let solid = generate(&grid, MaterialRange::new(0, 46), &config);
  let liquid = generate(&grid, MaterialRange::new(47, 47), &config);

  assert!(!solid.is_empty());
  assert!(!liquid.is_empty());
  for v in &solid.vertices {
    assert!(v[0] <= 16.0 + 1e-4, "solid vertex {:?} crosses the split", v);
  }
  for v in &liquid.vertices {
    assert!(v[0] >= 15.0 - 1e-4, "liquid vertex {:?} crosses the split", v);
  }
}

#[test]
fn test_far_seam_plane_emits_faces() {
  let mesh = generate_all(&x_plane_grid(30.5));

  // One vertex per (y, z) cell column
  assert_eq!(mesh.vertex_count(), 31 * 31);
  // Quads need y >= 1 and z >= 1
  assert_eq!(mesh.face_count(), 2 * 30 * 30);

  for v in &mesh.vertices {
    assert!((v[0] - 30.5).abs() < 1e-5);
  }
  for n in &mesh.face_normals {
    assert!((n[0] - 1.0).abs() < 1e-5, "face normal {:?}", n);
  }
}

#[test]
fn test_near_seam_plane_is_suppressed() {
  let mesh = generate_all(&x_plane_grid(0.5));

  assert_eq!(mesh.vertex_count(), 31 * 31);
  assert_eq!(mesh.face_count(), 0);

  // Suppressed faces still shape the vertex normals
  let normals = mesh.vertex_normals();
  let interior = mesh
    .vertices
    .iter()
    .position(|v| v[1] > 5.0 && v[2] > 5.0)
    .unwrap();
  assert!((normals[interior][0] - 1.0).abs() < 1e-5);
}

#[test]
fn test_epsilon_guard_drops_degenerate_cells() {
  // A single corner at exactly 0 surrounded by barely-empty corners
  let mut grid = VoxelGrid::new();
  grid.weight.fill(-1e-9);
  grid.weight[coord_to_index(10, 10, 10)] = 0.0;

  let mesh = generate_all(&grid);
  assert_eq!(mesh.vertex_count(), 0);
  assert_eq!(mesh.face_count(), 0);
}
