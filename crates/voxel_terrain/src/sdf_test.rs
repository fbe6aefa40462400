use glam::Vec3;

use super::*;

const EPS: f32 = 1e-5;

#[test]
fn test_sphere_sign_convention() {
  assert!((sphere(2.0, Vec3::ZERO) - 2.0).abs() < EPS);
  assert!(sphere(2.0, Vec3::new(2.0, 0.0, 0.0)).abs() < EPS);
  assert!((sphere(2.0, Vec3::new(0.0, 5.0, 0.0)) + 3.0).abs() < EPS);
}

#[test]
fn test_box_is_exact() {
  let h = Vec3::new(1.0, 2.0, 3.0);

  // Centre: distance to nearest face
  assert!((cuboid(h, Vec3::ZERO) - 1.0).abs() < EPS);
  // On a face
  assert!(cuboid(h, Vec3::new(0.0, 2.0, 0.0)).abs() < EPS);
  // Outside along an axis
  assert!((cuboid(h, Vec3::new(4.0, 0.0, 0.0)) + 3.0).abs() < EPS);
  // Outside past a corner: euclidean distance to the corner
  let d = cuboid(h, Vec3::new(2.0, 3.0, 3.0));
  assert!((d + 2f32.sqrt()).abs() < EPS, "got {}", d);
}

#[test]
fn test_box_is_symmetric() {
  let h = Vec3::splat(1.5);
  let p = Vec3::new(0.4, -0.7, 1.1);
  assert!((cuboid(h, p) - cuboid(h, -p)).abs() < EPS);
}

#[test]
fn test_cylinder_axis_is_local_y() {
  // Tall thin cylinder: a point far up the axis is still inside
  assert!(cylinder(1.0, 5.0, Vec3::new(0.0, 4.0, 0.0)) > 0.0);
  // The same offset along X is outside
  assert!(cylinder(1.0, 5.0, Vec3::new(4.0, 0.0, 0.0)) < 0.0);

  // Side surface and cap
  assert!(cylinder(1.0, 5.0, Vec3::new(1.0, 0.0, 0.0)).abs() < EPS);
  assert!(cylinder(1.0, 5.0, Vec3::new(0.0, 5.0, 0.0)).abs() < EPS);
  assert!((cylinder(1.0, 5.0, Vec3::ZERO) - 1.0).abs() < EPS);
}

#[test]
fn test_degenerate_extents_are_accepted() {
  assert!(sphere(0.0, Vec3::new(0.1, 0.0, 0.0)) < 0.0);
  assert!(cuboid(Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0)) < 0.0);
  assert!(sphere(-1.0, Vec3::ZERO) < 0.0);
}

#[test]
fn test_evaluate_dispatches_every_kind() {
  let h = Vec3::new(2.0, 3.0, 2.0);
  let p = Vec3::new(0.5, 0.5, 0.5);
  assert_eq!(evaluate(ShapeKind::Sphere, h, p), sphere(2.0, p));
  assert_eq!(evaluate(ShapeKind::Box, h, p), cuboid(h, p));
  assert_eq!(evaluate(ShapeKind::Cylinder, h, p), cylinder(2.0, 3.0, p));
}

#[test]
fn test_destructive_flips_sign() {
  let add = ShapeConfig::sphere(2.0).with_material(7);
  let carve = add.destructive();
  let p = Vec3::new(0.5, 0.0, 0.0);

  assert!(add.constructive);
  assert!(!carve.constructive);
  assert_eq!(carve.material_id, 7);
  assert_eq!(add.signed_distance(p), -carve.signed_distance(p));
  assert!(add.signed_distance(p) > 0.0);
}
