use super::*;

#[test]
fn test_aabb_encapsulate() {
  let mut aabb = MinMaxAABB::empty();
  assert!(!aabb.is_valid());

  aabb.encapsulate([1.0, 2.0, 3.0]);
  aabb.encapsulate([-1.0, -2.0, -3.0]);

  assert_eq!(aabb.min, [-1.0, -2.0, -3.0]);
  assert_eq!(aabb.max, [1.0, 2.0, 3.0]);
  assert!(aabb.is_valid());
}

#[test]
fn test_render_pass_ranges_are_disjoint() {
  for (i, a) in RenderPass::ALL.iter().enumerate() {
    for b in &RenderPass::ALL[i + 1..] {
      let ra = a.material_range();
      let rb = b.material_range();
      assert!(
        ra.high < rb.low || rb.high < ra.low,
        "{:?} and {:?} overlap",
        a,
        b
      );
    }
  }
}

#[test]
fn test_material_range_is_inclusive() {
  let liquid = RenderPass::Liquid.material_range();
  assert!(liquid.contains(47));
  assert!(!liquid.contains(46));
  assert!(!liquid.contains(48));

  let solid = RenderPass::Solid.material_range();
  assert!(solid.contains(0));
  assert!(solid.contains(46));

  assert!(MaterialRange::all().contains(127));
}

#[test]
fn test_render_mesh_clear() {
  let mut mesh = RenderMesh::new();
  mesh.indices.extend([0, 1, 2]);
  mesh.positions.extend([[0.0; 3]; 3]);
  mesh.bounds.encapsulate([1.0, 2.0, 3.0]);

  assert_eq!(mesh.triangle_count(), 1);
  assert_eq!(mesh.vertex_count(), 3);

  mesh.clear();
  assert!(mesh.is_empty());
  assert!(!mesh.bounds.is_valid());
}
