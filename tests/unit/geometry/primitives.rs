use super::*;

fn all_finite(mesh: &Mesh) -> bool {
    mesh.triangles
        .iter()
        .flat_map(|t| t.vertices())
        .all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite())
}

#[test]
fn cube_has_twelve_triangles() {
    let mesh = cube(2.0);
    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.triangles.len(), 12);
    for t in &mesh.triangles {
        for v in t.vertices() {
            assert_eq!(v.x.abs(), 1.0);
            assert_eq!(v.y.abs(), 1.0);
            assert_eq!(v.z.abs(), 1.0);
        }
    }
}

#[test]
fn sphere_counts_and_radius() {
    let mesh = sphere(2.0, 8, 6);
    assert_eq!(mesh.vertices.len(), 7 * 9);
    assert_eq!(mesh.triangles.len(), 6 * 8 * 2);
    for v in &mesh.vertices {
        assert!((v.length() - 2.0).abs() < 1e-9);
    }
}

#[test]
fn sphere_clamps_segment_counts() {
    let mesh = sphere(1.0, 0, 0);
    assert_eq!(mesh.vertices.len(), 3 * 4);
    assert_eq!(mesh.triangles.len(), 2 * 3 * 2);
    assert!(all_finite(&mesh));
}

#[test]
fn cylinder_layout() {
    let mesh = cylinder(0.5, 2.0, 8);
    assert_eq!(mesh.vertices.len(), 18);
    assert_eq!(mesh.triangles.len(), 32);
    assert_eq!(mesh.vertices[0].y, 1.0);
    assert_eq!(mesh.vertices[1].y, -1.0);
    assert!(all_finite(&cylinder(1.0, 1.0, 1)));
}

#[test]
fn cone_has_apex_and_base() {
    let mesh = cone(1.0, 2.0, 6);
    assert_eq!(mesh.vertices.len(), 7);
    assert_eq!(mesh.triangles.len(), 12);
    assert_eq!(mesh.triangles[0].v0, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(mesh.triangles[6].v0, Vec3::new(0.0, -1.0, 0.0));
    assert!(mesh.vertices.iter().all(|v| v.y == -1.0));
}

#[test]
fn plane_grid_spans_extent() {
    let mesh = plane(4.0, 2.0, 2);
    assert_eq!(mesh.vertices.len(), 9);
    assert_eq!(mesh.triangles.len(), 8);
    assert_eq!(mesh.vertices[0], Vec3::new(-2.0, 0.0, -1.0));
    assert_eq!(mesh.vertices[8], Vec3::new(2.0, 0.0, 1.0));
    assert_eq!(plane(1.0, 1.0, 0).triangles.len(), 2);
}

#[test]
fn torus_vertices_lie_on_tube() {
    let (major, minor) = (3.0, 0.5);
    let mesh = torus(major, minor, 16, 8);
    assert_eq!(mesh.vertices.len(), 17 * 9);
    assert_eq!(mesh.triangles.len(), 16 * 8 * 2);
    for v in &mesh.vertices {
        let ring = (v.x * v.x + v.z * v.z).sqrt() - major;
        let d = (ring * ring + v.y * v.y).sqrt();
        assert!((d - minor).abs() < 1e-9);
    }
}

/// Every non-degenerate face normal points away from `anchor(face center)`.
fn assert_faces_outward(name: &str, mesh: &Mesh, anchor: impl Fn(Vec3) -> Vec3) {
    let mut checked = 0;
    for (i, t) in mesh.triangles.iter().enumerate() {
        if (t.v1 - t.v0).cross(t.v2 - t.v0).length() < 1e-9 {
            continue;
        }
        let c = t.center();
        let d = t.normal().dot(c - anchor(c));
        assert!(d > 0.0, "{name}: triangle {i} faces inward ({d})");
        checked += 1;
    }
    assert!(checked > 0, "{name}: no faces checked");
}

#[test]
fn closed_solids_face_outward() {
    let origin = |_| Vec3::ZERO;
    assert_faces_outward("cube", &cube(2.0), origin);
    assert_faces_outward("sphere", &sphere(1.5, 12, 8), origin);
    assert_faces_outward("coarse sphere", &sphere(1.0, 0, 0), origin);
    assert_faces_outward("cylinder", &cylinder(0.5, 2.0, 10), origin);
    assert_faces_outward("cone", &cone(1.0, 2.0, 8), origin);
}

#[test]
fn torus_faces_point_out_of_the_tube() {
    let major = 3.0;
    let mesh = torus(major, 0.5, 16, 8);
    assert_faces_outward("torus", &mesh, |c| {
        Vec3::new(c.x, 0.0, c.z).normalize() * major
    });
}

#[test]
fn plane_faces_up() {
    for t in &plane(4.0, 2.0, 3).triangles {
        assert!((t.normal().y - 1.0).abs() < 1e-12);
    }
}
