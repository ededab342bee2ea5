//! Procedural mesh generators.
//!
//! Segment counts below the usable minimum are clamped up instead of rejected, so every
//! generator returns a well-formed mesh for any input.
//!
//! Triangles wind counter-clockwise seen from outside, so [`Triangle::normal`] points away
//! from the body and shaded back-face culling keeps the visible side.

use std::f64::consts::{PI, TAU};

use crate::foundation::math::Vec3;
use crate::geometry::mesh::{Mesh, Triangle};

pub const MIN_SPHERE_SEGMENTS: u32 = 3;
pub const MIN_SPHERE_RINGS: u32 = 2;
pub const MIN_RADIAL_SEGMENTS: u32 = 3;
pub const MIN_PLANE_SUBDIVISIONS: u32 = 1;

/// Axis-aligned cube centered on the origin with edge length `size`.
pub fn cube(size: f64) -> Mesh {
    let s = size / 2.0;
    let corners = [
        Vec3::new(-s, -s, -s),
        Vec3::new(s, -s, -s),
        Vec3::new(s, s, -s),
        Vec3::new(-s, s, -s),
        Vec3::new(-s, -s, s),
        Vec3::new(s, -s, s),
        Vec3::new(s, s, s),
        Vec3::new(-s, s, s),
    ];
    const FACES: [[usize; 3]; 12] = [
        [0, 2, 1],
        [0, 3, 2],
        [5, 7, 4],
        [5, 6, 7],
        [4, 3, 0],
        [4, 7, 3],
        [1, 6, 5],
        [1, 2, 6],
        [3, 6, 2],
        [3, 7, 6],
        [4, 1, 5],
        [4, 0, 1],
    ];

    let mut mesh = Mesh::with_capacity(corners.len(), FACES.len());
    for c in corners {
        mesh.push_vertex(c);
    }
    for [a, b, c] in FACES {
        mesh.push_indexed(a, b, c);
    }
    mesh
}

/// UV sphere. Vertex `(ring, seg)` sits at polar angle `ring·π/rings` and azimuth
/// `seg·2π/segments`; the seam column is duplicated.
pub fn sphere(radius: f64, segments: u32, rings: u32) -> Mesh {
    let segments = segments.max(MIN_SPHERE_SEGMENTS) as usize;
    let rings = rings.max(MIN_SPHERE_RINGS) as usize;

    let mut mesh = Mesh::with_capacity((rings + 1) * (segments + 1), rings * segments * 2);
    for ring in 0..=rings {
        let (sin_theta, cos_theta) = (ring as f64 * PI / rings as f64).sin_cos();
        for seg in 0..=segments {
            let (sin_phi, cos_phi) = (seg as f64 * TAU / segments as f64).sin_cos();
            mesh.push_vertex(
                Vec3::new(cos_phi * sin_theta, cos_theta, sin_phi * sin_theta) * radius,
            );
        }
    }

    push_grid(&mut mesh, rings, segments);
    mesh
}

/// Capped cylinder along Y, centered on the origin.
pub fn cylinder(radius: f64, height: f64, segments: u32) -> Mesh {
    let segments = segments.max(MIN_RADIAL_SEGMENTS) as usize;
    let half = height / 2.0;
    let top_center = Vec3::new(0.0, half, 0.0);
    let bottom_center = Vec3::new(0.0, -half, 0.0);

    let mut mesh = Mesh::with_capacity((segments + 1) * 2, segments * 4);
    // Interleaved: even indices on the top ring, odd on the bottom ring.
    for i in 0..=segments {
        let (sin, cos) = (i as f64 * TAU / segments as f64).sin_cos();
        let (x, z) = (cos * radius, sin * radius);
        mesh.push_vertex(Vec3::new(x, half, z));
        mesh.push_vertex(Vec3::new(x, -half, z));
    }

    for i in 0..segments {
        let (top, bottom) = (i * 2, i * 2 + 1);
        let (next_top, next_bottom) = (top + 2, bottom + 2);
        mesh.push_indexed(top, next_top, bottom);
        mesh.push_indexed(bottom, next_top, next_bottom);
    }

    for i in 0..segments {
        let (top, bottom) = (i * 2, i * 2 + 1);
        let (next_top, next_bottom) = (top + 2, bottom + 2);
        let v = &mesh.vertices;
        let cap_top = Triangle::new(top_center, v[next_top], v[top]);
        let cap_bottom = Triangle::new(bottom_center, v[bottom], v[next_bottom]);
        mesh.push_triangle(cap_top);
        mesh.push_triangle(cap_bottom);
    }

    mesh
}

/// Cone along Y with the apex at `+height/2` and the base ring at `-height/2`.
pub fn cone(radius: f64, height: f64, segments: u32) -> Mesh {
    let segments = segments.max(MIN_RADIAL_SEGMENTS) as usize;
    let half = height / 2.0;
    let apex = Vec3::new(0.0, half, 0.0);
    let base_center = Vec3::new(0.0, -half, 0.0);

    let mut mesh = Mesh::with_capacity(segments + 1, segments * 2);
    for i in 0..=segments {
        let (sin, cos) = (i as f64 * TAU / segments as f64).sin_cos();
        mesh.push_vertex(Vec3::new(cos * radius, -half, sin * radius));
    }

    let ring = mesh.vertices.clone();
    for i in 0..segments {
        mesh.push_triangle(Triangle::new(apex, ring[i + 1], ring[i]));
    }
    for i in 0..segments {
        mesh.push_triangle(Triangle::new(base_center, ring[i], ring[i + 1]));
    }

    mesh
}

/// Flat grid on the XZ plane at `y = 0`, `width` along X and `depth` along Z.
pub fn plane(width: f64, depth: f64, subdivisions: u32) -> Mesh {
    let n = subdivisions.max(MIN_PLANE_SUBDIVISIONS) as usize;
    let step = 1.0 / n as f64;
    let (hw, hd) = (width / 2.0, depth / 2.0);

    let mut mesh = Mesh::with_capacity((n + 1) * (n + 1), n * n * 2);
    for i in 0..=n {
        for j in 0..=n {
            let x = -hw + j as f64 * width * step;
            let z = -hd + i as f64 * depth * step;
            mesh.push_vertex(Vec3::new(x, 0.0, z));
        }
    }

    for i in 0..n {
        for j in 0..n {
            let idx = i * (n + 1) + j;
            mesh.push_indexed(idx, idx + n + 1, idx + 1);
            mesh.push_indexed(idx + 1, idx + n + 1, idx + n + 2);
        }
    }

    mesh
}

/// Torus in the XZ plane around the Y axis.
pub fn torus(major: f64, minor: f64, major_segments: u32, minor_segments: u32) -> Mesh {
    let majors = major_segments.max(MIN_RADIAL_SEGMENTS) as usize;
    let minors = minor_segments.max(MIN_RADIAL_SEGMENTS) as usize;

    let mut mesh = Mesh::with_capacity((majors + 1) * (minors + 1), majors * minors * 2);
    for i in 0..=majors {
        let (sin_theta, cos_theta) = (i as f64 * TAU / majors as f64).sin_cos();
        for j in 0..=minors {
            let (sin_phi, cos_phi) = (j as f64 * TAU / minors as f64).sin_cos();
            let tube = major + minor * cos_phi;
            mesh.push_vertex(Vec3::new(tube * cos_theta, minor * sin_phi, tube * sin_theta));
        }
    }

    push_grid(&mut mesh, majors, minors);
    mesh
}

/// Two triangles per quad of a `(rows + 1) × (cols + 1)` vertex grid.
fn push_grid(mesh: &mut Mesh, rows: usize, cols: usize) {
    for r in 0..rows {
        for c in 0..cols {
            let first = r * (cols + 1) + c;
            let second = first + cols + 1;
            mesh.push_indexed(first, first + 1, second);
            mesh.push_indexed(second, first + 1, second + 1);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/primitives.rs"]
mod tests;
