use crate::foundation::math::{EPSILON, Mat4, Vec3};

/// Triangle stored by value; meshes never share vertices between triangles.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Triangle {
    pub const fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unit face normal `(v1 - v0) × (v2 - v0)`, or `+Y` for degenerate triangles.
    pub fn normal(&self) -> Vec3 {
        let n = (self.v1 - self.v0).cross(self.v2 - self.v0);
        if n.length() < EPSILON {
            return Vec3::UP;
        }
        n.normalize()
    }

    pub fn center(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) * (1.0 / 3.0)
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn map(&self, f: impl Fn(Vec3) -> Vec3) -> Triangle {
        Triangle::new(f(self.v0), f(self.v1), f(self.v2))
    }
}

/// Triangle soup plus the vertex list the generators produced.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    pub fn push_vertex(&mut self, v: Vec3) {
        self.vertices.push(v);
    }

    pub fn push_triangle(&mut self, t: Triangle) {
        self.triangles.push(t);
    }

    /// Triangle built from three indices into `vertices`.
    pub(crate) fn push_indexed(&mut self, a: usize, b: usize, c: usize) {
        let t = Triangle::new(self.vertices[a], self.vertices[b], self.vertices[c]);
        self.triangles.push(t);
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// New mesh with every vertex and every triangle vertex run through `m`.
    pub fn transform(&self, m: &Mat4) -> Mesh {
        Mesh {
            vertices: self.vertices.iter().map(|v| m.transform_point(*v)).collect(),
            triangles: self
                .triangles
                .iter()
                .map(|t| t.map(|v| m.transform_point(v)))
                .collect(),
        }
    }

    /// Append `other` to this mesh. Nothing is deduplicated.
    pub fn merge(&mut self, other: &Mesh) {
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend_from_slice(&other.triangles);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mesh.rs"]
mod tests;
