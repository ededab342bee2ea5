use std::ops::{Add, Mul, Neg, Sub};

/// Threshold below which lengths, determinants and homogeneous `w` are treated as zero.
pub const EPSILON: f64 = 1e-10;

/// 3D vector value type.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or [`Vec3::ZERO`] when the length is below
    /// [`EPSILON`].
    pub fn normalize(self) -> Vec3 {
        let len = self.length();
        if len < EPSILON {
            return Vec3::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Component-wise `a + (b - a) * t`.
    pub fn lerp(a: Vec3, b: Vec3, t: f64) -> Vec3 {
        Vec3::new(
            a.x + (b.x - a.x) * t,
            a.y + (b.y - a.y) * t,
            a.z + (b.z - a.z) * t,
        )
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::add(self, rhs)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::sub(self, rhs)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        self.scale(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        self.scale(-1.0)
    }
}

/// 4x4 transform matrix, row-major.
///
/// Points are column vectors, so `a.multiply(b)` applies `b` first.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mat4(pub [f64; 16]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0[row * 4 + col]
    }

    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        let mut out = [0.0; 16];
        for i in 0..4 {
            for j in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.0[i * 4 + k] * other.0[k * 4 + j];
                }
                out[i * 4 + j] = acc;
            }
        }
        Mat4(out)
    }

    /// Apply the matrix to a point (implicit `w = 1`).
    ///
    /// The homogeneous divide is skipped when `w` is within [`EPSILON`] of 0 (singular) or of 1
    /// (affine), so the result never contains infinities from this step.
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        let m = &self.0;
        let x = m[0] * v.x + m[1] * v.y + m[2] * v.z + m[3];
        let y = m[4] * v.x + m[5] * v.y + m[6] * v.z + m[7];
        let z = m[8] * v.x + m[9] * v.y + m[10] * v.z + m[11];
        let w = m[12] * v.x + m[13] * v.y + m[14] * v.z + m[15];

        if w.abs() > EPSILON && (w - 1.0).abs() > EPSILON {
            return Vec3::new(x / w, y / w, z / w);
        }
        Vec3::new(x, y, z)
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Mat4([
            1.0, 0.0, 0.0, x, //
            0.0, 1.0, 0.0, y, //
            0.0, 0.0, 1.0, z, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn translation_vec(v: Vec3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Mat4([
            x, 0.0, 0.0, 0.0, //
            0.0, y, 0.0, 0.0, //
            0.0, 0.0, z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, -s, 0.0, //
            0.0, s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4([
            c, 0.0, s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4([
            c, -s, 0.0, 0.0, //
            s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rodrigues rotation about a unit `axis`.
    pub fn rotation_axis_angle(axis: Vec3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let Vec3 { x, y, z } = axis;
        Mat4([
            t * x * x + c,
            t * x * y - s * z,
            t * x * z + s * y,
            0.0,
            t * x * y + s * z,
            t * y * y + c,
            t * y * z - s * x,
            0.0,
            t * x * z - s * y,
            t * y * z + s * x,
            t * z * z + c,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// OpenGL-style perspective projection.
    ///
    /// Returns the identity when `fov`, `aspect` or `far - near` is within [`EPSILON`] of zero.
    pub fn perspective(fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        if fov.abs() < EPSILON || aspect.abs() < EPSILON || (far - near).abs() < EPSILON {
            return Self::IDENTITY;
        }

        let f = 1.0 / (fov / 2.0).tan();
        Mat4([
            f / aspect,
            0.0,
            0.0,
            0.0,
            0.0,
            f,
            0.0,
            0.0,
            0.0,
            0.0,
            (far + near) / (near - far),
            (2.0 * far * near) / (near - far),
            0.0,
            0.0,
            -1.0,
            0.0,
        ])
    }

    /// Right-handed view matrix looking from `eye` towards `target`.
    ///
    /// A zero-length view direction falls back to +Z; an `up` parallel to the view direction is
    /// replaced by whichever of +Y / +X is less parallel to it.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut forward = (target - eye).normalize();
        if forward.length() < EPSILON {
            forward = Vec3::Z;
        }

        let mut right = forward.cross(up).normalize();
        if right.length() < EPSILON {
            let alt = if forward.y.abs() < 0.9 {
                Vec3::UP
            } else {
                Vec3::X
            };
            right = forward.cross(alt).normalize();
        }

        let new_up = right.cross(forward).normalize();

        Mat4([
            right.x,
            right.y,
            right.z,
            -right.dot(eye),
            new_up.x,
            new_up.y,
            new_up.z,
            -new_up.dot(eye),
            -forward.x,
            -forward.y,
            -forward.z,
            forward.dot(eye),
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(&rhs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
