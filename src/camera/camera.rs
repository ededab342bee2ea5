use crate::foundation::core::Rgb;
use crate::foundation::math::{Mat4, Vec3};

/// Pinhole camera. `fov` is the vertical field of view in radians.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -5.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fov: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f64) -> Mat4 {
        Mat4::perspective(self.fov, aspect, self.near, self.far)
    }

    /// Projection composed with view, ready to map world points to NDC.
    pub fn view_projection(&self, aspect: f64) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

/// Point light.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f64,
}

impl Light {
    pub const fn new(position: Vec3, color: Rgb, intensity: f64) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/camera.rs"]
mod tests;
