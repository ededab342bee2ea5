use std::f64::consts::{PI, TAU};
use std::fmt;

use crate::animation::ease::Ease;
use crate::camera::camera::Camera;
use crate::foundation::math::{Mat4, Vec3};

/// Time-parameterized camera motion, sampled at normalized time `t` in `[0, 1]`.
pub trait CameraPath: Send + Sync {
    fn position(&self, t: f64) -> Vec3;
    fn target(&self, t: f64) -> Vec3;
    fn fov(&self, t: f64) -> f64;
}

/// Copy a path sample into `camera`. `up`, `near` and `far` are left untouched.
pub fn apply_camera_path(camera: &mut Camera, path: &dyn CameraPath, t: f64) {
    camera.position = path.position(t);
    camera.target = path.target(t);
    camera.fov = path.fov(t);
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraKeyframe {
    /// Normalized time in `[0, 1]`.
    pub time: f64,
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f64,
}

impl CameraKeyframe {
    pub const fn new(time: f64, position: Vec3, target: Vec3, fov: f64) -> Self {
        Self {
            time,
            position,
            target,
            fov,
        }
    }
}

/// Piecewise interpolation between keyframes sorted by ascending `time`.
///
/// Outside the keyframe range the nearest end keyframe is held. Each bracket is remapped
/// through `ease` before interpolating.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframePath {
    pub keyframes: Vec<CameraKeyframe>,
    #[serde(default)]
    pub ease: Ease,
}

enum Sample<'a> {
    Empty,
    At(&'a CameraKeyframe),
    Between(&'a CameraKeyframe, &'a CameraKeyframe, f64),
}

impl KeyframePath {
    pub fn new(keyframes: Vec<CameraKeyframe>) -> Self {
        Self {
            keyframes,
            ease: Ease::default(),
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    fn sample(&self, t: f64) -> Sample<'_> {
        let kfs = &self.keyframes;
        let (Some(first), Some(last)) = (kfs.first(), kfs.last()) else {
            return Sample::Empty;
        };
        if kfs.len() == 1 || t < first.time || t.is_nan() {
            return Sample::At(first);
        }
        if t > last.time {
            return Sample::At(last);
        }

        let Some(pair) = kfs
            .windows(2)
            .find(|w| w[0].time <= t && t <= w[1].time)
        else {
            return Sample::At(last);
        };
        let (a, b) = (&pair[0], &pair[1]);
        if t == b.time {
            return Sample::At(b);
        }
        if t == a.time {
            return Sample::At(a);
        }

        let span = b.time - a.time;
        let local = if span > 0.0 { (t - a.time) / span } else { 1.0 };
        let s = self.ease.apply(local);
        if s <= 0.0 {
            Sample::At(a)
        } else if s >= 1.0 {
            Sample::At(b)
        } else {
            Sample::Between(a, b, s)
        }
    }
}

impl CameraPath for KeyframePath {
    fn position(&self, t: f64) -> Vec3 {
        match self.sample(t) {
            Sample::Empty => Vec3::ZERO,
            Sample::At(kf) => kf.position,
            Sample::Between(a, b, s) => Vec3::lerp(a.position, b.position, s),
        }
    }

    fn target(&self, t: f64) -> Vec3 {
        match self.sample(t) {
            Sample::Empty => Vec3::ZERO,
            Sample::At(kf) => kf.target,
            Sample::Between(a, b, s) => Vec3::lerp(a.target, b.target, s),
        }
    }

    fn fov(&self, t: f64) -> f64 {
        match self.sample(t) {
            Sample::Empty => 0.0,
            Sample::At(kf) => kf.fov,
            Sample::Between(a, b, s) => a.fov + (b.fov - a.fov) * s,
        }
    }
}

/// Time-varying offset applied on top of an orbit's base radius or height.
pub type OrbitOffset = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// Circular orbit around `center` in a plane parallel to XZ, always looking at `center`.
pub struct OrbitPath {
    pub center: Vec3,
    pub radius: f64,
    pub height: f64,
    /// Revolutions over the whole path.
    pub speed: f64,
    pub fov: f64,
    pub height_offset: Option<OrbitOffset>,
    pub radius_offset: Option<OrbitOffset>,
}

impl OrbitPath {
    pub fn new(center: Vec3, radius: f64, height: f64, speed: f64, fov: f64) -> Self {
        Self {
            center,
            radius,
            height,
            speed,
            fov,
            height_offset: None,
            radius_offset: None,
        }
    }

    pub fn with_height_offset(mut self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.height_offset = Some(Box::new(f));
        self
    }

    pub fn with_radius_offset(mut self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.radius_offset = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for OrbitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrbitPath")
            .field("center", &self.center)
            .field("radius", &self.radius)
            .field("height", &self.height)
            .field("speed", &self.speed)
            .field("fov", &self.fov)
            .field("height_offset", &self.height_offset.is_some())
            .field("radius_offset", &self.radius_offset.is_some())
            .finish()
    }
}

impl CameraPath for OrbitPath {
    fn position(&self, t: f64) -> Vec3 {
        let angle = t * self.speed * TAU;
        let radius = self.radius + self.radius_offset.as_ref().map_or(0.0, |f| f(t));
        let height = self.height + self.height_offset.as_ref().map_or(0.0, |f| f(t));
        let (sin, cos) = angle.sin_cos();
        self.center + Vec3::new(radius * cos, height, radius * sin)
    }

    fn target(&self, _t: f64) -> Vec3 {
        self.center
    }

    fn fov(&self, _t: f64) -> f64 {
        self.fov
    }
}

/// Camera swinging around `center` on all three axes at once.
///
/// The start offset `(0, 0, radius)` and the up vector are rotated about X, then Y, then Z by
/// `t` times the per-axis half-turn rates, so the horizon rolls with the camera.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TumblePath {
    pub center: Vec3,
    pub radius: f64,
    /// Half turns about X, Y and Z over the whole path.
    pub half_turns: [f64; 3],
    pub fov: f64,
}

impl Default for TumblePath {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            radius: 20.0,
            half_turns: [1.5, 2.0, 1.0],
            fov: 0.75,
        }
    }
}

impl TumblePath {
    fn rotation(&self, t: f64) -> Mat4 {
        let [x, y, z] = self.half_turns.map(|h| t * h * PI);
        Mat4::rotation_z(z) * Mat4::rotation_y(y) * Mat4::rotation_x(x)
    }

    pub fn up(&self, t: f64) -> Vec3 {
        self.rotation(t).transform_point(Vec3::UP)
    }

    /// Like [`apply_camera_path`], but also rolls `camera.up`.
    pub fn apply(&self, camera: &mut Camera, t: f64) {
        apply_camera_path(camera, self, t);
        camera.up = self.up(t);
    }
}

impl CameraPath for TumblePath {
    fn position(&self, t: f64) -> Vec3 {
        self.center + self.rotation(t).transform_point(Vec3::new(0.0, 0.0, self.radius))
    }

    fn target(&self, _t: f64) -> Vec3 {
        self.center
    }

    fn fov(&self, _t: f64) -> f64 {
        self.fov
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/path.rs"]
mod tests;
