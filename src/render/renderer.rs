use std::fmt;
use std::str::FromStr;

use kurbo::Point;

use crate::camera::camera::{Camera, Light};
use crate::foundation::core::Rgb;
use crate::foundation::error::OrreryError;
use crate::foundation::math::{Mat4, Vec3};
use crate::geometry::mesh::{Mesh, Triangle};
use crate::render::surface::{DrawSurface, LineJoin, TextStyle, polygon};

/// Ambient term added to every lit channel.
pub const AMBIENT: f64 = 0.2;
/// Stroke width for wireframe edges, in pixels.
pub const WIREFRAME_LINE_WIDTH: f64 = 1.5;

/// How [`Renderer::draw_mesh`] turns triangles into pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Stroked triangle outlines, no depth ordering.
    #[default]
    Wireframe,
    /// Depth-sorted fills in a single color.
    Flat,
    /// Depth-sorted, backface-culled fills lit per triangle.
    Shaded,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wireframe => "wireframe",
            Self::Flat => "flat",
            Self::Shaded => "shaded",
        })
    }
}

impl FromStr for RenderMode {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wireframe" => Ok(Self::Wireframe),
            "flat" => Ok(Self::Flat),
            "shaded" => Ok(Self::Shaded),
            other => Err(OrreryError::validation(format!(
                "unknown render mode '{other}' (expected wireframe, flat or shaded)"
            ))),
        }
    }
}

/// Projected point: pixel coordinates plus NDC depth (`-1` near plane, `1` far plane).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ScreenPoint {
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }

    fn in_depth_range(self) -> bool {
        (-1.0..=1.0).contains(&self.z)
    }
}

/// Styling for [`Renderer::draw_label`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LabelStyle {
    pub color: Rgb,
    /// Size at the near plane; labels shrink by up to 30% with depth.
    pub size: f64,
    pub bold: bool,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            size: 20.0,
            bold: true,
        }
    }
}

impl LabelStyle {
    pub fn with_color(color: Rgb) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

/// View and projection for one draw call.
#[derive(Clone, Copy, Debug)]
struct Projector {
    view: Mat4,
    projection: Mat4,
    width: f64,
    height: f64,
}

impl Projector {
    fn project(&self, v: Vec3) -> ScreenPoint {
        let p = self
            .projection
            .transform_point(self.view.transform_point(v));
        ScreenPoint {
            x: (p.x + 1.0) * self.width / 2.0,
            y: (1.0 - p.y) * self.height / 2.0,
            z: p.z,
        }
    }

    fn project_triangle(&self, tri: &Triangle) -> [ScreenPoint; 3] {
        [
            self.project(tri.v0),
            self.project(tri.v1),
            self.project(tri.v2),
        ]
    }
}

struct DepthTriangle {
    depth: f64,
    points: [Point; 3],
    color: Rgb,
}

/// Software 3D renderer emitting 2D draw calls into a borrowed [`DrawSurface`].
///
/// Meshes are drawn with the painter's algorithm: filled modes sort triangles by average NDC
/// depth and paint the farthest first. There is no depth buffer.
pub struct Renderer<'s> {
    surface: &'s mut dyn DrawSurface,
    pub camera: Camera,
    pub mode: RenderMode,
    antialias: bool,
}

impl<'s> Renderer<'s> {
    pub fn new(surface: &'s mut dyn DrawSurface) -> Self {
        surface.set_antialias(true);
        Self {
            surface,
            camera: Camera::default(),
            mode: RenderMode::default(),
            antialias: true,
        }
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn aspect(&self) -> f64 {
        f64::from(self.width()) / f64::from(self.height())
    }

    pub fn surface(&mut self) -> &mut dyn DrawSurface {
        &mut *self.surface
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    pub fn set_antialias(&mut self, enabled: bool) {
        self.antialias = enabled;
        self.surface.set_antialias(enabled);
    }

    fn projector(&self) -> Projector {
        Projector {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(self.aspect()),
            width: f64::from(self.width()),
            height: f64::from(self.height()),
        }
    }

    pub fn project_to_screen(&self, v: Vec3) -> ScreenPoint {
        self.projector().project(v)
    }

    /// Ambient plus Lambertian diffuse from every light, modulating `base` and clamped to 1.
    ///
    /// With no lights, `base` is returned unchanged.
    pub fn calculate_lighting(lights: &[Light], position: Vec3, normal: Vec3, base: Rgb) -> Rgb {
        if lights.is_empty() {
            return base;
        }

        let mut diffuse = Rgb::BLACK;
        for light in lights {
            let dir = (light.position - position).normalize();
            let k = normal.dot(dir).max(0.0) * light.intensity;
            diffuse.r += light.color.r * k;
            diffuse.g += light.color.g * k;
            diffuse.b += light.color.b * k;
        }

        Rgb::new(
            ((AMBIENT + diffuse.r) * base.r).min(1.0),
            ((AMBIENT + diffuse.g) * base.g).min(1.0),
            ((AMBIENT + diffuse.b) * base.b).min(1.0),
        )
    }

    pub fn clear(&mut self, color: Rgb) {
        self.surface.clear(color);
    }

    pub fn draw_mesh(&mut self, mesh: &Mesh, color: Rgb, lights: &[Light]) {
        if mesh.triangles.is_empty() {
            return;
        }
        match self.mode {
            RenderMode::Wireframe => self.draw_wireframe(mesh, color),
            RenderMode::Flat => {
                let tris = self.visible_sorted(mesh, |_, _| Some(color));
                self.fill_sorted(&tris);
            }
            RenderMode::Shaded => {
                let eye = self.camera.position;
                let tris = self.visible_sorted(mesh, |tri, _| {
                    let normal = tri.normal();
                    let center = tri.center();
                    if normal.dot((eye - center).normalize()) < 0.0 {
                        return None;
                    }
                    Some(Self::calculate_lighting(lights, center, normal, color))
                });
                self.fill_sorted(&tris);
            }
        }
    }

    /// Fill with a per-triangle color blended from `near` to `far` by average depth.
    /// Unlit and never backface-culled, regardless of [`Renderer::mode`].
    pub fn draw_mesh_with_gradient(&mut self, mesh: &Mesh, near: Rgb, far: Rgb) {
        if mesh.triangles.is_empty() {
            return;
        }
        let tris = self.visible_sorted(mesh, |_, depth| Some(near.lerp(far, (depth + 1.0) / 2.0)));
        self.fill_sorted(&tris);
    }

    fn draw_wireframe(&mut self, mesh: &Mesh, color: Rgb) {
        let projector = self.projector();

        self.surface.save();
        self.surface.set_source_rgb(color);
        self.surface.set_line_width(WIREFRAME_LINE_WIDTH);
        self.surface.set_line_join(LineJoin::Round);
        for tri in &mesh.triangles {
            let pts = projector.project_triangle(tri);
            if !pts.iter().all(|p| p.in_depth_range()) {
                continue;
            }
            let path = polygon(&pts.map(ScreenPoint::to_point));
            self.surface.stroke_path(&path);
        }
        self.surface.restore();
    }

    /// Project, cull behind the near plane, color, and order farthest-first.
    ///
    /// `shade` sees the world-space triangle and its average depth and may drop it by
    /// returning `None`.
    fn visible_sorted(
        &self,
        mesh: &Mesh,
        shade: impl Fn(&Triangle, f64) -> Option<Rgb>,
    ) -> Vec<DepthTriangle> {
        let projector = self.projector();
        let mut out = Vec::with_capacity(mesh.triangles.len());
        for tri in &mesh.triangles {
            let pts = projector.project_triangle(tri);
            if pts.iter().any(|p| p.z < -1.0) {
                continue;
            }
            let depth = (pts[0].z + pts[1].z + pts[2].z) / 3.0;
            let Some(color) = shade(tri, depth) else {
                continue;
            };
            out.push(DepthTriangle {
                depth,
                points: pts.map(ScreenPoint::to_point),
                color,
            });
        }
        // Stable, so equal depths keep mesh order.
        out.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        out
    }

    fn fill_sorted(&mut self, tris: &[DepthTriangle]) {
        self.surface.save();
        for t in tris {
            self.surface.set_source_rgb(t.color);
            self.surface.fill_path(&polygon(&t.points));
        }
        self.surface.restore();
    }

    /// Draw `text` centered above the projected `position`.
    ///
    /// Skipped when the point falls outside the open depth range `(-1, 1)` or the surface
    /// cannot lay out text.
    pub fn draw_label(&mut self, position: Vec3, text: &str, style: &LabelStyle) {
        let p = self.project_to_screen(position);
        if !(p.z > -1.0 && p.z < 1.0) {
            return;
        }

        let depth = (p.z + 1.0) / 2.0;
        let text_style = TextStyle {
            size: style.size * (1.0 - depth * 0.3),
            bold: style.bold,
        };
        let Some(extents) = self.surface.measure_text(text, &text_style) else {
            return;
        };

        let origin = Point::new(p.x - extents.width / 2.0, p.y - extents.height);
        self.surface.save();
        self.surface.set_source_rgba(style.color, 1.0);
        self.surface.draw_text(origin, text, &text_style);
        self.surface.restore();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
