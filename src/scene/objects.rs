use std::f64::consts::PI;

use crate::foundation::core::Rgb;
use crate::foundation::math::{Mat4, Vec3};
use crate::geometry::mesh::Mesh;
use crate::geometry::primitives::{cone, cylinder, sphere, torus};
use crate::render::renderer::{LabelStyle, Renderer};
use crate::scene::model::{RenderCtx, SceneObject};

/// Text anchored to a world position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Label3D {
    pub position: Vec3,
    pub text: String,
    pub style: LabelStyle,
}

impl Label3D {
    pub fn new(position: Vec3, text: impl Into<String>, color: Rgb) -> Self {
        Self {
            position,
            text: text.into(),
            style: LabelStyle::with_color(color),
        }
    }
}

impl SceneObject for Label3D {
    fn render(&self, renderer: &mut Renderer<'_>, _ctx: &RenderCtx<'_>) {
        renderer.draw_label(self.position, &self.text, &self.style);
    }
}

struct Axis {
    shaft: Mesh,
    head: Mesh,
    color: Rgb,
    label: Label3D,
}

/// X/Y/Z axes from the origin, each a thin cylinder capped with a cone and an optional label.
pub struct CoordinateSystem {
    pub length: f64,
    pub thickness: f64,
    pub show_labels: bool,
    axes: [Axis; 3],
}

impl CoordinateSystem {
    pub const DEFAULT_THICKNESS: f64 = 0.03;

    pub fn new(length: f64) -> Self {
        Self::with_thickness(length, Self::DEFAULT_THICKNESS)
    }

    pub fn with_thickness(length: f64, thickness: f64) -> Self {
        let axis = |end: Vec3, color: Rgb, name: &str| {
            build_axis(length, thickness, end, color, name)
        };
        Self {
            length,
            thickness,
            show_labels: true,
            axes: [
                axis(Vec3::new(length, 0.0, 0.0), Rgb::new(1.0, 0.3, 0.3), "X"),
                axis(Vec3::new(0.0, length, 0.0), Rgb::new(0.3, 1.0, 0.3), "Y"),
                axis(Vec3::new(0.0, 0.0, length), Rgb::new(0.3, 0.3, 1.0), "Z"),
            ],
        }
    }
}

fn build_axis(length: f64, thickness: f64, end: Vec3, color: Rgb, name: &str) -> Axis {
    let dir = end.normalize();
    let rot_axis = Vec3::UP.cross(dir);
    let angle = Vec3::UP.dot(dir).clamp(-1.0, 1.0).acos();
    let rotation = if rot_axis.length() > 0.001 {
        Mat4::rotation_axis_angle(rot_axis.normalize(), angle)
    } else {
        Mat4::IDENTITY
    };

    let shaft = cylinder(thickness, end.length(), 8)
        .transform(&(Mat4::translation_vec(end * 0.5) * rotation));
    let head = cone(thickness * 4.0, length * 0.05, 8)
        .transform(&(Mat4::translation_vec(end) * rotation));

    Axis {
        shaft,
        head,
        color,
        label: Label3D::new(end * 1.15, name, color),
    }
}

impl SceneObject for CoordinateSystem {
    fn render(&self, renderer: &mut Renderer<'_>, ctx: &RenderCtx<'_>) {
        for axis in &self.axes {
            renderer.draw_mesh(&axis.shaft, axis.color, ctx.lights);
            renderer.draw_mesh(&axis.head, axis.color, ctx.lights);
            if self.show_labels {
                axis.label.render(renderer, ctx);
            }
        }
    }
}

/// Thin torus in the XZ plane marking an orbit.
pub struct OrbitRing {
    pub radius: f64,
    pub color: Rgb,
    mesh: Mesh,
}

impl OrbitRing {
    pub const THICKNESS: f64 = 0.01;
    pub const SEGMENTS: u32 = 64;
    pub const DEFAULT_COLOR: Rgb = Rgb::new(0.26, 0.27, 0.29);

    pub fn new(radius: f64, color: Rgb) -> Self {
        Self {
            radius,
            color,
            mesh: torus(radius, Self::THICKNESS, Self::SEGMENTS, 4),
        }
    }
}

impl SceneObject for OrbitRing {
    fn render(&self, renderer: &mut Renderer<'_>, ctx: &RenderCtx<'_>) {
        renderer.draw_mesh(&self.mesh, self.color, ctx.lights);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StarSpec {
    pub position: Vec3,
    pub radius: f64,
    pub color: Rgb,
    pub brightness: f64,
    /// Twinkle phase in radians; `None` keeps the star steady.
    pub twinkle_phase: Option<f64>,
}

impl StarSpec {
    pub fn new(position: Vec3, radius: f64, color: Rgb) -> Self {
        Self {
            position,
            radius,
            color,
            brightness: 1.0,
            twinkle_phase: None,
        }
    }
}

/// Small sphere whose brightness can oscillate over time.
pub struct Star {
    spec: StarSpec,
    mesh: Mesh,
}

impl Star {
    pub fn new(spec: StarSpec) -> Self {
        let mesh = sphere(spec.radius, 6, 6).transform(&Mat4::translation_vec(spec.position));
        Self { spec, mesh }
    }

    pub fn spec(&self) -> &StarSpec {
        &self.spec
    }

    /// `brightness · (0.7 + 0.3·sin(4πt + phase))` when twinkling, else `brightness`.
    pub fn brightness_at(&self, t: f64) -> f64 {
        match self.spec.twinkle_phase {
            Some(phase) => self.spec.brightness * (0.7 + 0.3 * (t * 4.0 * PI + phase).sin()),
            None => self.spec.brightness,
        }
    }
}

impl SceneObject for Star {
    fn render(&self, renderer: &mut Renderer<'_>, ctx: &RenderCtx<'_>) {
        let color = self.spec.color.scale(self.brightness_at(ctx.t));
        renderer.draw_mesh(&self.mesh, color, ctx.lights);
    }
}

/// Deterministic shell of twinkling stars.
pub struct StarField {
    pub stars: Vec<Star>,
}

impl StarField {
    const PALETTE: [Rgb; 3] = [
        Rgb::new(1.0, 1.0, 1.0),
        Rgb::new(0.8, 0.9, 1.0),
        Rgb::new(1.0, 0.95, 0.7),
    ];

    /// `count` stars spread around the origin at `distance` plus up to 18 units of jitter.
    pub fn new(count: usize, distance: f64) -> Self {
        let stars = (0..count)
            .map(|i| {
                let fi = i as f64;
                let (a1, a2) = (fi * 2.4, fi * 1.7);
                let dist = distance + (i % 10) as f64 * 2.0;
                let position = Vec3::new(
                    dist * a1.cos() * a2.sin(),
                    dist * a1.sin() * 0.5,
                    dist * a1.cos() * a2.cos(),
                );
                let mut spec = StarSpec::new(position, 0.05, Self::PALETTE[i % 3]);
                spec.twinkle_phase = Some(fi);
                Star::new(spec)
            })
            .collect();
        Self { stars }
    }
}

impl SceneObject for StarField {
    fn render(&self, renderer: &mut Renderer<'_>, ctx: &RenderCtx<'_>) {
        for star in &self.stars {
            star.render(renderer, ctx);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/objects.rs"]
mod tests;
