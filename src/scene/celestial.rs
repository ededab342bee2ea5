use std::f64::consts::PI;

use crate::foundation::core::Rgb;
use crate::foundation::math::{Mat4, Vec3};
use crate::geometry::mesh::Mesh;
use crate::geometry::primitives::{sphere, torus};
use crate::render::renderer::{LabelStyle, Renderer};
use crate::scene::model::{RenderCtx, SceneObject};

/// Mesh fill for a body: lit flat color, or an unlit near-to-far depth gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BodyPaint {
    Solid { color: Rgb },
    Gradient { near: Rgb, far: Rgb },
}

impl BodyPaint {
    fn draw(&self, renderer: &mut Renderer<'_>, mesh: &Mesh, ctx: &RenderCtx<'_>) {
        match *self {
            Self::Solid { color } => renderer.draw_mesh(mesh, color, ctx.lights),
            Self::Gradient { near, far } => renderer.draw_mesh_with_gradient(mesh, near, far),
        }
    }
}

/// Stationary body such as a sun.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BodySpec {
    pub name: String,
    pub label: String,
    pub radius: f64,
    pub position: Vec3,
    pub paint: BodyPaint,
    /// Spin rate, in half turns per unit of scene time.
    pub rotation_speed: f64,
}

pub struct CelestialBody {
    spec: BodySpec,
    mesh: Mesh,
}

impl CelestialBody {
    pub fn new(spec: BodySpec) -> Self {
        let mesh = sphere(spec.radius, 20, 20);
        Self { spec, mesh }
    }

    pub fn spec(&self) -> &BodySpec {
        &self.spec
    }

    pub fn label_position(&self) -> Vec3 {
        self.spec.position + Vec3::new(0.0, self.spec.radius + 0.5, 0.0)
    }
}

impl SceneObject for CelestialBody {
    fn render(&self, renderer: &mut Renderer<'_>, ctx: &RenderCtx<'_>) {
        let mut transform = Mat4::translation_vec(self.spec.position);
        if self.spec.rotation_speed != 0.0 {
            transform = transform * Mat4::rotation_y(ctx.t * self.spec.rotation_speed * PI);
        }
        self.spec
            .paint
            .draw(renderer, &self.mesh.transform(&transform), ctx);
        renderer.draw_label(
            self.label_position(),
            &self.spec.label,
            &LabelStyle::default(),
        );
    }
}

/// Orbiting planet in the XZ plane.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlanetSpec {
    pub name: String,
    pub label: String,
    pub radius: f64,
    pub orbit_radius: f64,
    /// Half revolutions per unit of scene time.
    pub orbit_speed: f64,
    /// Half turns of spin per unit of scene time.
    pub rotation_speed: f64,
    pub paint: BodyPaint,
    #[serde(default)]
    pub moon: bool,
    /// One ring per color, innermost first.
    #[serde(default)]
    pub rings: Vec<Rgb>,
}

pub struct Planet {
    spec: PlanetSpec,
    body: Mesh,
    moon: Option<Mesh>,
    rings: Vec<Mesh>,
}

impl Planet {
    pub const MOON_COLOR: Rgb = Rgb::gray(0.95);

    pub fn new(spec: PlanetSpec) -> Self {
        let r = spec.radius;
        let body = sphere(r, 16, 16);
        let moon = spec.moon.then(|| sphere(r * 0.3, 10, 10));
        let rings = (0..spec.rings.len())
            .map(|i| torus(r * 1.4 + i as f64 * r * 0.3, 0.02, 48, 6))
            .collect();
        Self {
            spec,
            body,
            moon,
            rings,
        }
    }

    pub fn spec(&self) -> &PlanetSpec {
        &self.spec
    }

    /// Orbit position at scene time `t`.
    pub fn position(&self, t: f64) -> Vec3 {
        let angle = t * self.spec.orbit_speed * PI;
        let (sin, cos) = angle.sin_cos();
        Vec3::new(self.spec.orbit_radius * cos, 0.0, self.spec.orbit_radius * sin)
    }

    /// Moon position around a planet at `center`: four revolutions per unit time with a
    /// slight vertical bob.
    pub fn moon_position(&self, center: Vec3, t: f64) -> Vec3 {
        let angle = t * 8.0 * PI;
        let (sin, cos) = angle.sin_cos();
        let orbit = self.spec.radius * 2.0;
        center + Vec3::new(orbit * cos, sin * 0.1, orbit * sin)
    }
}

impl SceneObject for Planet {
    fn render(&self, renderer: &mut Renderer<'_>, ctx: &RenderCtx<'_>) {
        let t = ctx.t;
        let pos = self.position(t);

        let spin = Mat4::rotation_y(t * self.spec.rotation_speed * PI);
        let body = self.body.transform(&(Mat4::translation_vec(pos) * spin));
        self.spec.paint.draw(renderer, &body, ctx);

        renderer.draw_label(
            pos + Vec3::new(0.0, self.spec.radius + 0.3, 0.0),
            &self.spec.label,
            &LabelStyle::default(),
        );

        if let Some(moon) = &self.moon {
            let at = Mat4::translation_vec(self.moon_position(pos, t));
            renderer.draw_mesh(&moon.transform(&at), Self::MOON_COLOR, ctx.lights);
        }

        let tilt = Mat4::translation_vec(pos)
            * Mat4::rotation_x(PI / 2.0 + 0.3)
            * Mat4::rotation_y(t * PI);
        for (ring, color) in self.rings.iter().zip(&self.spec.rings) {
            renderer.draw_mesh(&ring.transform(&tilt), *color, ctx.lights);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/celestial.rs"]
mod tests;
