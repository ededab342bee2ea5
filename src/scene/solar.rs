use crate::foundation::core::Rgb;
use crate::foundation::math::Vec3;
use crate::render::renderer::Renderer;
use crate::scene::celestial::{BodyPaint, BodySpec, CelestialBody, Planet, PlanetSpec};
use crate::scene::model::{RenderCtx, SceneObject};
use crate::scene::objects::{OrbitRing, StarField};

/// Sun at the origin, orbit guides, planets and a backdrop of stars.
///
/// Draw order is stars, sun, orbits, then planets.
pub struct SolarSystem {
    sun: CelestialBody,
    planets: Vec<Planet>,
    orbits: Vec<OrbitRing>,
    stars: Option<StarField>,
}

impl SolarSystem {
    pub const STAR_COUNT: usize = 50;
    pub const STAR_DISTANCE: f64 = 20.0;

    /// Sun and star field, no planets.
    pub fn new() -> Self {
        Self {
            sun: CelestialBody::new(sun_spec()),
            planets: Vec::new(),
            orbits: Vec::new(),
            stars: Some(StarField::new(Self::STAR_COUNT, Self::STAR_DISTANCE)),
        }
    }

    /// The eight-planet system from [`default_catalog`].
    pub fn with_default_planets() -> Self {
        let mut system = Self::new();
        for spec in default_catalog() {
            system.add_planet(spec);
        }
        system
    }

    pub fn without_stars(mut self) -> Self {
        self.stars = None;
        self
    }

    /// Add a planet and its orbit guide.
    pub fn add_planet(&mut self, spec: PlanetSpec) {
        self.orbits
            .push(OrbitRing::new(spec.orbit_radius, OrbitRing::DEFAULT_COLOR));
        self.planets.push(Planet::new(spec));
    }

    pub fn sun(&self) -> &CelestialBody {
        &self.sun
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn orbits(&self) -> &[OrbitRing] {
        &self.orbits
    }

    pub fn stars(&self) -> Option<&StarField> {
        self.stars.as_ref()
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneObject for SolarSystem {
    fn render(&self, renderer: &mut Renderer<'_>, ctx: &RenderCtx<'_>) {
        if let Some(stars) = &self.stars {
            stars.render(renderer, ctx);
        }
        self.sun.render(renderer, ctx);
        for orbit in &self.orbits {
            orbit.render(renderer, ctx);
        }
        for planet in &self.planets {
            planet.render(renderer, ctx);
        }
    }
}

fn sun_spec() -> BodySpec {
    BodySpec {
        name: "Sun".to_string(),
        label: "Sun".to_string(),
        radius: 0.8,
        position: Vec3::ZERO,
        paint: BodyPaint::Gradient {
            near: Rgb::new(1.0, 0.92, 0.23),
            far: Rgb::new(1.0, 0.6, 0.0),
        },
        rotation_speed: 1.0,
    }
}

fn planet(
    name: &str,
    radius: f64,
    orbit_radius: f64,
    orbit_speed: f64,
    rotation_speed: f64,
    near: Rgb,
    far: Rgb,
) -> PlanetSpec {
    PlanetSpec {
        name: name.to_string(),
        label: name.to_string(),
        radius,
        orbit_radius,
        orbit_speed,
        rotation_speed,
        paint: BodyPaint::Gradient { near, far },
        moon: false,
        rings: Vec::new(),
    }
}

/// Mercury through Neptune, innermost first.
pub fn default_catalog() -> Vec<PlanetSpec> {
    let rgb = Rgb::new;
    let earth = PlanetSpec {
        moon: true,
        ..planet("Earth", 0.28, 4.0, 2.0, 12.0, rgb(0.25, 0.59, 0.95), rgb(0.13, 0.59, 0.95))
    };
    let saturn = PlanetSpec {
        rings: vec![rgb(1.0, 0.95, 0.4), rgb(0.98, 0.89, 0.2), rgb(0.96, 0.84, 0.1)],
        ..planet("Saturn", 0.50, 9.0, 0.6, 13.0, rgb(1.0, 0.92, 0.23), rgb(0.98, 0.84, 0.0))
    };

    vec![
        planet("Mercury", 0.15, 2.0, 4.0, 10.0, rgb(0.62, 0.62, 0.62), rgb(0.38, 0.38, 0.38)),
        planet("Venus", 0.25, 3.0, 3.0, 8.0, rgb(1.0, 0.92, 0.23), rgb(1.0, 0.76, 0.03)),
        earth,
        planet("Mars", 0.20, 5.0, 1.5, 11.0, rgb(1.0, 0.34, 0.13), rgb(0.96, 0.26, 0.21)),
        planet("Jupiter", 0.60, 7.0, 0.8, 15.0, rgb(1.0, 0.6, 0.0), rgb(0.96, 0.49, 0.0)),
        saturn,
        planet("Uranus", 0.35, 11.0, 0.4, 9.0, rgb(0.0, 0.74, 0.83), rgb(0.0, 0.59, 0.65)),
        planet("Neptune", 0.33, 12.5, 0.3, 8.0, rgb(0.25, 0.32, 0.71), rgb(0.16, 0.25, 0.63)),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/scene/solar.rs"]
mod tests;
