use crate::camera::camera::Light;
use crate::render::renderer::Renderer;

/// Per-frame inputs handed to every [`SceneObject`].
#[derive(Clone, Copy, Debug)]
pub struct RenderCtx<'a> {
    /// Scene time. Objects treat it as an unbounded phase.
    pub t: f64,
    pub lights: &'a [Light],
}

/// Anything that can draw itself at a point in time.
pub trait SceneObject: Send + Sync {
    fn render(&self, renderer: &mut Renderer<'_>, ctx: &RenderCtx<'_>);
}

/// Full-viewport fill drawn before any object.
pub trait Background: Send + Sync {
    fn render(&self, renderer: &mut Renderer<'_>, t: f64);
}

/// Ordered object list plus the lights and background they are drawn with.
#[derive(Default)]
pub struct Scene {
    pub objects: Vec<Box<dyn SceneObject>>,
    pub background: Option<Box<dyn Background>>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: impl SceneObject + 'static) {
        self.objects.push(Box::new(object));
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn set_background(&mut self, background: impl Background + 'static) {
        self.background = Some(Box::new(background));
    }

    /// Background first, then objects in insertion order.
    pub fn render(&self, renderer: &mut Renderer<'_>, t: f64) {
        if let Some(bg) = &self.background {
            bg.render(renderer, t);
        }
        let ctx = RenderCtx {
            t,
            lights: &self.lights,
        };
        for obj in &self.objects {
            obj.render(renderer, &ctx);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
