use kurbo::Rect;

use crate::foundation::core::Rgb;
use crate::render::renderer::Renderer;
use crate::scene::model::Background;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SolidBackground {
    pub color: Rgb,
}

impl SolidBackground {
    pub fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl Background for SolidBackground {
    fn render(&self, renderer: &mut Renderer<'_>, _t: f64) {
        let (w, h) = (f64::from(renderer.width()), f64::from(renderer.height()));
        let surface = renderer.surface();
        surface.save();
        surface.set_source_rgb(self.color);
        surface.fill_rect(Rect::new(0.0, 0.0, w, h));
        surface.restore();
    }
}

/// Vertical gradient drawn as `steps` horizontal bands from `top` to `bottom`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientBackground {
    pub top: Rgb,
    pub bottom: Rgb,
    pub steps: u32,
    /// Drift both ends slightly with `sin(t·π)`.
    pub animated: bool,
}

impl GradientBackground {
    pub const DEFAULT_STEPS: u32 = 100;

    pub fn new(top: Rgb, bottom: Rgb) -> Self {
        Self {
            top,
            bottom,
            steps: Self::DEFAULT_STEPS,
            animated: false,
        }
    }

    pub fn animated(mut self) -> Self {
        self.animated = true;
        self
    }

    /// End colors at time `t`, after the optional animation shift.
    pub fn colors_at(&self, t: f64) -> (Rgb, Rgb) {
        let (mut top, mut bottom) = (self.top, self.bottom);
        if self.animated {
            let shift = (t * std::f64::consts::PI).sin() * 0.05;
            top.r += shift;
            top.g += shift;
            top.b += shift * 0.5;
            bottom.r += shift * 0.5;
            bottom.g += shift * 0.5;
            bottom.b += shift * 0.3;
        }
        (top, bottom)
    }
}

impl Background for GradientBackground {
    fn render(&self, renderer: &mut Renderer<'_>, t: f64) {
        let (w, h) = (f64::from(renderer.width()), f64::from(renderer.height()));
        let (top, bottom) = self.colors_at(t);
        let surface = renderer.surface();

        surface.save();
        surface.set_source_rgb(top);
        surface.fill_rect(Rect::new(0.0, 0.0, w, h));

        let steps = f64::from(self.steps);
        let band = h / steps;
        for i in 0..self.steps {
            let ratio = f64::from(i) / steps;
            let y = f64::from(i) * h / steps;
            surface.set_source_rgb(top.lerp(bottom, ratio));
            surface.fill_rect(Rect::new(0.0, y, w, y + band));
        }
        surface.restore();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/background.rs"]
mod tests;
