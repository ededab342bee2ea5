use std::path::Path;

use kurbo::{BezPath, Point, Rect};

use crate::foundation::core::Rgb;
use crate::foundation::error::OrreryResult;

/// How stroked segments meet at corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Font selection for [`DrawSurface::draw_text`] and [`DrawSurface::measure_text`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f64,
    pub bold: bool,
}

/// Pixel extents of laid-out text.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
}

/// Mutable paint state captured by [`DrawSurface::save`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaintState {
    pub color: Rgb,
    pub alpha: f64,
    pub line_width: f64,
    pub line_join: LineJoin,
    pub antialias: bool,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            alpha: 1.0,
            line_width: 2.0,
            line_join: LineJoin::Miter,
            antialias: true,
        }
    }
}

impl PaintState {
    pub fn rgba8(&self) -> [u8; 4] {
        self.color.to_rgba8(self.alpha)
    }
}

/// Current paint state plus the stack of saved states.
///
/// An unmatched `restore` is ignored.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: PaintState,
    saved: Vec<PaintState>,
}

impl StateStack {
    pub fn current(&self) -> &PaintState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut PaintState {
        &mut self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        if let Some(prev) = self.saved.pop() {
            self.current = prev;
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// 2D drawing target the 3D renderer emits into.
///
/// Coordinates are pixels with the origin at the top-left corner and `y` growing downwards.
/// Drawing calls never fail; only [`DrawSurface::write_png`] reports errors. Dropping the
/// surface releases its resources.
pub trait DrawSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Push the paint state (color, line width, line join, antialias).
    fn save(&mut self);
    /// Pop the paint state pushed by the matching [`DrawSurface::save`].
    fn restore(&mut self);

    fn set_source_rgba(&mut self, color: Rgb, alpha: f64);
    fn set_source_rgb(&mut self, color: Rgb) {
        self.set_source_rgba(color, 1.0);
    }
    fn set_line_width(&mut self, width: f64);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_antialias(&mut self, enabled: bool);

    /// Replace every pixel with `color`, ignoring what was there.
    fn clear(&mut self, color: Rgb);

    fn fill_path(&mut self, path: &BezPath);
    fn stroke_path(&mut self, path: &BezPath);
    fn fill_rect(&mut self, rect: Rect);

    /// Extents `text` would occupy, or `None` when the surface cannot lay out text.
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Option<TextExtents>;
    /// Draw `text` with the top-left corner of its layout box at `origin`.
    fn draw_text(&mut self, origin: Point, text: &str, style: &TextStyle);

    /// Serialize the current pixels to `path`.
    fn write_png(&mut self, path: &Path) -> OrreryResult<()>;
}

/// Closed polygon through `points`.
pub fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
