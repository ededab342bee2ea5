use std::path::Path;

use kurbo::{BezPath, Point, Rect};

use crate::foundation::core::Rgb;
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::render::surface::{DrawSurface, LineJoin, StateStack, TextExtents, TextStyle};
use crate::render::text::{LabelFont, TextBrush, TextLayoutEngine};

/// Raster surface backed by `vello_cpu`.
///
/// Labels need a [`LabelFont`]; without one, text calls are no-ops. Antialiasing is always on
/// for this backend, so [`DrawSurface::set_antialias`] only updates the saved state.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    state: StateStack,
    text: Option<CpuText>,
    missing_font_logged: bool,
}

struct CpuText {
    font: vello_cpu::peniko::FontData,
    engine: TextLayoutEngine,
}

impl CpuSurface {
    /// New surface cleared to opaque black.
    pub fn new(width: u32, height: u32, font: Option<&LabelFont>) -> OrreryResult<Self> {
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(OrreryError::validation(format!(
                "surface size {width}x{height} exceeds {}x{}",
                u16::MAX,
                u16::MAX
            )));
        };
        if w == 0 || h == 0 {
            return Err(OrreryError::validation(
                "surface width/height must be non-zero",
            ));
        }

        let text = font
            .map(|f| {
                Ok::<_, OrreryError>(CpuText {
                    font: f.to_font_data(),
                    engine: TextLayoutEngine::new(f)?,
                })
            })
            .transpose()?;

        let mut surface = Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
            state: StateStack::default(),
            text,
            missing_font_logged: false,
        };
        surface.clear(Rgb::BLACK);
        Ok(surface)
    }

    fn apply_paint(&mut self) {
        let [r, g, b, a] = self.state.current().rgba8();
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    }

    /// Premultiplied RGBA8 pixels of everything drawn so far.
    pub fn render_premul_rgba8(&mut self) -> Vec<u8> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap.data_as_u8_slice().to_vec()
    }

    fn text_unavailable(&mut self) {
        if !self.missing_font_logged {
            tracing::debug!("no label font configured, skipping text");
            self.missing_font_logged = true;
        }
    }
}

impl DrawSurface for CpuSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn set_source_rgba(&mut self, color: Rgb, alpha: f64) {
        let s = self.state.current_mut();
        s.color = color;
        s.alpha = alpha;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.current_mut().line_width = width;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.current_mut().line_join = join;
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.state.current_mut().antialias = enabled;
    }

    fn clear(&mut self, color: Rgb) {
        let [r, g, b, _] = color.to_rgba8(1.0);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, 255));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    fn fill_path(&mut self, path: &BezPath) {
        self.apply_paint();
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath) {
        self.apply_paint();
        let s = self.state.current();
        let join = match s.line_join {
            LineJoin::Miter => vello_cpu::kurbo::Join::Miter,
            LineJoin::Round => vello_cpu::kurbo::Join::Round,
            LineJoin::Bevel => vello_cpu::kurbo::Join::Bevel,
        };
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(s.line_width).with_join(join));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.apply_paint();
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Option<TextExtents> {
        if self.text.is_none() {
            self.text_unavailable();
            return None;
        }
        let t = self.text.as_mut()?;
        match t.engine.measure(text, style) {
            Ok(extents) => Some(extents),
            Err(err) => {
                tracing::debug!(%err, "text measurement failed");
                None
            }
        }
    }

    fn draw_text(&mut self, origin: Point, text: &str, style: &TextStyle) {
        let brush = TextBrush::from(self.state.current().rgba8());
        if self.text.is_none() {
            self.text_unavailable();
            return;
        }
        let Some(t) = self.text.as_mut() else {
            return;
        };
        let layout = match t.engine.layout(text, style, brush) {
            Ok(layout) => layout,
            Err(err) => {
                tracing::debug!(%err, "text layout failed");
                return;
            }
        };

        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&t.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn write_png(&mut self, path: &Path) -> OrreryResult<()> {
        let mut pixels = self.render_premul_rgba8();
        flatten_premul_over(&mut pixels, [0, 0, 0]);

        image::save_buffer_with_format(
            path,
            &pixels,
            u32::from(self.width),
            u32::from(self.height),
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| OrreryError::resource(format!("write png '{}': {e}", path.display())))
    }
}

/// Composite premultiplied RGBA8 pixels over an opaque background, in place.
pub(crate) fn flatten_premul_over(pixels: &mut [u8], bg: [u8; 3]) {
    for px in pixels.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a < 255 {
            let inv = 255 - a;
            for (c, bg) in px[..3].iter_mut().zip(bg) {
                *c = (u16::from(*c) + mul_div255(u16::from(bg), inv)).min(255) as u8;
            }
        }
        px[3] = 255;
    }
}

fn mul_div255(x: u16, y: u16) -> u16 {
    let t = u32::from(x) * u32::from(y) + 128;
    ((t + (t >> 8)) >> 8) as u16
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
