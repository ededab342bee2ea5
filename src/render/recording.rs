use std::path::Path;

use kurbo::{BezPath, PathEl, Point, Rect};

use crate::foundation::core::Rgb;
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::render::surface::{
    DrawSurface, LineJoin, PaintState, StateStack, TextExtents, TextStyle,
};

/// One recorded drawing call with the paint state it was issued under.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Rgb,
    },
    FillPath {
        points: Vec<[f64; 2]>,
        state: PaintState,
    },
    StrokePath {
        points: Vec<[f64; 2]>,
        state: PaintState,
    },
    FillRect {
        rect: [f64; 4],
        state: PaintState,
    },
    Text {
        origin: [f64; 2],
        text: String,
        style: TextStyle,
        state: PaintState,
    },
}

impl DrawCommand {
    pub fn state(&self) -> Option<&PaintState> {
        match self {
            Self::Clear { .. } => None,
            Self::FillPath { state, .. }
            | Self::StrokePath { state, .. }
            | Self::FillRect { state, .. }
            | Self::Text { state, .. } => Some(state),
        }
    }
}

/// Surface that records draw calls instead of rasterizing them.
///
/// Text is measured with fixed metrics (0.6 em per char, 1.2 em line height) so label placement
/// stays deterministic. `write_png` writes the command list as JSON.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    state: StateStack,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: StateStack::default(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn to_json(&self) -> OrreryResult<String> {
        serde_json::to_string_pretty(&self.commands)
            .map_err(|e| OrreryError::Other(anyhow::Error::new(e)))
    }
}

fn path_points(path: &BezPath) -> Vec<[f64; 2]> {
    path.elements()
        .iter()
        .filter_map(|el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some([p.x, p.y]),
            PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => Some([p.x, p.y]),
            PathEl::ClosePath => None,
        })
        .collect()
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
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
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_path(&mut self, path: &BezPath) {
        self.commands.push(DrawCommand::FillPath {
            points: path_points(path),
            state: *self.state.current(),
        });
    }

    fn stroke_path(&mut self, path: &BezPath) {
        self.commands.push(DrawCommand::StrokePath {
            points: path_points(path),
            state: *self.state.current(),
        });
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillRect {
            rect: [rect.x0, rect.y0, rect.x1, rect.y1],
            state: *self.state.current(),
        });
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> Option<TextExtents> {
        Some(TextExtents {
            width: text.chars().count() as f64 * style.size * 0.6,
            height: style.size * 1.2,
        })
    }

    fn draw_text(&mut self, origin: Point, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            origin: [origin.x, origin.y],
            text: text.to_string(),
            style: *style,
            state: *self.state.current(),
        });
    }

    fn write_png(&mut self, path: &Path) -> OrreryResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| {
            OrreryError::resource(format!("write recording '{}': {e}", path.display()))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
