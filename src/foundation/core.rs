/// Linear RGB color with channels nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: f64) -> Self {
        Self::new(v, v, v)
    }

    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn scale(self, s: f64) -> Rgb {
        Rgb::new(self.r * s, self.g * s, self.b * s)
    }

    /// Quantize to 8-bit channels, clamping out-of-range values.
    pub fn to_rgba8(self, alpha: f64) -> [u8; 4] {
        [
            unit_to_u8(self.r),
            unit_to_u8(self.g),
            unit_to_u8(self.b),
            unit_to_u8(alpha),
        ]
    }
}

fn unit_to_u8(v: f64) -> u8 {
    if !v.is_finite() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// One unit of frame work: a 1-based index and its normalized animation time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameJob {
    pub index: u32,
    pub total: u32,
    pub t: f64,
}

impl FrameJob {
    /// Job for frame `index` (1-based) out of `total`, with `t = (index - 1) / total`.
    pub fn new(index: u32, total: u32) -> Self {
        let t = if total == 0 {
            0.0
        } else {
            f64::from(index.saturating_sub(1)) / f64::from(total)
        };
        Self { index, total, t }
    }

    pub fn file_name(&self) -> String {
        frame_file_name(self.index)
    }
}

/// `frame_0001.png` style name shared by the writer and the encoder input pattern.
pub fn frame_file_name(index: u32) -> String {
    format!("frame_{index:04}.png")
}

/// Number of frames for a run, `round(fps * duration)`.
pub fn total_frames(fps: u32, duration_secs: f64) -> u32 {
    let n = (f64::from(fps) * duration_secs).round();
    if !n.is_finite() || n <= 0.0 {
        return 0;
    }
    if n >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    n as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
