use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{OrreryError, OrreryResult};

/// Answers whether a video encoder can be used for this run.
pub trait EncoderProbe: Send + Sync {
    fn is_available(&self) -> bool;
}

/// Probes for a working encoder by running `<program> -version`.
#[derive(Clone, Debug)]
pub struct FfmpegProbe {
    program: PathBuf,
}

impl FfmpegProbe {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfmpegProbe {
    fn default() -> Self {
        Self::new(DEFAULT_ENCODER)
    }
}

impl EncoderProbe for FfmpegProbe {
    fn is_available(&self) -> bool {
        responds_to_version(&self.program)
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    responds_to_version(Path::new(DEFAULT_ENCODER))
}

fn responds_to_version(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Encoder executable used when none is configured.
pub const DEFAULT_ENCODER: &str = "ffmpeg";

/// Inputs for turning a `frame_%04d.png` sequence into an H.264 MP4.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposeConfig {
    /// Executable invoked with ffmpeg-style arguments.
    pub program: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub frames_dir: PathBuf,
    /// x264 constant rate factor; lower is better quality.
    pub quality: u32,
    pub out_path: PathBuf,
}

impl ComposeConfig {
    pub const MAX_CRF: u32 = 51;

    pub fn validate(&self) -> OrreryResult<()> {
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(OrreryError::validation(format!(
                "video size must be even for yuv420p, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(OrreryError::validation("encode fps must be non-zero"));
        }
        if self.quality > Self::MAX_CRF {
            return Err(OrreryError::validation(format!(
                "video quality (crf) must be in 0..={}, got {}",
                Self::MAX_CRF,
                self.quality
            )));
        }
        Ok(())
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_out_path(mut self, out_path: impl Into<PathBuf>) -> Self {
        self.out_path = out_path.into();
        self
    }

    /// Input pattern handed to the encoder, e.g. `frames/frame_%04d.png`.
    pub fn input_pattern(&self) -> PathBuf {
        self.frames_dir.join("frame_%04d.png")
    }
}

/// The encoder invocation for `cfg`, not yet spawned.
pub fn compose_video_command(cfg: &ComposeConfig) -> Command {
    let mut cmd = Command::new(&cfg.program);
    cmd.arg("-y")
        .args(["-framerate", &cfg.fps.to_string()])
        .args(["-start_number", "1"])
        .arg("-i")
        .arg(cfg.input_pattern())
        .args(["-c:v", "libx264", "-pix_fmt", "yuv420p"])
        .args(["-crf", &cfg.quality.to_string()])
        .arg(&cfg.out_path)
        .stdin(Stdio::null());
    cmd
}

/// Run the encoder to completion. A non-zero exit carries the encoder's combined output.
#[tracing::instrument(skip_all, fields(program = %cfg.program.display(), out = %cfg.out_path.display()))]
pub fn compose_video(cfg: &ComposeConfig) -> OrreryResult<()> {
    cfg.validate()?;
    ensure_parent_dir(&cfg.out_path)?;

    let output = compose_video_command(cfg).output().map_err(|e| {
        OrreryError::resource(format!(
            "failed to spawn encoder '{}': {e}",
            cfg.program.display()
        ))
    })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(OrreryError::Encoder {
            status: output.status.to_string(),
            output: combined.trim().to_string(),
        });
    }

    tracing::debug!("encoder finished");
    Ok(())
}

pub fn ensure_parent_dir(path: &Path) -> OrreryResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
