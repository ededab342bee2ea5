use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::{ComposeConfig, DEFAULT_ENCODER};
use crate::foundation::core::total_frames;
use crate::foundation::error::{OrreryError, OrreryResult};

/// Settings for one generation run. Fixed for the duration of the run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Length of the animation in seconds.
    pub duration: f64,
    pub output_path: PathBuf,
    pub temp_dir: PathBuf,
    /// x264 CRF passed to the encoder.
    pub quality: u32,
    /// Remove `temp_dir` after the video is composed.
    pub cleanup: bool,
    pub workers: usize,
    /// Encoder executable; resolved through `PATH` when not a path.
    pub encoder: PathBuf,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 30,
            duration: 10.0,
            output_path: PathBuf::from("animation.mp4"),
            temp_dir: PathBuf::from("temp_frames"),
            quality: 23,
            cleanup: true,
            workers: 1,
            encoder: PathBuf::from(DEFAULT_ENCODER),
        }
    }
}

impl AnimationConfig {
    /// Read a JSON config; missing fields take their defaults.
    pub fn from_json_path(path: &Path) -> OrreryResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            OrreryError::resource(format!("read config '{}': {e}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            OrreryError::validation(format!("parse config '{}': {e}", path.display()))
        })
    }

    /// Checks shared by every run. Video-only limits live in [`ComposeConfig::validate`].
    pub fn validate(&self) -> OrreryResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(OrreryError::validation("width/height must be non-zero"));
        }
        if self.fps == 0 {
            return Err(OrreryError::validation("fps must be non-zero"));
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(OrreryError::validation(format!(
                "duration must be a positive number of seconds, got {}",
                self.duration
            )));
        }
        if self.total_frames() == 0 {
            return Err(OrreryError::validation(format!(
                "{}s at {} fps produces no frames",
                self.duration, self.fps
            )));
        }
        if self.quality > ComposeConfig::MAX_CRF {
            return Err(OrreryError::validation(format!(
                "quality must be in 0..={}, got {}",
                ComposeConfig::MAX_CRF,
                self.quality
            )));
        }
        if self.workers == 0 {
            return Err(OrreryError::validation("workers must be >= 1"));
        }
        Ok(())
    }

    pub fn total_frames(&self) -> u32 {
        total_frames(self.fps, self.duration)
    }

    pub fn compose_config(&self) -> ComposeConfig {
        ComposeConfig {
            program: self.encoder.clone(),
            width: self.width,
            height: self.height,
            fps: self.fps,
            frames_dir: self.temp_dir.clone(),
            quality: self.quality,
            out_path: self.output_path.clone(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn with_quality(mut self, crf: u32) -> Self {
        self.quality = crf;
        self
    }

    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn with_encoder(mut self, program: impl Into<PathBuf>) -> Self {
        self.encoder = program.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
