use std::fmt;

/// Convenience result type used across orrery.
pub type OrreryResult<T> = Result<T, OrreryError>;

/// Stages of a single animation generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RunStage {
    /// Nothing has started yet.
    Idle,
    /// Frames are being rendered and written to the frame directory.
    GeneratingFrames,
    /// The external encoder is assembling the frame sequence.
    ComposingVideo,
    /// The temporary frame directory is being removed.
    CleaningUp,
    /// All requested stages finished.
    Done,
    /// A stage failed; remaining stages were skipped.
    Failed,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::GeneratingFrames => "frame generation",
            Self::ComposingVideo => "video composition",
            Self::CleaningUp => "cleanup",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Top-level error taxonomy.
///
/// Numeric degeneracies (zero-length vectors, parallel camera bases, singular divides) never
/// show up here; they resolve to fallback values where they happen.
#[derive(thiserror::Error, Debug)]
pub enum OrreryError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Filesystem or process resources could not be acquired.
    #[error("resource error: {0}")]
    Resource(String),

    /// A rendered frame could not be persisted.
    #[error("failed to save frame {frame}: {message}")]
    FrameWrite {
        /// 1-based frame index.
        frame: u32,
        /// Underlying cause.
        message: String,
    },

    /// The external encoder exited unsuccessfully.
    #[error("encoder exited with status {status}: {output}")]
    Encoder {
        /// Exit status as reported by the OS.
        status: String,
        /// Combined stdout/stderr of the encoder.
        output: String,
    },

    /// A failure attributed to the run stage it happened in.
    #[error("{stage} failed: {source}")]
    Stage {
        /// Stage that was running.
        stage: RunStage,
        /// What went wrong.
        #[source]
        source: Box<OrreryError>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OrreryError {
    /// Build an [`OrreryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`OrreryError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build an [`OrreryError::FrameWrite`] value.
    pub fn frame_write(frame: u32, msg: impl Into<String>) -> Self {
        Self::FrameWrite {
            frame,
            message: msg.into(),
        }
    }

    /// Attach the stage a failure happened in. Already-staged errors are left alone.
    pub fn in_stage(self, stage: RunStage) -> Self {
        match self {
            Self::Stage { .. } => self,
            other => Self::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage recorded on this error, if any.
    pub fn stage(&self) -> Option<RunStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
