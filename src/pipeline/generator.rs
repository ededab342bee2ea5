use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::time::{Duration, Instant};

use crate::encode::ffmpeg::{EncoderProbe, FfmpegProbe, compose_video};
use crate::foundation::core::FrameJob;
use crate::foundation::error::{OrreryError, OrreryResult, RunStage};
use crate::pipeline::config::AnimationConfig;
use crate::render::cpu::CpuSurface;
use crate::render::recording::RecordingSurface;
use crate::render::renderer::Renderer;
use crate::render::surface::DrawSurface;
use crate::render::text::LabelFont;

/// Progress is logged every this many frames, and at the last one.
pub const PROGRESS_INTERVAL: u32 = 10;

/// Pending frame indices allowed per worker in the parallel job queue.
pub const QUEUE_DEPTH_PER_WORKER: usize = 2;

/// Draws one frame. Called concurrently from several workers when `workers > 1`.
pub type FrameCallback = Box<dyn Fn(&mut Renderer<'_>, FrameJob) + Send + Sync>;

/// Creates a fresh drawing surface for each frame.
pub trait SurfaceFactory: Send + Sync {
    fn create(&self, width: u32, height: u32) -> OrreryResult<Box<dyn DrawSurface>>;
}

/// Rasterizing surfaces that persist as PNG.
#[derive(Clone, Debug, Default)]
pub struct CpuSurfaceFactory {
    font: Option<LabelFont>,
}

impl CpuSurfaceFactory {
    pub fn new(font: Option<LabelFont>) -> Self {
        Self { font }
    }
}

impl SurfaceFactory for CpuSurfaceFactory {
    fn create(&self, width: u32, height: u32) -> OrreryResult<Box<dyn DrawSurface>> {
        Ok(Box::new(CpuSurface::new(width, height, self.font.as_ref())?))
    }
}

/// Surfaces that persist their draw commands as JSON instead of pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordingSurfaceFactory;

impl SurfaceFactory for RecordingSurfaceFactory {
    fn create(&self, width: u32, height: u32) -> OrreryResult<Box<dyn DrawSurface>> {
        Ok(Box::new(RecordingSurface::new(width, height)))
    }
}

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Last stage reached; always [`RunStage::Done`] for a returned report.
    pub stage: RunStage,
    pub frames_written: u32,
    /// The video file, or the frame directory when no video was composed.
    pub artifact: PathBuf,
    pub video_composed: bool,
    pub elapsed: Duration,
}

/// Renders an animation frame by frame and optionally assembles the frames into a video.
pub struct AnimationGenerator {
    config: AnimationConfig,
    callback: FrameCallback,
    surfaces: Arc<dyn SurfaceFactory>,
    probe: Arc<dyn EncoderProbe>,
}

impl AnimationGenerator {
    /// Generator with CPU surfaces (no label font) that probes the configured encoder.
    pub fn new(
        config: AnimationConfig,
        callback: impl Fn(&mut Renderer<'_>, FrameJob) + Send + Sync + 'static,
    ) -> Self {
        let probe = FfmpegProbe::new(&config.encoder);
        Self {
            config,
            callback: Box::new(callback),
            surfaces: Arc::new(CpuSurfaceFactory::default()),
            probe: Arc::new(probe),
        }
    }

    pub fn with_surface_factory(mut self, factory: impl SurfaceFactory + 'static) -> Self {
        self.surfaces = Arc::new(factory);
        self
    }

    pub fn with_encoder_probe(mut self, probe: impl EncoderProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Render every frame into the temp directory, then compose the video and clean up.
    ///
    /// Without a usable encoder the frames stay in the temp directory and the report points
    /// there instead.
    #[tracing::instrument(skip_all, fields(out = %self.config.output_path.display()))]
    pub fn generate(&self) -> OrreryResult<RunReport> {
        self.config.validate()?;
        if !self.probe.is_available() {
            tracing::warn!(
                dir = %self.config.temp_dir.display(),
                encoder = %self.config.encoder.display(),
                "encoder not available, writing frames only"
            );
            return self.generate_frames_only(&self.config.temp_dir);
        }
        let compose = self.config.compose_config();
        compose.validate()?;

        let started = Instant::now();
        let frames_written = self
            .generate_frames(&self.config.temp_dir)
            .map_err(|e| e.in_stage(RunStage::GeneratingFrames))?;

        tracing::info!(stage = %RunStage::ComposingVideo, "composing video");
        compose_video(&compose)
            .map_err(|e| e.in_stage(RunStage::ComposingVideo))?;

        if self.config.cleanup {
            tracing::debug!(stage = %RunStage::CleaningUp, "removing frame directory");
            if let Err(err) = std::fs::remove_dir_all(&self.config.temp_dir) {
                tracing::warn!(
                    dir = %self.config.temp_dir.display(),
                    %err,
                    "failed to remove frame directory"
                );
            }
        }

        let report = RunReport {
            stage: RunStage::Done,
            frames_written,
            artifact: self.config.output_path.clone(),
            video_composed: true,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            frames = report.frames_written,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "video written to {}",
            report.artifact.display()
        );
        Ok(report)
    }

    /// Render every frame into `dir` and stop there.
    #[tracing::instrument(skip_all, fields(dir = %dir.display()))]
    pub fn generate_frames_only(&self, dir: &Path) -> OrreryResult<RunReport> {
        let started = Instant::now();
        let frames_written = self
            .generate_frames(dir)
            .map_err(|e| e.in_stage(RunStage::GeneratingFrames))?;
        tracing::info!(frames = frames_written, "frames written to {}", dir.display());
        Ok(RunReport {
            stage: RunStage::Done,
            frames_written,
            artifact: dir.to_path_buf(),
            video_composed: false,
            elapsed: started.elapsed(),
        })
    }

    /// Render frames `1..=N` into `dir` as `frame_NNNN` files; returns how many were written.
    pub fn generate_frames(&self, dir: &Path) -> OrreryResult<u32> {
        self.config.validate()?;
        std::fs::create_dir_all(dir).map_err(|e| {
            OrreryError::resource(format!("create frame directory '{}': {e}", dir.display()))
        })?;

        let total = self.config.total_frames();
        tracing::info!(
            stage = %RunStage::GeneratingFrames,
            total,
            workers = self.config.workers,
            "generating frames"
        );
        if self.config.workers <= 1 {
            self.generate_sequential(dir, total)
        } else {
            self.generate_parallel(dir, total)
        }
    }

    /// Render a single frame at normalized time `t` straight to `path`.
    pub fn render_still(&self, t: f64, path: &Path) -> OrreryResult<()> {
        let job = FrameJob { index: 1, total: 1, t };
        let surface = self.draw(job)?;
        persist(surface, job, path)
    }

    fn draw(&self, job: FrameJob) -> OrreryResult<Box<dyn DrawSurface>> {
        let mut surface = self.surfaces.create(self.config.width, self.config.height)?;
        {
            let mut renderer = Renderer::new(&mut *surface);
            (self.callback)(&mut renderer, job);
        }
        Ok(surface)
    }

    fn render_frame(&self, dir: &Path, job: FrameJob) -> OrreryResult<()> {
        let surface = self.draw(job)?;
        persist(surface, job, &dir.join(job.file_name()))
    }

    fn generate_sequential(&self, dir: &Path, total: u32) -> OrreryResult<u32> {
        for index in 1..=total {
            self.render_frame(dir, FrameJob::new(index, total))?;
            log_progress(index, total);
        }
        Ok(total)
    }

    fn generate_parallel(&self, dir: &Path, total: u32) -> OrreryResult<u32> {
        let workers = self.config.workers;
        let pool = build_thread_pool(Some(workers))?;

        let (job_tx, job_rx) = mpsc::sync_channel::<u32>(job_queue_capacity(workers, total));
        let jobs = Mutex::new(Some(job_rx));
        let failure: Mutex<Option<OrreryError>> = Mutex::new(None);
        let abort = AtomicBool::new(false);
        let live = AtomicUsize::new(workers);
        let (done_tx, done_rx) = mpsc::channel::<u32>();

        let completed = pool.in_place_scope(|scope| {
            for _ in 0..workers {
                let done_tx = done_tx.clone();
                let (jobs, failure, abort, live) = (&jobs, &failure, &abort, &live);
                scope.spawn(move |_| {
                    let _closer = QueueCloser { live, jobs };
                    self.worker_loop(dir, total, jobs, &done_tx, failure, abort);
                });
            }
            drop(done_tx);

            let mut completed = 0u32;
            let mut tick = |_index: u32| {
                completed += 1;
                log_progress(completed, total);
            };
            // Blocks while the queue is full. Once every worker has exited the receiver
            // is gone, so a pending send fails and the feed ends.
            for index in 1..=total {
                if job_tx.send(index).is_err() {
                    break;
                }
                done_rx.try_iter().for_each(&mut tick);
            }
            drop(job_tx);
            done_rx.iter().for_each(&mut tick);
            completed
        });

        let failure = failure.into_inner().unwrap_or_else(|p| p.into_inner());
        match failure {
            Some(err) => Err(err),
            None => Ok(completed),
        }
    }

    fn worker_loop(
        &self,
        dir: &Path,
        total: u32,
        jobs: &Mutex<Option<mpsc::Receiver<u32>>>,
        done: &mpsc::Sender<u32>,
        failure: &Mutex<Option<OrreryError>>,
        abort: &AtomicBool,
    ) {
        while !abort.load(Ordering::Acquire) {
            let next = match jobs.lock() {
                Ok(queue) => queue.as_ref().and_then(|rx| rx.recv().ok()),
                Err(_) => None,
            };
            let Some(index) = next else {
                break;
            };

            match self.render_frame(dir, FrameJob::new(index, total)) {
                Ok(()) => {
                    let _ = done.send(index);
                }
                Err(err) => {
                    tracing::debug!(frame = index, %err, "worker stopping after failure");
                    abort.store(true, Ordering::Release);
                    failure
                        .lock()
                        .unwrap_or_else(|p| p.into_inner())
                        .get_or_insert(err);
                    break;
                }
            }
        }
    }
}

fn persist(mut surface: Box<dyn DrawSurface>, job: FrameJob, path: &Path) -> OrreryResult<()> {
    surface
        .write_png(path)
        .map_err(|e| OrreryError::frame_write(job.index, e.to_string()))
}

/// Drops the job receiver when the last worker exits, even by panic.
struct QueueCloser<'a> {
    live: &'a AtomicUsize,
    jobs: &'a Mutex<Option<mpsc::Receiver<u32>>>,
}

impl Drop for QueueCloser<'_> {
    fn drop(&mut self) {
        if self.live.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.jobs.lock().unwrap_or_else(|p| p.into_inner()).take();
        }
    }
}

/// Bounded so long runs never hold more than a few pending indices per worker.
fn job_queue_capacity(workers: usize, total: u32) -> usize {
    workers
        .saturating_mul(QUEUE_DEPTH_PER_WORKER)
        .min(total as usize)
        .max(1)
}

fn log_progress(done: u32, total: u32) {
    if done % PROGRESS_INTERVAL == 0 || done == total {
        tracing::info!(
            "progress: {done}/{total} ({:.1}%)",
            f64::from(done) / f64::from(total) * 100.0
        );
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> OrreryResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(OrreryError::validation("worker count must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("orrery-frame-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| OrreryError::resource(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/generator.rs"]
mod tests;
