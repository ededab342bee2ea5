use super::*;
use crate::foundation::core::Rgb;
use crate::geometry::primitives::cube;
use crate::render::renderer::RenderMode;

struct NoEncoder;

impl EncoderProbe for NoEncoder {
    fn is_available(&self) -> bool {
        false
    }
}

struct AnyEncoder;

impl EncoderProbe for AnyEncoder {
    fn is_available(&self) -> bool {
        true
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("orrery_gen_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn config(dir: &Path, workers: usize) -> AnimationConfig {
    AnimationConfig::default()
        .with_size(64, 36)
        .with_fps(10)
        .with_duration(1.0)
        .with_temp_dir(dir)
        .with_output_path(dir.join("out.mp4"))
        .with_workers(workers)
}

fn draw_cube(r: &mut Renderer<'_>, job: FrameJob) {
    r.mode = RenderMode::Flat;
    r.clear(Rgb::gray(job.t));
    r.camera.position = crate::foundation::math::Vec3::new(3.0 * job.t, 2.0, -5.0);
    r.draw_mesh(&cube(1.0), Rgb::new(0.2, 0.6, 1.0), &[]);
}

fn generator(dir: &Path, workers: usize) -> AnimationGenerator {
    AnimationGenerator::new(config(dir, workers), draw_cube)
        .with_surface_factory(RecordingSurfaceFactory)
        .with_encoder_probe(NoEncoder)
}

fn listing(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut out: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            (
                e.file_name().to_string_lossy().into_owned(),
                std::fs::read(e.path()).unwrap(),
            )
        })
        .collect();
    out.sort();
    out
}

#[test]
fn sequential_run_sees_every_time_in_order() {
    let dir = scratch_dir("seq");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let generator = AnimationGenerator::new(config(&dir, 1), move |r, job| {
        log.lock().unwrap().push((job.index, job.t));
        draw_cube(r, job);
    })
    .with_surface_factory(RecordingSurfaceFactory);

    assert_eq!(generator.generate_frames(&dir).unwrap(), 10);
    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 10);
    for (i, (index, t)) in seen.iter().enumerate() {
        assert_eq!(*index, i as u32 + 1);
        assert!((t - i as f64 / 10.0).abs() < 1e-12);
    }
    assert!(dir.join("frame_0001.png").is_file());
    assert!(dir.join("frame_0010.png").is_file());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn worker_count_does_not_change_output() {
    let one = scratch_dir("w1");
    let four = scratch_dir("w4");
    assert_eq!(generator(&one, 1).generate_frames(&one).unwrap(), 10);
    assert_eq!(generator(&four, 4).generate_frames(&four).unwrap(), 10);

    let a = listing(&one);
    let b = listing(&four);
    assert_eq!(a.len(), 10);
    assert_eq!(a, b);
    let _ = std::fs::remove_dir_all(&one);
    let _ = std::fs::remove_dir_all(&four);
}

#[test]
fn missing_encoder_falls_back_to_frames() {
    let dir = scratch_dir("noenc");
    let report = generator(&dir, 2).generate().unwrap();
    assert_eq!(report.stage, RunStage::Done);
    assert_eq!(report.frames_written, 10);
    assert!(!report.video_composed);
    assert_eq!(report.artifact, dir);
    assert_eq!(listing(&dir).len(), 10);
    assert!(!dir.join("out.mp4").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_failure_reports_frame_index() {
    for workers in [1, 3] {
        let dir = scratch_dir(&format!("fail{workers}"));
        std::fs::create_dir_all(dir.join("frame_0003.png")).unwrap();

        let err = generator(&dir, workers).generate_frames_only(&dir).unwrap_err();
        assert_eq!(err.stage(), Some(RunStage::GeneratingFrames));
        let OrreryError::Stage { source, .. } = err else {
            panic!("expected staged error");
        };
        assert!(
            matches!(*source, OrreryError::FrameWrite { frame: 3, .. }),
            "workers={workers}: {source}"
        );
        let _ = std::fs::remove_dir_all(&dir);
    }
}

#[test]
fn invalid_config_is_rejected_before_rendering() {
    let dir = scratch_dir("invalid");
    let generator = AnimationGenerator::new(config(&dir, 1).with_fps(0), draw_cube)
        .with_surface_factory(RecordingSurfaceFactory);
    assert!(matches!(
        generator.generate_frames(&dir),
        Err(OrreryError::Validation(_))
    ));
    assert!(!dir.exists());
}

#[test]
fn render_still_writes_one_file() {
    let dir = scratch_dir("still");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("still.json");
    generator(&dir, 1).render_still(0.5, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("fill_path"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn thread_pool_rejects_zero_workers() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert_eq!(build_thread_pool(Some(3)).unwrap().current_num_threads(), 3);
}

#[test]
fn odd_size_frames_only_run_writes_every_frame() {
    let dir = scratch_dir("odd");
    let generator = AnimationGenerator::new(config(&dir, 2).with_size(33, 21), draw_cube)
        .with_surface_factory(RecordingSurfaceFactory)
        .with_encoder_probe(NoEncoder);

    let report = generator.generate().unwrap();
    assert_eq!(report.frames_written, 10);
    assert!(!report.video_composed);
    assert_eq!(listing(&dir).len(), 10);

    let still = dir.join("still.json");
    generator.render_still(0.0, &still).unwrap();
    assert!(still.is_file());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn odd_size_video_run_fails_before_rendering() {
    let dir = scratch_dir("oddvideo");
    let generator = AnimationGenerator::new(config(&dir, 1).with_size(33, 21), draw_cube)
        .with_surface_factory(RecordingSurfaceFactory)
        .with_encoder_probe(AnyEncoder);

    assert!(matches!(
        generator.generate(),
        Err(OrreryError::Validation(_))
    ));
    assert!(!dir.exists());
}

#[cfg(unix)]
#[test]
fn encoder_failure_keeps_frames_and_carries_output() {
    let dir = scratch_dir("encfail");
    // `ls` exits non-zero on the leading `-y` and reports it on stderr.
    let generator = AnimationGenerator::new(config(&dir, 2).with_encoder("ls"), draw_cube)
        .with_surface_factory(RecordingSurfaceFactory)
        .with_encoder_probe(AnyEncoder);

    let err = generator.generate().unwrap_err();
    assert_eq!(err.stage(), Some(RunStage::ComposingVideo));
    let OrreryError::Stage { source, .. } = err else {
        panic!("expected staged error");
    };
    let OrreryError::Encoder { output, .. } = *source else {
        panic!("expected encoder error");
    };
    assert!(!output.is_empty());

    // cleanup is on, but a failed compose leaves the frames in place
    assert!(dir.is_dir());
    assert_eq!(listing(&dir).len(), 10);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn job_queue_stays_small() {
    assert_eq!(job_queue_capacity(4, 100_000), 4 * QUEUE_DEPTH_PER_WORKER);
    assert_eq!(job_queue_capacity(4, 3), 3);
    assert_eq!(job_queue_capacity(1, 0), 1);
}

#[test]
fn long_parallel_run_streams_through_the_queue() {
    let dir = scratch_dir("long");
    let generator = AnimationGenerator::new(
        config(&dir, 3).with_size(8, 8).with_duration(12.0),
        draw_cube,
    )
    .with_surface_factory(RecordingSurfaceFactory);

    assert_eq!(generator.generate_frames(&dir).unwrap(), 120);
    assert_eq!(listing(&dir).len(), 120);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn early_failure_stops_feeding_the_queue() {
    let dir = scratch_dir("earlyfail");
    std::fs::create_dir_all(dir.join("frame_0003.png")).unwrap();
    let generator = AnimationGenerator::new(config(&dir, 2).with_duration(20.0), draw_cube)
        .with_surface_factory(RecordingSurfaceFactory);

    let err = generator.generate_frames(&dir).unwrap_err();
    assert!(matches!(err, OrreryError::FrameWrite { frame: 3, .. }), "{err}");
    assert!(!dir.join("frame_0200.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}
