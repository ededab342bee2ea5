use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use orrery::{
    AnimationConfig, AnimationGenerator, CoordinateSystem, CpuSurfaceFactory, FrameJob,
    GradientBackground, LabelFont, Light, RenderMode, Renderer, Rgb, Scene, SolarSystem,
    TumblePath, Vec3,
};
use tracing_subscriber::EnvFilter;

/// Scene time advances this many units per unit of normalized animation time.
const TIME_SCALE: f64 = 3.0;
/// Worker count for `render` when neither the flag nor the config sets one.
const DEFAULT_RENDER_WORKERS: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "orrery", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the solar system to MP4, or to PNG frames when `ffmpeg` is missing.
    Render(RenderArgs),
    /// Render PNG frames only.
    Frames(FramesArgs),
    /// Render a single PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// JSON animation config; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Font used for body labels. Labels are skipped without one.
    #[arg(long)]
    font: Option<PathBuf>,

    #[arg(long, default_value_t = RenderMode::Shaded)]
    mode: RenderMode,
}

#[derive(Args, Debug)]
struct TimingArgs {
    #[arg(long)]
    fps: Option<u32>,

    /// Seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Parallel frame workers.
    #[arg(long)]
    workers: Option<usize>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    timing: TimingArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for intermediate frames.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// x264 CRF (0-51, lower is better).
    #[arg(long)]
    quality: Option<u32>,

    /// Keep the frame directory after the video is written.
    #[arg(long)]
    keep_frames: bool,

    /// Encoder executable to run instead of `ffmpeg` from PATH.
    #[arg(long)]
    encoder: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    timing: TimingArgs,

    /// Output directory.
    #[arg(long, default_value = "animation_frames")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Normalized animation time in [0, 1].
    #[arg(long, default_value_t = 0.0)]
    t: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AnimationConfig> {
    match path {
        Some(p) => AnimationConfig::from_json_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(AnimationConfig::default()),
    }
}

fn apply_overrides(
    mut cfg: AnimationConfig,
    scene: &SceneArgs,
    timing: &TimingArgs,
) -> AnimationConfig {
    if let Some(w) = scene.width {
        cfg.width = w;
    }
    if let Some(h) = scene.height {
        cfg.height = h;
    }
    if let Some(fps) = timing.fps {
        cfg.fps = fps;
    }
    if let Some(d) = timing.duration {
        cfg.duration = d;
    }
    if let Some(n) = timing.workers {
        cfg.workers = n;
    }
    cfg
}

fn make_generator(cfg: AnimationConfig, scene: &SceneArgs) -> anyhow::Result<AnimationGenerator> {
    let font = scene
        .font
        .as_deref()
        .map(LabelFont::load)
        .transpose()
        .context("load label font")?;

    let solar = solar_scene();
    let camera = TumblePath::default();
    let mode = scene.mode;
    let generator = AnimationGenerator::new(cfg, move |r: &mut Renderer<'_>, job: FrameJob| {
        r.mode = mode;
        camera.apply(&mut r.camera, job.t);
        solar.render(r, job.t * TIME_SCALE);
    });

    Ok(generator.with_surface_factory(CpuSurfaceFactory::new(font)))
}

fn solar_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_light(Light::new(
        Vec3::new(-5.0, 8.0, -5.0),
        Rgb::new(1.0, 0.9, 0.8),
        0.8,
    ));
    scene.add_light(Light::new(
        Vec3::new(5.0, 5.0, 5.0),
        Rgb::new(0.6, 0.7, 1.0),
        0.6,
    ));
    scene.set_background(
        GradientBackground::new(Rgb::new(0.08, 0.09, 0.12), Rgb::new(0.15, 0.16, 0.20)).animated(),
    );
    scene.add_object(SolarSystem::with_default_planets());
    scene.add_object(CoordinateSystem::new(5.0));
    scene
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.scene.config.as_deref())?;
    if args.scene.config.is_none() {
        cfg.workers = DEFAULT_RENDER_WORKERS;
    }
    let mut cfg = apply_overrides(cfg, &args.scene, &args.timing);
    if let Some(out) = args.out {
        cfg = cfg.with_output_path(out);
    }
    if let Some(dir) = args.frames_dir {
        cfg = cfg.with_temp_dir(dir);
    }
    if let Some(q) = args.quality {
        cfg = cfg.with_quality(q);
    }
    if args.keep_frames {
        cfg = cfg.with_cleanup(false);
    }
    if let Some(program) = args.encoder {
        cfg = cfg.with_encoder(program);
    }

    let report = make_generator(cfg, &args.scene)?
        .generate()
        .context("render animation")?;
    if report.video_composed {
        println!("wrote {}", report.artifact.display());
    } else {
        println!(
            "ffmpeg not found; wrote {} frames to {}",
            report.frames_written,
            report.artifact.display()
        );
    }
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = apply_overrides(
        load_config(args.scene.config.as_deref())?,
        &args.scene,
        &args.timing,
    );
    let report = make_generator(cfg, &args.scene)?
        .generate_frames_only(&args.out)
        .with_context(|| format!("render frames into '{}'", args.out.display()))?;
    println!(
        "wrote {} frames to {}",
        report.frames_written,
        report.artifact.display()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = apply_overrides(
        load_config(args.scene.config.as_deref())?,
        &args.scene,
        &TimingArgs {
            fps: None,
            duration: None,
            workers: None,
        },
    );
    cfg.validate()?;
    orrery::ensure_parent_dir(&args.out)?;
    make_generator(cfg, &args.scene)?
        .render_still(args.t, &args.out)
        .with_context(|| format!("render frame to '{}'", args.out.display()))?;
    Ok(())
}
