//! Orrery renders time-parameterized 3D scenes in software and turns them into videos.
//!
//! # Pipeline overview
//!
//! 1. **Scene**: objects, lights and a background implementing [`SceneObject`] / [`Background`]
//! 2. **Render**: [`Renderer`] projects meshes and paints them farthest-first onto a
//!    [`DrawSurface`] (no depth buffer)
//! 3. **Frames**: [`AnimationGenerator`] renders `frame_0001.png ...` across a worker pool
//! 4. **Encode** (optional): the system `ffmpeg` binary assembles the frames into an MP4
//!
//! Degenerate geometry never fails a frame; it resolves to fallback values (a zero vector
//! normalizes to zero, a degenerate triangle faces up, a singular projection is the identity).
#![forbid(unsafe_code)]

mod animation;
mod camera;
mod encode;
mod foundation;
mod geometry;
mod pipeline;
mod render;
mod scene;

pub use animation::ease::Ease;
pub use camera::camera::{Camera, Light};
pub use camera::path::{
    CameraKeyframe, CameraPath, KeyframePath, OrbitOffset, OrbitPath, TumblePath,
    apply_camera_path,
};
pub use encode::ffmpeg::{
    ComposeConfig, DEFAULT_ENCODER, EncoderProbe, FfmpegProbe, compose_video,
    compose_video_command, ensure_parent_dir, is_ffmpeg_on_path,
};
pub use foundation::core::{FrameJob, Rgb, frame_file_name, total_frames};
pub use foundation::error::{OrreryError, OrreryResult, RunStage};
pub use foundation::math::{EPSILON, Mat4, Vec3};
pub use geometry::mesh::{Mesh, Triangle};
pub use geometry::primitives::{
    MIN_PLANE_SUBDIVISIONS, MIN_RADIAL_SEGMENTS, MIN_SPHERE_RINGS, MIN_SPHERE_SEGMENTS, cone,
    cube, cylinder, plane, sphere, torus,
};
pub use pipeline::config::AnimationConfig;
pub use pipeline::generator::{
    AnimationGenerator, CpuSurfaceFactory, FrameCallback, PROGRESS_INTERVAL,
    QUEUE_DEPTH_PER_WORKER, RecordingSurfaceFactory, RunReport, SurfaceFactory,
};
pub use render::cpu::CpuSurface;
pub use render::recording::{DrawCommand, RecordingSurface};
pub use render::renderer::{
    AMBIENT, LabelStyle, RenderMode, Renderer, ScreenPoint, WIREFRAME_LINE_WIDTH,
};
pub use render::surface::{
    DrawSurface, LineJoin, PaintState, StateStack, TextExtents, TextStyle, polygon,
};
pub use render::text::{LabelFont, TextBrush, TextLayoutEngine};
pub use scene::background::{GradientBackground, SolidBackground};
pub use scene::celestial::{BodyPaint, BodySpec, CelestialBody, Planet, PlanetSpec};
pub use scene::model::{Background, RenderCtx, Scene, SceneObject};
pub use scene::objects::{CoordinateSystem, Label3D, OrbitRing, Star, StarField, StarSpec};
pub use scene::solar::{SolarSystem, default_catalog};
