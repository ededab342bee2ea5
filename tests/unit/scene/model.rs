use super::*;
use crate::foundation::core::Rgb;
use crate::foundation::math::Vec3;
use crate::render::recording::{DrawCommand, RecordingSurface};
use crate::render::renderer::LabelStyle;

struct Tag(&'static str);

impl SceneObject for Tag {
    fn render(&self, renderer: &mut Renderer<'_>, ctx: &RenderCtx<'_>) {
        let text = format!("{}:{}:{}", self.0, ctx.t, ctx.lights.len());
        renderer.draw_label(Vec3::ZERO, &text, &LabelStyle::default());
    }
}

struct Fill;

impl Background for Fill {
    fn render(&self, renderer: &mut Renderer<'_>, _t: f64) {
        renderer.clear(Rgb::gray(0.1));
    }
}

#[test]
fn background_then_objects_in_insertion_order() {
    let mut scene = Scene::new();
    scene.add_object(Tag("a"));
    scene.add_object(Tag("b"));
    scene.add_light(Light::new(Vec3::ZERO, Rgb::WHITE, 1.0));
    scene.set_background(Fill);

    let mut surface = RecordingSurface::new(64, 64);
    let mut r = Renderer::new(&mut surface);
    scene.render(&mut r, 0.25);
    drop(r);

    let cmds = surface.commands();
    assert!(matches!(cmds[0], DrawCommand::Clear { .. }));
    let texts: Vec<&str> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, ["a:0.25:1", "b:0.25:1"]);
}

#[test]
fn empty_scene_draws_nothing() {
    let scene = Scene::new();
    let mut surface = RecordingSurface::new(8, 8);
    let mut r = Renderer::new(&mut surface);
    scene.render(&mut r, 0.0);
    drop(r);
    assert!(surface.commands().is_empty());
}
