use super::*;
use crate::render::recording::{DrawCommand, RecordingSurface};

fn rects(surface: &RecordingSurface) -> Vec<([f64; 4], Rgb)> {
    surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRect { rect, state } => Some((*rect, state.color)),
            _ => None,
        })
        .collect()
}

#[test]
fn solid_fills_viewport() {
    let mut surface = RecordingSurface::new(40, 30);
    let mut r = Renderer::new(&mut surface);
    SolidBackground::new(Rgb::gray(0.2)).render(&mut r, 0.0);
    drop(r);

    assert_eq!(rects(&surface), vec![([0.0, 0.0, 40.0, 30.0], Rgb::gray(0.2))]);
}

#[test]
fn gradient_draws_base_plus_bands() {
    let top = Rgb::new(0.08, 0.09, 0.12);
    let bottom = Rgb::new(0.15, 0.16, 0.20);
    let mut surface = RecordingSurface::new(100, 200);
    let mut r = Renderer::new(&mut surface);
    GradientBackground::new(top, bottom).render(&mut r, 0.3);
    drop(r);

    let got = rects(&surface);
    assert_eq!(got.len(), 101);
    assert_eq!(got[0], ([0.0, 0.0, 100.0, 200.0], top));
    assert_eq!(got[1].1, top);
    let last = got[100];
    assert!((last.0[1] - 198.0).abs() < 1e-9);
    assert!((last.0[3] - 200.0).abs() < 1e-9);
    assert!((last.1.r - top.lerp(bottom, 0.99).r).abs() < 1e-12);
}

#[test]
fn animation_shift_follows_sine() {
    let g = GradientBackground::new(Rgb::BLACK, Rgb::BLACK).animated();
    let (top0, _) = g.colors_at(0.0);
    assert_eq!(top0, Rgb::BLACK);

    let (top, bottom) = g.colors_at(0.5);
    assert!((top.r - 0.05).abs() < 1e-12);
    assert!((top.b - 0.025).abs() < 1e-12);
    assert!((bottom.b - 0.015).abs() < 1e-12);

    let still = GradientBackground::new(Rgb::BLACK, Rgb::WHITE);
    assert_eq!(still.colors_at(0.5), (Rgb::BLACK, Rgb::WHITE));
}

#[test]
fn zero_steps_only_paints_top() {
    let mut g = GradientBackground::new(Rgb::WHITE, Rgb::BLACK);
    g.steps = 0;
    let mut surface = RecordingSurface::new(10, 10);
    let mut r = Renderer::new(&mut surface);
    g.render(&mut r, 0.0);
    drop(r);
    assert_eq!(rects(&surface).len(), 1);
}
