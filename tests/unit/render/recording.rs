use super::*;

#[test]
fn records_calls_with_current_state() {
    let mut s = RecordingSurface::new(100, 50);
    s.clear(Rgb::BLACK);
    s.save();
    s.set_source_rgb(Rgb::new(1.0, 0.0, 0.0));
    s.set_line_width(1.5);
    s.set_line_join(LineJoin::Round);
    s.stroke_path(&crate::render::surface::polygon(&[
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
    ]));
    s.restore();
    s.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0));

    let cmds = s.commands();
    assert_eq!(cmds.len(), 3);
    assert_eq!(cmds[0], DrawCommand::Clear { color: Rgb::BLACK });
    let DrawCommand::StrokePath { points, state } = &cmds[1] else {
        panic!("expected stroke, got {:?}", cmds[1]);
    };
    assert_eq!(points.len(), 3);
    assert_eq!(state.line_width, 1.5);
    assert_eq!(state.line_join, LineJoin::Round);

    let restored = cmds[2].state().unwrap();
    assert_eq!(restored.color, Rgb::BLACK);
    assert_eq!(restored.line_join, LineJoin::Miter);
}

#[test]
fn measure_text_is_deterministic() {
    let mut s = RecordingSurface::new(10, 10);
    let style = TextStyle {
        size: 10.0,
        bold: false,
    };
    let e = s.measure_text("Mars", &style).unwrap();
    assert!((e.width - 24.0).abs() < 1e-12);
    assert!((e.height - 12.0).abs() < 1e-12);
}

#[test]
fn write_png_dumps_json() {
    let dir = std::env::temp_dir().join(format!("orrery_recording_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("frame_0001.png");

    let mut s = RecordingSurface::new(4, 4);
    s.clear(Rgb::WHITE);
    s.write_png(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: Vec<DrawCommand> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, s.commands());

    let _ = std::fs::remove_dir_all(&dir);
}
