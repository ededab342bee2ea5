use super::*;

#[test]
fn defaults_describe_a_ten_second_1080p_clip() {
    let c = AnimationConfig::default();
    assert_eq!((c.width, c.height, c.fps), (1920, 1080, 30));
    assert_eq!(c.total_frames(), 300);
    assert_eq!(c.output_path, PathBuf::from("animation.mp4"));
    assert_eq!(c.temp_dir, PathBuf::from("temp_frames"));
    assert_eq!(c.quality, 23);
    assert!(c.cleanup);
    assert_eq!(c.workers, 1);
    assert_eq!(c.encoder, PathBuf::from("ffmpeg"));
    c.validate().unwrap();
}

#[test]
fn validate_rejects_each_bad_field() {
    let bad = [
        AnimationConfig::default().with_size(0, 1080),
        AnimationConfig::default().with_fps(0),
        AnimationConfig::default().with_duration(0.0),
        AnimationConfig::default().with_duration(f64::INFINITY),
        AnimationConfig::default().with_fps(24).with_duration(0.01),
        AnimationConfig::default().with_quality(60),
        AnimationConfig::default().with_workers(0),
    ];
    for c in bad {
        assert!(
            matches!(c.validate(), Err(OrreryError::Validation(_))),
            "accepted {c:?}"
        );
    }
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let c: AnimationConfig =
        serde_json::from_str(r#"{ "width": 640, "height": 360, "workers": 4 }"#).unwrap();
    assert_eq!((c.width, c.height, c.workers), (640, 360, 4));
    assert_eq!(c.fps, 30);
    assert_eq!(c.duration, 10.0);
}

#[test]
fn from_json_path_reports_missing_file() {
    let err = AnimationConfig::from_json_path(Path::new("/nonexistent/orrery.json")).unwrap_err();
    assert!(matches!(err, OrreryError::Resource(_)));
}

#[test]
fn compose_config_mirrors_run_settings() {
    let c = AnimationConfig::default()
        .with_fps(24)
        .with_quality(18)
        .with_temp_dir("frames")
        .with_output_path("out.mp4");
    let compose = c.compose_config();
    assert_eq!(compose.fps, 24);
    assert_eq!(compose.quality, 18);
    assert_eq!(compose.frames_dir, PathBuf::from("frames"));
    assert_eq!(compose.out_path, PathBuf::from("out.mp4"));
    assert_eq!(compose.program, PathBuf::from("ffmpeg"));
    assert_eq!((compose.width, compose.height), (1920, 1080));

    let custom = c.with_encoder("/usr/local/bin/ffmpeg").compose_config();
    assert_eq!(custom.program, PathBuf::from("/usr/local/bin/ffmpeg"));
}

#[test]
fn odd_sizes_are_only_rejected_for_video() {
    let c = AnimationConfig::default().with_size(33, 21);
    c.validate().unwrap();
    assert!(matches!(
        c.compose_config().validate(),
        Err(OrreryError::Validation(_))
    ));
}
