use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OrreryError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        OrreryError::resource("x")
            .to_string()
            .contains("resource error:")
    );
    assert!(
        OrreryError::frame_write(7, "disk full")
            .to_string()
            .contains("failed to save frame 7: disk full")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OrreryError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn stage_wraps_once_and_names_the_stage() {
    let err = OrreryError::resource("mkdir failed")
        .in_stage(RunStage::GeneratingFrames)
        .in_stage(RunStage::ComposingVideo);
    assert_eq!(err.stage(), Some(RunStage::GeneratingFrames));
    let msg = err.to_string();
    assert!(msg.starts_with("frame generation failed:"));
    assert!(msg.contains("mkdir failed"));
}

#[test]
fn encoder_error_carries_output() {
    let err = OrreryError::Encoder {
        status: "exit status: 1".to_string(),
        output: "Unknown encoder 'libx264'".to_string(),
    };
    assert!(err.to_string().contains("Unknown encoder"));
}
