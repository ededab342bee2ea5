use super::*;

#[test]
fn default_camera_looks_at_origin_from_negative_z() {
    let cam = Camera::default();
    assert_eq!(cam.position, Vec3::new(0.0, 0.0, -5.0));
    assert_eq!(cam.target, Vec3::ZERO);
    assert_eq!(cam.up, Vec3::UP);
    assert_eq!(cam.fov, 1.0);
    assert_eq!(cam.near, 0.1);
    assert_eq!(cam.far, 100.0);
}

#[test]
fn view_projection_maps_target_to_screen_center() {
    let cam = Camera::default();
    let p = cam.view_projection(16.0 / 9.0).transform_point(Vec3::ZERO);
    assert!(p.x.abs() < 1e-9);
    assert!(p.y.abs() < 1e-9);
    assert!(p.z > -1.0 && p.z < 1.0);
}
