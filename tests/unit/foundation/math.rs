use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

#[test]
fn normalize_tiny_vectors_to_zero() {
    for v in [
        Vec3::ZERO,
        Vec3::new(1e-11, 0.0, 0.0),
        Vec3::new(-3e-12, 2e-12, 1e-12),
    ] {
        assert_eq!(v.normalize(), Vec3::ZERO);
    }
}

#[test]
fn normalize_has_unit_length() {
    for v in [
        Vec3::new(3.0, 4.0, 0.0),
        Vec3::new(-1.0, 2.0, -7.5),
        Vec3::new(1e-6, 0.0, 0.0),
        Vec3::new(1e6, -1e6, 3.0),
    ] {
        assert!(approx(v.normalize().length(), 1.0));
    }
}

#[test]
fn cross_follows_right_hand_rule() {
    assert_eq!(Vec3::X.cross(Vec3::UP), Vec3::Z);
    assert_eq!(Vec3::UP.cross(Vec3::X), -Vec3::Z);
}

#[test]
fn multiply_is_not_commutative() {
    let t = Mat4::translation(1.0, 0.0, 0.0);
    let r = Mat4::rotation_z(std::f64::consts::FRAC_PI_2);
    let p = Vec3::new(1.0, 0.0, 0.0);

    // rotate then translate
    assert!(approx_vec((t * r).transform_point(p), Vec3::new(1.0, 1.0, 0.0)));
    // translate then rotate
    assert!(approx_vec((r * t).transform_point(p), Vec3::new(0.0, 2.0, 0.0)));
}

#[test]
fn multiply_is_associative() {
    let a = Mat4::rotation_x(0.3);
    let b = Mat4::translation(2.0, -1.0, 0.5);
    let c = Mat4::scaling(1.5, 2.0, 0.5);
    let p = Vec3::new(0.7, -0.2, 1.9);
    let left = ((a * b) * c).transform_point(p);
    let right = (a * (b * c)).transform_point(p);
    assert!(approx_vec(left, right));
}

#[test]
fn transform_skips_divide_for_singular_w() {
    // Last row zero => w = 0 for every point.
    let mut m = Mat4::IDENTITY;
    m.0[15] = 0.0;
    let out = m.transform_point(Vec3::new(2.0, 3.0, 4.0));
    assert_eq!(out, Vec3::new(2.0, 3.0, 4.0));
    assert!(out.x.is_finite() && out.y.is_finite() && out.z.is_finite());
}

#[test]
fn transform_divides_projective_w() {
    let mut m = Mat4::IDENTITY;
    m.0[15] = 2.0;
    let out = m.transform_point(Vec3::new(2.0, 4.0, 6.0));
    assert!(approx_vec(out, Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn perspective_falls_back_to_identity() {
    assert_eq!(Mat4::perspective(0.0, 1.5, 0.1, 100.0), Mat4::IDENTITY);
    assert_eq!(Mat4::perspective(1.0, 0.0, 0.1, 100.0), Mat4::IDENTITY);
    assert_eq!(Mat4::perspective(1.0, 1.5, 5.0, 5.0), Mat4::IDENTITY);
    assert_eq!(Mat4::perspective(1e-12, 1.5, 0.1, 100.0), Mat4::IDENTITY);
}

#[test]
fn perspective_depth_terms() {
    let (near, far) = (0.1, 100.0);
    let m = Mat4::perspective(1.0, 16.0 / 9.0, near, far);
    assert!(approx(m.get(2, 2), (far + near) / (near - far)));
    assert!(approx(m.get(2, 3), 2.0 * far * near / (near - far)));
    assert_eq!(m.get(3, 2), -1.0);
    assert_eq!(m.get(3, 3), 0.0);
}

#[test]
fn perspective_maps_near_and_far_planes_to_ndc_bounds() {
    let (near, far) = (0.5, 50.0);
    let m = Mat4::perspective(1.0, 1.0, near, far);
    assert!(approx(m.transform_point(Vec3::new(0.0, 0.0, -near)).z, -1.0));
    assert!(approx(m.transform_point(Vec3::new(0.0, 0.0, -far)).z, 1.0));
}

#[test]
fn look_at_puts_target_on_negative_z() {
    let eye = Vec3::new(0.0, 0.0, -5.0);
    let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
    let target = view.transform_point(Vec3::ZERO);
    assert!(approx(target.x, 0.0));
    assert!(approx(target.y, 0.0));
    assert!(approx(target.z, -5.0));
    assert!(approx_vec(view.transform_point(eye), Vec3::ZERO));
}

#[test]
fn look_at_parallel_up_stays_finite() {
    for (eye, up) in [
        (Vec3::new(0.0, 10.0, 0.0), Vec3::UP),
        (Vec3::new(0.0, -3.0, 0.0), Vec3::UP),
        (Vec3::new(4.0, 0.0, 0.0), Vec3::X),
    ] {
        let view = Mat4::look_at(eye, Vec3::ZERO, up);
        assert!(view.0.iter().all(|v| v.is_finite()));
        let p = view.transform_point(Vec3::ZERO);
        assert!(approx(p.z, -eye.length()));
    }
}

#[test]
fn look_at_coincident_eye_and_target_is_finite() {
    let view = Mat4::look_at(Vec3::ZERO, Vec3::ZERO, Vec3::UP);
    assert!(view.0.iter().all(|v| v.is_finite()));
}

#[test]
fn axis_angle_matches_axis_rotations() {
    let a = Mat4::rotation_axis_angle(Vec3::UP, 0.7);
    let b = Mat4::rotation_y(0.7);
    for (x, y) in a.0.iter().zip(b.0.iter()) {
        assert!(approx(*x, *y));
    }
}
