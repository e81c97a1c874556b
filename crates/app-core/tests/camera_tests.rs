// Host-side tests for the camera, the drag-orbit rig, and the re-target
// tween.

use app_core::camera::{ease_out_cubic, Camera, CameraTween, OrbitRig};
use app_core::constants::{CAMERA_START_DISTANCE, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE};
use glam::Vec3;

fn ray_distance_to_point(origin: Vec3, dir: Vec3, point: Vec3) -> f32 {
    (point - origin).cross(dir).length()
}

#[test]
fn project_then_screen_ray_passes_through_the_point() {
    let camera = Camera::at_start(16.0 / 9.0);
    let points = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(9.0, 1.5, 0.0),
        Vec3::new(-4.5, -1.0, 7.8),
        Vec3::new(2.0, 3.0, -9.0),
    ];
    for point in points {
        let ndc = camera.project(point).expect("point in front of the camera");
        let (ro, rd) = camera.screen_ray(ndc);
        let gap = ray_distance_to_point(ro, rd, point);
        assert!(gap < 1e-2, "ray missed {point:?} by {gap}");
    }
}

#[test]
fn project_rejects_points_behind_the_eye() {
    let camera = Camera::at_start(1.0);
    assert!(camera.project(Vec3::new(0.0, 0.0, 100.0)).is_none());
}

#[test]
fn ease_out_cubic_shape() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    // Ease-out: front-loaded, so the midpoint is well past linear.
    assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = ease_out_cubic(i as f32 / 100.0);
        assert!(v >= prev, "easing not monotonic at step {i}");
        prev = v;
    }
}

#[test]
fn tween_samples_from_start_to_end() {
    let tween = CameraTween {
        from: Vec3::new(0.0, 0.0, 15.0),
        to: Vec3::new(15.0, 0.0, 0.0),
        started_at: 2.0,
        duration: 0.8,
        generation: 1,
    };
    let (start, done) = tween.sample(2.0);
    assert!(start.distance(tween.from) < 1e-6);
    assert!(!done);

    let (mid, done) = tween.sample(2.4);
    assert!(!done);
    assert!(mid.distance(tween.from) > 0.0);
    assert!(mid.distance(tween.to) > 0.0);

    let (end, done) = tween.sample(2.8);
    assert!(done);
    assert!(end.distance(tween.to) < 1e-6);

    // Past the end it stays pinned.
    let (late, done) = tween.sample(10.0);
    assert!(done);
    assert!(late.distance(tween.to) < 1e-6);
}

#[test]
fn rig_round_trips_the_start_eye() {
    let eye = Vec3::new(0.0, 0.0, CAMERA_START_DISTANCE);
    let rig = OrbitRig::from_eye(eye);
    assert!(rig.eye().distance(eye) < 1e-3, "reconstructed eye {:?}", rig.eye());
}

#[test]
fn rig_zoom_clamped_to_distance_range() {
    let mut rig = OrbitRig::from_eye(Vec3::new(0.0, 0.0, 15.0));
    for _ in 0..100 {
        rig.apply_zoom(1.0);
    }
    assert!((rig.distance() - ORBIT_MAX_DISTANCE).abs() < 1e-3);
    for _ in 0..200 {
        rig.apply_zoom(-1.0);
    }
    assert!((rig.distance() - ORBIT_MIN_DISTANCE).abs() < 1e-3);
}

#[test]
fn rig_drag_preserves_distance() {
    let mut rig = OrbitRig::from_eye(Vec3::new(0.0, 0.0, 15.0));
    rig.apply_drag(0.2, 0.1);
    for _ in 0..50 {
        rig.update();
        assert!(
            (rig.eye().length() - 15.0).abs() < 1e-3,
            "drag changed the orbit distance to {}",
            rig.eye().length()
        );
    }
}

#[test]
fn rig_velocity_damps_out() {
    let mut rig = OrbitRig::from_eye(Vec3::new(0.0, 0.0, 15.0));
    rig.apply_drag(0.5, 0.0);
    // Let the damped velocity decay, then verify the rig has settled.
    for _ in 0..400 {
        rig.update();
    }
    let settled = rig.eye();
    rig.update();
    assert!(
        rig.eye().distance(settled) < 1e-4,
        "rig still moving long after the drag ended"
    );
}

#[test]
fn set_eye_reseats_the_rig() {
    let mut rig = OrbitRig::from_eye(Vec3::new(0.0, 0.0, 15.0));
    let target = Vec3::new(10.0, 4.0, 8.0);
    rig.set_eye(target);
    assert!(
        rig.eye().distance(target) < 1e-2,
        "rig did not pick up the tweened eye: {:?}",
        rig.eye()
    );
}
