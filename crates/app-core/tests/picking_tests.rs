// Host-side tests for ray/sphere math and marker resolution.

use app_core::camera::Camera;
use app_core::constants::{MARKER_COUNT, PICK_SPHERE_RADIUS};
use app_core::orbit::marker_position;
use app_core::picking::{pick_marker, ray_sphere};
use glam::Vec3;

#[test]
fn ray_sphere_hits_sphere_ahead() {
    let t = ray_sphere(
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, 5.0),
        2.0,
    );
    let t = t.expect("ray aimed at the sphere must hit");
    assert!((t - 3.0).abs() < 1e-4, "entry point should be at z=3, got t={t}");
}

#[test]
fn ray_sphere_misses_off_axis_sphere() {
    let t = ray_sphere(
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 5.0),
        2.0,
    );
    assert!(t.is_none());
}

#[test]
fn ray_sphere_ignores_sphere_behind_origin() {
    let t = ray_sphere(
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, -5.0),
        2.0,
    );
    assert!(t.is_none(), "sphere behind the ray origin is not a hit");
}

#[test]
fn pick_marker_carries_slot_index() {
    let centers = vec![
        Vec3::new(100.0, 0.0, 0.0),
        Vec3::new(0.0, 100.0, 0.0),
        Vec3::new(0.0, 0.0, 50.0),
        Vec3::new(-100.0, 0.0, 0.0),
    ];
    let hit = pick_marker(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), &centers, 1.0)
        .expect("ray aimed at slot 2 must hit");
    assert_eq!(hit.index, 2);
    assert!((hit.point.z - 49.0).abs() < 1e-3, "hit point {:?}", hit.point);
}

#[test]
fn pick_marker_nearest_intersection_wins() {
    let centers = vec![Vec3::new(0.0, 0.0, 20.0), Vec3::new(0.0, 0.0, 8.0)];
    let hit = pick_marker(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), &centers, 1.0)
        .expect("both spheres on the ray");
    assert_eq!(hit.index, 1, "nearer sphere must win the pick");
}

#[test]
fn pick_marker_empty_ray_miss_is_none() {
    assert!(pick_marker(Vec3::ZERO, Vec3::X, &[], 1.0).is_none());
    let centers = vec![Vec3::new(0.0, 50.0, 0.0)];
    assert!(pick_marker(Vec3::ZERO, Vec3::X, &centers, 1.0).is_none());
}

#[test]
fn projected_marker_centers_pick_their_own_index() {
    // Property: casting a ray through each marker's projected screen
    // position resolves to that marker, for every slot in the ring.
    // Viewed edge-on the far side of the ring can hide behind the near
    // side, so the camera looks down from above where no marker
    // occludes another.
    let mut camera = Camera::at_start(1.0);
    camera.eye = Vec3::new(0.0, 10.0, 15.0);
    let time = 0.0;
    let centers: Vec<Vec3> = (0..MARKER_COUNT)
        .map(|i| marker_position(i, MARKER_COUNT, time))
        .collect();
    for (i, &center) in centers.iter().enumerate() {
        let ndc = camera
            .project(center)
            .expect("marker center should be in front of the camera");
        let (ro, rd) = camera.screen_ray(ndc);
        let hit = pick_marker(ro, rd, &centers, PICK_SPHERE_RADIUS)
            .unwrap_or_else(|| panic!("marker {i} not hit at its own projection"));
        assert_eq!(hit.index, i, "projection of marker {i} resolved to {}", hit.index);
    }
}
