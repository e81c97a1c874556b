// Host-side tests for the parametric motion functions.

use app_core::constants::{MARKER_BOB_AMPLITUDE, MARKER_COUNT, MARKER_ORBIT_RADIUS};
use app_core::orbit::{marker_position, ship_position};

#[test]
fn marker_horizontal_distance_is_orbit_radius() {
    // Property: for every index and any time, the marker sits exactly on
    // the ring in the horizontal plane.
    for i in 0..MARKER_COUNT {
        for step in 0..200 {
            let t = step as f32 * 0.37;
            let p = marker_position(i, MARKER_COUNT, t);
            let horizontal = (p.x * p.x + p.z * p.z).sqrt();
            assert!(
                (horizontal - MARKER_ORBIT_RADIUS).abs() < 1e-3,
                "marker {i} at t={t}: horizontal distance {horizontal}"
            );
        }
    }
}

#[test]
fn marker_bob_stays_within_amplitude() {
    for i in 0..MARKER_COUNT {
        for step in 0..500 {
            let t = step as f32 * 0.11;
            let p = marker_position(i, MARKER_COUNT, t);
            assert!(
                p.y.abs() <= MARKER_BOB_AMPLITUDE + 1e-4,
                "marker {i} bobbed to y={} at t={t}",
                p.y
            );
        }
    }
}

#[test]
fn markers_evenly_spaced_around_the_ring() {
    let t = 3.25;
    let mut angles: Vec<f32> = (0..MARKER_COUNT)
        .map(|i| {
            let p = marker_position(i, MARKER_COUNT, t);
            p.z.atan2(p.x)
        })
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let sector = std::f32::consts::TAU / MARKER_COUNT as f32;
    for w in angles.windows(2) {
        assert!(
            (w[1] - w[0] - sector).abs() < 1e-3,
            "uneven spacing: {} vs expected {sector}",
            w[1] - w[0]
        );
    }
}

#[test]
fn markers_drift_over_time() {
    let a = marker_position(0, MARKER_COUNT, 0.0);
    let b = marker_position(0, MARKER_COUNT, 5.0);
    assert!(
        a.distance(b) > 0.5,
        "marker 0 barely moved over 5 seconds: {a:?} -> {b:?}"
    );
}

#[test]
fn ship_orbits_stay_in_their_bands() {
    // Main circles of radius 35 and 32 with small perturbations layered
    // on; the flight paths must never leave those bands.
    for ship in 0..2 {
        for step in 0..1000 {
            let t = step as f32 * 0.21;
            let p = ship_position(ship, t);
            let horizontal = (p.x * p.x + p.z * p.z).sqrt();
            assert!(
                (25.0..45.0).contains(&horizontal),
                "ship {ship} horizontal distance {horizontal} at t={t}"
            );
            assert!(p.y.abs() < 13.0, "ship {ship} at y={} at t={t}", p.y);
        }
    }
}

#[test]
fn ships_follow_distinct_paths() {
    let mut max_gap = 0.0f32;
    for step in 0..200 {
        let t = step as f32 * 0.5;
        let gap = ship_position(0, t).distance(ship_position(1, t));
        max_gap = max_gap.max(gap);
    }
    assert!(max_gap > 5.0, "ships never separated (max gap {max_gap})");
}
