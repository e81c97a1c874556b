//! Parametric placement for everything that moves: the marker ring and
//! the two free-flying ships. Positions are pure functions of time and
//! are recomputed every frame; nothing here is stored authoritatively.

use crate::constants::*;
use glam::Vec3;
use std::f32::consts::TAU;

/// Orbital position of marker `index` at scene time `time`: a slow
/// angular drift around the ring plus a secondary vertical bob. The
/// horizontal distance from the origin is always `MARKER_ORBIT_RADIUS`.
pub fn marker_position(index: usize, count: usize, time: f32) -> Vec3 {
    let angle = (index as f32 / count as f32) * TAU + time * MARKER_DRIFT_RATE;
    Vec3::new(
        angle.cos() * MARKER_ORBIT_RADIUS,
        (angle * 0.3 + time * MARKER_BOB_RATE).sin() * MARKER_BOB_AMPLITUDE,
        angle.sin() * MARKER_ORBIT_RADIUS,
    )
}

/// Ship flight paths: wide circular orbits with high-frequency
/// sinusoidal perturbation layered on for organic motion. Each ship has
/// its own radius, angular speed, and perturbation mix.
pub fn ship_position(ship: usize, time: f32) -> Vec3 {
    match ship {
        0 => {
            let s = time * 0.15;
            Vec3::new(
                s.cos() * 35.0 + (s * 2.3).sin() * 3.0,
                (s * 0.4).sin() * 10.0 + (s * 1.7).cos() * 2.0,
                s.sin() * 35.0 + (s * 1.9).cos() * 4.0,
            )
        }
        _ => {
            let s = time * 0.18;
            Vec3::new(
                s.cos() * 32.0 + (s * 2.1).sin() * 2.0,
                (s * 0.5).sin() * 8.0 + (s * 1.5).cos() * 3.0,
                s.sin() * 32.0 + (s * 2.2).cos() * 3.0,
            )
        }
    }
}
