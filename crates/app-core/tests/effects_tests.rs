// Host-side tests for transient effect lifecycle and the beam gate.

use app_core::constants::{BEAM_LIFETIME_SEC, RIPPLE_LIFETIME_SEC};
use app_core::effects::{beam_gate, EffectKind, EffectSet};
use glam::Vec3;

#[test]
fn beam_retired_after_half_second() {
    let mut set = EffectSet::default();
    let t0 = 2.0;
    set.spawn_beam(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), t0);

    set.retire_expired(t0 + 0.49);
    assert_eq!(set.len(), 1, "beam vanished before its lifetime");
    set.retire_expired(t0 + BEAM_LIFETIME_SEC);
    assert_eq!(set.len(), 1, "beam retired exactly at its lifetime");
    set.retire_expired(t0 + 0.51);
    assert!(set.is_empty(), "beam survived past its lifetime");
}

#[test]
fn ripple_retired_after_its_longer_lifetime() {
    let mut set = EffectSet::default();
    let t0 = 5.0;
    set.spawn_ripple(Vec3::new(0.0, 0.0, 9.0), t0);

    set.retire_expired(t0 + 1.19);
    assert_eq!(set.len(), 1);
    set.retire_expired(t0 + RIPPLE_LIFETIME_SEC + 0.01);
    assert!(set.is_empty(), "ripple survived past 1.2s");
}

#[test]
fn retire_keeps_younger_effects() {
    let mut set = EffectSet::default();
    set.spawn_beam(Vec3::ZERO, Vec3::X, 0.0);
    set.spawn_ripple(Vec3::ZERO, 0.0);
    set.spawn_beam(Vec3::ZERO, Vec3::X, 0.4);
    assert_eq!(set.len(), 3);

    // First beam dies at 0.5, second at 0.9, ripple at 1.2.
    set.retire_expired(0.6);
    assert_eq!(set.len(), 2);
    set.retire_expired(1.0);
    assert_eq!(set.len(), 1);
    assert!(matches!(
        set.iter().next().unwrap().kind,
        EffectKind::Ripple { .. }
    ));
    set.retire_expired(1.3);
    assert!(set.is_empty());
}

#[test]
fn effect_age_tracks_elapsed_time() {
    let mut set = EffectSet::default();
    set.spawn_ripple(Vec3::ZERO, 10.0);
    let effect = set.iter().next().unwrap();
    assert!((effect.age(10.75) - 0.75).abs() < 1e-9);
    assert!(!effect.expired(10.75));
    assert!(effect.expired(11.3));
}

#[test]
fn beam_gate_needs_open_window_and_lucky_roll() {
    // sin(2t) peaks at t = pi/4; the gate is open there.
    let open = std::f32::consts::FRAC_PI_4;
    assert!(beam_gate(open, 0.05), "open window with low roll must fire");
    assert!(!beam_gate(open, 0.15), "roll above the chance must not fire");

    // sin(0) = 0 and sin(pi) = 0: window closed regardless of the roll.
    assert!(!beam_gate(0.0, 0.0));
    assert!(!beam_gate(std::f32::consts::FRAC_PI_2, 0.0));
}

#[test]
fn all_spawned_effects_eventually_removed() {
    let mut set = EffectSet::default();
    for i in 0..20 {
        let t = i as f64 * 0.1;
        if i % 2 == 0 {
            set.spawn_beam(Vec3::ZERO, Vec3::X, t);
        } else {
            set.spawn_ripple(Vec3::ZERO, t);
        }
    }
    // Last spawn at t=1.9; last ripple expires at 3.1.
    set.retire_expired(3.2);
    assert!(set.is_empty(), "effect set must drain completely");
}
