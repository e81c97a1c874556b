// Host-side tests for the scene session: selection flow, teardown
// discipline, effect lifecycle under the frame loop, and the full
// boot-to-gallery path on a fake clock.

use app_core::constants::{MARKER_COUNT, RETARGET_DISTANCE, SELECT_DELAY_SEC, WARP_DURATION_SEC};
use app_core::effects::EffectKind;
use app_core::orbit::marker_position;
use app_core::{BootSequence, GalleryEvent, GalleryState, SceneSession};

const DT: f64 = 1.0 / 60.0;

#[test]
fn click_at_projected_marker_commits_after_delay() {
    let mut session = SceneSession::new(11, 1.0);
    let centers = session.marker_centers();
    let ndc = session
        .camera()
        .project(centers[2])
        .expect("marker 2 in front of the start camera");

    assert_eq!(session.handle_click(ndc), Some(2));
    assert!(session.is_flash_active(), "hit must raise the glitch flash");
    assert_eq!(session.selection(), None, "selection must wait out the delay");
    let ripples = session
        .effects()
        .iter()
        .filter(|e| matches!(e.kind, EffectKind::Ripple { .. }))
        .count();
    assert_eq!(ripples, 1, "hit must spawn exactly one ripple");

    // A second click while one is pending is ignored.
    assert_eq!(session.handle_click(ndc), None);

    let mut opened = None;
    let mut elapsed = 0.0;
    while elapsed < SELECT_DELAY_SEC + 0.1 {
        elapsed += DT;
        if let Some(i) = session.tick(DT).opened {
            opened = Some(i);
            break;
        }
        assert!(session.is_flash_active(), "flash cleared before the commit");
    }
    assert_eq!(opened, Some(2));
    assert_eq!(session.selection(), Some(2));
    assert!(!session.is_flash_active(), "flash must clear on commit");

    // With a live selection further clicks stay ignored.
    assert_eq!(session.handle_click(ndc), None);
}

#[test]
fn click_miss_changes_nothing() {
    let mut session = SceneSession::new(3, 1.0);
    // Straight through the scene center: the marker ring is well off
    // this axis.
    assert_eq!(session.handle_click(glam::Vec2::ZERO), None);
    assert!(!session.is_flash_active());
    assert!(session.effects().is_empty());
    for _ in 0..60 {
        assert_eq!(session.tick(DT).opened, None);
    }
    assert_eq!(session.selection(), None);
}

#[test]
fn entrance_warp_fires_entered_once() {
    let mut session = SceneSession::new(1, 1.0);
    assert!(!session.entered());
    let mut fired = 0;
    let mut elapsed = 0.0;
    while elapsed < WARP_DURATION_SEC + 0.5 {
        elapsed += 0.1;
        if session.tick(0.1).entered_now {
            fired += 1;
        }
    }
    assert_eq!(fired, 1, "entered_now must fire exactly once");
    assert!(session.entered());
}

#[test]
fn dispose_makes_everything_a_noop() {
    let mut session = SceneSession::new(5, 1.0);
    for _ in 0..30 {
        session.tick(DT);
    }
    let time_before = session.time();

    session.dispose();
    assert!(session.is_disposed());
    assert!(session.effects().is_empty(), "dispose drops transient effects");

    // A stray frame after teardown must not mutate anything.
    let events = session.tick(DT);
    assert_eq!(events.opened, None);
    assert!(!events.entered_now);
    assert_eq!(session.time(), time_before, "disposed session advanced time");

    let centers = session.marker_centers();
    let ndc = session.camera().project(centers[0]);
    if let Some(ndc) = ndc {
        assert_eq!(session.handle_click(ndc), None);
    }
    session.retarget(1);
    assert_eq!(session.tween_target(), None, "disposed session accepted a re-target");

    // Second dispose is a no-op, not a fault.
    session.dispose();
    assert!(session.is_disposed());
}

#[test]
fn effects_never_outlive_their_lifetimes_under_the_loop() {
    let mut session = SceneSession::new(1234, 1.0);
    let mut seen_any = false;
    for _ in 0..3600 {
        session.tick(DT);
        let now = session.time();
        for effect in session.effects().iter() {
            seen_any = true;
            assert!(
                effect.age(now) <= effect.lifetime() + 1e-9,
                "stale effect of age {} in the active set",
                effect.age(now)
            );
        }
    }
    // One simulated minute of beam-gate windows should fire at least once.
    assert!(seen_any, "no beam ever spawned in 60 simulated seconds");
}

#[test]
fn newer_retarget_replaces_the_inflight_one() {
    let mut session = SceneSession::new(2, 1.0);
    session.retarget(0);
    let gen_first = session.tween_generation();
    let first_target = session.tween_target().unwrap();

    for _ in 0..6 {
        session.tick(DT);
    }
    session.retarget(3);
    assert_eq!(session.tween_generation(), gen_first + 1);
    let second_target = session.tween_target().unwrap();
    assert!(
        first_target.distance(second_target) > 1.0,
        "second re-target kept the old destination"
    );

    // Drive the tween to completion; only the newest target wins.
    for _ in 0..60 {
        session.tick(DT);
    }
    assert_eq!(session.tween_target(), None, "tween should have finished");
    assert!(
        session.camera().eye.distance(second_target) < 0.05,
        "camera settled at {:?} instead of {:?}",
        session.camera().eye,
        second_target
    );
}

#[test]
fn snapshot_carries_the_whole_scene() {
    let mut session = SceneSession::new(8, 1.0);
    for _ in 0..10 {
        session.tick(DT);
    }
    let snap = session.snapshot();
    assert_eq!(snap.markers.len(), MARKER_COUNT);
    assert_eq!(snap.marker_wires.len(), MARKER_COUNT);
    assert_eq!(snap.ship_orbs.len(), 2);
    assert_eq!(snap.ship_glows.len(), 2);
    assert_eq!(snap.ship_labels.len(), 2);
    assert_eq!(snap.ship_tethers.len(), 2);
    assert_eq!(
        snap.beams.len() + snap.ripples.len(),
        session.effects().len(),
        "snapshot must mirror the live effect set"
    );
    assert!(snap.view_proj.is_finite());
}

#[test]
fn end_to_end_boot_click_next() {
    // Boot on the fake clock; completion is observable exactly once.
    let mut boot = BootSequence::new(42, 0.0);
    let mut now = 0.0;
    while !boot.is_done() {
        now += 0.016;
        boot.tick(now);
        assert!(now < 60.0, "boot never completed");
    }
    assert!(boot.take_completed());
    assert!(!boot.take_completed());

    // Scene mounts; click marker 2 at its projected screen position.
    let mut session = SceneSession::new(7, 1.0);
    let mut gallery = GalleryState::default();
    let centers = session.marker_centers();
    let ndc = session.camera().project(centers[2]).unwrap();
    assert_eq!(session.handle_click(ndc), Some(2));

    let mut page_now = 0.0;
    let mut opened = None;
    for _ in 0..40 {
        page_now += 0.016;
        if let Some(i) = session.tick(0.016).opened {
            opened = Some(i);
            gallery.open(i, page_now);
            break;
        }
    }
    assert_eq!(opened, Some(2));
    assert_eq!(session.selection(), Some(2));

    // Let the modal fade in, then advance to the next relic.
    page_now += 0.4;
    gallery.tick(page_now);
    gallery.request_next(page_now);
    let mut advanced = None;
    for _ in 0..30 {
        page_now += 0.016;
        session.tick(0.016);
        if let Some(GalleryEvent::Advanced(i)) = gallery.tick(page_now) {
            advanced = Some(i);
            session.set_selection(Some(i));
            session.retarget(i);
            break;
        }
    }
    assert_eq!(advanced, Some(3));
    assert_eq!(session.selection(), Some(3));

    // The camera heads for marker 3's direction at the viewing distance.
    let target = session.tween_target().expect("re-target tween in flight");
    assert!((target.length() - RETARGET_DISTANCE).abs() < 1e-3);
    let expected_dir = marker_position(3, MARKER_COUNT, session.time() as f32).normalize();
    assert!(
        target.normalize().dot(expected_dir) > 0.999,
        "tween target {target:?} not toward marker 3"
    );
    for _ in 0..60 {
        session.tick(0.016);
    }
    assert!(session.camera().eye.distance(target) < 0.05);
}
