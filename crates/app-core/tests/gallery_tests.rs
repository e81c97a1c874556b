// Host-side tests for the gallery modal state machine and the catalog.

use app_core::catalog::{download_filename, next_index, RELICS};
use app_core::{GalleryEvent, GalleryState};

#[test]
fn next_index_cycles_modulo_six() {
    assert_eq!(RELICS.len(), 6);
    assert_eq!(next_index(0), 1);
    assert_eq!(next_index(4), 5);
    assert_eq!(next_index(5), 0, "index 5 must wrap to 0");
}

#[test]
fn open_fades_in_then_becomes_visible() {
    let mut g = GalleryState::default();
    assert!(!g.is_open());
    g.open(2, 10.0);
    assert!(g.is_open());
    assert_eq!(g.index(), Some(2));

    // Mid-fade: opacity halfway, no event yet.
    assert!((g.opacity(10.15) - 0.5).abs() < 1e-6);
    assert_eq!(g.tick(10.15), None);

    assert_eq!(g.tick(10.31), None);
    assert!((g.opacity(10.31) - 1.0).abs() < 1e-9);
}

#[test]
fn close_emits_event_after_fade_and_clears_state() {
    let mut g = GalleryState::default();
    g.open(1, 0.0);
    g.tick(0.4);
    g.set_zoomed(true);

    g.request_close(1.0);
    assert_eq!(g.tick(1.2), None, "close event before the fade completes");
    assert_eq!(g.tick(1.31), Some(GalleryEvent::Closed));
    assert!(!g.is_open());
    assert_eq!(g.index(), None);
    assert!(!g.is_zoomed());
    assert_eq!(g.opacity(1.4), 0.0);
}

#[test]
fn next_advances_and_fades_back_in() {
    let mut g = GalleryState::default();
    g.open(5, 0.0);
    g.tick(0.4);

    g.request_next(1.0);
    assert_eq!(g.tick(1.31), Some(GalleryEvent::Advanced(0)), "5 wraps to 0");
    assert_eq!(g.index(), Some(0));
    // Back in a fade-in; fully visible 300ms later.
    assert!(g.opacity(1.32) < 0.1);
    g.tick(1.7);
    assert!((g.opacity(1.7) - 1.0).abs() < 1e-9);
}

#[test]
fn requests_ignored_while_fading_out() {
    let mut g = GalleryState::default();
    g.open(3, 0.0);
    g.tick(0.4);

    g.request_next(1.0);
    // A close racing a next must not override the committed fade.
    g.request_close(1.1);
    assert_eq!(g.tick(1.31), Some(GalleryEvent::Advanced(4)));
    assert!(g.is_open());
}

#[test]
fn zoom_requires_an_open_modal() {
    let mut g = GalleryState::default();
    g.set_zoomed(true);
    assert!(!g.is_zoomed(), "zoom on a closed modal must be ignored");

    g.open(0, 0.0);
    g.set_zoomed(true);
    assert!(g.is_zoomed());
    g.set_zoomed(false);
    assert!(!g.is_zoomed());
}

#[test]
fn open_clamps_out_of_range_index() {
    let mut g = GalleryState::default();
    g.open(7, 0.0);
    assert_eq!(g.index(), Some(1));
}

#[test]
fn entry_exposes_catalog_data() {
    let mut g = GalleryState::default();
    assert!(g.entry().is_none());
    g.open(4, 0.0);
    let entry = g.entry().expect("open modal has an entry");
    assert_eq!(entry.title, RELICS[4].title);
    assert_eq!(entry.image, RELICS[4].image);
}

#[test]
fn download_filenames_are_slugged() {
    assert_eq!(
        download_filename("The Ancient Coin"),
        "relic-the-ancient-coin.png"
    );
    assert_eq!(download_filename("SIGNAL  FRAGMENT"), "relic-signal-fragment.png");
    assert_eq!(download_filename("  padded  "), "relic-padded.png");
    for relic in RELICS.iter() {
        let name = download_filename(relic.title);
        assert!(name.starts_with("relic-"));
        assert!(name.ends_with(".png"));
        assert!(!name.contains(' '), "unslugged space in {name:?}");
        assert_eq!(name.to_lowercase(), name);
    }
}
