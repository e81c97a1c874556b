// Host-side tests for the per-letter title glitch scheduler.

use app_core::{GlitchTitle, GLITCH_GLYPHS, TITLE};

fn glyph_set() -> Vec<char> {
    GLITCH_GLYPHS.chars().collect()
}

#[test]
fn display_always_matches_title_length() {
    let mut title = GlitchTitle::new(TITLE, 1, 0.0);
    let expected = TITLE.chars().count();
    for step in 0..4000 {
        title.tick(step as f64 * 0.03);
        assert_eq!(title.display().chars().count(), expected);
    }
}

#[test]
fn spaces_never_glitch() {
    let original: Vec<char> = TITLE.chars().collect();
    let mut title = GlitchTitle::new(TITLE, 2, 0.0);
    for step in 0..4000 {
        title.tick(step as f64 * 0.03);
        for (i, letter) in title.letters().iter().enumerate() {
            if original[i] == ' ' {
                assert!(!letter.is_glitching, "space at {i} glitched");
                assert_eq!(letter.ch, ' ');
            }
        }
    }
}

#[test]
fn glitching_letters_use_the_symbol_set() {
    let glyphs = glyph_set();
    let original: Vec<char> = TITLE.chars().collect();
    let mut title = GlitchTitle::new(TITLE, 3, 0.0);
    let mut saw_glitch = false;
    for step in 0..4000 {
        title.tick(step as f64 * 0.03);
        for (i, letter) in title.letters().iter().enumerate() {
            if letter.is_glitching {
                saw_glitch = true;
                assert!(
                    glyphs.contains(&letter.ch),
                    "glitch glyph {:?} not from the symbol set",
                    letter.ch
                );
                assert!(
                    (0.0..=1.0).contains(&letter.intensity),
                    "intensity {} out of range",
                    letter.intensity
                );
            } else {
                assert_eq!(
                    letter.ch, original[i],
                    "calm letter {i} shows a substituted glyph"
                );
            }
        }
    }
    assert!(saw_glitch, "no letter glitched over two simulated minutes");
}

#[test]
fn glitches_revert_on_their_own() {
    let mut title = GlitchTitle::new(TITLE, 4, 0.0);
    let mut saw_glitching = false;
    let mut saw_calm_after_glitch = false;
    for step in 0..4000 {
        title.tick(step as f64 * 0.03);
        if title.any_glitching() {
            saw_glitching = true;
        } else if saw_glitching {
            saw_calm_after_glitch = true;
        }
    }
    assert!(saw_glitching);
    assert!(
        saw_calm_after_glitch,
        "title never returned to a fully calm state"
    );
}

#[test]
fn same_seed_is_deterministic() {
    let mut a = GlitchTitle::new(TITLE, 9, 0.0);
    let mut b = GlitchTitle::new(TITLE, 9, 0.0);
    for step in 0..2000 {
        let now = step as f64 * 0.025;
        a.tick(now);
        b.tick(now);
        assert_eq!(a.display(), b.display(), "divergence at t={now}");
    }
}
