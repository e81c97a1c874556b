//! Gallery modal state: fade transitions, fullscreen zoom, and the
//! "next" cycle through the relic catalog.

use crate::catalog;

pub const FADE_SEC: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PendingAction {
    Close,
    Next,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Hidden,
    FadingIn { since: f64 },
    Visible,
    FadingOut { since: f64, then: PendingAction },
}

/// Emitted by `tick` when a fade completes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GalleryEvent {
    /// Modal finished closing; the owner should clear its selection.
    Closed,
    /// "Next" committed; carries the new index so the owner can re-point
    /// the camera.
    Advanced(usize),
}

pub struct GalleryState {
    phase: Phase,
    index: Option<usize>,
    zoomed: bool,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            phase: Phase::Hidden,
            index: None,
            zoomed: false,
        }
    }
}

impl GalleryState {
    pub fn open(&mut self, index: usize, now: f64) {
        self.index = Some(index % catalog::RELICS.len());
        self.zoomed = false;
        self.phase = Phase::FadingIn { since: now };
    }

    pub fn request_close(&mut self, now: f64) {
        if self.is_open() && !matches!(self.phase, Phase::FadingOut { .. }) {
            self.phase = Phase::FadingOut {
                since: now,
                then: PendingAction::Close,
            };
        }
    }

    pub fn request_next(&mut self, now: f64) {
        if self.is_open() && !matches!(self.phase, Phase::FadingOut { .. }) {
            self.phase = Phase::FadingOut {
                since: now,
                then: PendingAction::Next,
            };
        }
    }

    pub fn set_zoomed(&mut self, zoomed: bool) {
        if self.is_open() {
            self.zoomed = zoomed;
        }
    }

    pub fn tick(&mut self, now: f64) -> Option<GalleryEvent> {
        match self.phase {
            Phase::FadingIn { since } if now - since >= FADE_SEC => {
                self.phase = Phase::Visible;
                None
            }
            Phase::FadingOut { since, then } if now - since >= FADE_SEC => match then {
                PendingAction::Close => {
                    self.phase = Phase::Hidden;
                    self.index = None;
                    self.zoomed = false;
                    Some(GalleryEvent::Closed)
                }
                PendingAction::Next => {
                    let next = catalog::next_index(self.index.unwrap_or(0));
                    self.index = Some(next);
                    self.phase = Phase::FadingIn { since: now };
                    Some(GalleryEvent::Advanced(next))
                }
            },
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.index.is_some()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn entry(&self) -> Option<&'static catalog::RelicEntry> {
        self.index.map(|i| &catalog::RELICS[i])
    }

    /// Current opacity for the fade transitions.
    pub fn opacity(&self, now: f64) -> f64 {
        match self.phase {
            Phase::Hidden => 0.0,
            Phase::Visible => 1.0,
            Phase::FadingIn { since } => ((now - since) / FADE_SEC).clamp(0.0, 1.0),
            Phase::FadingOut { since, .. } => 1.0 - ((now - since) / FADE_SEC).clamp(0.0, 1.0),
        }
    }
}
