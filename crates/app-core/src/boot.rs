//! Boot-up terminal sequence.
//!
//! Four scripted lines are typed out character by character; the first
//! three are followed by a progress-bar fill, the last by a held glitch
//! state that ends the sequence. The whole thing is a deadline-driven
//! state machine advanced from the frame loop, so dropping it cancels
//! every pending transition at once and nothing can fire after teardown.

use rand::prelude::*;

pub const BOOT_LINES: [&str; 4] = [
    "Establishing uplink...",
    "Scanning debris field for hostile contacts...",
    "Sector clear. Aligning orbital relay...",
    "Custodian, an offering awaits your judgement.",
];

// Typing cadence: per-character delay re-rolled in this range.
const TYPE_DELAY_MIN_SEC: f64 = 0.030;
const TYPE_DELAY_SPAN_SEC: f64 = 0.030;

// Step 3 epilogue: hold, then glitch, then complete.
const FINAL_HOLD_SEC: f64 = 0.6;
const FINAL_GLITCH_SEC: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Typing { next_char_at: f64 },
    Progress { next_inc_at: f64 },
    Pause { until: f64 },
    Hold { until: f64 },
    Glitching { until: f64 },
    Done,
}

pub struct BootSequence {
    step: usize,
    chars_shown: usize,
    progress: u32,
    phase: Phase,
    completed: bool,
    completion_taken: bool,
    rng: StdRng,
}

impl BootSequence {
    pub fn new(seed: u64, now: f64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let first_delay = type_delay(&mut rng);
        Self {
            step: 0,
            chars_shown: 0,
            progress: 0,
            phase: Phase::Typing {
                next_char_at: now + first_delay,
            },
            completed: false,
            completion_taken: false,
            rng,
        }
    }

    /// Advance the sequence to `now`, firing every deadline that has
    /// elapsed. Safe to call with large gaps; transitions are processed
    /// in order.
    pub fn tick(&mut self, now: f64) {
        // Bounded by the total number of transitions in the script.
        loop {
            match self.phase {
                Phase::Typing { next_char_at } if now >= next_char_at => {
                    self.chars_shown += 1;
                    let line_len = BOOT_LINES[self.step].chars().count();
                    if self.chars_shown >= line_len {
                        self.chars_shown = line_len;
                        self.phase = if self.step < 3 {
                            let (_, interval, _) = progress_params(self.step);
                            Phase::Progress {
                                next_inc_at: next_char_at + interval,
                            }
                        } else {
                            Phase::Hold {
                                until: next_char_at + FINAL_HOLD_SEC,
                            }
                        };
                    } else {
                        self.phase = Phase::Typing {
                            next_char_at: next_char_at + type_delay(&mut self.rng),
                        };
                    }
                }
                Phase::Progress { next_inc_at } if now >= next_inc_at => {
                    let (inc, interval, pause) = progress_params(self.step);
                    self.progress = (self.progress + inc).min(100);
                    self.phase = if self.progress >= 100 {
                        Phase::Pause {
                            until: next_inc_at + pause,
                        }
                    } else {
                        Phase::Progress {
                            next_inc_at: next_inc_at + interval,
                        }
                    };
                }
                Phase::Pause { until } if now >= until => {
                    self.step += 1;
                    self.chars_shown = 0;
                    self.progress = 0;
                    self.phase = Phase::Typing {
                        next_char_at: until + type_delay(&mut self.rng),
                    };
                }
                Phase::Hold { until } if now >= until => {
                    self.phase = Phase::Glitching {
                        until: until + FINAL_GLITCH_SEC,
                    };
                }
                Phase::Glitching { until } if now >= until => {
                    self.completed = true;
                    self.phase = Phase::Done;
                }
                _ => break,
            }
        }
    }

    /// Observe completion exactly once. Subsequent calls return false,
    /// which is what keeps rapid remounts from double-firing the owner's
    /// completion path.
    pub fn take_completed(&mut self) -> bool {
        if self.completed && !self.completion_taken {
            self.completion_taken = true;
            true
        } else {
            false
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn display_text(&self) -> String {
        BOOT_LINES[self.step].chars().take(self.chars_shown).collect()
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// The last line has no progress bar.
    pub fn show_progress_bar(&self) -> bool {
        self.step < 3
    }

    pub fn is_glitching(&self) -> bool {
        matches!(self.phase, Phase::Glitching { .. } | Phase::Done)
    }
}

#[inline]
fn type_delay(rng: &mut StdRng) -> f64 {
    TYPE_DELAY_MIN_SEC + rng.gen::<f64>() * TYPE_DELAY_SPAN_SEC
}

/// (increment, interval, trailing pause) per step with a bar. The final
/// fill before the last line runs slightly faster.
#[inline]
fn progress_params(step: usize) -> (u32, f64, f64) {
    if step < 2 {
        (4, 0.020, 0.2)
    } else {
        (3, 0.015, 0.3)
    }
}
