//! Per-letter glitch animation for the page title.
//!
//! Every non-space letter carries its own re-rolled deadline; when it
//! fires there is a 15% chance the letter swaps to a random glyph at a
//! random intensity and schedules its own revert shortly after. One
//! scheduler iterates all letters from the frame loop; letters never
//! coordinate with each other.

use rand::prelude::*;

pub const TITLE: &str = "HALL OF THE ORBITAL RELICS";

pub const GLITCH_GLYPHS: &str =
    "!@#$%^&*()_+-=[]{}|;:,.<>?АБВГДЕЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ01";

const GLITCH_CHANCE: f32 = 0.15;
const ROLL_MIN_SEC: f64 = 0.3;
const ROLL_SPAN_SEC: f64 = 0.5;
const REVERT_MIN_SEC: f64 = 0.05;
const REVERT_SPAN_SEC: f64 = 0.15;

#[derive(Clone, Copy, Debug)]
pub struct LetterState {
    pub is_glitching: bool,
    pub intensity: f32,
    pub ch: char,
}

pub struct GlitchTitle {
    original: Vec<char>,
    letters: Vec<LetterState>,
    next_roll_at: Vec<f64>,
    revert_at: Vec<f64>,
    glyphs: Vec<char>,
    rng: StdRng,
}

impl GlitchTitle {
    pub fn new(title: &str, seed: u64, now: f64) -> Self {
        let original: Vec<char> = title.chars().collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let letters = original
            .iter()
            .map(|&ch| LetterState {
                is_glitching: false,
                intensity: 0.0,
                ch,
            })
            .collect();
        let next_roll_at = original
            .iter()
            .map(|&ch| {
                if ch == ' ' {
                    f64::INFINITY
                } else {
                    now + roll_interval(&mut rng)
                }
            })
            .collect();
        let revert_at = vec![f64::INFINITY; original.len()];
        Self {
            original,
            letters,
            next_roll_at,
            revert_at,
            glyphs: GLITCH_GLYPHS.chars().collect(),
            rng,
        }
    }

    pub fn tick(&mut self, now: f64) {
        for i in 0..self.letters.len() {
            if self.revert_at[i] <= now {
                self.revert_at[i] = f64::INFINITY;
                self.letters[i] = LetterState {
                    is_glitching: false,
                    intensity: 0.0,
                    ch: self.original[i],
                };
            }
            if self.next_roll_at[i] <= now {
                self.next_roll_at[i] = now + roll_interval(&mut self.rng);
                if self.rng.gen::<f32>() < GLITCH_CHANCE {
                    let glyph = self.glyphs[self.rng.gen_range(0..self.glyphs.len())];
                    self.letters[i] = LetterState {
                        is_glitching: true,
                        intensity: self.rng.gen::<f32>(),
                        ch: glyph,
                    };
                    self.revert_at[i] =
                        now + REVERT_MIN_SEC + self.rng.gen::<f64>() * REVERT_SPAN_SEC;
                }
            }
        }
    }

    pub fn letters(&self) -> &[LetterState] {
        &self.letters
    }

    pub fn display(&self) -> String {
        self.letters.iter().map(|l| l.ch).collect()
    }

    pub fn any_glitching(&self) -> bool {
        self.letters.iter().any(|l| l.is_glitching)
    }
}

#[inline]
fn roll_interval(rng: &mut StdRng) -> f64 {
    ROLL_MIN_SEC + rng.gen::<f64>() * ROLL_SPAN_SEC
}
