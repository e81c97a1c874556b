//! Transient visual effects: phaser beams between the ships and click
//! ripples on the markers. Every effect records its spawn time and is
//! retired by the frame tick once its age exceeds the fixed lifetime, so
//! the active set can never reference anything stale.

use crate::constants::*;
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug)]
pub enum EffectKind {
    Beam { from: Vec3, to: Vec3 },
    Ripple { point: Vec3 },
}

#[derive(Clone, Copy, Debug)]
pub struct TransientEffect {
    pub kind: EffectKind,
    pub spawned_at: f64,
}

impl TransientEffect {
    pub fn lifetime(&self) -> f64 {
        match self.kind {
            EffectKind::Beam { .. } => BEAM_LIFETIME_SEC,
            EffectKind::Ripple { .. } => RIPPLE_LIFETIME_SEC,
        }
    }

    pub fn age(&self, now: f64) -> f64 {
        now - self.spawned_at
    }

    pub fn expired(&self, now: f64) -> bool {
        self.age(now) > self.lifetime()
    }
}

/// Firing gate for the ship beams: a sinusoidal window on scene time
/// combined with a small per-frame random chance.
#[inline]
pub fn beam_gate(time: f32, roll: f32) -> bool {
    (time * BEAM_GATE_RATE).sin() > BEAM_GATE_THRESHOLD && roll < BEAM_CHANCE
}

#[derive(Default)]
pub struct EffectSet {
    effects: SmallVec<[TransientEffect; 8]>,
}

impl EffectSet {
    pub fn spawn_beam(&mut self, from: Vec3, to: Vec3, now: f64) {
        self.effects.push(TransientEffect {
            kind: EffectKind::Beam { from, to },
            spawned_at: now,
        });
    }

    pub fn spawn_ripple(&mut self, point: Vec3, now: f64) {
        self.effects.push(TransientEffect {
            kind: EffectKind::Ripple { point },
            spawned_at: now,
        });
    }

    pub fn retire_expired(&mut self, now: f64) {
        self.effects.retain(|e| !e.expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransientEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
