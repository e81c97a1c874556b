//! The scene session: one explicitly owned object holding every piece of
//! live scene state — time, entrance warp, orbit rig and camera tween,
//! transient effects, and the pending selection. The frame loop calls
//! `tick` once per frame and hands the resulting snapshot to the
//! renderer; nothing else mutates scene state.

use crate::camera::{ease_out_cubic, Camera, CameraTween, OrbitRig};
use crate::constants::*;
use crate::effects::{beam_gate, EffectKind, EffectSet};
use crate::orbit::{marker_position, ship_position};
use crate::picking::pick_marker;
use glam::{Mat4, Vec2, Vec3, Vec4};
use rand::prelude::*;

// Scene palette (the original page's terminal green and accent blue).
pub const PALETTE_GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.255);
pub const PALETTE_BLUE: Vec3 = Vec3::new(0.0, 0.502, 1.0);

/// Static description of the two ships circling the scene.
#[derive(Clone, Copy, Debug)]
pub struct ShipSpec {
    pub name: &'static str,
    pub emblem: &'static str,
    pub css_color: &'static str,
    pub color: Vec3,
    pub intensity: f32,
}

pub const SHIPS: [ShipSpec; SHIP_COUNT] = [
    ShipSpec {
        name: "CRIMSON CORSAIR",
        emblem: "\u{2692}",
        css_color: "#ff4444",
        color: Vec3::new(1.0, 0.0, 0.0),
        intensity: 1.0,
    },
    ShipSpec {
        name: "AZURE WARDEN",
        emblem: "\u{25c6}",
        css_color: "#4488ff",
        color: Vec3::new(0.0, 0.4, 1.0),
        intensity: 0.6,
    },
];

/// One draw call's worth of per-entity data, consumed by the renderer.
#[derive(Clone, Copy, Debug)]
pub struct MeshInstance {
    pub model: Mat4,
    pub color1: Vec4,
    pub color2: Vec4,
    /// x: shader time or effect age, y: intensity, z: opacity, w: unused.
    pub params: Vec4,
}

/// Everything the renderer needs for one frame, fully resolved on the
/// CPU so the GPU side stays a dumb uploader.
pub struct FrameSnapshot {
    pub view_proj: Mat4,
    pub camera_eye: Vec3,
    pub camera_right: Vec3,
    pub camera_up: Vec3,
    pub time: f32,
    pub star_rotation: f32,
    pub globe: MeshInstance,
    pub globe_wire: MeshInstance,
    pub markers: Vec<MeshInstance>,
    pub marker_wires: Vec<MeshInstance>,
    pub ship_orbs: Vec<MeshInstance>,
    pub ship_glows: Vec<MeshInstance>,
    pub ship_labels: Vec<MeshInstance>,
    pub ship_tethers: Vec<MeshInstance>,
    pub beams: Vec<MeshInstance>,
    pub ripples: Vec<MeshInstance>,
}

/// What a tick produced beyond state mutation.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct TickEvents {
    /// Selection committed this frame (the 400ms glitch delay elapsed);
    /// the owner should open the gallery at this index.
    pub opened: Option<usize>,
    /// Entrance warp finished this frame; the status overlay may appear.
    pub entered_now: bool,
}

#[derive(Clone, Copy, Debug)]
struct PendingSelection {
    index: usize,
    at: f64,
}

pub struct SceneSession {
    time: f64,
    entered: bool,
    rig: OrbitRig,
    camera: Camera,
    tween: Option<CameraTween>,
    tween_generation: u64,
    marker_spin: f32,
    globe_spin: f32,
    globe_wire_spin: f32,
    star_spin: f32,
    effects: EffectSet,
    pending: Option<PendingSelection>,
    selected: Option<usize>,
    flash: bool,
    disposed: bool,
    rng: StdRng,
}

impl SceneSession {
    pub fn new(seed: u64, aspect: f32) -> Self {
        let camera = Camera::at_start(aspect);
        let rig = OrbitRig::from_eye(camera.eye);
        Self {
            time: 0.0,
            entered: false,
            rig,
            camera,
            tween: None,
            tween_generation: 0,
            marker_spin: 0.0,
            globe_spin: 0.0,
            globe_wire_spin: 0.0,
            star_spin: 0.0,
            effects: EffectSet::default(),
            pending: None,
            selected: None,
            flash: false,
            disposed: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect.max(1e-3);
    }

    /// Advance the scene by `dt` seconds. A disposed session ignores
    /// ticks entirely; a stray frame after teardown must not mutate
    /// anything.
    pub fn tick(&mut self, dt: f64) -> TickEvents {
        let mut events = TickEvents::default();
        if self.disposed {
            return events;
        }
        self.time += dt.max(0.0);
        let time = self.time as f32;

        if !self.entered && self.time >= WARP_DURATION_SEC {
            self.entered = true;
            events.entered_now = true;
        }

        // Constant per-frame spins, matching the render cadence.
        self.marker_spin += MARKER_SPIN_PER_FRAME;
        self.globe_spin += GLOBE_SPIN_PER_FRAME;
        self.globe_wire_spin += GLOBE_WIREFRAME_SPIN_PER_FRAME;
        self.star_spin += STAR_SPIN_PER_FRAME;

        // Camera: damped rig unless a re-target tween is in flight.
        self.rig.update();
        if let Some(tween) = self.tween {
            let (eye, done) = tween.sample(self.time);
            self.camera.eye = eye;
            if done {
                self.rig.set_eye(eye);
                self.tween = None;
            }
        } else {
            self.camera.eye = self.rig.eye();
        }
        self.camera.target = Vec3::ZERO;

        // Ship fire: sinusoidal gate plus a small per-frame chance.
        if (time * BEAM_GATE_RATE).sin() > BEAM_GATE_THRESHOLD {
            let roll = self.rng.gen::<f32>();
            if beam_gate(time, roll) {
                self.effects
                    .spawn_beam(ship_position(0, time), ship_position(1, time), self.time);
            }
        }
        self.effects.retire_expired(self.time);

        if let Some(p) = self.pending {
            if self.time >= p.at {
                self.pending = None;
                self.flash = false;
                self.selected = Some(p.index);
                events.opened = Some(p.index);
            }
        }

        events
    }

    /// Marker centers at the current scene time, index-tagged by slot.
    pub fn marker_centers(&self) -> Vec<Vec3> {
        let time = self.time as f32;
        (0..MARKER_COUNT)
            .map(|i| marker_position(i, MARKER_COUNT, time))
            .collect()
    }

    /// Pointer click in normalized device coordinates. A hit spawns a
    /// ripple at the intersection, raises the glitch flash, and commits
    /// the selection `SELECT_DELAY_SEC` later from the frame loop.
    pub fn handle_click(&mut self, ndc: Vec2) -> Option<usize> {
        if self.disposed || self.selected.is_some() || self.pending.is_some() {
            return None;
        }
        let (ro, rd) = self.camera.screen_ray(ndc);
        let centers = self.marker_centers();
        let hit = pick_marker(ro, rd, &centers, PICK_SPHERE_RADIUS)?;
        self.effects.spawn_ripple(hit.point, self.time);
        self.flash = true;
        self.pending = Some(PendingSelection {
            index: hit.index,
            at: self.time + SELECT_DELAY_SEC,
        });
        log::info!("[scene] marker {} hit at {:?}", hit.index, hit.point);
        Some(hit.index)
    }

    /// Animate the camera toward marker `index`'s direction at the fixed
    /// viewing distance. Replaces any in-flight re-target: the newest
    /// generation wins.
    pub fn retarget(&mut self, index: usize) {
        if self.disposed {
            return;
        }
        let time = self.time as f32;
        let dir = marker_position(index, MARKER_COUNT, time).normalize_or_zero();
        self.tween_generation += 1;
        self.tween = Some(CameraTween {
            from: self.camera.eye,
            to: dir * RETARGET_DISTANCE,
            started_at: self.time,
            duration: RETARGET_DURATION_SEC,
            generation: self.tween_generation,
        });
    }

    pub fn set_selection(&mut self, selection: Option<usize>) {
        self.selected = selection;
    }

    pub fn selection(&self) -> Option<usize> {
        self.selected
    }

    pub fn pointer_drag(&mut self, dx: f32, dy: f32) {
        if !self.disposed {
            self.rig.apply_drag(dx, dy);
        }
    }

    pub fn zoom(&mut self, delta: f32) {
        if !self.disposed {
            self.rig.apply_zoom(delta);
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn entered(&self) -> bool {
        self.entered
    }

    pub fn is_flash_active(&self) -> bool {
        self.flash
    }

    pub fn effects(&self) -> &EffectSet {
        &self.effects
    }

    pub fn tween_generation(&self) -> u64 {
        self.tween_generation
    }

    pub fn tween_target(&self) -> Option<Vec3> {
        self.tween.map(|t| t.to)
    }

    /// Idempotent teardown: all transient state is dropped and further
    /// ticks, clicks, and re-targets become no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.tween = None;
        self.pending = None;
        self.flash = false;
        self.effects = EffectSet::default();
        log::info!("[scene] session disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Resolve the whole frame into renderer-ready instances.
    pub fn snapshot(&self) -> FrameSnapshot {
        let time = self.time as f32;
        let green = PALETTE_GREEN.extend(1.0);
        let blue = PALETTE_BLUE.extend(1.0);

        // Entrance warp drives the globe's scale and depth.
        let warp = ease_out_cubic((self.time / WARP_DURATION_SEC).clamp(0.0, 1.0) as f32);
        let globe_scale = WARP_START_SCALE + (1.0 - WARP_START_SCALE) * warp;
        let globe_z = WARP_START_DEPTH * (1.0 - warp);
        let globe = MeshInstance {
            model: Mat4::from_translation(Vec3::new(0.0, 0.0, globe_z))
                * Mat4::from_rotation_y(self.globe_spin)
                * Mat4::from_scale(Vec3::splat(globe_scale)),
            color1: green,
            color2: blue,
            params: Vec4::new(time, 0.0, 0.0, 0.0),
        };
        let globe_wire = MeshInstance {
            model: Mat4::from_rotation_y(self.globe_wire_spin)
                * Mat4::from_scale(Vec3::splat(GLOBE_WIREFRAME_SCALE)),
            color1: green,
            color2: green,
            params: Vec4::new(time, 0.0, 0.5, 0.0),
        };

        let mut markers = Vec::with_capacity(MARKER_COUNT);
        let mut marker_wires = Vec::with_capacity(MARKER_COUNT);
        for center in self.marker_centers() {
            let base = Mat4::from_translation(center) * Mat4::from_rotation_y(self.marker_spin);
            markers.push(MeshInstance {
                model: base,
                color1: green,
                color2: blue,
                params: Vec4::new(time, 0.0, 0.6, 0.0),
            });
            marker_wires.push(MeshInstance {
                model: base * Mat4::from_scale(Vec3::splat(MARKER_WIREFRAME_SCALE)),
                color1: green,
                color2: green,
                params: Vec4::new(time, 0.0, 0.4, 0.0),
            });
        }

        let ship_positions: Vec<Vec3> = (0..SHIP_COUNT).map(|i| ship_position(i, time)).collect();
        let mut ship_orbs = Vec::with_capacity(SHIP_COUNT);
        let mut ship_glows = Vec::with_capacity(SHIP_COUNT);
        let mut ship_labels = Vec::with_capacity(SHIP_COUNT);
        let mut ship_tethers = Vec::with_capacity(SHIP_COUNT);
        for (i, spec) in SHIPS.iter().enumerate() {
            let pos = ship_positions[i];
            let other = ship_positions[(i + 1) % SHIP_COUNT];
            let orient = Mat4::from_translation(pos) * look_rotation(pos, other);
            let color = spec.color.extend(1.0);
            ship_orbs.push(MeshInstance {
                model: orient * Mat4::from_scale(Vec3::splat(SHIP_ORB_RADIUS)),
                color1: color,
                color2: color,
                params: Vec4::new(time, spec.intensity, 0.0, 0.0),
            });
            ship_glows.push(MeshInstance {
                model: orient * Mat4::from_scale(Vec3::splat(SHIP_GLOW_RADIUS)),
                color1: color,
                color2: color,
                params: Vec4::new(time, spec.intensity, 0.0, 0.0),
            });
            // Label rides above the ship, then turns to face the camera.
            let label_pos = orient.transform_point3(Vec3::new(0.0, SHIP_LABEL_OFFSET_Y, 0.0));
            ship_labels.push(MeshInstance {
                model: Mat4::from_translation(label_pos)
                    * look_rotation(label_pos, self.camera.eye),
                color1: color,
                color2: color,
                params: Vec4::new(time, 0.0, 1.0, 0.0),
            });
            // Tether line from the orb up to its label.
            ship_tethers.push(MeshInstance {
                model: Mat4::from_translation(pos)
                    * y_align_rotation(label_pos - pos)
                    * Mat4::from_scale(Vec3::new(1.0, label_pos.distance(pos), 1.0)),
                color1: color,
                color2: color,
                params: Vec4::new(time, 0.0, 0.3, 0.0),
            });
        }

        let mut beams = Vec::new();
        let mut ripples = Vec::new();
        for effect in self.effects.iter() {
            let age = effect.age(self.time) as f32;
            match effect.kind {
                EffectKind::Beam { from, to } => {
                    let mid = (from + to) * 0.5;
                    let length = from.distance(to);
                    beams.push(MeshInstance {
                        model: Mat4::from_translation(mid)
                            * y_align_rotation(to - from)
                            * Mat4::from_scale(Vec3::new(1.0, length, 1.0)),
                        color1: Vec4::new(1.0, 0.0, 0.0, 1.0),
                        color2: Vec4::new(1.0, 0.0, 0.0, 1.0),
                        params: Vec4::new(age, 1.0, 0.0, 0.0),
                    });
                }
                EffectKind::Ripple { point } => {
                    ripples.push(MeshInstance {
                        model: Mat4::from_translation(point) * look_rotation(point, Vec3::ZERO),
                        color1: green,
                        color2: green,
                        params: Vec4::new(age, 0.0, 0.0, 0.0),
                    });
                }
            }
        }

        let forward = (self.camera.target - self.camera.eye).normalize_or_zero();
        let right = forward.cross(self.camera.up).normalize_or_zero();
        let up = right.cross(forward);

        FrameSnapshot {
            view_proj: self.camera.view_proj(),
            camera_eye: self.camera.eye,
            camera_right: right,
            camera_up: up,
            time,
            star_rotation: self.star_spin,
            globe,
            globe_wire,
            markers,
            marker_wires,
            ship_orbs,
            ship_glows,
            ship_labels,
            ship_tethers,
            beams,
            ripples,
        }
    }
}

/// Rotation whose +Z axis points from `from` toward `to`, matching how
/// the meshes and the label quads are authored.
fn look_rotation(from: Vec3, to: Vec3) -> Mat4 {
    let z = (to - from).normalize_or_zero();
    if z.length_squared() < 0.5 {
        return Mat4::IDENTITY;
    }
    let mut x = Vec3::Y.cross(z);
    if x.length_squared() < 1e-8 {
        x = Vec3::X;
    }
    let x = x.normalize();
    let y = z.cross(x);
    Mat4::from_cols(x.extend(0.0), y.extend(0.0), z.extend(0.0), Vec4::W)
}

/// Rotation aligning +Y with `dir`, for the beam cylinders.
fn y_align_rotation(dir: Vec3) -> Mat4 {
    let y = dir.normalize_or_zero();
    if y.length_squared() < 0.5 {
        return Mat4::IDENTITY;
    }
    let mut x = y.cross(Vec3::Z);
    if x.length_squared() < 1e-8 {
        x = Vec3::X;
    }
    let x = x.normalize();
    let z = x.cross(y);
    Mat4::from_cols(x.extend(0.0), y.extend(0.0), z.extend(0.0), Vec4::W)
}
