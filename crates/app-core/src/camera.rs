//! Camera state, the drag-orbit rig, and the re-target tween.

use crate::constants::*;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn at_start(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_START_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point given in normalized device
    /// coordinates (x right, y up, both in [-1, 1]).
    pub fn screen_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        (self.eye, (far - self.eye).normalize())
    }

    /// Project a world point to normalized device coordinates. Returns
    /// `None` for points at or behind the eye plane.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }
}

/// Pointer-drag orbit rig around the origin with damped velocities and a
/// clamped zoom range.
#[derive(Clone, Debug)]
pub struct OrbitRig {
    yaw: f32,
    pitch: f32,
    distance: f32,
    yaw_vel: f32,
    pitch_vel: f32,
}

impl OrbitRig {
    pub fn from_eye(eye: Vec3) -> Self {
        let distance = eye.length().clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let pitch = if distance > 0.0 {
            (eye.y / eye.length().max(1e-6)).clamp(-1.0, 1.0).acos()
        } else {
            std::f32::consts::FRAC_PI_2
        };
        Self {
            yaw: eye.x.atan2(eye.z),
            pitch: clamp_pitch(pitch),
            distance,
            yaw_vel: 0.0,
            pitch_vel: 0.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        let (sin_y, cos_y) = self.yaw.sin_cos();
        Vec3::new(
            self.distance * sin_p * sin_y,
            self.distance * cos_p,
            self.distance * sin_p * cos_y,
        )
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Feed a pointer drag, in units of full canvas sweeps.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.yaw_vel -= dx * std::f32::consts::TAU * ORBIT_ROTATE_SPEED;
        self.pitch_vel -= dy * std::f32::consts::PI * ORBIT_ROTATE_SPEED;
    }

    /// Wheel zoom; positive deltas move the camera out.
    pub fn apply_zoom(&mut self, delta: f32) {
        self.distance =
            (self.distance * (1.0 + delta * 0.1)).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    /// Per-frame damped update.
    pub fn update(&mut self) {
        self.yaw += self.yaw_vel;
        self.pitch = clamp_pitch(self.pitch + self.pitch_vel);
        self.yaw_vel *= 1.0 - ORBIT_DAMPING;
        self.pitch_vel *= 1.0 - ORBIT_DAMPING;
    }

    /// Re-seat the rig on an externally animated eye position so a drag
    /// picks up smoothly from wherever a tween left the camera.
    pub fn set_eye(&mut self, eye: Vec3) {
        let vel = (self.yaw_vel, self.pitch_vel);
        *self = Self::from_eye(eye);
        self.yaw_vel = vel.0;
        self.pitch_vel = vel.1;
    }
}

#[inline]
fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(0.05, std::f32::consts::PI - 0.05)
}

#[inline]
pub fn ease_out_cubic(progress: f32) -> f32 {
    1.0 - (1.0 - progress).powi(3)
}

/// A fire-once camera move. Tweens carry a generation number; the session
/// only ever keeps the newest one, so rapid re-targets cannot race each
/// other to the final camera position.
#[derive(Clone, Copy, Debug)]
pub struct CameraTween {
    pub from: Vec3,
    pub to: Vec3,
    pub started_at: f64,
    pub duration: f64,
    pub generation: u64,
}

impl CameraTween {
    /// Eye position at `now` and whether the tween has finished.
    pub fn sample(&self, now: f64) -> (Vec3, bool) {
        let progress = ((now - self.started_at) / self.duration).clamp(0.0, 1.0) as f32;
        let eased = ease_out_cubic(progress);
        (self.from.lerp(self.to, eased), progress >= 1.0)
    }
}
