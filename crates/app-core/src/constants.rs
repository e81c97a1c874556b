use std::f32::consts::PI;

// Shared scene tuning constants used by the session logic and the renderer.

// Marker ring
pub const MARKER_COUNT: usize = 6;
pub const MARKER_ORBIT_RADIUS: f32 = 9.0; // horizontal distance from origin
pub const MARKER_BOB_AMPLITUDE: f32 = 1.5;
pub const MARKER_DRIFT_RATE: f32 = 0.1; // rad/s angular drift around the ring
pub const MARKER_BOB_RATE: f32 = 0.2;
pub const MARKER_SCALE: f32 = 0.4;
pub const MARKER_SPIN_PER_FRAME: f32 = 0.01;
pub const MARKER_WIREFRAME_SCALE: f32 = 1.02;

// Picking covers the marker body plus its wireframe shell
pub const PICK_SPHERE_RADIUS: f32 = 0.45;

// Globe
pub const GLOBE_RADIUS: f32 = 5.0;
pub const GLOBE_SEGMENTS: u32 = 64;
pub const GLOBE_SPIN_PER_FRAME: f32 = 0.002;
pub const GLOBE_WIREFRAME_SPIN_PER_FRAME: f32 = 0.001;
pub const GLOBE_WIREFRAME_SCALE: f32 = 1.04;

// Entrance warp
pub const WARP_DURATION_SEC: f64 = 1.4;
pub const WARP_START_SCALE: f32 = 0.1;
pub const WARP_START_DEPTH: f32 = -100.0;

// Starfield
pub const STAR_COUNT: usize = 30_000;
pub const STAR_FIELD_EXTENT: f32 = 2000.0; // cube edge length, centered on origin
pub const STAR_SPIN_PER_FRAME: f32 = 0.0005;
pub const STAR_QUAD_HALF_SIZE: f32 = 1.5;

// Ships
pub const SHIP_COUNT: usize = 2;
pub const SHIP_ORB_RADIUS: f32 = 0.96;
pub const SHIP_GLOW_RADIUS: f32 = 1.44;
pub const SHIP_LABEL_OFFSET_Y: f32 = 5.0;
pub const SHIP_LABEL_WIDTH: f32 = 8.0;
pub const SHIP_LABEL_HEIGHT: f32 = 2.0;

// Transient effects
pub const BEAM_LIFETIME_SEC: f64 = 0.5;
pub const RIPPLE_LIFETIME_SEC: f64 = 1.2;
pub const BEAM_RADIUS: f32 = 0.05;
pub const BEAM_GATE_RATE: f32 = 2.0; // sinusoidal gate frequency on scene time
pub const BEAM_GATE_THRESHOLD: f32 = 0.8;
pub const BEAM_CHANCE: f32 = 0.1; // per-frame roll once the gate is open
pub const RIPPLE_INNER_RADIUS: f32 = 0.2;
pub const RIPPLE_OUTER_RADIUS: f32 = 5.0;

// Selection
pub const SELECT_DELAY_SEC: f64 = 0.4; // glitch flash before the modal opens

// Camera
pub const CAMERA_START_DISTANCE: f32 = 15.0;
pub const CAMERA_FOVY_RADIANS: f32 = 75.0 * PI / 180.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const RETARGET_DISTANCE: f32 = 15.0;
pub const RETARGET_DURATION_SEC: f64 = 0.8;

// Orbit rig (drag controls)
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 0.3;
pub const ORBIT_MIN_DISTANCE: f32 = 10.0;
pub const ORBIT_MAX_DISTANCE: f32 = 30.0;
