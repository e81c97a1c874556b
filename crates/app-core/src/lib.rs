pub mod boot;
pub mod camera;
pub mod catalog;
pub mod constants;
pub mod effects;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod glitch;
pub mod orbit;
pub mod picking;
pub mod session;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static STARS_WGSL: &str = include_str!("../shaders/stars.wgsl");

pub use boot::*;
pub use camera::*;
pub use catalog::*;
pub use constants::*;
pub use effects::*;
pub use error::*;
pub use gallery::*;
pub use geometry::*;
pub use glitch::*;
pub use orbit::*;
pub use picking::*;
pub use session::*;
