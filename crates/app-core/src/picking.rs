//! Ray-based hit testing against the marker ring.

use glam::Vec3;

/// Closest forward intersection of a ray with a sphere, if any.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub index: usize,
    pub distance: f32,
    pub point: Vec3,
}

/// Nearest marker hit by the ray. Centers are tagged by position in the
/// slice, so the hit carries the marker index directly.
pub fn pick_marker(
    ray_origin: Vec3,
    ray_dir: Vec3,
    centers: &[Vec3],
    radius: f32,
) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;
    for (i, &center) in centers.iter().enumerate() {
        if let Some(t) = ray_sphere(ray_origin, ray_dir, center, radius) {
            match best {
                Some(b) if t >= b.distance => {}
                _ => {
                    best = Some(PickHit {
                        index: i,
                        distance: t,
                        point: ray_origin + ray_dir * t,
                    });
                }
            }
        }
    }
    best
}
