//! CPU-side mesh and starfield generation. Meshes are produced once at
//! scene setup and uploaded verbatim; the renderer never mutates them.

use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Star {
    pub position: [f32; 3],
    pub _pad: f32,
    pub color: [f32; 4],
}

/// Triangle mesh plus a line-list overlay of the same surface for the
/// wireframe shells.
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub wire_indices: Vec<u32>,
}

/// Lat/lon UV sphere. Poles are duplicated per column, the seam per row,
/// which keeps the index math trivial and the wireframe overlay aligned
/// with the shading grid.
pub fn sphere_mesh(radius: f32, lat_segments: u32, lon_segments: u32) -> Mesh {
    let lat_segments = lat_segments.max(3);
    let lon_segments = lon_segments.max(3);

    let mut vertices =
        Vec::with_capacity(((lat_segments + 1) * (lon_segments + 1)) as usize);
    for lat in 0..=lat_segments {
        let v = lat as f32 / lat_segments as f32;
        let theta = v * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for lon in 0..=lon_segments {
            let u = lon as f32 / lon_segments as f32;
            let phi = u * TAU;
            let (sin_p, cos_p) = phi.sin_cos();
            let n = [sin_t * cos_p, cos_t, sin_t * sin_p];
            vertices.push(Vertex {
                position: [n[0] * radius, n[1] * radius, n[2] * radius],
                normal: n,
                uv: [u, v],
            });
        }
    }

    let stride = lon_segments + 1;
    let mut indices = Vec::with_capacity((lat_segments * lon_segments * 6) as usize);
    for lat in 0..lat_segments {
        for lon in 0..lon_segments {
            let i0 = lat * stride + lon;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    let mut wire_indices = Vec::new();
    for lat in 0..=lat_segments {
        for lon in 0..lon_segments {
            let i0 = lat * stride + lon;
            wire_indices.extend_from_slice(&[i0, i0 + 1]);
        }
    }
    for lat in 0..lat_segments {
        for lon in 0..=lon_segments {
            let i0 = lat * stride + lon;
            wire_indices.extend_from_slice(&[i0, i0 + stride]);
        }
    }

    Mesh {
        vertices,
        indices,
        wire_indices,
    }
}

/// Press a crater into the +X cap of a sphere mesh: vertices past 40% of
/// the radius on X and within 50% of the radius of the X axis are pushed
/// inward by a cosine profile. Normals are recomputed afterwards.
pub fn apply_crater(mesh: &mut Mesh, radius: f32, period: f32, depth: f32) {
    for v in &mut mesh.vertices {
        let [x, y, z] = v.position;
        let rim = (y * y + z * z).sqrt();
        if x > radius * 0.4 && rim < radius * 0.5 {
            let indentation = (rim * PI / period).cos() * depth;
            v.position[0] = x - indentation.max(0.0);
        }
    }
    recompute_normals(mesh);
}

fn recompute_normals(mesh: &mut Mesh) {
    let mut accum = vec![Vec3::ZERO; mesh.vertices.len()];
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let pa = Vec3::from(mesh.vertices[a].position);
        let pb = Vec3::from(mesh.vertices[b].position);
        let pc = Vec3::from(mesh.vertices[c].position);
        let face = (pb - pa).cross(pc - pa);
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }
    for (v, n) in mesh.vertices.iter_mut().zip(accum) {
        let n = n.normalize_or_zero();
        // Seam duplicates at the poles only touch degenerate triangles;
        // they keep their analytic normal.
        if n != Vec3::ZERO {
            v.normal = [n.x, n.y, n.z];
        }
    }
}

/// The primary globe: radius 5, dense grid, deep crater.
pub fn globe_mesh() -> Mesh {
    use crate::constants::{GLOBE_RADIUS, GLOBE_SEGMENTS};
    let mut mesh = sphere_mesh(GLOBE_RADIUS, GLOBE_SEGMENTS, GLOBE_SEGMENTS);
    apply_crater(&mut mesh, GLOBE_RADIUS, GLOBE_RADIUS, 0.8);
    mesh
}

/// The miniature marker spheres: same silhouette at scale, shallower
/// crater profile.
pub fn marker_mesh() -> Mesh {
    use crate::constants::MARKER_SCALE;
    let mut mesh = sphere_mesh(MARKER_SCALE, 32, 32);
    apply_crater(&mut mesh, MARKER_SCALE, MARKER_SCALE * 2.0, MARKER_SCALE * 0.2);
    mesh
}

/// Flat ring in the XY plane, UV-mapped so `uv - 0.5` is a radial
/// coordinate normalized to the outer radius.
pub fn ring_mesh(inner: f32, outer: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(((segments + 1) * 2) as usize);
    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin_a, cos_a) = angle.sin_cos();
        for r in [inner, outer] {
            let (x, y) = (cos_a * r, sin_a * r);
            vertices.push(Vertex {
                position: [x, y, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [(x / outer + 1.0) * 0.5, (y / outer + 1.0) * 0.5],
            });
        }
    }
    let mut indices = Vec::with_capacity((segments * 6) as usize);
    for i in 0..segments {
        let base = i * 2;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
    }
    Mesh {
        vertices,
        indices,
        wire_indices: Vec::new(),
    }
}

/// Open-ended unit-height cylinder along Y, centered on the origin. The
/// beam shader reads `uv.x` as the around-axis coordinate to carve its
/// bright core.
pub fn cylinder_mesh(radius: f32, radial_segments: u32) -> Mesh {
    let radial_segments = radial_segments.max(3);
    let mut vertices = Vec::with_capacity(((radial_segments + 1) * 2) as usize);
    for i in 0..=radial_segments {
        let u = i as f32 / radial_segments as f32;
        let angle = u * TAU;
        let (sin_a, cos_a) = angle.sin_cos();
        for (y, v) in [(-0.5_f32, 0.0_f32), (0.5, 1.0)] {
            vertices.push(Vertex {
                position: [cos_a * radius, y, sin_a * radius],
                normal: [cos_a, 0.0, sin_a],
                uv: [u, v],
            });
        }
    }
    let mut indices = Vec::with_capacity((radial_segments * 6) as usize);
    for i in 0..radial_segments {
        let base = i * 2;
        indices.extend_from_slice(&[base, base + 2, base + 1, base + 1, base + 2, base + 3]);
    }
    Mesh {
        vertices,
        indices,
        wire_indices: Vec::new(),
    }
}

/// Unit line from the origin to +Y, drawn with the wireframe pipeline.
/// The ships use it as the tether between orb and label.
pub fn line_mesh() -> Mesh {
    let vertices = vec![
        Vertex {
            position: [0.0, 0.0, 0.0],
            normal: [0.0, 1.0, 0.0],
            uv: [0.0, 0.0],
        },
        Vertex {
            position: [0.0, 1.0, 0.0],
            normal: [0.0, 1.0, 0.0],
            uv: [0.0, 1.0],
        },
    ];
    Mesh {
        vertices,
        indices: Vec::new(),
        wire_indices: vec![0, 1],
    }
}

/// Camera-facing label quad in the XY plane.
pub fn quad_mesh(width: f32, height: f32) -> Mesh {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let vertices = vec![
        Vertex {
            position: [-hw, -hh, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 1.0],
        },
        Vertex {
            position: [hw, -hh, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [1.0, 1.0],
        },
        Vertex {
            position: [hw, hh, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [1.0, 0.0],
        },
        Vertex {
            position: [-hw, hh, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 0.0],
        },
    ];
    Mesh {
        vertices,
        indices: vec![0, 1, 2, 0, 2, 3],
        wire_indices: Vec::new(),
    }
}

/// Randomized starfield: positions uniform in a cube around the origin,
/// colors biased toward desaturated green.
pub fn generate_starfield(count: usize, extent: f32, seed: u64) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Star {
            position: [
                (rng.gen::<f32>() - 0.5) * extent,
                (rng.gen::<f32>() - 0.5) * extent,
                (rng.gen::<f32>() - 0.5) * extent,
            ],
            _pad: 0.0,
            color: [
                rng.gen::<f32>() * 0.5,
                rng.gen::<f32>() * 0.8 + 0.2,
                rng.gen::<f32>() * 0.3,
                0.9,
            ],
        })
        .collect()
}
