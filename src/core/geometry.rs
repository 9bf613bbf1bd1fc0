use crate::constants::*;
use rand::prelude::*;
use std::f32::consts::PI;

// Procedural scene content, built once at startup. Every generator takes its
// own seeded RNG so the same seed always yields the same layout.

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarVertex {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    /// Sheet index as float; deeper sheets rotate slower.
    pub sheet: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShellVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexedMesh<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

/// One mountain silhouette as a flat triangle list in its local XY plane.
#[derive(Clone, Debug, PartialEq)]
pub struct MountainMesh {
    pub base_depth: f32,
    pub color: [f32; 3],
    pub opacity: f32,
    pub ridge: Vec<[f32; 2]>,
    pub triangles: Vec<[f32; 2]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneGeometry {
    pub stars: Vec<StarVertex>,
    pub nebula: IndexedMesh<PlaneVertex>,
    pub mountains: Vec<MountainMesh>,
    pub atmosphere: IndexedMesh<ShellVertex>,
}

impl SceneGeometry {
    pub fn generate(seed: u64) -> Self {
        let mut stars = Vec::with_capacity(STAR_SHEETS * STARS_PER_SHEET);
        for sheet in 0..STAR_SHEETS {
            let mut rng = part_rng(seed, sheet);
            stars.extend(star_sheet(&mut rng, sheet, STARS_PER_SHEET));
        }
        let mountains = MOUNTAIN_LAYERS
            .iter()
            .enumerate()
            .map(|(i, &(distance, height, color, opacity))| {
                let mut rng = part_rng(seed, STAR_SHEETS + i);
                let ridge = mountain_ridge(&mut rng, height);
                MountainMesh {
                    base_depth: distance,
                    color: hex_rgb(color),
                    opacity,
                    triangles: triangulate_silhouette(&ridge),
                    ridge,
                }
            })
            .collect();
        Self {
            stars,
            nebula: plane(NEBULA_WIDTH, NEBULA_HEIGHT, NEBULA_SEGMENTS, NEBULA_SEGMENTS),
            mountains,
            atmosphere: sphere(ATMOSPHERE_RADIUS, ATMOSPHERE_SEGMENTS, ATMOSPHERE_SEGMENTS),
        }
    }
}

fn part_rng(seed: u64, part: usize) -> StdRng {
    let mix = seed ^ (part as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mix)
}

/// Stars spread over a spherical shell, radius 200..1000.
pub fn star_sheet(rng: &mut impl Rng, sheet: usize, count: usize) -> Vec<StarVertex> {
    (0..count)
        .map(|_| {
            let radius = STAR_RADIUS_MIN + rng.gen::<f32>() * STAR_RADIUS_SPAN;
            let theta = rng.gen::<f32>() * PI * 2.0;
            let phi = (rng.gen::<f32>() * 2.0 - 1.0).clamp(-1.0, 1.0).acos();
            let position = [
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            ];
            let pick = rng.gen::<f32>();
            let color = if pick < 0.7 {
                hsl_to_rgb(0.0, 0.0, 0.8 + rng.gen::<f32>() * 0.2)
            } else if pick < 0.9 {
                hsl_to_rgb(0.08, 0.5, 0.8)
            } else {
                hsl_to_rgb(0.6, 0.5, 0.8)
            };
            StarVertex {
                position,
                size: STAR_SIZE_MIN + rng.gen::<f32>() * STAR_SIZE_SPAN,
                color,
                sheet: sheet as f32,
            }
        })
        .collect()
}

/// Ridge line of one silhouette: `MOUNTAIN_SEGMENTS + 1` points across
/// x in \[-500, 500\].
pub fn mountain_ridge(rng: &mut impl Rng, height: f32) -> Vec<[f32; 2]> {
    (0..=MOUNTAIN_SEGMENTS)
        .map(|i| {
            let fi = i as f32;
            let x = (fi / MOUNTAIN_SEGMENTS as f32 - 0.5) * MOUNTAIN_RIDGE_WIDTH;
            let y = (fi * 0.1).sin() * height
                + (fi * 0.05).sin() * height * 0.5
                + rng.gen::<f32>() * height * 0.2
                - 100.0;
            [x, y]
        })
        .collect()
}

/// Fill the area between the ridge and the floor, with wings reaching out to
/// the far floor corners.
pub fn triangulate_silhouette(ridge: &[[f32; 2]]) -> Vec<[f32; 2]> {
    let floor = MOUNTAIN_FLOOR_Y;
    let mut tris = Vec::with_capacity(ridge.len() * 6 + 6);
    for w in ridge.windows(2) {
        let (a, b) = (w[0], w[1]);
        tris.extend_from_slice(&[a, [a[0], floor], b]);
        tris.extend_from_slice(&[b, [a[0], floor], [b[0], floor]]);
    }
    if let (Some(&first), Some(&last)) = (ridge.first(), ridge.last()) {
        tris.extend_from_slice(&[[-MOUNTAIN_WING_X, floor], [first[0], floor], first]);
        tris.extend_from_slice(&[last, [last[0], floor], [MOUNTAIN_WING_X, floor]]);
    }
    tris
}

/// Flat grid in the XY plane centred on the origin.
pub fn plane(width: f32, height: f32, seg_x: u32, seg_y: u32) -> IndexedMesh<PlaneVertex> {
    let seg_x = seg_x.max(1);
    let seg_y = seg_y.max(1);
    let mut vertices = Vec::with_capacity(((seg_x + 1) * (seg_y + 1)) as usize);
    for iy in 0..=seg_y {
        let v = iy as f32 / seg_y as f32;
        for ix in 0..=seg_x {
            let u = ix as f32 / seg_x as f32;
            vertices.push(PlaneVertex {
                position: [(u - 0.5) * width, (0.5 - v) * height],
                uv: [u, 1.0 - v],
            });
        }
    }
    let row = seg_x + 1;
    let mut indices = Vec::with_capacity((seg_x * seg_y * 6) as usize);
    for iy in 0..seg_y {
        for ix in 0..seg_x {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = ix + 1 + row * (iy + 1);
            let d = ix + 1 + row * iy;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    IndexedMesh { vertices, indices }
}

/// UV sphere with outward normals and counter-clockwise outer faces.
pub fn sphere(radius: f32, seg_w: u32, seg_h: u32) -> IndexedMesh<ShellVertex> {
    let seg_w = seg_w.max(3);
    let seg_h = seg_h.max(2);
    let mut vertices = Vec::with_capacity(((seg_w + 1) * (seg_h + 1)) as usize);
    for iy in 0..=seg_h {
        let v = iy as f32 / seg_h as f32;
        for ix in 0..=seg_w {
            let u = ix as f32 / seg_w as f32;
            let n = [
                -(u * PI * 2.0).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * PI * 2.0).sin() * (v * PI).sin(),
            ];
            vertices.push(ShellVertex {
                position: [n[0] * radius, n[1] * radius, n[2] * radius],
                normal: n,
            });
        }
    }
    let row = seg_w + 1;
    let mut indices = Vec::new();
    for iy in 0..seg_h {
        for ix in 0..seg_w {
            let a = row * iy + ix + 1;
            let b = row * iy + ix;
            let c = row * (iy + 1) + ix;
            let d = row * (iy + 1) + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != seg_h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    IndexedMesh { vertices, indices }
}

/// `0xRRGGBB` to normalized RGB.
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// HSL (all components in \[0, 1\]) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hue = |mut t: f32| {
        t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        }
    };
    [hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0)]
}
