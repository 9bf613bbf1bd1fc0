// Host-side tests for procedural scene geometry.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod geometry {
        include!("../src/core/geometry.rs");
    }
}

use crate::constants::*;
use crate::core::geometry::*;

#[test]
fn same_seed_gives_same_scene() {
    let a = SceneGeometry::generate(42);
    let b = SceneGeometry::generate(42);
    assert_eq!(a, b);
}

#[test]
fn different_seeds_differ() {
    let a = SceneGeometry::generate(1);
    let b = SceneGeometry::generate(2);
    assert_ne!(a.stars, b.stars);
    assert_ne!(a.mountains[0].ridge, b.mountains[0].ridge);
}

#[test]
fn star_sheets_have_expected_counts_and_ranges() {
    let scene = SceneGeometry::generate(7);
    assert_eq!(scene.stars.len(), STAR_SHEETS * STARS_PER_SHEET);
    for sheet in 0..STAR_SHEETS {
        let count = scene.stars.iter().filter(|s| s.sheet == sheet as f32).count();
        assert_eq!(count, STARS_PER_SHEET);
    }
    for star in &scene.stars {
        let r = glam::Vec3::from(star.position).length();
        assert!(r >= STAR_RADIUS_MIN - 0.01 && r <= STAR_RADIUS_MIN + STAR_RADIUS_SPAN + 0.01);
        assert!(star.size >= STAR_SIZE_MIN && star.size <= STAR_SIZE_MIN + STAR_SIZE_SPAN);
        assert!(star.color.iter().all(|c| (0.0..=1.0).contains(c)));
    }
}

#[test]
fn mountains_follow_layer_table() {
    let scene = SceneGeometry::generate(3);
    assert_eq!(scene.mountains.len(), MOUNTAIN_LAYERS.len());
    for (mesh, &(distance, height, color, opacity)) in scene.mountains.iter().zip(MOUNTAIN_LAYERS.iter()) {
        assert_eq!(mesh.base_depth, distance);
        assert_eq!(mesh.opacity, opacity);
        assert_eq!(mesh.color, hex_rgb(color));
        assert_eq!(mesh.ridge.len(), MOUNTAIN_SEGMENTS + 1);
        assert_eq!(mesh.ridge[0][0], -MOUNTAIN_RIDGE_WIDTH / 2.0);
        assert_eq!(mesh.ridge[MOUNTAIN_SEGMENTS][0], MOUNTAIN_RIDGE_WIDTH / 2.0);
        for p in &mesh.ridge {
            assert!(p[1] >= -100.0 - 1.5 * height - 0.01);
            assert!(p[1] <= -100.0 + 1.7 * height + 0.01);
        }
    }
}

#[test]
fn silhouette_reaches_floor_and_wings() {
    let scene = SceneGeometry::generate(3);
    let tris = &scene.mountains[0].triangles;
    assert_eq!(tris.len(), MOUNTAIN_SEGMENTS * 6 + 6);
    assert!(tris.iter().any(|p| p == &[-MOUNTAIN_WING_X, MOUNTAIN_FLOOR_Y]));
    assert!(tris.iter().any(|p| p == &[MOUNTAIN_WING_X, MOUNTAIN_FLOOR_Y]));
    assert!(tris.iter().all(|p| p[1] >= MOUNTAIN_FLOOR_Y));
}

#[test]
fn empty_ridge_has_no_triangles() {
    assert!(triangulate_silhouette(&[]).is_empty());
}

#[test]
fn nebula_plane_grid() {
    let plane = plane(NEBULA_WIDTH, NEBULA_HEIGHT, NEBULA_SEGMENTS, NEBULA_SEGMENTS);
    let n = NEBULA_SEGMENTS as usize;
    assert_eq!(plane.vertices.len(), (n + 1) * (n + 1));
    assert_eq!(plane.indices.len(), n * n * 6);
    assert_eq!(plane.vertices[0].position, [-NEBULA_WIDTH / 2.0, NEBULA_HEIGHT / 2.0]);
    assert_eq!(plane.vertices[0].uv, [0.0, 1.0]);
    let max = *plane.indices.iter().max().unwrap() as usize;
    assert_eq!(max, plane.vertices.len() - 1);
}

#[test]
fn atmosphere_sphere_shape() {
    let shell = sphere(ATMOSPHERE_RADIUS, ATMOSPHERE_SEGMENTS, ATMOSPHERE_SEGMENTS);
    let s = ATMOSPHERE_SEGMENTS as usize;
    assert_eq!(shell.vertices.len(), (s + 1) * (s + 1));
    // pole rows contribute one triangle per quad instead of two
    assert_eq!(shell.indices.len(), s * s * 6 - 2 * s * 3);
    for v in &shell.vertices {
        let r = glam::Vec3::from(v.position).length();
        assert!((r - ATMOSPHERE_RADIUS).abs() < 0.01);
        let n = glam::Vec3::from(v.normal).length();
        assert!((n - 1.0).abs() < 1e-4);
    }
}

#[test]
fn color_helpers() {
    assert_eq!(hex_rgb(0xff0066), [1.0, 0.0, 0.4]);
    assert_eq!(hex_rgb(0x000000), [0.0, 0.0, 0.0]);
    assert_eq!(hsl_to_rgb(0.0, 0.0, 0.8), [0.8, 0.8, 0.8]);
    let cool = hsl_to_rgb(0.6, 0.5, 0.8);
    assert!(cool[2] > cool[0]);
    let warm = hsl_to_rgb(0.08, 0.5, 0.8);
    assert!(warm[0] > warm[2]);
    let red = hsl_to_rgb(0.0, 1.0, 0.5);
    assert!((red[0] - 1.0).abs() < 1e-6 && red[1].abs() < 1e-6 && red[2].abs() < 1e-6);
}
