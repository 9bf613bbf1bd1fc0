// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn one_waypoint_per_section_boundary() {
    assert_eq!(CAMERA_WAYPOINTS.len(), TOTAL_SECTIONS + 1);
    assert!(CAMERA_WAYPOINTS.iter().flatten().all(|v| v.is_finite()));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tuning_values_are_in_range() {
    assert!(CAMERA_SMOOTHING > 0.0 && CAMERA_SMOOTHING <= 1.0);
    assert!(LAYER_CUTOFF_PROGRESS > 0.0 && LAYER_CUTOFF_PROGRESS < 1.0);
    assert!(SMOOTHING_REFERENCE_DT_SEC > 0.0);
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!(ATMOSPHERE_PULSE_DEPTH > 0.0 && ATMOSPHERE_PULSE_DEPTH < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn parked_layers_are_beyond_the_far_plane() {
    let farthest_eye = CAMERA_WAYPOINTS
        .iter()
        .map(|w| w[2])
        .fold(f32::NEG_INFINITY, f32::max);
    assert!(OFF_FRUSTUM_DEPTH - farthest_eye > CAMERA_FAR);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn mountain_layers_recede_and_fade() {
    for pair in MOUNTAIN_LAYERS.windows(2) {
        assert!(pair[1].0 < pair[0].0, "farther layers sit deeper");
        assert!(pair[1].3 < pair[0].3, "farther layers are fainter");
    }
    assert!(MOUNTAIN_LAYERS.iter().all(|l| l.3 > 0.0 && l.3 <= 1.0));
    assert!(NEBULA_ANCHOR_LAYER < MOUNTAIN_LAYERS.len());
    assert!(NEBULA_BASE_DEPTH < MOUNTAIN_LAYERS[NEBULA_ANCHOR_LAYER].0);
}
