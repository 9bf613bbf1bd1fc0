// Host-side tests for the per-frame parallax mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod config {
        include!("../src/core/config.rs");
    }
    pub mod parallax {
        include!("../src/core/parallax.rs");
    }
    pub mod path {
        include!("../src/core/path.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
}

use crate::constants::*;
use crate::core::camera::Camera;
use crate::core::config::*;
use crate::core::parallax::*;
use crate::core::path::CameraPath;
use crate::core::scroll::{ScrollSnapshot, ScrollState};
use glam::Vec3;

const EPS: f32 = 1e-3;

fn start() -> Vec3 {
    Vec3::new(0.0, 30.0, 300.0)
}

fn snapshot_at(progress: f32, offset: f32) -> ScrollSnapshot {
    let scroll = ScrollState::from_progress(progress, TOTAL_SECTIONS);
    ScrollSnapshot {
        scroll,
        offset,
        target: CameraPath::default().target(&scroll),
    }
}

fn input(now_sec: f64, snapshot: ScrollSnapshot) -> TickInput {
    TickInput { now_sec, snapshot }
}

#[test]
fn first_tick_moves_five_percent_toward_target() {
    let engine = ParallaxEngine::new(&BackdropConfig::default());
    let (next, frame) = engine.tick(ParallaxState::new(start()), &input(0.0, snapshot_at(0.25, 500.0)));

    // target (0, 35, 125): 5% of (0, 5, -175)
    assert!((next.smoothed - Vec3::new(0.0, 30.25, 291.25)).length() < EPS);
    // idle float at t = 0 is (0, 1)
    assert!((frame.camera_eye - Vec3::new(0.0, 31.25, 291.25)).length() < EPS);
    assert_eq!(frame.look_at, Vec3::new(0.0, 10.0, -600.0));
    assert_eq!(next.last_tick_sec, Some(0.0));
}

#[test]
fn smoothing_converges_geometrically_without_overshoot() {
    let engine = ParallaxEngine::new(&BackdropConfig::default());
    let snap = snapshot_at(0.25, 500.0);
    let target = snap.target;
    let d0 = (target - start()).length();
    let mut state = ParallaxState::new(start());
    for n in 1..=200 {
        let (next, _) = engine.tick(state, &input(n as f64 / 60.0, snap));
        let d = (target - next.smoothed).length();
        let expected = d0 * 0.95_f32.powi(n);
        assert!((d - expected).abs() < 1e-2 * d0.max(1.0), "tick {n}: {d} vs {expected}");
        // approaching from +z, never past the target
        assert!(next.smoothed.z >= target.z - EPS);
        state = next;
    }
    assert!((target - state.smoothed).length() < 0.01);
}

#[test]
fn layers_stay_at_base_depth_while_visible() {
    let engine = ParallaxEngine::new(&BackdropConfig::default());
    let (_, frame) = engine.tick(ParallaxState::new(start()), &input(1.0, snapshot_at(0.25, 500.0)));
    let depths: Vec<f32> = frame.layers.iter().map(|l| l.current_depth).collect();
    assert_eq!(depths, vec![-50.0, -100.0, -150.0, -200.0]);
    assert!(frame.layers.iter().all(|l| !l.is_parked()));
    assert_eq!(frame.nebula_depth, -200.0);
}

#[test]
fn cutoff_boundary_is_visible_and_above_is_hidden() {
    let engine = ParallaxEngine::new(&BackdropConfig::default());
    let (at, frame) = engine.tick(ParallaxState::new(start()), &input(0.0, snapshot_at(0.7, 1400.0)));
    assert!(!at.layers_hidden);
    assert!(frame.layers.iter().all(|l| !l.is_parked()));

    let (above, frame) = engine.tick(ParallaxState::new(start()), &input(0.0, snapshot_at(0.75, 1500.0)));
    assert!(above.layers_hidden);
    assert!(frame
        .layers
        .iter()
        .all(|l| l.current_depth == OFF_FRUSTUM_DEPTH));
    // nebula follows the anchor layer
    assert_eq!(frame.nebula_depth, OFF_FRUSTUM_DEPTH + NEBULA_DEPTH_DELTA);
}

#[test]
fn cutoff_is_a_pure_function_of_progress() {
    let engine = ParallaxEngine::new(&BackdropConfig::default());
    let mut state = ParallaxState::new(start());
    let mut flips = Vec::new();
    for (i, p) in [0.6, 0.75, 0.69, 0.71, 0.7].into_iter().enumerate() {
        let (next, _) = engine.tick(state, &input(i as f64, snapshot_at(p, 0.0)));
        flips.push(next.layers_hidden);
        state = next;
    }
    assert_eq!(flips, vec![false, true, false, true, false]);
}

#[test]
fn hysteresis_keeps_layers_hidden_inside_band() {
    let config = BackdropConfig {
        cutoff: VisibilityCutoff {
            threshold: 0.7,
            hysteresis: 0.05,
        },
        ..BackdropConfig::default()
    };
    let engine = ParallaxEngine::new(&config);
    let mut state = ParallaxState::new(start());
    let mut hidden = Vec::new();
    for (i, p) in [0.75, 0.68, 0.66, 0.6, 0.68, 0.72].into_iter().enumerate() {
        let (next, _) = engine.tick(state, &input(i as f64, snapshot_at(p, 0.0)));
        hidden.push(next.layers_hidden);
        state = next;
    }
    assert_eq!(hidden, vec![true, true, true, false, false, true]);
}

#[test]
fn scenario_three_quarter_progress() {
    let engine = ParallaxEngine::new(&BackdropConfig::default());
    let snap = snapshot_at(0.75, 1500.0);
    assert_eq!(snap.scroll.section_index, 1);
    assert!((snap.scroll.section_fraction - 0.5).abs() < EPS);
    assert!((snap.target - Vec3::new(0.0, 45.0, -375.0)).length() < EPS);
    let (state, _) = engine.tick(ParallaxState::new(start()), &input(0.0, snap));
    assert!(state.layers_hidden);
}

#[test]
fn nebula_falls_back_without_anchor_layer() {
    let engine = ParallaxEngine::with_layers(&BackdropConfig::default(), [-50.0, -100.0, -150.0]);
    let (_, frame) = engine.tick(ParallaxState::new(start()), &input(0.0, snapshot_at(0.1, 0.0)));
    assert_eq!(frame.layers.len(), 3);
    assert_eq!(frame.nebula_depth, NEBULA_BASE_DEPTH);
}

#[test]
fn nebula_reads_depth_computed_in_the_same_tick() {
    let config = BackdropConfig {
        layer_depth_mode: LayerDepthMode::Travel,
        ..BackdropConfig::default()
    };
    let engine = ParallaxEngine::new(&config);
    let (_, frame) = engine.tick(ParallaxState::new(start()), &input(0.0, snapshot_at(0.1, 200.0)));
    let anchor = frame.layers[NEBULA_ANCHOR_LAYER].current_depth;
    assert_eq!(frame.nebula_depth, anchor + NEBULA_DEPTH_DELTA);
    // -200 + 200 * (1 + 0.9 * 3) * 0.5
    assert!((anchor - 170.0).abs() < EPS);
}

#[test]
fn travel_depth_scales_with_layer_speed() {
    assert!((travel_depth(-100.0, 1, 100.0) - -5.0).abs() < EPS);
    assert_eq!(travel_depth(-50.0, 0, 0.0), -50.0);
    assert!(layer_speed(3) > layer_speed(0));
}

#[test]
fn layer_depths_is_pure() {
    let base = [-50.0, -100.0];
    let a = layer_depths(&base, 300.0, LayerDepthMode::Travel, false);
    let b = layer_depths(&base, 300.0, LayerDepthMode::Travel, false);
    assert_eq!(a, b);
    let hidden = layer_depths(&base, 300.0, LayerDepthMode::Anchored, true);
    assert!(hidden.iter().all(|&d| d == OFF_FRUSTUM_DEPTH));
    let anchored = layer_depths(&base, 300.0, LayerDepthMode::Anchored, false);
    assert_eq!(anchored.as_slice(), &base);
}

#[test]
fn drift_grows_with_layer_index() {
    let engine = ParallaxEngine::new(&BackdropConfig::default());
    let (_, frame) = engine.tick(ParallaxState::new(start()), &input(0.0, snapshot_at(0.0, 0.0)));
    // idle float (0, 1) scaled by 1 + 0.5 i
    let l2 = frame.layers[2];
    assert!((l2.drift.y - 2.0).abs() < EPS);
    assert!((l2.position().y - (LAYER_BASE_Y + 2.0)).abs() < EPS);
    assert_eq!(l2.position().z, -150.0);
}

#[test]
fn idle_float_is_bounded() {
    for i in 0..500 {
        let f = idle_float(i as f32 * 0.37);
        assert!(f.x.abs() <= IDLE_FLOAT_X_AMPLITUDE + EPS);
        assert!(f.y.abs() <= IDLE_FLOAT_Y_AMPLITUDE + EPS);
    }
}

#[test]
fn shader_clock_rates() {
    let clock = ShaderClock { elapsed: 4.0 };
    assert_eq!(clock.star_time(), 4.0);
    assert_eq!(clock.nebula_time(), 2.0);
    let rest = ShaderClock::default();
    assert!((rest.atmosphere_pulse() - 0.9).abs() < EPS);
    for i in 0..100 {
        let p = ShaderClock { elapsed: i as f32 * 0.1 }.atmosphere_pulse();
        assert!((0.8 - EPS..=1.0 + EPS).contains(&p));
    }
}

#[test]
fn frame_scaled_smoothing_matches_per_tick_at_reference_rate() {
    let s = Smoothing::FrameScaled {
        factor: 0.05,
        reference_dt: 1.0 / 60.0,
    };
    assert!((s.alpha(Some(1.0 / 60.0)) - 0.05).abs() < 1e-5);
    assert!((s.alpha(Some(2.0 / 60.0)) - 0.0975).abs() < 1e-5);
    assert_eq!(s.alpha(None), 0.05);
    assert_eq!(s.alpha(Some(0.0)), 0.0);
    assert_eq!(Smoothing::default().alpha(Some(1.0)), 0.05);
}

#[test]
fn frame_scaled_engine_covers_same_distance_at_half_rate() {
    let config = BackdropConfig {
        smoothing: Smoothing::FrameScaled {
            factor: 0.05,
            reference_dt: 1.0 / 60.0,
        },
        ..BackdropConfig::default()
    };
    let engine = ParallaxEngine::new(&config);
    let snap = snapshot_at(0.25, 500.0);

    let mut fast = ParallaxState::new(start());
    for n in 0..=60 {
        fast = engine.tick(fast, &input(n as f64 / 60.0, snap)).0;
    }
    let mut slow = ParallaxState::new(start());
    slow = engine.tick(slow, &input(0.0, snap)).0;
    for n in 1..=30 {
        slow = engine.tick(slow, &input(n as f64 / 30.0, snap)).0;
    }
    assert!((fast.smoothed - slow.smoothed).length() < 0.05);
}

#[test]
fn camera_looks_down_negative_depth() {
    let engine = ParallaxEngine::new(&BackdropConfig::default());
    let (_, frame) = engine.tick(ParallaxState::new(start()), &input(0.0, snapshot_at(0.0, 0.0)));
    let camera = Camera::for_frame(&frame, 16.0 / 9.0);
    let look = camera.view_matrix().transform_point3(frame.look_at);
    assert!(look.x.abs() < EPS && look.y.abs() < EPS);
    assert!(look.z < 0.0);
    assert!(camera.view_proj().is_finite());
    assert_eq!(Camera::for_frame(&frame, 0.0).aspect, 1.0);
}
