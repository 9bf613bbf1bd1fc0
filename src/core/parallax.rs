use crate::constants::*;
use crate::core::config::{BackdropConfig, LayerDepthMode, Smoothing, VisibilityCutoff};
use crate::core::scroll::{ScrollSnapshot, ScrollState};
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

/// Per-layer parallax state for one mountain silhouette.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerState {
    pub index: usize,
    pub base_depth: f32,
    pub current_depth: f32,
    /// Idle drift in x/y, already scaled for this layer.
    pub drift: Vec2,
}

impl LayerState {
    /// World-space translation for the layer mesh.
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.drift.x, LAYER_BASE_Y + self.drift.y, self.current_depth)
    }

    pub fn is_parked(&self) -> bool {
        self.current_depth >= OFF_FRUSTUM_DEPTH
    }
}

/// Monotonic shader time and the rates derived from it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShaderClock {
    pub elapsed: f32,
}

impl ShaderClock {
    pub fn star_time(&self) -> f32 {
        self.elapsed
    }

    pub fn nebula_time(&self) -> f32 {
        self.elapsed * NEBULA_TIME_RATE
    }

    pub fn atmosphere_pulse(&self) -> f32 {
        (self.elapsed * ATMOSPHERE_PULSE_RATE).sin() * ATMOSPHERE_PULSE_DEPTH
            + (1.0 - ATMOSPHERE_PULSE_DEPTH)
    }
}

/// State carried from one tick to the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxState {
    /// Camera position before idle float is added.
    pub smoothed: Vec3,
    pub last_tick_sec: Option<f64>,
    pub layers_hidden: bool,
}

impl ParallaxState {
    pub fn new(start: Vec3) -> Self {
        Self {
            smoothed: start,
            last_tick_sec: None,
            layers_hidden: false,
        }
    }
}

/// Inputs for one tick.
#[derive(Clone, Copy, Debug)]
pub struct TickInput {
    /// Seconds on the monotonic clock since the loop started.
    pub now_sec: f64,
    pub snapshot: ScrollSnapshot,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameUpdate {
    pub camera_eye: Vec3,
    pub look_at: Vec3,
    pub layers: SmallVec<[LayerState; 4]>,
    pub nebula_depth: f32,
    pub clock: ShaderClock,
    pub scroll: ScrollState,
}

/// Idle float offset shared by the camera and mountain drift.
pub fn idle_float(t: f32) -> Vec2 {
    Vec2::new(
        (t * IDLE_FLOAT_X_RATE).sin() * IDLE_FLOAT_X_AMPLITUDE,
        (t * IDLE_FLOAT_Y_RATE).cos() * IDLE_FLOAT_Y_AMPLITUDE,
    )
}

/// Scroll speed multiplier for layer `i` (farther layers move faster).
pub fn layer_speed(index: usize) -> f32 {
    1.0 + index as f32 * LAYER_SPEED_STEP
}

/// Depth a layer would reach by scroll travel alone.
pub fn travel_depth(base_depth: f32, index: usize, offset: f32) -> f32 {
    base_depth + offset * layer_speed(index) * LAYER_SCROLL_DEPTH_SCALE
}

/// Depths of every layer for one scroll sample, nearest layer first.
///
/// A pure function of its inputs: with `hidden` every layer is parked at the
/// off-frustum depth, otherwise it sits at its base or travel depth.
pub fn layer_depths(
    base_depths: &[f32],
    offset: f32,
    mode: LayerDepthMode,
    hidden: bool,
) -> SmallVec<[f32; 4]> {
    base_depths
        .iter()
        .enumerate()
        .map(|(i, &base)| {
            if hidden {
                OFF_FRUSTUM_DEPTH
            } else {
                match mode {
                    LayerDepthMode::Anchored => base,
                    LayerDepthMode::Travel => travel_depth(base, i, offset),
                }
            }
        })
        .collect()
}

/// Nebula depth, read from the anchor layer's depth for this tick.
pub fn nebula_depth(depths: &[f32]) -> f32 {
    depths
        .get(NEBULA_ANCHOR_LAYER)
        .map(|d| d + NEBULA_DEPTH_DELTA)
        .unwrap_or(NEBULA_BASE_DEPTH)
}

/// Scroll-to-scene mapping applied once per rendered frame.
#[derive(Clone, Debug)]
pub struct ParallaxEngine {
    base_depths: SmallVec<[f32; 4]>,
    smoothing: Smoothing,
    cutoff: VisibilityCutoff,
    mode: LayerDepthMode,
    look_at: Vec3,
}

impl ParallaxEngine {
    pub fn new(config: &BackdropConfig) -> Self {
        Self::with_layers(config, MOUNTAIN_LAYERS.iter().map(|l| l.0))
    }

    pub fn with_layers(config: &BackdropConfig, base_depths: impl IntoIterator<Item = f32>) -> Self {
        Self {
            base_depths: base_depths.into_iter().collect(),
            smoothing: config.smoothing,
            cutoff: config.cutoff,
            mode: config.layer_depth_mode,
            look_at: Vec3::from(LOOK_AT),
        }
    }

    pub fn base_depths(&self) -> &[f32] {
        &self.base_depths
    }

    /// Advance one tick. The returned state replaces the previous one.
    pub fn tick(&self, state: ParallaxState, input: &TickInput) -> (ParallaxState, FrameUpdate) {
        let t = input.now_sec as f32;
        let dt = state
            .last_tick_sec
            .map(|prev| (input.now_sec - prev).max(0.0) as f32);

        let k = self.smoothing.alpha(dt);
        let smoothed = state.smoothed + (input.snapshot.target - state.smoothed) * k;

        let float = idle_float(t);
        let camera_eye = smoothed + Vec3::new(float.x, float.y, 0.0);

        let scroll = input.snapshot.scroll;
        let hidden = self.cutoff.is_hidden(scroll.progress, state.layers_hidden);
        if hidden != state.layers_hidden {
            log::debug!(
                "[parallax] layers {} at progress {:.3}",
                if hidden { "parked" } else { "restored" },
                scroll.progress
            );
        }

        // All layer depths first; the nebula reads its anchor from this list.
        let depths = layer_depths(&self.base_depths, input.snapshot.offset, self.mode, hidden);
        let layers = depths
            .iter()
            .enumerate()
            .map(|(i, &depth)| LayerState {
                index: i,
                base_depth: self.base_depths[i],
                current_depth: depth,
                drift: float * (1.0 + i as f32 * LAYER_DRIFT_STEP),
            })
            .collect();

        let next = ParallaxState {
            smoothed,
            last_tick_sec: Some(input.now_sec),
            layers_hidden: hidden,
        };
        let frame = FrameUpdate {
            camera_eye,
            look_at: self.look_at,
            layers,
            nebula_depth: nebula_depth(&depths),
            clock: ShaderClock { elapsed: t },
            scroll,
        };
        (next, frame)
    }
}
