use crate::constants::*;
use crate::core::path::CameraPath;

/// Reasons a configuration is rejected. The page falls back to defaults.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("camera path needs at least one waypoint")]
    EmptyPath,
    #[error("waypoint {0} has a non-finite coordinate")]
    NonFiniteWaypoint(usize),
    #[error("section count must be at least 1")]
    NoSections,
    #[error("smoothing factor {0} is outside (0, 1]")]
    SmoothingOutOfRange(f32),
    #[error("cutoff progress {0} is outside [0, 1]")]
    CutoffOutOfRange(f32),
    #[error("hysteresis band {0} must be >= 0 and below the cutoff")]
    HysteresisOutOfRange(f32),
    #[error("invalid value {value:?} for {key}")]
    BadOverride { key: &'static str, value: String },
}

/// How the per-tick camera smoothing reacts to frame timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Smoothing {
    /// Fixed fraction per tick regardless of elapsed time.
    PerTick { factor: f32 },
    /// `1 - (1 - factor)^(dt / reference_dt)`, matching `PerTick` at the
    /// reference rate.
    FrameScaled { factor: f32, reference_dt: f32 },
}

impl Smoothing {
    pub fn factor(&self) -> f32 {
        match *self {
            Smoothing::PerTick { factor } | Smoothing::FrameScaled { factor, .. } => factor,
        }
    }

    /// Blend weight for one tick. `dt_sec` is `None` on the first tick.
    pub fn alpha(&self, dt_sec: Option<f32>) -> f32 {
        match *self {
            Smoothing::PerTick { factor } => factor,
            Smoothing::FrameScaled {
                factor,
                reference_dt,
            } => match dt_sec {
                Some(dt) if dt > 0.0 && reference_dt > 0.0 => {
                    1.0 - (1.0 - factor).powf(dt / reference_dt)
                }
                Some(_) => 0.0,
                None => factor,
            },
        }
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::PerTick {
            factor: CAMERA_SMOOTHING,
        }
    }
}

/// Where visible mountain layers sit in depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayerDepthMode {
    /// Layers stay at their base depth while visible.
    #[default]
    Anchored,
    /// Layers travel toward the camera with scroll distance.
    Travel,
}

/// Progress threshold above which the mountain layers are parked off-frustum.
///
/// With `hysteresis == 0` this is a pure function of progress. A positive
/// band keeps hidden layers hidden until progress drops to
/// `threshold - hysteresis`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityCutoff {
    pub threshold: f32,
    pub hysteresis: f32,
}

impl VisibilityCutoff {
    pub fn is_hidden(&self, progress: f32, was_hidden: bool) -> bool {
        if was_hidden && self.hysteresis > 0.0 {
            progress > self.threshold - self.hysteresis
        } else {
            progress > self.threshold
        }
    }
}

impl Default for VisibilityCutoff {
    fn default() -> Self {
        Self {
            threshold: LAYER_CUTOFF_PROGRESS,
            hysteresis: 0.0,
        }
    }
}

/// Runtime configuration for the backdrop.
#[derive(Clone, Debug, PartialEq)]
pub struct BackdropConfig {
    pub total_sections: usize,
    pub path: CameraPath,
    pub smoothing: Smoothing,
    pub cutoff: VisibilityCutoff,
    pub layer_depth_mode: LayerDepthMode,
    pub seed: u64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            total_sections: TOTAL_SECTIONS,
            path: CameraPath::default(),
            smoothing: Smoothing::default(),
            cutoff: VisibilityCutoff::default(),
            layer_depth_mode: LayerDepthMode::default(),
            seed: 42,
        }
    }
}

impl BackdropConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_sections == 0 {
            return Err(ConfigError::NoSections);
        }
        let k = self.smoothing.factor();
        if !(k > 0.0 && k <= 1.0) {
            return Err(ConfigError::SmoothingOutOfRange(k));
        }
        let t = self.cutoff.threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(ConfigError::CutoffOutOfRange(t));
        }
        let h = self.cutoff.hysteresis;
        if !(h >= 0.0 && h < t.max(f32::EPSILON)) {
            return Err(ConfigError::HysteresisOutOfRange(h));
        }
        Ok(())
    }

    /// Apply a page-supplied override such as `data-seed="42"`.
    pub fn apply_override(&mut self, key: &'static str, value: &str) -> Result<(), ConfigError> {
        let bad = || ConfigError::BadOverride {
            key,
            value: value.to_string(),
        };
        match key {
            "seed" => self.seed = value.trim().parse().map_err(|_| bad())?,
            "layerTravel" => {
                self.layer_depth_mode = match value.trim() {
                    "1" | "true" => LayerDepthMode::Travel,
                    "0" | "false" => LayerDepthMode::Anchored,
                    _ => return Err(bad()),
                }
            }
            "frameScaled" => {
                let factor = self.smoothing.factor();
                self.smoothing = match value.trim() {
                    "1" | "true" => Smoothing::FrameScaled {
                        factor,
                        reference_dt: SMOOTHING_REFERENCE_DT_SEC,
                    },
                    "0" | "false" => Smoothing::PerTick { factor },
                    _ => return Err(bad()),
                }
            }
            "cutoffHysteresis" => {
                self.cutoff.hysteresis = value.trim().parse().map_err(|_| bad())?
            }
            _ => return Err(bad()),
        }
        Ok(())
    }
}
