// Host-side tests for backdrop configuration and page overrides.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod config {
        include!("../src/core/config.rs");
    }
    pub mod error {
        include!("../src/core/error.rs");
    }
    pub mod path {
        include!("../src/core/path.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
}

use crate::core::config::*;
use crate::core::error::BackdropError;

#[test]
fn defaults_are_valid() {
    let config = BackdropConfig::default();
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.seed, 42);
    assert_eq!(config.total_sections, 2);
    assert_eq!(config.layer_depth_mode, LayerDepthMode::Anchored);
    assert_eq!(config.smoothing, Smoothing::PerTick { factor: 0.05 });
    assert_eq!(config.cutoff.hysteresis, 0.0);
    assert_eq!(config.path.waypoints().len(), 3);
}

#[test]
fn overrides_parse() {
    let mut config = BackdropConfig::default();
    config.apply_override("seed", " 7 ").unwrap();
    config.apply_override("layerTravel", "1").unwrap();
    config.apply_override("frameScaled", "true").unwrap();
    config.apply_override("cutoffHysteresis", "0.05").unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.layer_depth_mode, LayerDepthMode::Travel);
    assert!(matches!(config.smoothing, Smoothing::FrameScaled { factor, .. } if factor == 0.05));
    assert_eq!(config.cutoff.hysteresis, 0.05);
    assert_eq!(config.validate(), Ok(()));

    config.apply_override("frameScaled", "0").unwrap();
    assert_eq!(config.smoothing, Smoothing::PerTick { factor: 0.05 });
}

#[test]
fn bad_overrides_are_rejected_and_leave_config_untouched() {
    let mut config = BackdropConfig::default();
    let err = config.apply_override("seed", "abc").unwrap_err();
    assert_eq!(
        err,
        ConfigError::BadOverride {
            key: "seed",
            value: "abc".into()
        }
    );
    assert!(config.apply_override("layerTravel", "maybe").is_err());
    assert!(config.apply_override("unknown", "1").is_err());
    assert_eq!(config, BackdropConfig::default());
}

#[test]
fn validation_catches_out_of_range_values() {
    let base = BackdropConfig::default();
    let cases = [
        (
            BackdropConfig {
                total_sections: 0,
                ..base.clone()
            },
            ConfigError::NoSections,
        ),
        (
            BackdropConfig {
                smoothing: Smoothing::PerTick { factor: 0.0 },
                ..base.clone()
            },
            ConfigError::SmoothingOutOfRange(0.0),
        ),
        (
            BackdropConfig {
                cutoff: VisibilityCutoff {
                    threshold: 1.5,
                    hysteresis: 0.0,
                },
                ..base.clone()
            },
            ConfigError::CutoffOutOfRange(1.5),
        ),
        (
            BackdropConfig {
                cutoff: VisibilityCutoff {
                    threshold: 0.7,
                    hysteresis: 0.8,
                },
                ..base.clone()
            },
            ConfigError::HysteresisOutOfRange(0.8),
        ),
        (
            BackdropConfig {
                cutoff: VisibilityCutoff {
                    threshold: 0.7,
                    hysteresis: -0.1,
                },
                ..base.clone()
            },
            ConfigError::HysteresisOutOfRange(-0.1),
        ),
    ];
    for (config, expected) in cases {
        assert_eq!(config.validate(), Err(expected));
    }
}

#[test]
fn full_smoothing_is_allowed() {
    let config = BackdropConfig {
        smoothing: Smoothing::PerTick { factor: 1.0 },
        ..BackdropConfig::default()
    };
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn error_messages() {
    assert_eq!(
        ConfigError::NoSections.to_string(),
        "section count must be at least 1"
    );
    assert_eq!(
        BackdropError::MissingRenderTarget("heroCanvas".into()).to_string(),
        "missing #heroCanvas render target"
    );
    assert_eq!(
        BackdropError::NotACanvas("heroCanvas".into()).to_string(),
        "#heroCanvas is not a canvas element"
    );
}
