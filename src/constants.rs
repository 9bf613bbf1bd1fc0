// Scroll, camera and scene tuning constants.
//
// These constants express intended behavior (e.g., smoothing rates, cutoff
// thresholds, layer tables) and keep magic numbers out of the code.
// Scroll sections and camera waypoints (one per section boundary)
pub const TOTAL_SECTIONS: usize = 2;
pub const CAMERA_WAYPOINTS: [[f32; 3]; 3] =
    [[0.0, 30.0, 300.0], [0.0, 40.0, -50.0], [0.0, 50.0, -700.0]];

// Camera smoothing (fraction of the remaining distance covered per tick)
pub const CAMERA_SMOOTHING: f32 = 0.05;
// Reference tick length for frame-scaled smoothing (60 Hz display)
pub const SMOOTHING_REFERENCE_DT_SEC: f32 = 1.0 / 60.0;

// Idle float superimposed on the camera and mountain drift
pub const IDLE_FLOAT_X_RATE: f32 = 0.1;
pub const IDLE_FLOAT_X_AMPLITUDE: f32 = 2.0;
pub const IDLE_FLOAT_Y_RATE: f32 = 0.15;
pub const IDLE_FLOAT_Y_AMPLITUDE: f32 = 1.0;

// Camera always looks far down the negative depth axis
pub const LOOK_AT: [f32; 3] = [0.0, 10.0, -600.0];

// Camera projection
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 2000.0;

// Mountain parallax
pub const LAYER_SPEED_STEP: f32 = 0.9; // speed_i = 1 + i * step
pub const LAYER_SCROLL_DEPTH_SCALE: f32 = 0.5;
pub const LAYER_DRIFT_STEP: f32 = 0.5; // drift scale_i = 1 + i * step
pub const LAYER_BASE_Y: f32 = 50.0;

// Visibility cutoff: above this progress every mountain layer is parked
pub const LAYER_CUTOFF_PROGRESS: f32 = 0.7;
pub const OFF_FRUSTUM_DEPTH: f32 = 600_000.0;

// Nebula follows this mountain layer's depth once it exists
pub const NEBULA_ANCHOR_LAYER: usize = 3;
pub const NEBULA_BASE_DEPTH: f32 = -1050.0;
pub const NEBULA_DEPTH_DELTA: f32 = 0.0;

// Shader clock rates
pub const NEBULA_TIME_RATE: f32 = 0.5;
pub const ATMOSPHERE_PULSE_RATE: f32 = 2.0;
pub const ATMOSPHERE_PULSE_DEPTH: f32 = 0.1;

// Star sheets
pub const STAR_SHEETS: usize = 3;
pub const STARS_PER_SHEET: usize = 5000;
pub const STAR_RADIUS_MIN: f32 = 200.0;
pub const STAR_RADIUS_SPAN: f32 = 800.0;
pub const STAR_SIZE_MIN: f32 = 0.5;
pub const STAR_SIZE_SPAN: f32 = 2.0;

// Nebula plane
pub const NEBULA_WIDTH: f32 = 8000.0;
pub const NEBULA_HEIGHT: f32 = 4000.0;
pub const NEBULA_SEGMENTS: u32 = 100;
pub const NEBULA_COLOR_A: u32 = 0x0033ff;
pub const NEBULA_COLOR_B: u32 = 0xff0066;
pub const NEBULA_OPACITY: f32 = 0.3;

// Mountain silhouettes
pub const MOUNTAIN_SEGMENTS: usize = 50;
pub const MOUNTAIN_RIDGE_WIDTH: f32 = 1000.0;
pub const MOUNTAIN_FLOOR_Y: f32 = -300.0;
pub const MOUNTAIN_WING_X: f32 = 5000.0;

/// (distance, height, color, opacity) for each layer, nearest first.
pub const MOUNTAIN_LAYERS: [(f32, f32, u32, f32); 4] = [
    (-50.0, 60.0, 0x1a1a2e, 1.0),
    (-100.0, 80.0, 0x16213e, 0.8),
    (-150.0, 100.0, 0x0f3460, 0.6),
    (-200.0, 120.0, 0x0a4668, 0.4),
];

// Atmosphere shell
pub const ATMOSPHERE_RADIUS: f32 = 600.0;
pub const ATMOSPHERE_SEGMENTS: u32 = 32;

// Fog and post-processing
pub const FOG_DENSITY: f32 = 0.00025;
pub const BLOOM_STRENGTH: f32 = 0.8;
pub const BLOOM_RADIUS: f32 = 0.4;
pub const BLOOM_THRESHOLD: f32 = 0.85;
pub const TONE_MAPPING_EXPOSURE: f32 = 0.5;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Page elements
pub const CANVAS_ID: &str = "heroCanvas";
pub const SECTION_LABEL_ID: &str = "currentSection";
pub const PROGRESS_FILL_SELECTOR: &str = ".progress-fill";
pub const READY_EVENT: &str = "horizon:ready";
