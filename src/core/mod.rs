pub mod camera;
pub mod config;
pub mod entrance;
pub mod error;
pub mod geometry;
pub mod host;
pub mod parallax;
pub mod path;
pub mod scroll;

pub use camera::Camera;
pub use config::BackdropConfig;
pub use error::BackdropError;
pub use geometry::SceneGeometry;
pub use host::{FrameDriver, FrameScheduler, RenderLoop, SceneRenderer};
pub use parallax::{FrameUpdate, ParallaxEngine, ParallaxState, TickInput};
pub use scroll::{ScrollSnapshot, ScrollState, ScrollTracker};

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
