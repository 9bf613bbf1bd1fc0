#![cfg(target_arch = "wasm32")]
use crate::constants::CANVAS_ID;
use crate::core::entrance::entrance_schedule;
use crate::core::{
    BackdropConfig, BackdropError, FrameDriver, ParallaxEngine, ParallaxState, SceneGeometry,
    ScrollSnapshot, ScrollTracker,
};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod render;

fn find_canvas(document: &web::Document) -> Result<web::HtmlCanvasElement, BackdropError> {
    document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| BackdropError::MissingRenderTarget(CANVAS_ID.to_string()))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| BackdropError::NotACanvas(CANVAS_ID.to_string()))
}

/// Defaults plus any `data-*` overrides on the canvas. Bad overrides are
/// skipped; a configuration that fails validation is replaced by defaults.
fn load_config(canvas: &web::HtmlCanvasElement) -> BackdropConfig {
    let mut config = BackdropConfig::default();
    for (key, value) in dom::canvas_overrides(canvas) {
        if let Err(e) = config.apply_override(key, &value) {
            log::warn!("[config] ignoring override: {}", e);
        }
    }
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            BackdropConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("horizon-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Without the canvas nothing else is built.
    let canvas = find_canvas(&document)?;
    let config = load_config(&canvas);
    log::info!(
        "[config] seed={} sections={} depth={:?}",
        config.seed,
        config.total_sections,
        config.layer_depth_mode
    );

    dom::sync_canvas_backing_size(&canvas);
    let geometry = SceneGeometry::generate(config.seed);
    let gpu = frame::init_gpu(&canvas, &geometry).await?;

    let start = config.path.first();
    let snapshot = Rc::new(Cell::new(ScrollSnapshot::initial(start)));
    let tracker = ScrollTracker::new(config.total_sections, config.path.clone());
    events::wire_scroll(tracker, snapshot.clone());

    let resize_dirty = Rc::new(Cell::new(false));
    events::wire_resize(resize_dirty.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        snapshot,
        resize_dirty,
        canvas: canvas.clone(),
        driver: FrameDriver::new(ParallaxEngine::new(&config), ParallaxState::new(start)),
        gpu,
        started: Instant::now(),
    }));
    let handle = frame::start_loop(frame_ctx.clone());
    events::wire_teardown(handle, frame_ctx);

    let steps = entrance_schedule(&dom::entrance_targets(&document));
    dom::play_entrance(&document, &steps);
    dom::dispatch_ready(&window);
    Ok(())
}
