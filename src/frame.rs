use crate::core::{
    FrameDriver, FrameScheduler, RenderLoop, SceneGeometry, SceneRenderer, ScrollSnapshot,
    TickInput,
};
use crate::{dom, render};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` scheduling for the shared tick closure.
pub struct RafScheduler {
    tick: TickClosure,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<i32> {
        let window = web::window()?;
        let tick = self.tick.borrow();
        let closure = tick.as_ref()?;
        window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Some(window) = web::window() {
            _ = window.cancel_animation_frame(handle);
        }
    }
}

/// Per-frame state owned by the render loop.
pub struct FrameContext<'a> {
    pub snapshot: Rc<Cell<ScrollSnapshot>>,
    pub resize_dirty: Rc<Cell<bool>>,
    pub canvas: web::HtmlCanvasElement,
    pub driver: FrameDriver,
    pub gpu: render::GpuState<'a>,
    pub started: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        if self.resize_dirty.replace(false) {
            dom::sync_canvas_backing_size(&self.canvas);
            self.gpu.resize(self.canvas.width(), self.canvas.height());
        }

        let input = TickInput {
            now_sec: self.started.elapsed().as_secs_f64(),
            snapshot: self.snapshot.get(),
        };
        match self.driver.step(&mut self.gpu, &input) {
            Ok(frame) => log::trace!(
                "[loop] eye=({:.1},{:.1},{:.1}) nebula={:.1}",
                frame.camera_eye.x,
                frame.camera_eye.y,
                frame.camera_eye.z,
                frame.nebula_depth
            ),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
            }
            Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
        }
    }

    pub fn dispose(&mut self) {
        self.gpu.dispose();
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    geometry: &SceneGeometry,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas, geometry).await
}

/// Stops the loop from outside the tick closure.
pub struct LoopHandle {
    state: Rc<RefCell<RenderLoop>>,
    scheduler: Rc<RefCell<RafScheduler>>,
}

impl LoopHandle {
    /// Returns `true` only the first time.
    pub fn stop(&self) -> bool {
        self.state
            .borrow_mut()
            .stop(&mut *self.scheduler.borrow_mut())
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> LoopHandle {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let scheduler = Rc::new(RefCell::new(RafScheduler { tick: tick.clone() }));
    let state = Rc::new(RefCell::new(RenderLoop::new()));

    let state_tick = state.clone();
    let scheduler_tick = scheduler.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !state_tick.borrow_mut().begin_frame() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        state_tick
            .borrow_mut()
            .reschedule(&mut *scheduler_tick.borrow_mut());
    }) as Box<dyn FnMut()>));

    state.borrow_mut().start(&mut *scheduler.borrow_mut());
    LoopHandle { state, scheduler }
}
