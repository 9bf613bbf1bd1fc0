use crate::core::parallax::{FrameUpdate, ParallaxEngine, ParallaxState, TickInput};

/// Display-refresh scheduling provided by the host (requestAnimationFrame).
pub trait FrameScheduler {
    /// Ask for one callback on the next refresh. Returns a handle that can
    /// be cancelled, or `None` if the host refused.
    fn request_frame(&mut self) -> Option<i32>;
    fn cancel_frame(&mut self, handle: i32);
}

/// Renderer capability consumed by the frame loop.
pub trait SceneRenderer {
    type Error: std::fmt::Debug;

    /// Resize surfaces to the new backing size in physical pixels.
    fn resize(&mut self, width: u32, height: u32);
    /// Draw and composite one frame.
    fn render_frame(&mut self, frame: &FrameUpdate) -> Result<(), Self::Error>;
    /// Release every GPU resource owned by the renderer.
    fn dispose(&mut self);
}

/// Running flag and pending frame handle for the render loop.
///
/// The loop asks for a new frame only while running. `stop` is honoured
/// once; afterwards no frame is ever requested, even from a tick that was
/// already executing when the stop arrived.
#[derive(Debug, Default)]
pub struct RenderLoop {
    running: bool,
    stopped: bool,
    pending: Option<i32>,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Request the first frame. Has no effect once stopped or already running.
    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.stopped || self.running {
            return;
        }
        self.running = true;
        self.pending = scheduler.request_frame();
        log::info!("[loop] started");
    }

    /// Called when a scheduled frame fires. Returns whether the tick should run.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        if self.running {
            self.frames += 1;
        }
        self.running
    }

    /// Schedule the next frame after a tick, unless a stop arrived meanwhile.
    pub fn reschedule(&mut self, scheduler: &mut impl FrameScheduler) {
        if !self.running || self.pending.is_some() {
            return;
        }
        self.pending = scheduler.request_frame();
    }

    /// Stop the loop. Returns `true` only for the first call.
    pub fn stop(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if self.stopped {
            return false;
        }
        self.stopped = true;
        self.running = false;
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        log::info!("[loop] stopped after {} frames", self.frames);
        true
    }
}

/// Owns the parallax engine and its carried state, and feeds a renderer.
#[derive(Clone, Debug)]
pub struct FrameDriver {
    engine: ParallaxEngine,
    state: ParallaxState,
}

impl FrameDriver {
    pub fn new(engine: ParallaxEngine, state: ParallaxState) -> Self {
        Self { engine, state }
    }

    pub fn state(&self) -> &ParallaxState {
        &self.state
    }

    /// Run one tick and hand the frame to the renderer. The carried state
    /// advances even when the renderer reports an error.
    pub fn step<R: SceneRenderer>(
        &mut self,
        renderer: &mut R,
        input: &TickInput,
    ) -> Result<FrameUpdate, R::Error> {
        let (next, frame) = self.engine.tick(self.state, input);
        self.state = next;
        renderer.render_frame(&frame)?;
        Ok(frame)
    }
}
