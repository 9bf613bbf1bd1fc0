use crate::core::{ScrollSnapshot, ScrollTracker};
use crate::dom;
use crate::frame::{FrameContext, LoopHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

fn add_window_listener(event: &str, handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Sample the page once: update the HUD and publish a fresh snapshot.
pub fn on_scroll(tracker: &mut ScrollTracker, snapshot: &Cell<ScrollSnapshot>) {
    let Some(window) = web::window() else {
        return;
    };
    let (offset, viewport, document) = dom::scroll_metrics(&window);
    let next = tracker.sample(offset, viewport, document);
    if let Some(doc) = window.document() {
        dom::write_hud(&doc, &next.scroll);
    }
    snapshot.set(next);
}

/// Track scroll position, taking one sample immediately.
pub fn wire_scroll(mut tracker: ScrollTracker, snapshot: Rc<Cell<ScrollSnapshot>>) {
    on_scroll(&mut tracker, &snapshot);
    add_window_listener("scroll", move || on_scroll(&mut tracker, &snapshot));
}

/// Mark the viewport dirty; the next frame resizes once however many
/// events arrived.
pub fn on_resize(dirty: &Cell<bool>) {
    dirty.set(true);
}

pub fn wire_resize(dirty: Rc<Cell<bool>>) {
    add_window_listener("resize", move || on_resize(&dirty));
}

/// Stop the loop, then release GPU resources. Safe to call twice.
pub fn on_teardown(handle: &LoopHandle, frame_ctx: &RefCell<FrameContext<'static>>) {
    if handle.stop() {
        log::info!("[teardown] render loop stopped");
    }
    frame_ctx.borrow_mut().dispose();
}

pub fn wire_teardown(handle: LoopHandle, frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    add_window_listener("beforeunload", move || on_teardown(&handle, &frame_ctx));
}
