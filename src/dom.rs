use crate::constants::*;
use crate::core::entrance::{EntranceStep, EntranceTargets, SUBTITLE_LINE_SELECTOR};
use crate::core::entrance::{MENU_SELECTOR, SCROLL_PROGRESS_SELECTOR, TITLE_SELECTOR};
use crate::core::ScrollState;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Match the canvas backing store to its CSS size, with the device pixel
/// ratio capped so high-density screens do not quadruple the fill cost.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Page scroll offset, viewport height and document height in CSS pixels.
pub fn scroll_metrics(window: &web::Window) -> (f32, f32, f32) {
    let offset = window.scroll_y().unwrap_or(0.0);
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let document = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    (offset as f32, viewport as f32, document as f32)
}

/// Update the section counter and progress bar. Missing elements are skipped.
pub fn write_hud(document: &web::Document, scroll: &ScrollState) {
    if let Some(label) = document.get_element_by_id(SECTION_LABEL_ID) {
        label.set_text_content(Some(&scroll.section_label()));
    }
    let fill = document
        .query_selector(PROGRESS_FILL_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
    if let Some(fill) = fill {
        let width = format!("{}%", scroll.progress_percent());
        _ = fill.style().set_property("width", &width);
    }
}

/// `data-*` overrides on the canvas, as (config key, raw value) pairs.
pub fn canvas_overrides(canvas: &web::HtmlCanvasElement) -> Vec<(&'static str, String)> {
    let dataset = canvas.dataset();
    ["seed", "layerTravel", "frameScaled", "cutoffHysteresis"]
        .into_iter()
        .filter_map(|key| dataset.get(key).map(|v| (key, v)))
        .collect()
}

pub fn entrance_targets(document: &web::Document) -> EntranceTargets {
    let exists = |sel: &str| matches!(document.query_selector(sel), Ok(Some(_)));
    let subtitle_lines = document
        .query_selector_all(SUBTITLE_LINE_SELECTOR)
        .map(|list| list.length() as usize)
        .unwrap_or(0);
    EntranceTargets {
        menu: exists(MENU_SELECTOR),
        title: exists(TITLE_SELECTOR),
        subtitle_lines,
        scroll_progress: exists(SCROLL_PROGRESS_SELECTOR),
    }
}

fn nth_element(document: &web::Document, selector: &str, nth: usize) -> Option<web::HtmlElement> {
    document
        .query_selector_all(selector)
        .ok()?
        .item(nth as u32)?
        .dyn_into::<web::HtmlElement>()
        .ok()
}

/// Apply the entrance schedule as CSS transitions.
pub fn play_entrance(document: &web::Document, steps: &[EntranceStep]) {
    for step in steps {
        let Some(el) = nth_element(document, step.selector, step.nth) else {
            continue;
        };
        let style = el.style();
        _ = style.set_property("transition", "none");
        _ = style.set_property("transform", &step.from_transform());
        _ = style.set_property("opacity", "0");
        _ = style.set_property("visibility", "visible");
        // Reading layout commits the start state so the transition runs.
        let _ = el.offset_width();
        _ = style.set_property("transition", &step.transition());
        _ = style.set_property("transform", "translate(0px, 0px)");
        _ = style.set_property("opacity", "1");
    }
}

pub fn dispatch_ready(window: &web::Window) {
    match web::Event::new(READY_EVENT) {
        Ok(ev) => {
            _ = window.dispatch_event(&ev);
        }
        Err(e) => log::warn!("could not create {} event: {:?}", READY_EVENT, e),
    }
}
