use crate::core::path::CameraPath;
use glam::Vec3;

/// Normalized scroll position and the section it falls in.
///
/// `progress` is in \[0, 1\]. `section_fraction` is in \[0, 1) everywhere
/// except at `progress == 1`, where it is exactly 1 so the camera lands on
/// the final waypoint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub progress: f32,
    pub section_index: usize,
    pub section_fraction: f32,
}

impl ScrollState {
    /// Sample the scroll state from raw page metrics.
    ///
    /// A zero or negative scroll range (document no taller than the
    /// viewport) yields zero progress instead of dividing by zero.
    pub fn sample(
        offset: f32,
        viewport_height: f32,
        document_height: f32,
        total_sections: usize,
    ) -> Self {
        let max_scroll = document_height - viewport_height;
        let progress = if max_scroll > 0.0 && offset.is_finite() {
            (offset / max_scroll).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self::from_progress(progress, total_sections)
    }

    /// Derive section index and fraction from an already normalized progress.
    pub fn from_progress(progress: f32, total_sections: usize) -> Self {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let sections = total_sections.max(1);
        let scaled = progress * sections as f32;
        // floor(progress * n) reaches n exactly at progress == 1
        let section_index = (scaled.floor() as usize).min(sections - 1);
        let section_fraction = (scaled - section_index as f32).clamp(0.0, 1.0);
        Self {
            progress,
            section_index,
            section_fraction,
        }
    }

    /// Section index as shown in the page HUD ("00", "01", ...).
    pub fn section_label(&self) -> String {
        format!("{:02}", self.section_index)
    }

    /// Progress as a CSS percentage width.
    pub fn progress_percent(&self) -> f32 {
        self.progress * 100.0
    }
}

/// Everything a scroll event produces, written as one record so a tick never
/// observes a section index from one sample and a fraction from another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSnapshot {
    pub scroll: ScrollState,
    /// Raw scroll offset in CSS pixels, used for layer travel.
    pub offset: f32,
    /// Camera target for this sample.
    pub target: Vec3,
}

impl ScrollSnapshot {
    /// Snapshot used before the first scroll sample arrives.
    pub fn initial(target: Vec3) -> Self {
        Self {
            scroll: ScrollState::default(),
            offset: 0.0,
            target,
        }
    }
}

/// Samples page metrics into snapshots for a fixed section count and path.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    total_sections: usize,
    path: CameraPath,
    last_section: Option<usize>,
}

impl ScrollTracker {
    pub fn new(total_sections: usize, path: CameraPath) -> Self {
        Self {
            total_sections: total_sections.max(1),
            path,
            last_section: None,
        }
    }

    /// Sample the page and compute the matching camera target.
    pub fn sample(
        &mut self,
        offset: f32,
        viewport_height: f32,
        document_height: f32,
    ) -> ScrollSnapshot {
        let scroll = ScrollState::sample(
            offset,
            viewport_height,
            document_height,
            self.total_sections,
        );
        if self.last_section != Some(scroll.section_index) {
            log::info!(
                "[scroll] section {} (progress {:.3})",
                scroll.section_label(),
                scroll.progress
            );
            self.last_section = Some(scroll.section_index);
        }
        ScrollSnapshot {
            scroll,
            offset: if offset.is_finite() { offset.max(0.0) } else { 0.0 },
            target: self.path.target(&scroll),
        }
    }
}
