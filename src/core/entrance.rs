// Entrance animation for the hero text as a pure schedule of CSS transitions.
// Steps are placed relative to the end of the timeline built so far, so a
// missing element simply drops out without shifting the others' overlaps.

/// Easing curves as CSS `cubic-bezier` approximations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Power2Out,
    Power3Out,
    Power4Out,
}

impl Ease {
    pub fn css(&self) -> &'static str {
        match self {
            Ease::Power2Out => "cubic-bezier(0.5, 1, 0.89, 1)",
            Ease::Power3Out => "cubic-bezier(0.33, 1, 0.68, 1)",
            Ease::Power4Out => "cubic-bezier(0.25, 1, 0.5, 1)",
        }
    }
}

/// One element's slide-in from an offset and zero opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct EntranceStep {
    /// CSS selector of the animated element.
    pub selector: &'static str,
    /// Index among elements matching `selector`.
    pub nth: usize,
    pub delay_sec: f32,
    pub duration_sec: f32,
    pub from_x: f32,
    pub from_y: f32,
    pub ease: Ease,
}

impl EntranceStep {
    pub fn end_sec(&self) -> f32 {
        self.delay_sec + self.duration_sec
    }

    /// Value for the element's `transition` property.
    pub fn transition(&self) -> String {
        let ease = self.ease.css();
        format!(
            "transform {d:.2}s {ease} {s:.2}s, opacity {d:.2}s {ease} {s:.2}s",
            d = self.duration_sec,
            s = self.delay_sec,
        )
    }

    pub fn from_transform(&self) -> String {
        format!("translate({}px, {}px)", self.from_x, self.from_y)
    }
}

/// Which entrance elements exist on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntranceTargets {
    pub menu: bool,
    pub title: bool,
    /// Number of `.subtitle-line` elements, 0 when the subtitle is absent.
    pub subtitle_lines: usize,
    pub scroll_progress: bool,
}

impl Default for EntranceTargets {
    fn default() -> Self {
        Self {
            menu: true,
            title: true,
            subtitle_lines: 0,
            scroll_progress: true,
        }
    }
}

pub const MENU_SELECTOR: &str = "#sideMenu";
pub const TITLE_SELECTOR: &str = "#heroTitle";
pub const SUBTITLE_LINE_SELECTOR: &str = "#heroSubtitle .subtitle-line";
pub const SCROLL_PROGRESS_SELECTOR: &str = "#scrollProgress";

const SUBTITLE_STAGGER_SEC: f32 = 0.2;

#[derive(Default)]
struct Timeline {
    end: f32,
    steps: Vec<EntranceStep>,
}

impl Timeline {
    /// Add a group of `count` elements starting `overlap` seconds before the
    /// current end, staggered by `stagger`.
    #[allow(clippy::too_many_arguments)]
    fn from(
        &mut self,
        selector: &'static str,
        count: usize,
        overlap: f32,
        stagger: f32,
        duration_sec: f32,
        from: (f32, f32),
        ease: Ease,
    ) {
        let start = (self.end - overlap).max(0.0);
        for nth in 0..count {
            let step = EntranceStep {
                selector,
                nth,
                delay_sec: start + nth as f32 * stagger,
                duration_sec,
                from_x: from.0,
                from_y: from.1,
                ease,
            };
            self.end = self.end.max(step.end_sec());
            self.steps.push(step);
        }
    }
}

/// Schedule for the menu, title, subtitle lines and scroll indicator.
pub fn entrance_schedule(targets: &EntranceTargets) -> Vec<EntranceStep> {
    let mut tl = Timeline::default();
    let present = |b: bool| usize::from(b);
    tl.from(MENU_SELECTOR, present(targets.menu), 0.0, 0.0, 1.0, (-100.0, 0.0), Ease::Power3Out);
    tl.from(TITLE_SELECTOR, present(targets.title), 0.5, 0.0, 1.5, (0.0, 200.0), Ease::Power4Out);
    tl.from(
        SUBTITLE_LINE_SELECTOR,
        targets.subtitle_lines,
        0.8,
        SUBTITLE_STAGGER_SEC,
        1.0,
        (0.0, 50.0),
        Ease::Power3Out,
    );
    tl.from(
        SCROLL_PROGRESS_SELECTOR,
        present(targets.scroll_progress),
        0.5,
        0.0,
        1.0,
        (0.0, 50.0),
        Ease::Power2Out,
    );
    tl.steps
}

/// Time at which the last step settles.
pub fn schedule_end(steps: &[EntranceStep]) -> f32 {
    steps.iter().map(EntranceStep::end_sec).fold(0.0, f32::max)
}
