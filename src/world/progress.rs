// progress.rs - Scroll progress source
//
// Progress is recomputed from the current scroll offset on every
// scroll/resize event, never accumulated.

use std::cell::Cell;
use std::rc::Rc;

use super::clamp01;

/// Container-relative scroll progress in [0, 1].
/// A container no taller than the viewport has no scroll range: progress 0.
#[inline]
pub fn scroll_progress(
    scroll_top: f64,
    container_top: f64,
    container_height: f64,
    viewport_height: f64,
) -> f64 {
    let range = container_height - viewport_height;
    if !(range > 0.0) { return 0.0; }

    let raw = (scroll_top - container_top) / range;
    if !raw.is_finite() { return 0.0; }
    clamp01(raw)
}

/// Latest progress value. One writer (the listeners), one reader (the frame loop).
#[derive(Clone, Debug, Default)]
pub struct ProgressSource {
    value: Rc<Cell<f64>>,
}

impl ProgressSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(
        &self,
        scroll_top: f64,
        container_top: f64,
        container_height: f64,
        viewport_height: f64,
    ) -> f64 {
        let p = scroll_progress(scroll_top, container_top, container_height, viewport_height);
        self.value.set(p);
        p
    }

    pub fn set(&self, p: f64) {
        self.value.set(clamp01(p));
    }

    #[inline]
    pub fn get(&self) -> f64 {
        self.value.get()
    }
}
