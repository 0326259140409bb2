#![forbid(unsafe_code)]

//! Host-owned viewport state.
//!
//! The engine never writes scroll state. Hosts keep a [`ViewportState`],
//! update it from scroll and resize events, and hand it to
//! [`WindowSpec::compute`](crate::config::WindowSpec::compute) whenever
//! they need a fresh window. Last write wins; there is no history.

use crate::config::WindowSpec;

/// Scroll position and visible height of the rendering surface.
///
/// Deserialized values are clamped like the setters clamp them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawViewportState")
)]
pub struct ViewportState {
    scroll_offset: f64,
    viewport_height: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawViewportState {
    scroll_offset: f64,
    viewport_height: f64,
}

#[cfg(feature = "serde")]
impl From<RawViewportState> for ViewportState {
    fn from(raw: RawViewportState) -> Self {
        Self::new(raw.viewport_height).with_scroll_offset(raw.scroll_offset)
    }
}

impl ViewportState {
    /// Create a viewport scrolled to the top.
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_height: clamp(viewport_height),
        }
    }

    /// Set the initial scroll offset.
    #[must_use]
    pub fn with_scroll_offset(mut self, offset: f64) -> Self {
        self.set_scroll_offset(offset);
        self
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Current viewport height.
    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Record a scroll event. Negative and NaN offsets become zero.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = clamp(offset);
    }

    /// Record a resize. Negative and NaN heights become zero.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = clamp(height);
    }

    /// Largest offset that still fills the viewport with content.
    #[must_use]
    pub fn max_scroll_offset(&self, total_height: f64) -> f64 {
        clamp(total_height - self.viewport_height)
    }

    /// Clamp the offset into `[0, total_height - viewport_height]`.
    ///
    /// The engine tolerates out-of-range offsets; this is the caller-side
    /// clamp hosts apply after content shrinks.
    pub fn clamp_to_content(&mut self, total_height: f64) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset(total_height));
    }

    /// Scroll by `delta` (positive = down), staying within the content.
    pub fn scroll_by(&mut self, delta: f64, total_height: f64) {
        self.set_scroll_offset(self.scroll_offset + delta);
        self.clamp_to_content(total_height);
    }

    /// Scroll up by one viewport height.
    pub fn page_up(&mut self, total_height: f64) {
        self.scroll_by(-self.viewport_height, total_height);
    }

    /// Scroll down by one viewport height.
    pub fn page_down(&mut self, total_height: f64) {
        self.scroll_by(self.viewport_height, total_height);
    }

    /// Jump to the first row.
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0.0;
    }

    /// Jump so the last row sits at the bottom of the viewport.
    pub fn scroll_to_bottom(&mut self, total_height: f64) {
        self.scroll_offset = self.max_scroll_offset(total_height);
    }

    /// Jump so `index` sits at the top of the viewport.
    ///
    /// The offset is not clamped: near the end of the list the window
    /// anchors on the last rows and `index` stays visible either way.
    pub fn scroll_to_index(&mut self, index: usize, spec: &WindowSpec) {
        self.set_scroll_offset(spec.offset_of(index));
    }

    /// Whether the viewport shows the end of the content.
    #[must_use]
    pub fn is_at_bottom(&self, total_height: f64) -> bool {
        self.scroll_offset >= self.max_scroll_offset(total_height)
    }
}

fn clamp(value: f64) -> f64 {
    value.max(0.0)
}
