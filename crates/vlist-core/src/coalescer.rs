#![forbid(unsafe_code)]

//! Scroll and resize coalescing.
//!
//! Scroll events can arrive far faster than frames are painted. Window
//! computation is cheap, but every recomputation still means re-rendering
//! the materialized rows, so hosts usually want at most one per frame.
//!
//! [`ScrollCoalescer`] keeps only the latest scroll offset and the latest
//! viewport height seen since the last [`take`](ScrollCoalescer::take).
//! Coalescing is a host policy: the engine gives the same answer whether it
//! is called once per event or once per frame.
//!
//! ```
//! use vlist_core::coalescer::ScrollCoalescer;
//!
//! let mut coalescer = ScrollCoalescer::new();
//! coalescer.push_scroll(10.0);
//! coalescer.push_scroll(25.0);
//! coalescer.push_resize(480.0);
//!
//! let update = coalescer.take().unwrap();
//! assert_eq!(update.scroll_offset, Some(25.0));
//! assert_eq!(update.viewport_height, Some(480.0));
//! assert!(coalescer.take().is_none());
//! ```

use crate::viewport::ViewportState;

/// Pending viewport changes collected since the last flush.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportUpdate {
    /// Latest scroll offset, if any scroll happened.
    pub scroll_offset: Option<f64>,
    /// Latest viewport height, if any resize happened.
    pub viewport_height: Option<f64>,
}

impl ViewportUpdate {
    /// Write the pending values into `viewport`.
    ///
    /// The resize is applied first so the offset lands on the new geometry.
    pub fn apply(&self, viewport: &mut ViewportState) {
        if let Some(height) = self.viewport_height {
            viewport.set_viewport_height(height);
        }
        if let Some(offset) = self.scroll_offset {
            viewport.set_scroll_offset(offset);
        }
    }
}

/// Latest-wins coalescer for viewport events.
///
/// Not thread-safe; feed it from the UI event thread.
#[derive(Debug, Clone, Default)]
pub struct ScrollCoalescer {
    pending: ViewportUpdate,
    pending_count: u32,
}

impl ScrollCoalescer {
    /// Create an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scroll event; replaces any pending offset.
    pub fn push_scroll(&mut self, offset: f64) {
        self.pending.scroll_offset = Some(offset);
        self.pending_count = self.pending_count.saturating_add(1);
    }

    /// Record a resize; replaces any pending height.
    pub fn push_resize(&mut self, height: f64) {
        self.pending.viewport_height = Some(height);
        self.pending_count = self.pending_count.saturating_add(1);
    }

    /// Whether anything is waiting to be applied.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.scroll_offset.is_some() || self.pending.viewport_height.is_some()
    }

    /// Number of raw events folded into the pending update.
    #[must_use]
    pub fn pending_count(&self) -> u32 {
        self.pending_count
    }

    /// Take the pending update, leaving the coalescer empty.
    #[must_use]
    pub fn take(&mut self) -> Option<ViewportUpdate> {
        if !self.has_pending() {
            return None;
        }
        self.pending_count = 0;
        Some(std::mem::take(&mut self.pending))
    }

    /// Take the pending update and apply it to `viewport`.
    ///
    /// Returns `true` if the viewport changed.
    pub fn flush_into(&mut self, viewport: &mut ViewportState) -> bool {
        match self.take() {
            Some(update) => {
                let before = *viewport;
                update.apply(viewport);
                before != *viewport
            }
            None => false,
        }
    }

    /// Drop pending events without applying them.
    pub fn clear(&mut self) {
        self.pending = ViewportUpdate::default();
        self.pending_count = 0;
    }
}
