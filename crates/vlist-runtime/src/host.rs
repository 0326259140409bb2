#![forbid(unsafe_code)]

//! List host: the glue between scroll events, row data and the engine.
//!
//! A [`ListHost`] owns everything a scrolling list needs between frames:
//! the rows, the [`WindowSpec`], the current [`ViewportState`] and a
//! [`ScrollCoalescer`] for events that arrive between frames. Event
//! handlers only record; [`ListHost::flush`] applies the latest values once
//! per frame and [`ListHost::window`] produces the rows to render.
//!
//! # Example
//!
//! ```
//! use vlist_core::WindowSpec;
//! use vlist_runtime::ListHost;
//!
//! let rows: Vec<u32> = (0..10_000).collect();
//! let mut host = ListHost::new(rows, WindowSpec::default(), 600.0);
//!
//! host.on_scroll(120.0);
//! host.on_scroll(3000.0);
//! assert!(host.flush());
//!
//! let window = host.window();
//! assert_eq!(window.start_index(), 45);
//! assert_eq!(window.offset_y(), 2700.0);
//! ```

use vlist_core::{RowSource, ScrollCoalescer, ViewportState, VisibleWindow, WindowSpec};

/// Owns rows, viewport and coalesced events for one list.
#[derive(Debug)]
pub struct ListHost<S> {
    rows: S,
    spec: WindowSpec,
    viewport: ViewportState,
    coalescer: ScrollCoalescer,
    generation: u64,
}

impl<S: RowSource> ListHost<S> {
    /// Create a host scrolled to the top.
    pub fn new(rows: S, spec: WindowSpec, viewport_height: f64) -> Self {
        tracing::debug!(
            rows = rows.len(),
            item_height = spec.item_height(),
            overscan = spec.overscan(),
            viewport_height,
            "list host created"
        );
        Self {
            rows,
            spec,
            viewport: ViewportState::new(viewport_height),
            coalescer: ScrollCoalescer::new(),
            generation: 0,
        }
    }

    /// Current rows.
    #[must_use]
    pub fn rows(&self) -> &S {
        &self.rows
    }

    /// Window configuration.
    #[must_use]
    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    /// Viewport as of the last flush.
    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Number of times the rows have been replaced.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Height of the scrollable content.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.spec.total_height(self.rows.len())
    }

    /// Record a scroll event. Applied on the next [`flush`](Self::flush).
    pub fn on_scroll(&mut self, offset: f64) {
        self.coalescer.push_scroll(offset);
    }

    /// Record a viewport resize. Applied on the next [`flush`](Self::flush).
    pub fn on_resize(&mut self, height: f64) {
        if height != self.viewport.viewport_height() {
            tracing::debug!(
                from = self.viewport.viewport_height(),
                to = height,
                "viewport resize"
            );
        }
        self.coalescer.push_resize(height);
    }

    /// Whether events are waiting for a flush.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.coalescer.has_pending()
    }

    /// Apply pending events. Returns `true` if the viewport changed.
    ///
    /// The resulting offset is clamped to the content, the way a scroll
    /// container never reports an offset past its end.
    pub fn flush(&mut self) -> bool {
        let events = self.coalescer.pending_count();
        let before = self.viewport;
        self.coalescer.flush_into(&mut self.viewport);
        self.viewport.clamp_to_content(self.total_height());
        let changed = before != self.viewport;
        if changed {
            tracing::trace!(
                events,
                scroll_offset = self.viewport.scroll_offset(),
                viewport_height = self.viewport.viewport_height(),
                "viewport flushed"
            );
        }
        changed
    }

    /// Jump so `index` is at the top of the viewport, or as close as the
    /// content allows. Indices past the end go to the last row.
    ///
    /// Pending scroll events are discarded; the jump wins. Returns `false`
    /// for an empty list.
    pub fn scroll_to_index(&mut self, index: usize) -> bool {
        let count = self.rows.len();
        if count == 0 {
            return false;
        }
        let index = index.min(count - 1);
        self.flush();
        self.viewport.scroll_to_index(index, &self.spec);
        self.viewport.clamp_to_content(self.total_height());
        tracing::debug!(index, scroll_offset = self.viewport.scroll_offset(), "scroll to index");
        true
    }

    /// Swap in a new row set and return the old one.
    ///
    /// The scroll offset is kept where possible and clamped when the new
    /// content is shorter.
    pub fn replace_rows(&mut self, rows: S) -> S {
        let old = std::mem::replace(&mut self.rows, rows);
        self.generation += 1;
        let before = self.viewport.scroll_offset();
        self.viewport.clamp_to_content(self.total_height());
        tracing::info!(
            generation = self.generation,
            old_rows = old.len(),
            new_rows = self.rows.len(),
            clamped = before != self.viewport.scroll_offset(),
            "rows replaced"
        );
        old
    }

    /// Change the window configuration, keeping the first visible row.
    pub fn set_spec(&mut self, spec: WindowSpec) {
        let anchor = self.spec.index_at_offset(self.rows.len(), self.viewport.scroll_offset());
        self.spec = spec;
        if let Some(index) = anchor {
            self.viewport.scroll_to_index(index, &self.spec);
            self.viewport.clamp_to_content(self.total_height());
        }
    }

    /// Compute the rows to render for the current viewport.
    #[must_use]
    pub fn window(&self) -> VisibleWindow<'_, S::Row> {
        VisibleWindow::compute(&self.rows, &self.spec, &self.viewport)
    }

    /// Whether the window reaches within `threshold` rows of the end.
    ///
    /// Paged sources use this to request the next page before the user
    /// hits the bottom.
    #[must_use]
    pub fn near_end(&self, threshold: usize) -> bool {
        let count = self.rows.len();
        let range = self.spec.compute(count, &self.viewport);
        range.visible_range().end.saturating_add(threshold) >= count
    }
}

impl<R> ListHost<Vec<R>> {
    /// Append a page of rows to the end of the list.
    pub fn append_rows(&mut self, page: impl IntoIterator<Item = R>) {
        let before = self.rows.len();
        self.rows.extend(page);
        self.generation += 1;
        tracing::debug!(
            generation = self.generation,
            appended = self.rows.len() - before,
            rows = self.rows.len(),
            "rows appended"
        );
    }
}
