#![forbid(unsafe_code)]

//! Windowed list computation.
//!
//! Given a row count, a uniform row height, a viewport height, a scroll
//! offset and an overscan pad, [`compute_window`] returns the contiguous
//! run of rows that must be materialized plus the geometry needed to place
//! them. The computation is pure index arithmetic: it never looks at the
//! rows themselves, so a list of 100K rows costs the same as a list of 100.
//!
//! # Algorithm
//!
//! ```text
//! raw_start     = floor(scroll_offset / item_height)
//! visible_count = ceil(viewport_height / item_height)
//! raw_end       = raw_start + visible_count + overscan
//! start         = max(0, raw_start - overscan)
//! end           = min(count - 1, raw_end)          (inclusive)
//! total_height  = count * item_height
//! offset_y      = start * item_height
//! ```
//!
//! Out-of-domain scroll offsets and viewport heights are clamped rather
//! than rejected; only an unusable row height is an error.
//!
//! # Example
//!
//! ```
//! use vlist_core::window::compute_window;
//!
//! let window = compute_window(1000, 60.0, 600.0, 3000.0, 5).unwrap();
//! assert_eq!(window.range(), 45..66);
//! assert_eq!(window.offset_y(), 2700.0);
//! assert_eq!(window.total_height(), 60_000.0);
//! ```

use std::ops::Range;

use crate::error::{WindowError, check_item_height};

/// Overscan used when the host does not pick one.
pub const DEFAULT_OVERSCAN: usize = 5;

/// The result of a window computation.
///
/// Indices are absolute row indices into the row source. The range is
/// half-open; [`WindowRange::end_index`] gives the inclusive last row.
/// A window is never mutated: every input change produces a new value.
/// It can be serialized for inspection but only built by computation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowRange {
    start: usize,
    end: usize,
    visible_start: usize,
    visible_end: usize,
    count: usize,
    item_height: f64,
    total_height: f64,
    offset_y: f64,
}

impl WindowRange {
    /// The empty window for a list without rows.
    #[must_use]
    pub fn empty(item_height: f64) -> Self {
        Self {
            start: 0,
            end: 0,
            visible_start: 0,
            visible_end: 0,
            count: 0,
            item_height,
            total_height: 0.0,
            offset_y: 0.0,
        }
    }

    /// First materialized row (0 for an empty window).
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start
    }

    /// Last materialized row, inclusive. `None` for an empty window.
    #[must_use]
    pub fn end_index(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end - 1)
        }
    }

    /// Materialized rows as a half-open range, overscan included.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Rows that actually intersect the viewport, without overscan.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.visible_start..self.visible_end
    }

    /// Number of materialized rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether nothing needs to be materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `index` is materialized by this window.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// Whether `index` intersects the viewport (overscan excluded).
    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible_range().contains(&index)
    }

    /// Row count the window was computed for.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Row height the window was computed for.
    #[must_use]
    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    /// Height of the full content: `count * item_height`.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    /// Translation applied to the materialized block: `start * item_height`.
    #[must_use]
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Absolute top edge of row `index` in content coordinates.
    #[must_use]
    pub fn row_offset(&self, index: usize) -> f64 {
        index as f64 * self.item_height
    }

    /// Iterate over the materialized row indices.
    pub fn iter(&self) -> Range<usize> {
        self.range()
    }
}

impl IntoIterator for WindowRange {
    type Item = usize;
    type IntoIter = Range<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.range()
    }
}

/// Compute the materialized window for a list.
///
/// # Errors
///
/// Returns [`WindowError`] when `item_height` is zero, negative or not
/// finite. Every other input is clamped into its domain: negative or NaN
/// offsets and heights become zero, and an offset past the end of the
/// content anchors the window on the last row.
pub fn compute_window(
    count: usize,
    item_height: f64,
    viewport_height: f64,
    scroll_offset: f64,
    overscan: usize,
) -> Result<WindowRange, WindowError> {
    let item_height = check_item_height(item_height)?;
    Ok(compute_unchecked(
        count,
        item_height,
        viewport_height,
        scroll_offset,
        overscan,
    ))
}

/// Compute a window from signed inputs, rejecting negative counts and overscan.
///
/// Hosts that receive sizes from untyped sources (configuration files,
/// foreign callers) can use this entry point instead of casting.
///
/// # Errors
///
/// Returns [`WindowError::NegativeCount`], [`WindowError::NegativeOverscan`],
/// or an item height error.
pub fn compute_window_checked(
    count: i64,
    item_height: f64,
    viewport_height: f64,
    scroll_offset: f64,
    overscan: i64,
) -> Result<WindowRange, WindowError> {
    let count = usize::try_from(count).map_err(|_| WindowError::NegativeCount { count })?;
    let overscan =
        usize::try_from(overscan).map_err(|_| WindowError::NegativeOverscan { overscan })?;
    compute_window(count, item_height, viewport_height, scroll_offset, overscan)
}

/// Scroll offset that brings `index` to the top of the viewport.
///
/// Applying this offset and recomputing the window always yields a window
/// whose [`visible_range`](WindowRange::visible_range) contains `index`.
///
/// # Errors
///
/// Returns an item height error when `item_height` is unusable.
pub fn scroll_to_index(index: usize, item_height: f64) -> Result<f64, WindowError> {
    let item_height = check_item_height(item_height)?;
    Ok(index as f64 * item_height)
}

/// Row whose rectangle `[i * h, (i + 1) * h)` contains `offset`.
///
/// The division is corrected against the exact row boundaries so that
/// `index_at_offset(i * h, h) == i` survives floating-point rounding.
/// Not clamped to any row count.
#[must_use]
pub fn index_at_offset(offset: f64, item_height: f64) -> usize {
    let offset = non_negative(offset);
    let mut row = (offset / item_height).floor();
    if row > 0.0 && row * item_height > offset {
        row -= 1.0;
    } else if (row + 1.0) * item_height <= offset {
        row += 1.0;
    }
    // Float-to-int `as` saturates; huge offsets land on usize::MAX and are
    // clamped by the caller.
    row as usize
}

/// Number of rows needed to cover `extent`, rounded up.
#[must_use]
pub fn rows_for_extent(extent: f64, item_height: f64) -> usize {
    (non_negative(extent) / item_height).ceil() as usize
}

pub(crate) fn compute_unchecked(
    count: usize,
    item_height: f64,
    viewport_height: f64,
    scroll_offset: f64,
    overscan: usize,
) -> WindowRange {
    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!(
        "window_compute",
        count,
        item_height,
        viewport_height,
        scroll_offset,
        overscan
    )
    .entered();

    if count == 0 {
        return WindowRange::empty(item_height);
    }

    let last = count - 1;
    let scroll_offset = non_negative(scroll_offset);
    let viewport_height = non_negative(viewport_height);

    let raw_start = index_at_offset(scroll_offset, item_height).min(last);
    let visible_count = rows_for_extent(viewport_height, item_height);
    let raw_end = raw_start
        .saturating_add(visible_count)
        .saturating_add(overscan);

    let start = raw_start.saturating_sub(overscan);
    let end = raw_end.min(last);

    // Last row touching [scroll_offset, scroll_offset + viewport_height].
    let visible_last = index_at_offset(scroll_offset + viewport_height, item_height)
        .min(raw_start.saturating_add(visible_count))
        .min(last);

    WindowRange {
        start,
        end: end + 1,
        visible_start: raw_start,
        visible_end: visible_last + 1,
        count,
        item_height,
        total_height: count as f64 * item_height,
        offset_y: start as f64 * item_height,
    }
}

fn non_negative(value: f64) -> f64 {
    // `max` returns the non-NaN operand, so NaN collapses to zero as well.
    value.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_of_long_list() {
        // raw_end = 0 + 10 visible + 5 overscan; nothing to pad above row 0.
        let w = compute_window(1000, 60.0, 600.0, 0.0, 5).unwrap();
        assert_eq!(w.start_index(), 0);
        assert_eq!(w.end_index(), Some(15));
        assert_eq!(w.visible_range(), 0..11);
        assert_eq!(w.total_height(), 60_000.0);
        assert_eq!(w.offset_y(), 0.0);
        assert_eq!(w.len(), 16);
    }

    #[test]
    fn scrolled_into_long_list() {
        let w = compute_window(1000, 60.0, 600.0, 3000.0, 5).unwrap();
        assert_eq!(w.visible_range().start, 50);
        assert_eq!(w.start_index(), 45);
        assert_eq!(w.end_index(), Some(65));
        assert_eq!(w.offset_y(), 2700.0);
    }

    #[test]
    fn short_list_clips_to_last_row() {
        let w = compute_window(10, 60.0, 600.0, 0.0, 5).unwrap();
        assert_eq!(w.range(), 0..10);
        assert_eq!(w.end_index(), Some(9));
        assert_eq!(w.total_height(), 600.0);
    }

    #[test]
    fn empty_list_yields_empty_window() {
        let w = compute_window(0, 60.0, 600.0, 0.0, 5).unwrap();
        assert!(w.is_empty());
        assert_eq!(w.end_index(), None);
        assert_eq!(w.total_height(), 0.0);
        assert_eq!(w.offset_y(), 0.0);
        assert_eq!(w.iter().count(), 0);
    }

    #[test]
    fn zero_item_height_is_a_configuration_error() {
        assert!(matches!(
            compute_window(1000, 0.0, 600.0, 0.0, 5),
            Err(WindowError::NonPositiveItemHeight { .. })
        ));
        assert!(compute_window(1000, f64::NAN, 600.0, 0.0, 5).is_err());
    }

    #[test]
    fn signed_entry_point_rejects_negatives() {
        assert_eq!(
            compute_window_checked(-1, 60.0, 600.0, 0.0, 5),
            Err(WindowError::NegativeCount { count: -1 })
        );
        assert_eq!(
            compute_window_checked(10, 60.0, 600.0, 0.0, -3),
            Err(WindowError::NegativeOverscan { overscan: -3 })
        );
        assert_eq!(
            compute_window_checked(10, 60.0, 600.0, 0.0, 5),
            compute_window(10, 60.0, 600.0, 0.0, 5)
        );
    }

    #[test]
    fn zero_viewport_still_reports_total_height() {
        let w = compute_window(100, 20.0, 0.0, 200.0, 0).unwrap();
        assert_eq!(w.total_height(), 2000.0);
        assert_eq!(w.range(), 10..11);
        assert_eq!(w.visible_range(), 10..11);
    }

    #[test]
    fn offset_past_end_anchors_on_last_row() {
        let w = compute_window(10, 60.0, 120.0, 10_000.0, 2).unwrap();
        assert_eq!(w.end_index(), Some(9));
        assert_eq!(w.start_index(), 7);
        assert!(w.start_index() <= w.end_index().unwrap());
        assert_eq!(w.offset_y(), 7.0 * 60.0);
    }

    #[test]
    fn negative_and_nan_inputs_clamp_to_zero() {
        let a = compute_window(50, 10.0, 100.0, -40.0, 1).unwrap();
        let b = compute_window(50, 10.0, 100.0, 0.0, 1).unwrap();
        assert_eq!(a, b);

        let c = compute_window(50, 10.0, f64::NAN, f64::NAN, 1).unwrap();
        assert_eq!(c.range(), 0..2);
    }

    #[test]
    fn visible_range_excludes_overscan() {
        let w = compute_window(1000, 60.0, 600.0, 3000.0, 5).unwrap();
        assert_eq!(w.visible_range(), 50..61);
        assert!(w.is_visible(55));
        assert!(!w.is_visible(46));
        assert!(w.contains(46));
    }

    #[test]
    fn fractional_scroll_includes_partial_rows() {
        // Row 3 is partially scrolled off the top, row 8 partially visible at the bottom.
        let w = compute_window(100, 20.0, 100.0, 70.0, 0).unwrap();
        assert_eq!(w.visible_range(), 3..9);
        assert_eq!(w.range(), 3..9);
    }

    #[test]
    fn index_at_offset_is_exact_on_row_boundaries() {
        for h in [0.1, 0.3, 1.0 / 3.0, 7.7, 60.0] {
            for i in [0usize, 1, 2, 3, 10, 99, 12_345] {
                assert_eq!(index_at_offset(i as f64 * h, h), i, "h={h} i={i}");
            }
        }
    }

    #[test]
    fn scroll_to_index_round_trips() {
        let offset = scroll_to_index(250, 60.0).unwrap();
        assert_eq!(offset, 15_000.0);
        let w = compute_window(1000, 60.0, 600.0, offset, 5).unwrap();
        assert!(w.is_visible(250));
        assert!(scroll_to_index(3, -1.0).is_err());
    }

    #[test]
    fn identical_inputs_give_identical_windows() {
        let a = compute_window(12_345, 17.5, 333.0, 4096.25, 3).unwrap();
        let b = compute_window(12_345, 17.5, 333.0, 4096.25, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn window_size_independent_of_count() {
        let small = compute_window(100, 1.0, 24.0, 10.0, 2).unwrap();
        let large = compute_window(100_000, 1.0, 24.0, 10.0, 2).unwrap();
        assert_eq!(small.range(), large.range());
    }

    #[test]
    fn into_iter_walks_materialized_rows() {
        let w = compute_window(10, 1.0, 3.0, 4.0, 1).unwrap();
        let rows: Vec<usize> = w.into_iter().collect();
        assert_eq!(rows, vec![3, 4, 5, 6, 7, 8]);
    }
}
