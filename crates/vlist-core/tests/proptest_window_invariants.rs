//! Property-based invariant tests for window computation.
//!
//! These tests verify invariants that must hold for any valid inputs:
//!
//! 1. Every row intersecting the viewport is materialized.
//! 2. Indices stay inside `[0, count - 1]`; empty lists give empty windows.
//! 3. `total_height` and `offset_y` are exact products.
//! 4. Growing the overscan never shrinks the window.
//! 5. Identical inputs give identical windows.
//! 6. Scrolling to an index makes that index visible.
//! 7. Non-positive row heights are always rejected.

use proptest::prelude::*;
use vlist_core::window::{compute_window, index_at_offset, scroll_to_index};
use vlist_core::{ViewportState, WindowError, WindowSpec};

// ── Helpers ─────────────────────────────────────────────────────────────

fn item_height_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        (1u32..=200).prop_map(f64::from),
        (1u32..=4000).prop_map(|q| f64::from(q) / 16.0),
    ]
}

fn count_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![Just(0usize), 1usize..=50, 1usize..=200_000]
}

fn extent_strategy() -> impl Strategy<Value = f64> {
    (0u32..=2_000_000).prop_map(|v| f64::from(v) / 4.0)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Coverage
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_intersecting_row_is_materialized(
        count in 1usize..=5_000,
        item_height in item_height_strategy(),
        viewport in (0u32..=4000).prop_map(f64::from),
        overscan in 0usize..=8,
        frac in 0.0f64..1.0,
    ) {
        let total = count as f64 * item_height;
        let max_offset = (total - viewport).max(0.0);
        let scroll = (max_offset * frac).floor();

        let w = compute_window(count, item_height, viewport, scroll, overscan).unwrap();
        let end = w.end_index().unwrap();

        let first = index_at_offset(scroll, item_height).min(count - 1);
        let last = index_at_offset(scroll + viewport, item_height).min(count - 1);
        for i in [first, last] {
            prop_assert!(
                w.start_index() <= i && i <= end,
                "row {} not covered by {}..={} (scroll={}, viewport={}, h={})",
                i, w.start_index(), end, scroll, viewport, item_height
            );
        }
        prop_assert!(w.visible_range().start == first);
        prop_assert!(w.visible_range().end == last + 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn indices_stay_in_bounds(
        count in count_strategy(),
        item_height in item_height_strategy(),
        viewport in extent_strategy(),
        scroll in extent_strategy(),
        overscan in 0usize..=64,
    ) {
        let w = compute_window(count, item_height, viewport, scroll, overscan).unwrap();
        if count == 0 {
            prop_assert!(w.is_empty());
            prop_assert_eq!(w.end_index(), None);
        } else {
            let end = w.end_index().unwrap();
            prop_assert!(w.start_index() <= end);
            prop_assert!(end < count);
            prop_assert!(w.visible_range().start >= w.start_index());
            prop_assert!(w.visible_range().end <= w.range().end);
        }
    }
}

proptest! {
    #[test]
    fn window_len_bounded_by_viewport_not_count(
        count in count_strategy(),
        item_height in item_height_strategy(),
        viewport in extent_strategy(),
        scroll in extent_strategy(),
        overscan in 0usize..=16,
    ) {
        let w = compute_window(count, item_height, viewport, scroll, overscan).unwrap();
        let bound = (viewport / item_height).ceil() as usize + 2 * overscan + 1;
        prop_assert!(w.len() <= bound, "len {} > bound {}", w.len(), bound);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Geometry exactness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn geometry_is_exact(
        count in count_strategy(),
        item_height in item_height_strategy(),
        viewport in extent_strategy(),
        scroll in extent_strategy(),
        overscan in 0usize..=16,
    ) {
        let w = compute_window(count, item_height, viewport, scroll, overscan).unwrap();
        prop_assert_eq!(w.total_height(), count as f64 * item_height);
        prop_assert_eq!(w.offset_y(), w.start_index() as f64 * item_height);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Overscan monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn more_overscan_never_shrinks(
        count in count_strategy(),
        item_height in item_height_strategy(),
        viewport in extent_strategy(),
        scroll in extent_strategy(),
        overscan in 0usize..=16,
        extra in 0usize..=16,
    ) {
        let small = compute_window(count, item_height, viewport, scroll, overscan).unwrap();
        let large = compute_window(count, item_height, viewport, scroll, overscan + extra).unwrap();
        prop_assert!(large.range().start <= small.range().start);
        prop_assert!(large.range().end >= small.range().end);
        prop_assert_eq!(large.visible_range(), small.visible_range());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn recomputation_is_pure(
        count in count_strategy(),
        item_height in item_height_strategy(),
        viewport in extent_strategy(),
        scroll in extent_strategy(),
        overscan in 0usize..=16,
    ) {
        let a = compute_window(count, item_height, viewport, scroll, overscan).unwrap();
        // An unrelated computation in between must not influence the result.
        let _ = compute_window(count / 2 + 1, item_height * 2.0, viewport, 0.0, 0);
        let b = compute_window(count, item_height, viewport, scroll, overscan).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Scroll-to-index round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scroll_to_index_makes_row_visible(
        count in 1usize..=200_000,
        item_height in item_height_strategy(),
        viewport in extent_strategy(),
        overscan in 0usize..=16,
        pick in any::<prop::sample::Index>(),
    ) {
        let index = pick.index(count);
        let offset = scroll_to_index(index, item_height).unwrap();
        let w = compute_window(count, item_height, viewport, offset, overscan).unwrap();
        prop_assert!(
            w.is_visible(index),
            "index {} not in visible range {:?} (offset={}, h={})",
            index, w.visible_range(), offset, item_height
        );
    }
}

proptest! {
    #[test]
    fn viewport_scroll_to_index_matches_free_function(
        count in 1usize..=10_000,
        item_height in item_height_strategy(),
        viewport_height in extent_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = pick.index(count);
        let spec = WindowSpec::new(item_height).unwrap();
        let mut viewport = ViewportState::new(viewport_height);
        viewport.scroll_to_index(index, &spec);
        prop_assert_eq!(viewport.scroll_offset(), scroll_to_index(index, item_height).unwrap());
        prop_assert!(spec.compute(count, &viewport).is_visible(index));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Configuration errors
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn non_positive_heights_rejected(
        count in count_strategy(),
        item_height in -1000.0f64..=0.0,
        viewport in extent_strategy(),
    ) {
        let result = compute_window(count, item_height, viewport, 0.0, 5);
        let rejected = matches!(result, Err(WindowError::NonPositiveItemHeight { .. }));
        prop_assert!(rejected);
    }
}
