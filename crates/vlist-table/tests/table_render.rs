//! Rendering tests for `VirtualTable` over large row sources.
//!
//! 1. Rendered rows are exactly the computed window, in order.
//! 2. Every row line is as wide as the header.
//! 3. Scrolling by one row swaps at most one row in and one out.
//! 4. Click hit-testing agrees with the rendered row positions.

use std::borrow::Cow;

use proptest::prelude::*;
use vlist_core::{RowIdentity, ViewportState, WindowSpec};
use vlist_table::text::display_width;
use vlist_table::{Align, Column, ViewKind, VirtualTable};

#[derive(Debug, Clone)]
struct TrafficLog {
    id: u64,
    source_ip: String,
    protocol: &'static str,
    bytes: u32,
}

impl RowIdentity for TrafficLog {
    fn row_id(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(format!("log-{}", self.id)))
    }
}

fn logs(n: u64) -> Vec<TrafficLog> {
    (0..n)
        .map(|id| TrafficLog {
            id,
            source_ip: format!("192.168.{}.{}", id / 256 % 256, id % 256),
            protocol: ["TCP", "UDP", "ICMP"][(id % 3) as usize],
            bytes: (id as u32).wrapping_mul(37) % 65_536,
        })
        .collect()
}

fn table(width: u16) -> VirtualTable<TrafficLog> {
    VirtualTable::new(vec![
        Column::new("source_ip", "Source", |l: &TrafficLog| l.source_ip.clone()).width(15),
        Column::new("protocol", "Proto", |l: &TrafficLog| l.protocol.to_string()).width(5),
        Column::new("bytes", "Size", |l: &TrafficLog| l.bytes.to_string())
            .align(Align::Right)
            .render(|value, _| format!("{value} B")),
    ])
    .width(width)
}

// ── Scenarios ───────────────────────────────────────────────────────────

#[test]
fn hundred_thousand_rows_render_a_bounded_window() {
    let data = logs(100_000);
    let t = table(40);
    let mut viewport = t.viewport();
    viewport.set_scroll_offset(2_999_970.0);

    let view = t.render(&data, &viewport);
    assert_eq!(view.kind, ViewKind::Data);
    assert_eq!(view.total_height, 6_000_000.0);
    // floor(2_999_970 / 60) = 49_999; 6 visible rows; overscan 5 each side.
    assert_eq!(view.window.range(), 49_994..50_011);
    assert!(view.rows.len() <= 17);
    assert_eq!(view.rows[0].key.to_string(), "log-49994");
}

#[test]
fn scrolled_past_end_anchors_on_last_rows() {
    let data = logs(20);
    let t = table(40);
    let viewport = t.viewport().with_scroll_offset(1e9);
    let view = t.render(&data, &viewport);
    assert_eq!(view.rows.last().map(|r| r.index), Some(19));
    assert!(view.window.start_index() <= 19);
}

#[test]
fn custom_row_height_changes_window() {
    let data = logs(1000);
    let t = table(40).spec(WindowSpec::new(30.0).unwrap().with_overscan(0));
    let view = t.render(&data, &t.viewport());
    // start 0 plus ceil(352 / 30) = 12 rows below it.
    assert_eq!(view.window.range(), 0..13);
    assert_eq!(view.rows[1].y, 30.0);
}

#[test]
fn right_aligned_renderer_output() {
    let data = logs(2);
    let t = table(40);
    let view = t.render(&data, &t.viewport());
    assert!(view.rows[1].cells[2].ends_with("37 B"));
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rows_match_window(
        count in 0u64..=5_000,
        frac in 0.0f64..=1.5,
        width in 10u16..=120,
    ) {
        let data = logs(count);
        let t = table(width);
        let total = count as f64 * 60.0;
        let viewport = t.viewport().with_scroll_offset(total * frac);
        let view = t.render(&data, &viewport);

        let indices: Vec<usize> = view.rows.iter().map(|r| r.index).collect();
        let expected: Vec<usize> = view.window.range().collect();
        prop_assert_eq!(indices, expected);
        for (i, row) in view.rows.iter().enumerate() {
            prop_assert_eq!(row.y, i as f64 * 60.0);
        }
        prop_assert_eq!(view.kind == ViewKind::Empty, count == 0);
    }
}

proptest! {
    #[test]
    fn lines_are_header_width(
        count in 1u64..=500,
        width in 1u16..=120,
        spacing in 0u16..=3,
    ) {
        let data = logs(count);
        let t = table(width).column_spacing(spacing);
        let view = t.render(&data, &t.viewport());
        let header_width = display_width(&view.header);
        for row in &view.rows {
            prop_assert_eq!(display_width(&row.line), header_width);
        }
    }
}

proptest! {
    #[test]
    fn one_row_scroll_swaps_one_row(
        count in 200u64..=5_000,
        start in 20usize..=150,
    ) {
        let data = logs(count);
        let t = table(40);
        let before = t.render(&data, &t.viewport().with_scroll_offset(start as f64 * 60.0));
        let after = t.render(&data, &t.viewport().with_scroll_offset((start + 1) as f64 * 60.0));

        let kept = before
            .rows
            .iter()
            .filter(|r| after.rows.iter().any(|a| a.key == r.key))
            .count();
        prop_assert!(before.rows.len() - kept <= 1);
        prop_assert!(after.rows.len() - kept <= 1);
    }
}

proptest! {
    #[test]
    fn hit_testing_matches_layout(
        count in 1usize..=2_000,
        scroll in 0u32..=100_000,
        y in 0u32..352,
    ) {
        let t = table(40);
        let viewport: ViewportState = t.viewport().with_scroll_offset(f64::from(scroll));
        let hit = t.row_at(count, &viewport, f64::from(y));
        let absolute = f64::from(scroll) + f64::from(y);
        if absolute < count as f64 * 60.0 {
            let index = hit.unwrap();
            prop_assert!(index as f64 * 60.0 <= absolute);
            prop_assert!(absolute < (index + 1) as f64 * 60.0);
        } else {
            prop_assert_eq!(hit, None);
        }
    }
}
