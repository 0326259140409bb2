#![forbid(unsafe_code)]

//! Virtual table view.
//!
//! [`VirtualTable`] renders a fixed header plus the rows of the current
//! window. Rows are laid out inside a block translated by
//! [`TableView::translate_y`]; moving the viewport by one row shifts the
//! block and swaps one row in and one out, it never re-lays the whole list.
//!
//! # Example
//!
//! ```
//! use vlist_core::ViewportState;
//! use vlist_table::{Column, VirtualTable, ViewKind};
//!
//! let rows: Vec<String> = (0..1000).map(|i| format!("10.0.0.{}", i % 256)).collect();
//! let table = VirtualTable::new(vec![
//!     Column::new("source", "Source", |ip: &String| ip.clone()).width(16),
//!     Column::new("status", "Status", |_: &String| "allowed".to_string()),
//! ])
//! .width(24);
//!
//! let mut viewport = table.viewport();
//! viewport.set_scroll_offset(3000.0);
//! let view = table.render(&rows, &viewport);
//!
//! assert_eq!(view.kind, ViewKind::Data);
//! assert_eq!(view.rows.first().map(|r| r.index), Some(45));
//! ```

use vlist_core::{
    RowIdentity, RowKey, RowSource, ViewportState, VisibleWindow, WindowRange, WindowSpec,
};

use crate::column::{Column, resolve_widths};
use crate::scrollbar::ScrollbarState;
use crate::text::{display_width, fit};

/// Default table height, header included.
pub const DEFAULT_HEIGHT: f64 = 400.0;

/// Height reserved for the fixed header.
pub const HEADER_HEIGHT: f64 = 48.0;

/// Default table width in columns.
pub const DEFAULT_WIDTH: u16 = 80;

/// Message shown when the row source is empty.
pub const EMPTY_MESSAGE: &str = "No data available";

type ClickFn<R> = Box<dyn Fn(usize, &R) + Send + Sync>;

/// What a rendered view contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Real rows from the row source.
    Data,
    /// Placeholder rows while data is loading.
    Loading,
    /// No rows; [`EMPTY_MESSAGE`] is shown.
    Empty,
}

/// One materialized row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    /// Absolute index in the row source.
    pub index: usize,
    /// Stable identity for incremental renderers.
    pub key: RowKey,
    /// Top edge inside the translated block: `(index - start) * item_height`.
    pub y: f64,
    /// Cell texts, one per column, each fitted to its column width.
    pub cells: Vec<String>,
    /// The cells joined with column spacing.
    pub line: String,
}

/// The output of one table render.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// Data, loading skeleton, or empty state.
    pub kind: ViewKind,
    /// Header line.
    pub header: String,
    /// Materialized rows in index order.
    pub rows: Vec<RenderedRow>,
    /// Number of placeholder rows (loading state only).
    pub skeleton_rows: usize,
    /// Empty-state message, if any.
    pub message: Option<&'static str>,
    /// Window geometry the rows were produced from.
    pub window: WindowRange,
    /// Height of the scrollable body.
    pub body_height: f64,
    /// Height of the scrollable content.
    pub total_height: f64,
    /// Position of the row block in content coordinates.
    pub offset_y: f64,
    /// Position of the row block relative to the body top.
    pub translate_y: f64,
    /// Scrollbar track, top to bottom. Empty when nothing overflows.
    pub scrollbar: Vec<char>,
}

impl TableView {
    /// Plain-text rendering: header, then one line per materialized row.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = self.header.clone();
        match self.kind {
            ViewKind::Data => {
                for row in &self.rows {
                    out.push('\n');
                    out.push_str(&row.line);
                }
            }
            ViewKind::Loading => {
                for _ in 0..self.skeleton_rows {
                    out.push('\n');
                    out.push_str(&"░".repeat(display_width(&self.header)));
                }
            }
            ViewKind::Empty => {
                if let Some(message) = self.message {
                    out.push('\n');
                    out.push_str(message);
                }
            }
        }
        out
    }
}

/// A table that only renders the rows inside the viewport.
pub struct VirtualTable<R> {
    columns: Vec<Column<R>>,
    spec: WindowSpec,
    height: f64,
    width: u16,
    column_spacing: u16,
    loading: bool,
    show_scrollbar: bool,
    on_row_click: Option<ClickFn<R>>,
}

impl<R> std::fmt::Debug for VirtualTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualTable")
            .field("columns", &self.columns)
            .field("spec", &self.spec)
            .field("height", &self.height)
            .field("width", &self.width)
            .field("column_spacing", &self.column_spacing)
            .field("loading", &self.loading)
            .field("show_scrollbar", &self.show_scrollbar)
            .field("on_row_click", &self.on_row_click.is_some())
            .finish()
    }
}

impl<R> VirtualTable<R> {
    /// Create a table with 60-unit rows, 400 units tall, 80 columns wide.
    #[must_use]
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            spec: WindowSpec::default(),
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            column_spacing: 1,
            loading: false,
            show_scrollbar: true,
            on_row_click: None,
        }
    }

    /// Use a specific window spec (row height and overscan).
    #[must_use]
    pub fn spec(mut self, spec: WindowSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Set the total table height, header included.
    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = height.max(0.0);
        self
    }

    /// Set the table width in columns.
    #[must_use]
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Set the spacing between columns.
    #[must_use]
    pub fn column_spacing(mut self, spacing: u16) -> Self {
        self.column_spacing = spacing;
        self
    }

    /// Show the loading skeleton instead of rows.
    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Enable or disable the scrollbar.
    #[must_use]
    pub fn show_scrollbar(mut self, show: bool) -> Self {
        self.show_scrollbar = show;
        self
    }

    /// Register a click handler receiving the row index and record.
    #[must_use]
    pub fn on_row_click(mut self, handler: impl Fn(usize, &R) + Send + Sync + 'static) -> Self {
        self.on_row_click = Some(Box::new(handler));
        self
    }

    /// Column definitions.
    #[must_use]
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Window spec.
    #[must_use]
    pub fn window_spec(&self) -> &WindowSpec {
        &self.spec
    }

    /// Height of the scrollable body: total height minus the header.
    ///
    /// Windows are computed against this height, not the full table height.
    #[must_use]
    pub fn body_height(&self) -> f64 {
        (self.height - HEADER_HEIGHT).max(0.0)
    }

    /// A viewport sized to the body, scrolled to the top.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        ViewportState::new(self.body_height())
    }

    /// Number of skeleton rows shown while loading.
    #[must_use]
    pub fn skeleton_rows(&self) -> usize {
        (self.height / self.spec.item_height()).floor() as usize
    }

    fn widths(&self) -> Vec<u16> {
        // One column is kept for the scrollbar track.
        let width = if self.show_scrollbar {
            self.width.saturating_sub(1)
        } else {
            self.width
        };
        resolve_widths(&self.columns, width, self.column_spacing)
    }

    fn join(&self, cells: &[String]) -> String {
        cells.join(&" ".repeat(usize::from(self.column_spacing)))
    }

    /// Header cells fitted to the column widths.
    #[must_use]
    pub fn header_line(&self) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .zip(self.widths())
            .map(|(column, w)| fit(column.header(), usize::from(w), column.alignment()))
            .collect();
        self.join(&cells)
    }

    /// Render the rows of `source` visible through `viewport`.
    pub fn render<S>(&self, source: &S, viewport: &ViewportState) -> TableView
    where
        S: RowSource<Row = R> + ?Sized,
        R: RowIdentity,
    {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "table_render",
            rows = source.len(),
            columns = self.columns.len(),
            scroll_offset = viewport.scroll_offset(),
            loading = self.loading
        )
        .entered();

        let header = self.header_line();
        let body_height = viewport.viewport_height();

        if self.loading {
            return TableView {
                kind: ViewKind::Loading,
                header,
                rows: Vec::new(),
                skeleton_rows: self.skeleton_rows(),
                message: None,
                window: WindowRange::empty(self.spec.item_height()),
                body_height,
                total_height: 0.0,
                offset_y: 0.0,
                translate_y: 0.0,
                scrollbar: Vec::new(),
            };
        }

        let window = VisibleWindow::compute(source, &self.spec, viewport);
        let range = *window.range();
        let widths = self.widths();
        let item_height = self.spec.item_height();

        let rows: Vec<RenderedRow> = window
            .iter()
            .map(|item| {
                let cells: Vec<String> = self
                    .columns
                    .iter()
                    .zip(&widths)
                    .map(|(column, &w)| {
                        fit(&column.cell(item.row), usize::from(w), column.alignment())
                    })
                    .collect();
                RenderedRow {
                    index: item.index,
                    key: item.key(),
                    y: (item.index - range.start_index()) as f64 * item_height,
                    line: self.join(&cells),
                    cells,
                }
            })
            .collect();

        let scrollbar = if self.show_scrollbar {
            let track_cells = (body_height / item_height).floor() as usize;
            ScrollbarState::new(range.total_height(), viewport.scroll_offset(), body_height)
                .cells(track_cells)
        } else {
            Vec::new()
        };

        let (kind, message) = if range.count() == 0 {
            (ViewKind::Empty, Some(EMPTY_MESSAGE))
        } else {
            (ViewKind::Data, None)
        };

        TableView {
            kind,
            header,
            rows,
            skeleton_rows: 0,
            message,
            window: range,
            body_height,
            total_height: range.total_height(),
            offset_y: range.offset_y(),
            translate_y: range.offset_y() - viewport.scroll_offset(),
            scrollbar,
        }
    }

    /// Row under a point `y` units below the top of the body.
    ///
    /// Returns `None` outside the body, below the last row, or while loading.
    #[must_use]
    pub fn row_at(&self, row_count: usize, viewport: &ViewportState, y: f64) -> Option<usize> {
        if self.loading || !(0.0..viewport.viewport_height()).contains(&y) {
            return None;
        }
        let offset = viewport.scroll_offset() + y;
        if offset >= self.spec.total_height(row_count) {
            return None;
        }
        self.spec.index_at_offset(row_count, offset)
    }

    /// Dispatch a click at body coordinate `y` to the row click handler.
    ///
    /// Returns the clicked row index, whether or not a handler is set.
    pub fn click<S>(&self, source: &S, viewport: &ViewportState, y: f64) -> Option<usize>
    where
        S: RowSource<Row = R> + ?Sized,
    {
        let index = self.row_at(source.len(), viewport, y)?;
        let row = source.get(index)?;
        if let Some(handler) = &self.on_row_click {
            handler(index, row);
        }
        Some(index)
    }
}
