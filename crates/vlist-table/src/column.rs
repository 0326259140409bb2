#![forbid(unsafe_code)]

//! Typed column definitions.
//!
//! A [`Column<R>`] maps a field key to an accessor that pulls the raw value
//! out of a row, and optionally to a renderer `(value, row) -> String` that
//! decorates it (status badges, formatted sizes, relative times). Columns
//! without a renderer show the raw value.

use std::fmt;

use crate::text::Align;

type ValueFn<R> = Box<dyn Fn(&R) -> String + Send + Sync>;
type RenderFn<R> = Box<dyn Fn(&str, &R) -> String + Send + Sync>;

/// One column of a [`VirtualTable`](crate::VirtualTable).
pub struct Column<R> {
    key: String,
    header: String,
    width: Option<u16>,
    align: Align,
    value: ValueFn<R>,
    render: Option<RenderFn<R>>,
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("render", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

impl<R> Column<R> {
    /// Create a column reading its value through `value`.
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        value: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width: None,
            align: Align::Left,
            value: Box::new(value),
            render: None,
        }
    }

    /// Give the column a fixed width in columns. Unset columns share the rest.
    #[must_use]
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the cell alignment.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Decorate the raw value before display.
    #[must_use]
    pub fn render(mut self, render: impl Fn(&str, &R) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Field key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Header label.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Fixed width, if any.
    #[must_use]
    pub fn fixed_width(&self) -> Option<u16> {
        self.width
    }

    /// Cell alignment.
    #[must_use]
    pub fn alignment(&self) -> Align {
        self.align
    }

    /// Raw value of this column for `row`.
    #[must_use]
    pub fn value(&self, row: &R) -> String {
        (self.value)(row)
    }

    /// Display text of this column for `row`.
    #[must_use]
    pub fn cell(&self, row: &R) -> String {
        let value = (self.value)(row);
        match &self.render {
            Some(render) => render(&value, row),
            None => value,
        }
    }
}

/// Resolve column widths for a table `total_width` columns wide.
///
/// Fixed widths are honored left to right until space runs out. The
/// remaining space is split evenly between the flexible columns, with the
/// leftover columns going to the leftmost ones. `spacing` columns separate
/// neighbouring cells.
#[must_use]
pub fn resolve_widths<R>(columns: &[Column<R>], total_width: u16, spacing: u16) -> Vec<u16> {
    if columns.is_empty() {
        return Vec::new();
    }

    let gaps = spacing.saturating_mul(u16::try_from(columns.len() - 1).unwrap_or(u16::MAX));
    let mut remaining = total_width.saturating_sub(gaps);

    let mut widths: Vec<u16> = columns
        .iter()
        .map(|column| match column.width {
            Some(w) => {
                let w = w.min(remaining);
                remaining -= w;
                w
            }
            None => 0,
        })
        .collect();

    let flex: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.width.is_none())
        .map(|(i, _)| i)
        .collect();

    if let Ok(flex_count) = u16::try_from(flex.len())
        && flex_count > 0
    {
        let share = remaining / flex_count;
        let mut extra = remaining % flex_count;
        for i in flex {
            widths[i] = share + u16::from(extra > 0);
            extra = extra.saturating_sub(1);
        }
    }

    widths
}
