#![forbid(unsafe_code)]

//! Row sources and materialized windows.
//!
//! A [`RowSource`] is whatever the host keeps its records in. The engine only
//! asks for the length and for individual rows inside the computed window,
//! so the cost of materializing stays proportional to the window size.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;

use crate::config::WindowSpec;
use crate::error::WindowError;
use crate::viewport::ViewportState;
use crate::window::WindowRange;

/// An ordered, indexable collection of rows.
pub trait RowSource {
    /// Row record type.
    type Row;

    /// Number of rows.
    fn len(&self) -> usize;

    /// Row at `index`, if it exists.
    fn get(&self, index: usize) -> Option<&Self::Row>;

    /// Whether the source has no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R> RowSource for [R] {
    type Row = R;

    fn len(&self) -> usize {
        <[R]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&R> {
        <[R]>::get(self, index)
    }
}

impl<R> RowSource for Vec<R> {
    type Row = R;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&R> {
        self.as_slice().get(index)
    }
}

impl<R> RowSource for VecDeque<R> {
    type Row = R;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&R> {
        VecDeque::get(self, index)
    }
}

impl<S: RowSource + ?Sized> RowSource for &S {
    type Row = S::Row;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: usize) -> Option<&Self::Row> {
        (**self).get(index)
    }
}

/// Optional stable identity for a row record.
///
/// Renderers use the key to keep per-row state attached to the right record
/// when the window shifts. Rows without an id fall back to their index.
pub trait RowIdentity {
    /// Stable id of this record, if it has one.
    fn row_id(&self) -> Option<Cow<'_, str>> {
        None
    }
}

impl RowIdentity for String {}
impl RowIdentity for &str {}

/// Identity of a materialized row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// Record-provided id.
    Id(String),
    /// Absolute row index (no id available).
    Index(usize),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => f.write_str(id),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// A row tagged with its absolute index.
#[derive(Debug)]
pub struct WindowItem<'a, R> {
    /// Absolute index in the row source.
    pub index: usize,
    /// The row record.
    pub row: &'a R,
}

impl<R> Clone for WindowItem<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for WindowItem<'_, R> {}

impl<R: RowIdentity> WindowItem<'_, R> {
    /// Stable key: the record id, or the index when the record has none.
    #[must_use]
    pub fn key(&self) -> RowKey {
        match self.row.row_id() {
            Some(id) if !id.is_empty() => RowKey::Id(id.into_owned()),
            _ => RowKey::Index(self.index),
        }
    }
}

/// A computed window together with the rows it covers.
#[derive(Debug)]
pub struct VisibleWindow<'a, R> {
    range: WindowRange,
    items: Vec<WindowItem<'a, R>>,
}

impl<'a, R> VisibleWindow<'a, R> {
    /// Pull the rows of `range` out of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::StaleWindow`] when `range` was computed for a
    /// different number of rows than `source` holds. Rendering such a window
    /// would place rows at the wrong offsets.
    pub fn materialize<S>(source: &'a S, range: WindowRange) -> Result<Self, WindowError>
    where
        S: RowSource<Row = R> + ?Sized,
    {
        let source_len = source.len();
        if range.count() != source_len {
            return Err(WindowError::StaleWindow {
                window_count: range.count(),
                source_len,
            });
        }

        let items = range
            .iter()
            .filter_map(|index| source.get(index).map(|row| WindowItem { index, row }))
            .collect();

        Ok(Self { range, items })
    }

    /// Compute and materialize the window for the current source and viewport.
    ///
    /// Infallible because the window is derived from `source` itself.
    #[must_use]
    pub fn compute<S>(source: &'a S, spec: &WindowSpec, viewport: &ViewportState) -> Self
    where
        S: RowSource<Row = R> + ?Sized,
    {
        let range = spec.compute(source.len(), viewport);
        let items = range
            .iter()
            .filter_map(|index| source.get(index).map(|row| WindowItem { index, row }))
            .collect();
        Self { range, items }
    }

    /// Geometry of the window.
    #[must_use]
    pub fn range(&self) -> &WindowRange {
        &self.range
    }

    /// Materialized rows in index order.
    #[must_use]
    pub fn items(&self) -> &[WindowItem<'a, R>] {
        &self.items
    }

    /// First materialized row index.
    #[must_use]
    pub fn start_index(&self) -> usize {
        self.range.start_index()
    }

    /// Last materialized row index, inclusive.
    #[must_use]
    pub fn end_index(&self) -> Option<usize> {
        self.range.end_index()
    }

    /// Full content height.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.range.total_height()
    }

    /// Translation for the materialized block.
    #[must_use]
    pub fn offset_y(&self) -> f64 {
        self.range.offset_y()
    }

    /// Number of materialized rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no rows were materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the materialized rows.
    pub fn iter(&self) -> std::slice::Iter<'_, WindowItem<'a, R>> {
        self.items.iter()
    }
}

impl<'w, 'a, R> IntoIterator for &'w VisibleWindow<'a, R> {
    type Item = &'w WindowItem<'a, R>;
    type IntoIter = std::slice::Iter<'w, WindowItem<'a, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
