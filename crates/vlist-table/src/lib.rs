#![forbid(unsafe_code)]

//! Virtual table rendering on top of `vlist-core`.
//!
//! [`VirtualTable`] lays out a fixed header and the rows of the current
//! window as fitted text cells. Column widths are resolved once per render,
//! cells never wrap, and rows outside the window are never touched.

pub mod column;
pub mod scrollbar;
pub mod table;
pub mod text;

pub use column::{Column, resolve_widths};
pub use scrollbar::{ScrollbarState, Thumb};
pub use table::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, EMPTY_MESSAGE, HEADER_HEIGHT, RenderedRow, TableView, ViewKind,
    VirtualTable,
};
pub use text::Align;
