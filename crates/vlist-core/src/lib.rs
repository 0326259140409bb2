#![forbid(unsafe_code)]

//! Core: windowed list computation for long fixed-height lists.
//!
//! Only the rows that intersect the viewport (plus a small overscan pad)
//! ever need to be materialized. This crate computes which rows those are,
//! where they go, and how tall the whole list is, in constant time.
//!
//! # Key Components
//!
//! - [`compute_window`] - the pure windowing function
//! - [`WindowSpec`] - validated per-list configuration (row height, overscan)
//! - [`ViewportState`] - host-owned scroll offset and viewport height
//! - [`RowSource`] / [`VisibleWindow`] - rows materialized for a window
//! - [`ScrollCoalescer`] - latest-wins folding of scroll and resize events
//!
//! # Role in vlist
//! `vlist-core` knows nothing about rendering. `vlist-table` turns a
//! [`VisibleWindow`] into rendered rows; `vlist-runtime` wires the pieces
//! into a host that reacts to scroll events and data refreshes.

pub mod coalescer;
pub mod config;
pub mod error;
pub mod row_source;
pub mod viewport;
pub mod window;

pub use coalescer::{ScrollCoalescer, ViewportUpdate};
pub use config::WindowSpec;
pub use error::WindowError;
pub use row_source::{RowIdentity, RowKey, RowSource, VisibleWindow, WindowItem};
pub use viewport::ViewportState;
pub use window::{
    DEFAULT_OVERSCAN, WindowRange, compute_window, compute_window_checked, scroll_to_index,
};
