#![forbid(unsafe_code)]

//! Configuration errors for the windowed list engine.
//!
//! Every variant is a host contract violation. The engine refuses to produce
//! a window rather than return geometry that breaks its invariants; empty
//! lists and zero-height viewports are *not* errors and never show up here.

use std::fmt;

/// A configuration error that prevents a window from being computed.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowError {
    /// Row height was zero or negative.
    NonPositiveItemHeight { item_height: f64 },
    /// Row height was NaN or infinite.
    NonFiniteItemHeight { item_height: f64 },
    /// A signed row count below zero was supplied.
    NegativeCount { count: i64 },
    /// A signed overscan below zero was supplied.
    NegativeOverscan { overscan: i64 },
    /// A configuration value could not be parsed.
    InvalidValue { key: &'static str, value: String },
    /// A window was applied to a row source of a different length.
    StaleWindow { window_count: usize, source_len: usize },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveItemHeight { item_height } => {
                write!(f, "item height must be positive, got {item_height}")
            }
            Self::NonFiniteItemHeight { item_height } => {
                write!(f, "item height must be finite, got {item_height}")
            }
            Self::NegativeCount { count } => {
                write!(f, "row count must be non-negative, got {count}")
            }
            Self::NegativeOverscan { overscan } => {
                write!(f, "overscan must be non-negative, got {overscan}")
            }
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
            Self::StaleWindow {
                window_count,
                source_len,
            } => write!(
                f,
                "window computed for {window_count} rows applied to a source of {source_len}"
            ),
        }
    }
}

impl std::error::Error for WindowError {}

/// Validate a row height, returning it unchanged when usable.
pub(crate) fn check_item_height(item_height: f64) -> Result<f64, WindowError> {
    if !item_height.is_finite() {
        return Err(WindowError::NonFiniteItemHeight { item_height });
    }
    if item_height <= 0.0 {
        return Err(WindowError::NonPositiveItemHeight { item_height });
    }
    Ok(item_height)
}
