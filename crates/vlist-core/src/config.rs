#![forbid(unsafe_code)]

//! Per-list window configuration.
//!
//! A [`WindowSpec`] is built once when a list view mounts and lives for the
//! lifetime of that view. Validation happens at construction, so window
//! computations through a spec never fail.
//!
//! Hosts that want to tune lists without recompiling can read the spec from
//! the environment:
//!
//! - `VLIST_ITEM_HEIGHT`: row height in logical units (default `60`)
//! - `VLIST_OVERSCAN`: rows padded above and below the viewport (default `5`)

use std::env;

use crate::error::{WindowError, check_item_height};
use crate::viewport::ViewportState;
use crate::window::{self, DEFAULT_OVERSCAN, WindowRange};

/// Row height used when none is configured.
pub const DEFAULT_ITEM_HEIGHT: f64 = 60.0;

/// Environment variable holding the row height.
pub const ENV_ITEM_HEIGHT: &str = "VLIST_ITEM_HEIGHT";

/// Environment variable holding the overscan.
pub const ENV_OVERSCAN: &str = "VLIST_OVERSCAN";

/// Validated configuration for one list instance.
///
/// With the `serde` feature, deserialization goes through the same
/// validation as [`WindowSpec::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawWindowSpec")
)]
pub struct WindowSpec {
    item_height: f64,
    overscan: usize,
}

/// Unvalidated wire form of a [`WindowSpec`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawWindowSpec {
    item_height: f64,
    overscan: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWindowSpec> for WindowSpec {
    type Error = WindowError;

    fn try_from(raw: RawWindowSpec) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.item_height)?.with_overscan(raw.overscan))
    }
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            item_height: DEFAULT_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl WindowSpec {
    /// Create a spec with the given row height and the default overscan.
    ///
    /// # Errors
    ///
    /// Fails when `item_height` is not a positive finite number.
    pub fn new(item_height: f64) -> Result<Self, WindowError> {
        Ok(Self {
            item_height: check_item_height(item_height)?,
            overscan: DEFAULT_OVERSCAN,
        })
    }

    /// Set the overscan.
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Replace the row height.
    ///
    /// # Errors
    ///
    /// Fails when `item_height` is not a positive finite number.
    pub fn with_item_height(mut self, item_height: f64) -> Result<Self, WindowError> {
        self.item_height = check_item_height(item_height)?;
        Ok(self)
    }

    /// Read the spec from `VLIST_ITEM_HEIGHT` and `VLIST_OVERSCAN`.
    ///
    /// Unset variables fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Fails when a variable is set but unparsable, the height is not
    /// positive, or the overscan is negative.
    pub fn from_env() -> Result<Self, WindowError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the spec through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`WindowSpec::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WindowError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut spec = Self::default();

        if let Some(raw) = lookup(ENV_ITEM_HEIGHT) {
            let value: f64 = raw.trim().parse().map_err(|_| WindowError::InvalidValue {
                key: ENV_ITEM_HEIGHT,
                value: raw.clone(),
            })?;
            spec = spec.with_item_height(value)?;
        }

        if let Some(raw) = lookup(ENV_OVERSCAN) {
            let value: i64 = raw.trim().parse().map_err(|_| WindowError::InvalidValue {
                key: ENV_OVERSCAN,
                value: raw.clone(),
            })?;
            let overscan = usize::try_from(value)
                .map_err(|_| WindowError::NegativeOverscan { overscan: value })?;
            spec = spec.with_overscan(overscan);
        }

        Ok(spec)
    }

    /// Row height.
    #[must_use]
    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    /// Rows padded on each side of the viewport.
    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Compute the window for `count` rows seen through `viewport`.
    #[must_use]
    pub fn compute(&self, count: usize, viewport: &ViewportState) -> WindowRange {
        window::compute_unchecked(
            count,
            self.item_height,
            viewport.viewport_height(),
            viewport.scroll_offset(),
            self.overscan,
        )
    }

    /// Total content height for `count` rows.
    #[must_use]
    pub fn total_height(&self, count: usize) -> f64 {
        count as f64 * self.item_height
    }

    /// Scroll offset that puts `index` at the top of the viewport.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> f64 {
        index as f64 * self.item_height
    }

    /// Row under a content-space offset, clamped to `count`.
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn index_at_offset(&self, count: usize, offset: f64) -> Option<usize> {
        if count == 0 {
            return None;
        }
        Some(window::index_at_offset(offset, self.item_height).min(count - 1))
    }

    /// Number of rows that fit (partially) in `viewport_height`.
    #[must_use]
    pub fn rows_per_viewport(&self, viewport_height: f64) -> usize {
        window::rows_for_extent(viewport_height, self.item_height)
    }
}
