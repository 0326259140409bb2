#![forbid(unsafe_code)]

//! Scrollbar geometry.
//!
//! The table body only holds the materialized rows, so the scrollbar is the
//! one place where the full content height stays visible to the user. The
//! thumb length is proportional to `viewport / content` and its position to
//! `offset / max_offset`.

/// Inputs for a vertical scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollbarState {
    /// Total content height.
    pub content_height: f64,
    /// Current scroll offset.
    pub scroll_offset: f64,
    /// Visible height.
    pub viewport_height: f64,
}

/// Thumb placement inside a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thumb {
    /// Distance from the top of the track.
    pub offset: f64,
    /// Thumb length.
    pub length: f64,
}

impl ScrollbarState {
    /// Create a scrollbar state.
    #[must_use]
    pub fn new(content_height: f64, scroll_offset: f64, viewport_height: f64) -> Self {
        Self {
            content_height,
            scroll_offset,
            viewport_height,
        }
    }

    /// Whether the content overflows the viewport at all.
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height
    }

    /// Thumb geometry in a track `track_len` long, never shorter than `min_len`.
    ///
    /// When the content fits, the thumb fills the track.
    #[must_use]
    pub fn thumb(&self, track_len: f64, min_len: f64) -> Thumb {
        let track_len = track_len.max(0.0);
        if !self.is_scrollable() || self.content_height <= 0.0 {
            return Thumb {
                offset: 0.0,
                length: track_len,
            };
        }

        let ratio = self.viewport_height.max(0.0) / self.content_height;
        let length = (track_len * ratio).max(min_len).min(track_len);

        let max_offset = self.content_height - self.viewport_height;
        let position = (self.scroll_offset.max(0.0) / max_offset).min(1.0);
        Thumb {
            offset: (track_len - length) * position,
            length,
        }
    }

    /// Render the scrollbar as `cells` characters, top to bottom.
    ///
    /// Returns an empty vector when the content fits.
    #[must_use]
    pub fn cells(&self, cells: usize) -> Vec<char> {
        if cells == 0 || !self.is_scrollable() {
            return Vec::new();
        }
        let thumb = self.thumb(cells as f64, 1.0);
        let start = thumb.offset.round() as usize;
        let len = (thumb.length.round() as usize).max(1);
        (0..cells)
            .map(|i| if i >= start && i < start + len { '█' } else { '│' })
            .collect()
    }
}
