#![forbid(unsafe_code)]

//! Cell text fitting.
//!
//! Cells are single-line and measured in terminal columns. Truncation
//! respects grapheme boundaries, so an emoji or combining sequence is never
//! split; a cut cell ends in an ellipsis when there is room for one.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Ellipsis appended to truncated cells.
pub const ELLIPSIS: &str = "…";

/// Horizontal alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on the left.
    Right,
    /// Split padding, extra column on the right.
    Center,
}

/// Display width of `text` in columns.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Truncate to at most `max_width` columns without breaking graphemes.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if width + w > max_width {
            break;
        }
        out.push_str(grapheme);
        width += w;
    }
    out
}

/// Truncate to `max_width`, ending in [`ELLIPSIS`] when something was cut.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let ellipsis_width = ELLIPSIS.width();
    if ellipsis_width >= max_width {
        return truncate_to_width(text, max_width);
    }
    let mut out = truncate_to_width(text, max_width - ellipsis_width);
    out.push_str(ELLIPSIS);
    out
}

/// Fit `text` into exactly `width` columns.
///
/// Line breaks and other control characters become spaces, overlong text is
/// truncated with an ellipsis, and short text is padded per `align`.
#[must_use]
pub fn fit(text: &str, width: usize, align: Align) -> String {
    let single_line: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let body = truncate_with_ellipsis(&single_line, width);
    let pad = width.saturating_sub(body.width());
    match align {
        Align::Left => format!("{body}{}", " ".repeat(pad)),
        Align::Right => format!("{}{body}", " ".repeat(pad)),
        Align::Center => {
            let left = pad / 2;
            format!("{}{body}{}", " ".repeat(left), " ".repeat(pad - left))
        }
    }
}
