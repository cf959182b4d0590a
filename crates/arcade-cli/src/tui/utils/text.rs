//! Text fitting for fixed-width cells
//!
//! All widths are unicode display widths, not byte lengths, so icons and
//! wide characters line up in the terminal.

use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[inline]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to `max_width` columns, ending in `...` when something was cut.
/// Borrows when the string already fits.
pub fn truncate_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    // Too narrow for "X..."
    if max_width < 4 {
        return Cow::Owned(take_width(s, max_width));
    }

    Cow::Owned(format!("{}...", take_width(s, max_width - 3)))
}

/// Left-align `s` in a field `width` columns wide, truncating if needed
pub fn pad_right(s: &str, width: usize) -> String {
    let fitted = truncate_ellipsis(s, width);
    let padding = width.saturating_sub(display_width(&fitted));
    format!("{}{}", fitted, " ".repeat(padding))
}

fn take_width(s: &str, max_width: usize) -> String {
    let mut width = 0;
    s.chars()
        .take_while(|c| {
            let char_width = c.width().unwrap_or(0);
            if width + char_width <= max_width {
                width += char_width;
                true
            } else {
                false
            }
        })
        .collect()
}
