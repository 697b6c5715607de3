//! Terminal-cell measurement of strings.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Columns `s` occupies on screen.
pub fn columns(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}

/// Columns one char occupies; zero-width and control chars take none.
pub fn char_columns(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

/// `s` cut to at most `max` columns, ending in an ellipsis when anything
/// was dropped.
pub fn fit(s: &str, max: u16) -> Cow<'_, str> {
    if columns(s) <= max {
        return Cow::Borrowed(s);
    }
    let Some(budget) = max.checked_sub(1) else {
        return Cow::Borrowed("");
    };

    let mut used = 0;
    let end = s
        .char_indices()
        .find(|&(_, c)| {
            used += char_columns(c);
            used > budget
        })
        .map_or(s.len(), |(i, _)| i);

    let mut cut = String::with_capacity(end + ELLIPSIS.len_utf8());
    cut.push_str(&s[..end]);
    cut.push(ELLIPSIS);
    Cow::Owned(cut)
}
