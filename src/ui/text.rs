//! Width-aware text helpers. The policy gate measures content in rendered
//! rows, so wrapping happens here rather than inside the paragraph widget.

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn cell_width(text: &str) -> u16 {
    UnicodeWidthStr::width(text).min(u16::MAX as usize) as u16
}

/// Greedy word wrap to `width` columns. Words wider than a line are split
/// by character. Empty input yields a single empty row.
pub fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }
        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }
        for ch in word.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }
    rows.push(current);
    rows
}

/// Truncates `text` to at most `width` columns.
pub fn truncate(text: &str, width: u16) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > usize::from(width) {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out
}

/// Places items of the given widths on one row of `area`, separated by
/// `gap` columns. Left-to-right starts at the left edge; right-to-left
/// starts at the right edge and walks left, so the first item ends up
/// rightmost. Items that do not fit are dropped from the result.
pub fn place_inline(area: Rect, widths: &[u16], gap: u16, rtl: bool) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(widths.len());
    let left = area.x;
    let right = area.x.saturating_add(area.width);
    let mut cursor = if rtl { right } else { left };

    for &width in widths {
        if rtl {
            if cursor < left.saturating_add(width) {
                break;
            }
            let x = cursor - width;
            rects.push(Rect::new(x, area.y, width, 1));
            cursor = x.saturating_sub(gap).max(left);
        } else {
            if cursor.saturating_add(width) > right {
                break;
            }
            rects.push(Rect::new(cursor, area.y, width, 1));
            cursor = cursor.saturating_add(width).saturating_add(gap);
        }
    }
    rects
}
