//! Shared rendering utilities and helpers.
//!
//! Components write ANSI output into a `String` buffer; the renderer prints
//! the finished frame once. Widths are measured in characters, never bytes,
//! so accented names line up.

use crate::ui::theme::Theme;
use std::fmt::Write;

/// Moves the cursor to a 1-indexed row and column.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Writes `text` followed by spaces up to `width` characters.
pub fn pad_to(out: &mut String, text: &str, width: usize) {
    out.push_str(text);
    out.push_str(&" ".repeat(width.saturating_sub(char_len(text))));
}

/// Writes `text` centered in `width` columns.
pub fn centered(out: &mut String, text: &str, width: usize) {
    let len = char_len(text).min(width);
    let padding = width.saturating_sub(len) / 2;
    out.push_str(&" ".repeat(padding));
    out.extend(text.chars().take(len));
    out.push_str(&" ".repeat(width.saturating_sub(padding + len)));
}

/// Writes text with highlighted character ranges.
///
/// Ranges are `(start, end)` character indices, end exclusive. Selected rows
/// skip match highlighting so the selection background stays uniform.
///
/// # Example
///
/// ```rust
/// use cinedex::ui::helpers::render_highlighted_text;
/// use cinedex::ui::Theme;
///
/// let theme = Theme::default();
/// let mut out = String::new();
/// render_highlighted_text(&mut out, "Heat", &[(0, 2)], &theme, true);
/// assert_eq!(out, "Heat");
/// ```
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_wrap_only_the_ranges() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "Heat", &[(1, 3)], &theme, false);

        assert!(out.starts_with('H'));
        assert!(out.ends_with('t'));
        assert!(out.contains(&format!(
            "{}ea{}",
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset()
        )));
    }

    #[test]
    fn out_of_bounds_ranges_are_clamped() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "Ab", &[(1, 9)], &theme, false);
        assert!(out.starts_with('A'));
        assert!(out.contains('b'));
    }

    #[test]
    fn padding_counts_characters() {
        let mut out = String::new();
        pad_to(&mut out, "Amélie", 8);
        assert_eq!(out, "Amélie  ");

        let mut out = String::new();
        centered(&mut out, "ab", 6);
        assert_eq!(out, "  ab  ");
    }
}
