//! Header component renderer.
//!
//! Two lines: the centered title badge and a dimmed subtitle with counts or
//! the result description.

use crate::ui::helpers::{centered, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row`.
///
/// # Returns
///
/// The next available row position (row + 2)
///
/// # Layout
///
/// ```text
/// [padding]  Actors (12)  [padding]
/// [padding] 40 movies · loaded 3m ago [padding]
/// ```
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    centered(out, &header.title, cols);
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    centered(out, &header.subtitle, cols);
    out.push_str(Theme::reset());

    row + 2
}
