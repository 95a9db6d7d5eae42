//! Footer component renderer.
//!
//! Shows centered keybinding hints, or the pending notice in their place.

use crate::ui::helpers::{centered, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer at `row`, truncated to the terminal width.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);

    match &footer.notice {
        Some(notice) => {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.notice_fg));
            centered(out, notice, cols);
        }
        None => {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            centered(out, &footer.keybindings, cols);
        }
    }

    out.push_str(Theme::reset());
    row + 1
}
