//! Empty state component renderer.
//!
//! Replaces the table while the catalog is loading, after a failed load, when
//! the catalog is empty, and when a selection or search matched nothing.

use crate::ui::helpers::{centered, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyKind, EmptyState};

/// Renders the two-line empty state message starting at `row`.
///
/// The message uses `empty_state_fg`, or `notice_fg` for a failed load; the
/// subtitle is dimmed.
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let message_color = match empty.kind {
        EmptyKind::LoadFailed => &theme.colors.notice_fg,
        EmptyKind::Loading | EmptyKind::EmptyCorpus | EmptyKind::NoMatches => &theme.colors.empty_state_fg,
    };

    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(message_color));
    centered(out, &empty.message, cols);
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    centered(out, &empty.subtitle, cols);
    out.push_str(Theme::reset());

    row + 2
}
