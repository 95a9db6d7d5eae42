//! Table component renderer.
//!
//! Renders the visible list as a two-column table: `ACTOR | MOVIES` in the
//! directory and `TITLE | DETAILS` in results. Supports selection and search
//! match highlighting.

use crate::app::state::PRIMARY_COLUMN_WIDTH;
use crate::ui::helpers::{self, char_len, pad_to, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, TableColumns};

/// Renders the column labels at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(out: &mut String, row: usize, columns: &TableColumns, theme: &Theme) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    pad_to(out, &columns.primary, PRIMARY_COLUMN_WIDTH);
    out.push_str(&columns.secondary);
    out.push_str(Theme::reset());
    row + 1
}

/// Renders all rows starting at `row`.
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(out: &mut String, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(out, current_row, item, theme, cols);
    }
    current_row
}

/// Renders one row padded to the full width, so a selected row's background
/// spans the line.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Search match highlights (unless selected)
/// 3. Normal text color, with the secondary column dimmed
fn render_table_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);

    if item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    }

    helpers::render_highlighted_text(out, &item.primary, &item.highlight_ranges, theme, item.is_selected);
    out.push_str(&" ".repeat(PRIMARY_COLUMN_WIDTH.saturating_sub(char_len(&item.primary))));

    if !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.count_fg));
    }
    out.push_str(&item.secondary);

    let line_len = PRIMARY_COLUMN_WIDTH.max(char_len(&item.primary)) + char_len(&item.secondary);
    out.push_str(&" ".repeat(cols.saturating_sub(line_len)));

    out.push_str(Theme::reset());
    row + 1
}
