//! Composable UI component renderers.
//!
//! Each component writes one part of the frame into the output buffer and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title and subtitle
//! - [`footer`]: Keybinding hints or the current notice
//! - [`search`]: Search input box
//! - [`table`]: Actor or movie list with two columns
//! - [`empty`]: Loading, failure and no-content messages
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header title]
//! [Header subtitle]
//! [Border]
//! [Search Bar - 3 lines, when shown]
//! [Table Headers | Empty state]
//! [Table Rows]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders a full frame for `vm` into `out`.
pub fn render_frame(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(out, current_row, search, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, current_row + 1, empty, theme, cols);
    } else {
        current_row = render_table_headers(out, current_row, &vm.columns, theme);
        render_table_rows(out, current_row, &vm.display_items, theme, cols);
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);

    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}
