//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! View models are optimized for rendering and contain pre-computed display
//! information like highlight ranges and selection state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use cinedex::ui::viewmodel::{
//!     DisplayItem, FooterInfo, HeaderInfo, TableColumns, UIViewModel,
//! };
//!
//! let vm = UIViewModel {
//!     display_items: vec![DisplayItem {
//!         primary: "Al Pacino".to_string(),
//!         secondary: "3 movies".to_string(),
//!         is_selected: true,
//!         highlight_ranges: vec![],
//!     }],
//!     selected_index: 0,
//!     header: HeaderInfo {
//!         title: " Actors (1) ".to_string(),
//!         subtitle: "3 movies · loaded just now".to_string(),
//!     },
//!     footer: FooterInfo {
//!         keybindings: "q: quit".to_string(),
//!         notice: None,
//!     },
//!     columns: TableColumns::new("ACTOR", "MOVIES"),
//!     empty_state: None,
//!     search_bar: None,
//! };
//! assert!(!vm.is_empty());
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Rows of the visible window of the list.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Column labels of the two-column table.
    pub columns: TableColumns,

    /// Shown instead of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Present while the search box is focused or holds text.
    pub search_bar: Option<SearchBarInfo>,
}

impl UIViewModel {
    /// True when an empty state replaces the table.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.empty_state.is_some()
    }
}

/// One row of the table: an actor or a movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Actor name, or movie title with year.
    pub primary: String,

    /// Movie count, or studio, cast and tags.
    pub secondary: String,

    pub is_selected: bool,

    /// Character ranges of `primary` matching the search text.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title badge text.
    pub title: String,

    /// Dimmed line under the title (counts, load age).
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,

    /// Transient message shown in place of the keybindings.
    pub notice: Option<String>,
}

/// Labels of the table's two columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumns {
    pub primary: String,
    pub secondary: String,
}

impl TableColumns {
    #[must_use]
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

/// Why the table is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    /// The first catalog has not arrived yet.
    Loading,
    /// The last load failed; only a reload is possible.
    LoadFailed,
    /// The catalog holds no actors.
    EmptyCorpus,
    /// A selection or search matched nothing.
    NoMatches,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub kind: EmptyKind,

    /// Primary message (e.g., "No results").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search text, exactly as typed.
    pub query: String,

    /// Whether keystrokes currently go to the search box.
    pub focused: bool,
}
