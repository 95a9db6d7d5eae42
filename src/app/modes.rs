//! Mode types for the application state machine.
//!
//! - [`ViewMode`]: which list is shown (actor directory or movie results)
//! - [`InputMode`]: whether keystrokes go to the list or the search box
//! - [`LoadStatus`]: whether a catalog is available at all
//!
//! # Example
//!
//! ```rust
//! use cinedex::app::modes::{InputMode, LoadStatus, ViewMode};
//!
//! let view = ViewMode::Directory;
//! let input = InputMode::Normal;
//! assert!(LoadStatus::Loading.blocks_navigation());
//! ```

/// Which list the plugin is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Actor directory, the landing view.
    #[default]
    Directory,

    /// Movies matching an actor selection or a search.
    Results,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys navigate the list: j/k, Enter, Esc, `/`, r, q.
    #[default]
    Normal,

    /// Keys edit the search box; Enter runs the search, Esc returns to the list.
    Search,
}

/// Availability of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Waiting for the first catalog from the worker.
    #[default]
    Loading,

    /// A catalog is loaded and transitions are live.
    Ready,

    /// The last load failed; only a reload is accepted.
    Failed(String),
}

impl LoadStatus {
    /// True when view transitions must be ignored.
    #[must_use]
    pub const fn blocks_navigation(&self) -> bool {
        !matches!(self, Self::Ready)
    }
}
