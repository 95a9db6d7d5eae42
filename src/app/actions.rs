//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler only mutates [`AppState`](crate::app::AppState); anything
//! that touches Zellij (timers, worker messages, commands) is returned as an
//! [`Action`] and executed by the plugin shim in `main.rs`.
//!
//! # Example
//!
//! ```rust
//! use cinedex::app::Action;
//! use cinedex::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_catalog("/host/catalog.json")),
//! ];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Arms a one-shot timer; its `Timer` event feeds the search debouncer.
    ScheduleTimer(Duration),

    /// Hands a movie's file location to the configured player.
    OpenMovie {
        /// Display title, for logging.
        title: String,
        /// URL or path as stored in the catalog.
        location: String,
    },
}
