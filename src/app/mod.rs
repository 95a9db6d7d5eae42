//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the
//! catalog/worker layers. It implements the event-driven architecture that
//! powers the interactive UI.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → View Transitions → Actions → Side Effects
//!                           ↑                                    ↓
//!                           └───────── Worker Responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Search input debouncing over one-shot timers
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: View, input and load status types
//! - [`state`]: Central application state container and view model computation
//! - [`view`]: The immutable view state and its transitions
//!
//! # Example
//!
//! ```rust
//! use cinedex::app::{handle_event, AppState, Event, StateSettings};
//! use cinedex::ui::Theme;
//!
//! let mut state = AppState::new(StateSettings::default(), Theme::default());
//! let (should_render, _) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(!should_render);
//! # Ok::<(), cinedex::domain::CinedexError>(())
//! ```

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod state;
pub mod view;

pub use actions::Action;
pub use debounce::SearchDebouncer;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, LoadStatus, ViewMode};
pub use state::{AppState, StateSettings};
pub use view::{BackPolicy, ResultOrigin, ViewState};
