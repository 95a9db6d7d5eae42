//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to component renderers, which write
//!    the frame into a buffer that is printed once
//!
//! # Example
//!
//! ```rust
//! use cinedex::app::{AppState, StateSettings};
//! use cinedex::ui::{render_to_string, Theme};
//!
//! let state = AppState::new(StateSettings::default(), Theme::default());
//! let vm = state.compute_viewmodel(24, 80);
//! let frame = render_to_string(&vm, &state.theme, 24, 80);
//! assert!(frame.contains("Loading catalog"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Pane height in rows
/// * `cols` - Pane width in columns
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    print!("{}", render_to_string(&viewmodel, &state.theme, rows, cols));
}

/// Renders a view model into an ANSI string.
#[must_use]
pub fn render_to_string(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::with_capacity(rows * cols * 2);
    components::render_frame(&mut out, vm, theme, cols, rows);
    out
}
