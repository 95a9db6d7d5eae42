//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! timer ticks and worker responses, translating them into state changes and
//! action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime or worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via [`AppState`] and [`ViewState`](super::view::ViewState) transitions
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `Select`, `Back`
//! - **Search input**: `SearchMode`, `Char`, `Backspace`, `ExitSearch`, `DebounceElapsed`
//! - **Catalog**: `Reload`, `WorkerResponse`
//! - **Playback**: `PlayerFinished`
//!
//! While no catalog is ready (still loading, or the last load failed) only
//! `Reload`, `CloseFocus` and system events are processed; navigation is
//! ignored.
//!
//! # Example
//!
//! ```rust
//! use cinedex::app::{handle_event, AppState, Event, StateSettings};
//! use cinedex::ui::Theme;
//!
//! let mut state = AppState::new(StateSettings::default(), Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::Reload)?;
//! assert!(should_render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), cinedex::domain::CinedexError>(())
//! ```

use super::modes::{InputMode, LoadStatus, ViewMode};
use crate::app::{Action, AppState};
use crate::domain::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, timers or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Activates the highlighted row: opens an actor, or plays a movie.
    /// In the search box it runs the pending search immediately.
    Select,
    /// Returns from results to the actor directory.
    Back,
    /// Focuses the search box.
    SearchMode,
    /// Returns focus from the search box to the list.
    ExitSearch,
    /// Appends a character to the search text.
    Char(char),
    /// Removes the last character from the search text.
    Backspace,
    /// Re-reads the catalog document.
    Reload,
    /// One debounce timer has elapsed.
    DebounceElapsed,

    /// Reports the exit status of the player command.
    PlayerFinished {
        /// Title of the movie that was opened.
        title: String,
        /// Exit code, `None` if the command was killed.
        exit_code: Option<i32>,
    },

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Events processed even while no catalog is ready.
    const fn bypasses_load_gate(&self) -> bool {
        matches!(
            self,
            Self::CloseFocus
                | Self::Reload
                | Self::DebounceElapsed
                | Self::PlayerFinished { .. }
                | Self::WorkerResponse(_)
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the UI should re-render, and the actions to execute in sequence.
///
/// # Errors
///
/// Returns errors from state mutation methods or worker communication failures.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if state.load_status.blocks_navigation() && !event.bypasses_load_gate() {
        tracing::debug!(status = ?state.load_status, "catalog not ready, ignoring event");
        return Ok((false, vec![]));
    }

    let had_notice = !matches!(
        event,
        Event::DebounceElapsed | Event::WorkerResponse(_) | Event::PlayerFinished { .. }
    ) && state.notice.take().is_some();

    let (should_render, actions) = match event {
        Event::KeyDown => {
            state.move_selection_down();
            (true, vec![])
        }
        Event::KeyUp => {
            state.move_selection_up();
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::Select => select(state),
        Event::Back => {
            if state.view.mode != ViewMode::Results {
                return Ok((had_notice, vec![]));
            }
            state.debouncer.cancel();
            let next = state.view.back_to_directory(state.settings.back_policy);
            state.apply_view(next);
            (true, vec![])
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            (true, vec![])
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.view.query, "leaving search box");
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((had_notice, vec![]));
            }
            let mut query = state.view.query.clone();
            query.push(*c);
            tracing::trace!(query = %query, char = %c, "search text updated");
            edit_query(state, query)
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((had_notice, vec![]));
            }
            let mut query = state.view.query.clone();
            if query.pop().is_none() {
                return Ok((had_notice, vec![]));
            }
            edit_query(state, query)
        }
        Event::DebounceElapsed => match state.debouncer.on_timer() {
            Some(text) => {
                run_search(state, &text);
                (true, vec![])
            }
            None => (false, vec![]),
        },
        Event::Reload => {
            tracing::debug!(path = %state.settings.catalog_path, "reloading catalog");
            if state.catalog.is_some() {
                state.reloading = true;
            } else {
                state.load_status = LoadStatus::Loading;
            }
            (
                true,
                vec![Action::PostToWorker(WorkerMessage::load_catalog(
                    state.settings.catalog_path.clone(),
                ))],
            )
        }
        Event::PlayerFinished { title, exit_code } => match exit_code {
            Some(0) => {
                tracing::debug!(title = %title, "player exited cleanly");
                (false, vec![])
            }
            _ => {
                tracing::warn!(title = %title, exit_code = ?exit_code, "player failed");
                state.notice = Some(format!("Player failed to open {title}"));
                (true, vec![])
            }
        },
        Event::WorkerResponse(response) => match response {
            WorkerResponse::CatalogLoaded { movies, source } => {
                tracing::debug!(source = %source, movies = movies.len(), "catalog received");
                state.install_catalog(movies.clone());
                (true, vec![])
            }
            WorkerResponse::LoadFailed { message } => {
                state.fail_load(message.clone());
                (true, vec![])
            }
        },
    };

    Ok((should_render || had_notice, actions))
}

/// Records a search box edit and arms a debounce timer for it.
fn edit_query(state: &mut AppState, query: String) -> (bool, Vec<Action>) {
    state.view = state.view.with_query(query.clone());
    state.debouncer.schedule(query);
    (true, vec![Action::ScheduleTimer(state.debouncer.window())])
}

fn run_search(state: &mut AppState, text: &str) {
    let Some(catalog) = state.catalog.as_ref() else {
        return;
    };
    let next = state.view.search(catalog, text);
    state.apply_view(next);
}

fn select(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.input_mode == InputMode::Search {
        let text = state
            .debouncer
            .flush()
            .unwrap_or_else(|| state.view.query.clone());
        run_search(state, &text);
        state.input_mode = InputMode::Normal;
        return (true, vec![]);
    }

    match state.view.mode {
        ViewMode::Directory => {
            let Some(name) = state.selected_actor().map(|actor| actor.name.clone()) else {
                tracing::debug!("no actor selected");
                return (false, vec![]);
            };
            let Some(catalog) = state.catalog.as_ref() else {
                return (false, vec![]);
            };
            let next = state.view.select_actor(catalog, &name);
            state.apply_view(next);
            (true, vec![])
        }
        ViewMode::Results => {
            let Some(movie) = state.selected_movie() else {
                tracing::debug!("no movie selected");
                return (false, vec![]);
            };
            let title = movie.display_title().to_string();

            match movie.playable_location() {
                Some(location) => {
                    tracing::debug!(title = %title, location = %location, "opening movie");
                    let action = Action::OpenMovie {
                        title,
                        location: location.to_string(),
                    };
                    (false, vec![action])
                }
                None => {
                    tracing::debug!(title = %title, "movie has no file location");
                    state.notice = Some(format!("No file location for {title}"));
                    (true, vec![])
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::StateSettings;
    use crate::app::view::BackPolicy;
    use crate::domain::MovieRecord;
    use crate::ui::theme::Theme;

    fn scenario_movies() -> Vec<MovieRecord> {
        vec![
            MovieRecord::new("1", "Dune")
                .with_actors(["A", "B"])
                .with_tags(["scifi"])
                .with_location("/movies/dune.mkv"),
            MovieRecord::new("2", "Heat").with_actors(["A"]).with_tags(["crime"]),
        ]
    }

    fn ready_state() -> AppState {
        let mut state = AppState::new(StateSettings::default(), Theme::default());
        let response = WorkerResponse::CatalogLoaded {
            movies: scenario_movies(),
            source: "test".to_string(),
        };
        handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        state
    }

    fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn type_text(state: &mut AppState, text: &str) -> usize {
        let mut timers = 0;
        for c in text.chars() {
            let (_, actions) = send(state, Event::Char(c));
            timers += actions
                .iter()
                .filter(|a| matches!(a, Action::ScheduleTimer(_)))
                .count();
        }
        timers
    }

    #[test]
    fn navigation_is_ignored_while_loading() {
        let mut state = AppState::new(StateSettings::default(), Theme::default());
        assert_eq!(send(&mut state, Event::KeyDown), (false, vec![]));
        assert_eq!(send(&mut state, Event::SearchMode), (false, vec![]));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn load_failure_blocks_everything_but_reload() {
        let mut state = ready_state();
        let failed = WorkerResponse::LoadFailed {
            message: "catalog.json: not found".to_string(),
        };
        send(&mut state, Event::WorkerResponse(failed));
        assert!(matches!(state.load_status, LoadStatus::Failed(_)));

        assert_eq!(send(&mut state, Event::Select), (false, vec![]));
        assert_eq!(send(&mut state, Event::Back), (false, vec![]));
        assert_eq!(state.view.mode, ViewMode::Directory);

        let (render, actions) = send(&mut state, Event::Reload);
        assert!(render);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::LoadCatalog { .. })]
        ));
        assert_eq!(state.load_status, LoadStatus::Loading);

        let (_, actions) = send(&mut state, Event::CloseFocus);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }

    #[test]
    fn enter_on_actor_opens_results_and_back_returns() {
        let mut state = ready_state();
        send(&mut state, Event::Select);
        assert_eq!(state.view.mode, ViewMode::Results);
        assert_eq!(state.view.result_title, "A");
        assert_eq!(state.visible_len(), 2);

        send(&mut state, Event::Back);
        assert_eq!(state.view.mode, ViewMode::Directory);
        assert!(state.view.result_set.is_empty());
    }

    #[test]
    fn typing_is_debounced_into_one_search() {
        let mut state = ready_state();
        send(&mut state, Event::SearchMode);
        let timers = type_text(&mut state, "crime");
        assert_eq!(timers, 5);
        assert_eq!(state.view.query, "crime");
        assert_eq!(state.view.mode, ViewMode::Directory);

        for _ in 0..4 {
            assert_eq!(send(&mut state, Event::DebounceElapsed), (false, vec![]));
        }
        assert_eq!(state.view.mode, ViewMode::Directory);

        send(&mut state, Event::DebounceElapsed);
        assert_eq!(state.view.mode, ViewMode::Results);
        assert_eq!(state.view.result_title, "Search results for \"crime\"");
        assert_eq!(state.visible_len(), 1);
    }

    #[test]
    fn enter_in_search_box_flushes_and_focuses_results() {
        let mut state = ready_state();
        send(&mut state, Event::SearchMode);
        type_text(&mut state, "dune");
        send(&mut state, Event::Select);

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.view.mode, ViewMode::Results);
        assert_eq!(state.view.result_set[0].display_title(), "Dune");

        for _ in 0..4 {
            assert_eq!(send(&mut state, Event::DebounceElapsed), (false, vec![]));
        }
    }

    #[test]
    fn erasing_query_returns_to_directory() {
        let mut state = ready_state();
        send(&mut state, Event::SearchMode);
        type_text(&mut state, "h");
        send(&mut state, Event::DebounceElapsed);
        assert_eq!(state.view.mode, ViewMode::Results);

        send(&mut state, Event::Backspace);
        send(&mut state, Event::DebounceElapsed);
        assert_eq!(state.view.mode, ViewMode::Directory);
        assert!(state.view.query.is_empty());
    }

    #[test]
    fn chars_outside_search_box_are_ignored() {
        let mut state = ready_state();
        assert_eq!(send(&mut state, Event::Char('x')), (false, vec![]));
        assert!(state.view.query.is_empty());
    }

    #[test]
    fn enter_on_movie_opens_location() {
        let mut state = ready_state();
        send(&mut state, Event::Select);
        let (render, actions) = send(&mut state, Event::Select);
        assert!(!render);
        assert_eq!(
            actions,
            vec![Action::OpenMovie {
                title: "Dune".to_string(),
                location: "/movies/dune.mkv".to_string(),
            }]
        );
    }

    #[test]
    fn movie_without_location_shows_notice() {
        let mut state = ready_state();
        send(&mut state, Event::Select);
        send(&mut state, Event::KeyDown);
        let (render, actions) = send(&mut state, Event::Select);
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.notice.as_deref(), Some("No file location for Heat"));

        send(&mut state, Event::KeyUp);
        assert!(state.notice.is_none());
    }

    #[test]
    fn reload_keeps_results_for_same_actor() {
        let mut state = ready_state();
        send(&mut state, Event::Select);

        let (_, actions) = send(&mut state, Event::Reload);
        assert_eq!(actions.len(), 1);
        assert!(state.reloading);
        assert_eq!(state.load_status, LoadStatus::Ready);

        let mut movies = scenario_movies();
        movies.push(MovieRecord::new("3", "Ronin").with_actors(["A"]));
        send(
            &mut state,
            Event::WorkerResponse(WorkerResponse::CatalogLoaded {
                movies,
                source: "test".to_string(),
            }),
        );

        assert!(!state.reloading);
        assert_eq!(state.view.mode, ViewMode::Results);
        assert_eq!(state.view.result_subtitle, "3 movies with this actor");
    }

    #[test]
    fn back_drops_search_still_waiting_for_its_timer() {
        let settings = StateSettings {
            back_policy: BackPolicy::ClearQuery,
            ..StateSettings::default()
        };
        let mut state = AppState::new(settings, Theme::default());
        let response = WorkerResponse::CatalogLoaded {
            movies: scenario_movies(),
            source: "test".to_string(),
        };
        send(&mut state, Event::WorkerResponse(response));

        send(&mut state, Event::SearchMode);
        type_text(&mut state, "h");
        send(&mut state, Event::Select);
        assert_eq!(state.view.mode, ViewMode::Results);

        send(&mut state, Event::SearchMode);
        let timers = type_text(&mut state, "e");
        send(&mut state, Event::ExitSearch);
        send(&mut state, Event::Back);
        assert_eq!(state.view.mode, ViewMode::Directory);
        assert!(state.view.query.is_empty());

        for _ in 0..timers + 1 {
            assert_eq!(send(&mut state, Event::DebounceElapsed), (false, vec![]));
        }
        assert_eq!(state.view.mode, ViewMode::Directory);
        assert!(state.view.query.is_empty());
    }

    #[test]
    fn failed_player_leaves_notice() {
        let mut state = ready_state();
        let (render, _) = send(
            &mut state,
            Event::PlayerFinished {
                title: "Dune".to_string(),
                exit_code: Some(1),
            },
        );
        assert!(render);
        assert_eq!(state.notice.as_deref(), Some("Player failed to open Dune"));
    }
}
