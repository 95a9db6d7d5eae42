//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the Cinedex library
//! and the Zellij plugin system. It implements the `ZellijPlugin` trait, maps
//! Zellij events to library events and executes the resulting actions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ CatalogWorker    │   │  ← Catalog reading and normalization
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `CustomMessage`, `Timer`, `RunCommandResult`
//! 3. **Permissions granted**: Load the catalog on the worker
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search editing, `Reload`, `CloseFocus`
//! - `Timer` → `Event::DebounceElapsed`
//! - `CustomMessage` from the worker → `Event::WorkerResponse`
//! - `RunCommandResult` of the player → `Event::PlayerFinished`
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n` / `Down`: Move down
//! - `Ctrl+p` / `Up`: Move up
//! - `Enter`: Open actor / play movie / run search now
//!
//! In normal mode:
//! - `j` / `k`: Move down / up
//! - `Esc`, `h`, `Backspace`: Back to the actor directory
//! - `/`: Focus the search box
//! - `r`: Reload the catalog
//! - `q`: Close plugin
//!
//! In search mode:
//! - Any character: Type into the search box
//! - `Backspace`: Delete the last character
//! - `Esc`: Return focus to the list

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use cinedex::worker::{CatalogWorker, WorkerMessage, WorkerResponse};
use cinedex::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);
register_worker!(CatalogWorker, catalog_worker, CATALOG_WORKER);

/// Worker name derived from the `register_worker!` namespace.
const WORKER_NAME: &str = "catalog";

/// Run-command context key carrying the title of the movie being played.
const PLAYER_CONTEXT_KEY: &str = "cinedex_player_title";

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns: worker
/// messaging and the player command.
struct State {
    /// Core application state from library layer.
    app: cinedex::AppState,

    /// Command that receives a movie location as its argument.
    player: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: cinedex::initialize(&default_config),
            player: default_config.player,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests:
    /// - `ReadApplicationState`: Required for plugin messaging
    /// - `RunCommands`: Launch the player
    /// - `FullHdAccess`: Read the catalog document
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        cinedex::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            catalog_path = %config.catalog_path,
            player = %config.player,
            debounce_ms = config.debounce_ms,
            "parsed configuration"
        );
        self.app = cinedex::initialize(&config);
        self.player.clone_from(&config.player);

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::RunCommands,
            PermissionType::FullHdAccess,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::Timer,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// # Returns
    ///
    /// - `true` if the plugin UI should re-render
    /// - `false` if the event was ignored or resulted in no state changes
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                match Self::map_command_result_event(exit_code, &stderr, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::debug!("permissions granted - loading catalog");
                Event::Reload
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                tracing::warn!("permissions denied - catalog cannot be read");
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        cinedex::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        let common = match key.bare_key {
            BareKey::Down => Some(Event::KeyDown),
            BareKey::Up => Some(Event::KeyUp),
            BareKey::Enter => Some(Event::Select),
            _ => None,
        };
        if common.is_some() {
            return common;
        }

        match self.app.input_mode {
            InputMode::Search => match key.bare_key {
                BareKey::Esc => Some(Event::ExitSearch),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            },
            InputMode::Normal => match key.bare_key {
                BareKey::Char('j') => Some(Event::KeyDown),
                BareKey::Char('k') => Some(Event::KeyUp),
                BareKey::Esc | BareKey::Backspace | BareKey::Char('h') => Some(Event::Back),
                BareKey::Char('/') => Some(Event::SearchMode),
                BareKey::Char('r') => Some(Event::Reload),
                BareKey::Char('q') => Some(Event::CloseFocus),
                _ => None,
            },
        }
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match WorkerResponse::from_payload(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Maps the player's run command result to an application event.
    ///
    /// Results without the player context key come from other commands and
    /// are ignored.
    fn map_command_result_event(
        exit_code: Option<i32>,
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let title = context.get(PLAYER_CONTEXT_KEY)?.clone();

        if exit_code != Some(0) {
            tracing::warn!(
                title = %title,
                exit_code = ?exit_code,
                stderr = %String::from_utf8_lossy(stderr),
                "player command failed"
            );
        }

        Some(Event::PlayerFinished { title, exit_code })
    }

    /// Posts a message to the worker thread.
    ///
    /// Serialization errors are logged, not propagated.
    fn post_worker_message(message: &WorkerMessage) {
        match message.to_payload() {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(ref message) => Self::post_worker_message(message),
            Action::ScheduleTimer(delay) => set_timeout(delay.as_secs_f64()),
            Action::OpenMovie {
                ref title,
                ref location,
            } => {
                tracing::debug!(title = %title, location = %location, player = %self.player, "opening movie");

                let mut context = BTreeMap::new();
                context.insert(PLAYER_CONTEXT_KEY.to_string(), title.clone());
                run_command(&[self.player.as_str(), location.as_str()], context);
            }
        }
    }
}
