//! Cinedex: A Zellij plugin for browsing a personal movie catalog.
//!
//! Cinedex is a terminal multiplexer plugin that provides:
//! - An alphabetical actor directory with per-actor movie counts
//! - Drill-down from an actor to the movies they appear in
//! - Debounced free-text search across titles, studios, actors and tags
//! - Catalog loading on a Zellij worker thread, with explicit loading and
//!   load-failed states
//! - Opening a movie's file location with a configurable player command

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and debounced search              │
//! │  - View state transitions                           │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Worker Layer  │
//! │ (ui/)         │   │ (catalog/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Actor index │   │ - Async load  │
//! │ - Theming     │   │ - Filters     │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                 │
//!                                         ┌───────────────┐
//!                                         │ Storage       │
//!                                         │ (storage/)    │
//!                                         │ - JSON shapes │
//!                                         └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Movie model (domain/movie)                       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`catalog`]: Loaded corpus, actor index and filters
//! - [`domain`]: Core domain types (movies, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`storage`]: Catalog sources and document normalization
//! - [`worker`]: Background worker for catalog loading
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/cinedex.wasm" {
//!         catalog_path "~/movies/catalog.json"
//!         credit_counting "distinct"
//!         back_clears_query "true"
//!         debounce_ms "150"
//!         player "mpv"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    build `AppState` in the loading state, request permissions.
//! 2. **Permissions Granted**: a `Reload` event posts `LoadCatalog` to the worker.
//! 3. **Worker Processing**: read and normalize the catalog document, reply
//!    with `CatalogLoaded` or `LoadFailed`.
//! 4. **UI Rendering**: the view model is computed from state and printed.
//!
//! # Examples
//!
//! ```rust
//! use cinedex::{handle_event, initialize, Config, Event, MovieRecord, ViewMode};
//! use cinedex::worker::WorkerResponse;
//!
//! let mut state = initialize(&Config::default());
//!
//! let loaded = WorkerResponse::CatalogLoaded {
//!     movies: vec![MovieRecord::new("1", "Heat").with_actors(["Al Pacino"])],
//!     source: "catalog.json".to_string(),
//! };
//! handle_event(&mut state, &Event::WorkerResponse(loaded))?;
//! handle_event(&mut state, &Event::Select)?;
//!
//! assert_eq!(state.view.mode, ViewMode::Results);
//! assert_eq!(state.view.result_set.len(), 1);
//! # Ok::<(), cinedex::CinedexError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{
    handle_event, Action, AppState, BackPolicy, Event, InputMode, LoadStatus, StateSettings,
    ViewMode, ViewState,
};
pub use catalog::{Catalog, CreditCounting};
pub use domain::{ActorSummary, CinedexError, MovieRecord, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::time::Duration;

/// Command used to open movie locations when `player` is not configured.
pub const DEFAULT_PLAYER: &str = "xdg-open";

/// Debounce window used when `debounce_ms` is missing or invalid.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/cinedex.wasm" {
///     catalog_path "~/movies/catalog.json"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sandbox path of the catalog document, with `~` already expanded.
    pub catalog_path: String,

    /// How repeated credits on one movie count toward an actor's total.
    pub credit_counting: CreditCounting,

    /// Whether going back to the directory empties the search input.
    pub back_clears_query: bool,

    /// Search quiescence window in milliseconds.
    pub debounce_ms: u64,

    /// Command that receives a movie's file location as its only argument.
    pub player: String,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing filter in `EnvFilter` syntax. `None` means `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: infrastructure::default_catalog_path(),
            credit_counting: CreditCounting::default(),
            back_clears_query: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            player: DEFAULT_PLAYER.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

/// Non-empty trimmed value for `key`.
fn non_empty<'a>(config: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    config
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown or malformed values fall back to their defaults and are logged;
    /// a bad option never prevents the plugin from starting.
    ///
    /// # Parsing Rules
    ///
    /// - `catalog_path`: `~` is expanded to the sandbox `/host` mount
    /// - `credit_counting`: `every` or `distinct` (see [`CreditCounting`])
    /// - `back_clears_query`: `true`/`false`, `yes`/`no`, `on`/`off`, `1`/`0`
    /// - `debounce_ms`: non-negative integer
    /// - `player`, `theme`, `theme_file`, `trace_level`: taken as given
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cinedex::{Config, CreditCounting};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("catalog_path".to_string(), "~/movies.json".to_string());
    /// map.insert("credit_counting".to_string(), "distinct".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.catalog_path, "/host/movies.json");
    /// assert_eq!(config.credit_counting, CreditCounting::DistinctMovies);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let catalog_path =
            non_empty(config, "catalog_path").map_or(defaults.catalog_path, infrastructure::expand_tilde);

        let credit_counting = non_empty(config, "credit_counting").map_or(defaults.credit_counting, |value| {
            value.parse().unwrap_or_else(|e: CinedexError| {
                tracing::warn!(error = %e, "using default credit counting");
                defaults.credit_counting
            })
        });

        let back_clears_query = non_empty(config, "back_clears_query").map_or(defaults.back_clears_query, |value| {
            parse_bool(value).unwrap_or_else(|| {
                tracing::warn!(value, "back_clears_query is not a boolean, using default");
                defaults.back_clears_query
            })
        });

        let debounce_ms = non_empty(config, "debounce_ms").map_or(defaults.debounce_ms, |value| {
            value.parse::<u64>().unwrap_or_else(|e| {
                tracing::warn!(value, error = %e, "debounce_ms is not a number, using default");
                defaults.debounce_ms
            })
        });

        Self {
            catalog_path,
            credit_counting,
            back_clears_query,
            debounce_ms,
            player: non_empty(config, "player").map_or(defaults.player, String::from),
            theme_name: non_empty(config, "theme").map(String::from),
            theme_file: non_empty(config, "theme_file").map(infrastructure::expand_tilde),
            trace_level: non_empty(config, "trace_level").map(String::from),
        }
    }

    /// The parts of the configuration the application state consults.
    #[must_use]
    pub fn state_settings(&self) -> StateSettings {
        StateSettings {
            catalog_path: self.catalog_path.clone(),
            credit_counting: self.credit_counting,
            back_policy: if self.back_clears_query {
                BackPolicy::ClearQuery
            } else {
                BackPolicy::KeepQuery
            },
            debounce_window: Duration::from_millis(self.debounce_ms),
        }
    }
}

/// Resolves the configured theme: file first, then name, then the default.
fn resolve_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        return Theme::from_file(theme_file).unwrap_or_else(|e| {
            tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
            Theme::default()
        })
    })
}

/// Initializes the plugin state from configuration.
///
/// # Returns
///
/// An `AppState` in the loading state with an empty directory. The catalog
/// arrives later as a worker response.
///
/// # Example
///
/// ```rust
/// use cinedex::{initialize, Config, LoadStatus};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.load_status, LoadStatus::Loading);
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(catalog_path = %config.catalog_path, "initializing cinedex plugin");

    AppState::new(config.state_settings(), resolve_theme(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_zellij(&map(&[
            ("catalog_path", "~/movies/catalog.json"),
            ("credit_counting", "distinct"),
            ("back_clears_query", "yes"),
            ("debounce_ms", "75"),
            ("player", "mpv"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/themes/mine.toml"),
            ("trace_level", "cinedex=debug"),
        ]));

        assert_eq!(config.catalog_path, "/host/movies/catalog.json");
        assert_eq!(config.credit_counting, CreditCounting::DistinctMovies);
        assert!(config.back_clears_query);
        assert_eq!(config.debounce_ms, 75);
        assert_eq!(config.player, "mpv");
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("/host/themes/mine.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("cinedex=debug"));
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("credit_counting", "sometimes"),
            ("back_clears_query", "maybe"),
            ("debounce_ms", "-5"),
            ("player", "   "),
        ]));

        assert_eq!(config.credit_counting, CreditCounting::EveryCredit);
        assert!(!config.back_clears_query);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert_eq!(config.player, DEFAULT_PLAYER);
    }

    #[test]
    fn state_settings_carry_policies() {
        let config = Config {
            back_clears_query: true,
            debounce_ms: 50,
            ..Config::default()
        };
        let settings = config.state_settings();

        assert_eq!(settings.back_policy, BackPolicy::ClearQuery);
        assert_eq!(settings.debounce_window, Duration::from_millis(50));
        assert_eq!(settings.catalog_path, config.catalog_path);
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_theme(&config).name, Theme::default().name);

        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_theme(&config).name, Theme::default().name);
    }

    #[test]
    fn initialize_starts_loading_in_directory() {
        let state = initialize(&Config::default());
        assert_eq!(state.load_status, LoadStatus::Loading);
        assert_eq!(state.view.mode, ViewMode::Directory);
        assert!(state.catalog.is_none());
    }
}
