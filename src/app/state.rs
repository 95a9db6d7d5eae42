//! Application state management and view model computation.
//!
//! [`AppState`] owns the loaded [`Catalog`], the current [`ViewState`]
//! snapshot, the list cursor, the input mode and the search debouncer. It is
//! the single source of truth for the plugin; the renderer only ever sees a
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel) computed from it.
//!
//! # State Components
//!
//! - **Catalog**: corpus and actor index, replaced wholesale on reload
//! - **Load status**: loading, ready or failed; gates every view transition
//! - **View**: immutable snapshot replaced by each transition
//! - **Selection**: cursor within the visible list (actors or movies)
//! - **Input mode**: list navigation or search box editing
//!
//! # Example
//!
//! ```rust
//! use cinedex::app::{AppState, StateSettings};
//! use cinedex::domain::MovieRecord;
//! use cinedex::ui::Theme;
//!
//! let mut state = AppState::new(StateSettings::default(), Theme::default());
//! state.install_catalog(vec![MovieRecord::new("1", "Heat").with_actors(["Al"])]);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.display_items.len(), 1);
//! ```

use super::debounce::SearchDebouncer;
use super::modes::{InputMode, LoadStatus, ViewMode};
use super::view::{BackPolicy, ResultOrigin, ViewState};
use crate::catalog::{Catalog, CreditCounting};
use crate::domain::{ActorSummary, MovieRecord};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyKind, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, TableColumns,
    UIViewModel,
};
use std::sync::Arc;
use std::time::Duration;

/// Width of the primary (actor / title) column, including padding.
pub const PRIMARY_COLUMN_WIDTH: usize = 40;

/// Policies and locations the state needs from the plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSettings {
    /// Sandbox path of the catalog document.
    pub catalog_path: String,
    pub credit_counting: CreditCounting,
    pub back_policy: BackPolicy,
    pub debounce_window: Duration,
}

impl Default for StateSettings {
    fn default() -> Self {
        Self {
            catalog_path: crate::infrastructure::paths::default_catalog_path(),
            credit_counting: CreditCounting::default(),
            back_policy: BackPolicy::default(),
            debounce_window: super::debounce::DEFAULT_WINDOW,
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded catalog. `None` until the first successful load and after a
    /// failed one, so stale data is never shown.
    pub catalog: Option<Catalog>,

    pub load_status: LoadStatus,

    /// True while a reload is in flight over an already loaded catalog.
    pub reloading: bool,

    /// Current view snapshot. Only ever replaced, never edited in place.
    pub view: ViewState,

    /// Zero-based cursor within the visible list.
    pub selected_index: usize,

    /// Directory cursor saved when entering results, restored on the way back.
    pub directory_index: usize,

    pub input_mode: InputMode,

    pub debouncer: SearchDebouncer,

    /// One-line message shown in the footer until the next key press.
    pub notice: Option<String>,

    pub settings: StateSettings,

    pub theme: Theme,
}

impl AppState {
    /// Creates the initial state: loading, directory view, empty query.
    #[must_use]
    pub fn new(settings: StateSettings, theme: Theme) -> Self {
        Self {
            catalog: None,
            load_status: LoadStatus::Loading,
            reloading: false,
            view: ViewState::initial(),
            selected_index: 0,
            directory_index: 0,
            input_mode: InputMode::Normal,
            debouncer: SearchDebouncer::new(settings.debounce_window),
            notice: None,
            settings,
            theme,
        }
    }

    /// Number of rows in the visible list.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        match self.view.mode {
            ViewMode::Directory => self.actors().len(),
            ViewMode::Results => self.view.result_set.len(),
        }
    }

    /// The actor directory, empty when no catalog is loaded.
    #[must_use]
    pub fn actors(&self) -> &[ActorSummary] {
        match &self.catalog {
            Some(catalog) => catalog.actors(),
            None => &[],
        }
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// The actor under the cursor in the directory view.
    #[must_use]
    pub fn selected_actor(&self) -> Option<&ActorSummary> {
        if self.view.mode != ViewMode::Directory {
            return None;
        }
        self.actors().get(self.selected_index)
    }

    /// The movie under the cursor in the results view.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&Arc<MovieRecord>> {
        if self.view.mode != ViewMode::Results {
            return None;
        }
        self.view.result_set.get(self.selected_index)
    }

    /// Replaces the view snapshot and fixes up the cursor.
    ///
    /// Entering results starts at the top; returning to the directory restores
    /// the saved directory cursor. Staying in the same mode clamps.
    pub fn apply_view(&mut self, next: ViewState) {
        let previous_mode = self.view.mode;
        self.view = next;

        match (previous_mode, self.view.mode) {
            (ViewMode::Directory, ViewMode::Results) => {
                self.directory_index = self.selected_index;
                self.selected_index = 0;
            }
            (ViewMode::Results, ViewMode::Directory) => {
                self.selected_index = self.directory_index;
            }
            (ViewMode::Results, ViewMode::Results) => self.selected_index = 0,
            (ViewMode::Directory, ViewMode::Directory) => {}
        }

        self.clamp_selection();
    }

    /// Installs a freshly loaded corpus and recomputes the active view.
    pub fn install_catalog(&mut self, records: Vec<MovieRecord>) {
        let catalog = Catalog::new(records, self.settings.credit_counting);

        tracing::debug!(
            movies = catalog.movies().len(),
            actors = catalog.actors().len(),
            counting = ?catalog.counting(),
            "catalog installed"
        );

        self.view = self.view.refreshed(&catalog);
        self.catalog = Some(catalog);
        self.load_status = LoadStatus::Ready;
        self.reloading = false;
        self.clamp_selection();
        self.directory_index = self.directory_index.min(self.actors().len().saturating_sub(1));
    }

    /// Records a failed load. The previous catalog and any results into it
    /// are discarded.
    pub fn fail_load(&mut self, message: String) {
        tracing::warn!(error = %message, "catalog load failed");
        self.catalog = None;
        self.load_status = LoadStatus::Failed(message);
        self.reloading = false;
        self.view = ViewState::initial().with_query(self.view.query.clone());
        self.selected_index = 0;
        self.directory_index = 0;
        self.input_mode = InputMode::Normal;
        self.debouncer.cancel();
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(len - 1);
        }
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let header = self.compute_header();
        let footer = self.compute_footer();
        let search_bar = self.compute_search_bar();
        let columns = self.compute_columns();

        if let Some(empty_state) = self.compute_empty_state() {
            return UIViewModel {
                display_items: vec![],
                selected_index: 0,
                header,
                footer,
                columns,
                empty_state: Some(empty_state),
                search_bar,
            };
        }

        let available_rows = self.calculate_available_rows(rows).max(1);
        let total = self.visible_len();

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(total);
        if visible_end - visible_start < available_rows && total >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items = (visible_start..visible_end)
            .filter_map(|idx| self.compute_display_item(idx, cols))
            .collect();

        UIViewModel {
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            header,
            footer,
            columns,
            empty_state: None,
            search_bar,
        }
    }

    fn compute_display_item(&self, idx: usize, cols: usize) -> Option<DisplayItem> {
        let is_selected = idx == self.selected_index;
        let max_secondary = cols.saturating_sub(PRIMARY_COLUMN_WIDTH + 2);

        match self.view.mode {
            ViewMode::Directory => {
                let actor = self.actors().get(idx)?;
                Some(DisplayItem {
                    primary: truncate(&actor.name, PRIMARY_COLUMN_WIDTH - 3),
                    secondary: movie_count_label(actor.movie_count),
                    is_selected,
                    highlight_ranges: vec![],
                })
            }
            ViewMode::Results => {
                let movie = self.view.result_set.get(idx)?;
                let primary = truncate(&title_with_year(movie), PRIMARY_COLUMN_WIDTH - 3);
                let highlight_ranges = match &self.view.origin {
                    Some(ResultOrigin::Search(text)) => highlight_ranges(&primary, text),
                    _ => vec![],
                };
                Some(DisplayItem {
                    primary,
                    secondary: truncate(&movie_details(movie), max_secondary),
                    is_selected,
                    highlight_ranges,
                })
            }
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        match self.view.mode {
            ViewMode::Directory => {
                let actor_count = self.actors().len();
                let subtitle = self.catalog.as_ref().map_or_else(String::new, |catalog| {
                    let mut subtitle = format!(
                        "{} · loaded {}",
                        movie_count_label(catalog.movies().len()),
                        catalog.loaded_ago()
                    );
                    if self.reloading {
                        subtitle.push_str(" · refreshing");
                    }
                    subtitle
                });
                HeaderInfo {
                    title: format!(" Actors ({actor_count}) "),
                    subtitle,
                }
            }
            ViewMode::Results => HeaderInfo {
                title: format!(" {} ", self.view.result_title),
                subtitle: self.view.result_subtitle.clone(),
            },
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.view.mode) {
            (InputMode::Search, _) => "Esc: back to list  Enter: search now  Type to filter",
            (InputMode::Normal, ViewMode::Directory) => {
                "j/k: navigate  Enter: show movies  /: search  r: reload  q: quit"
            }
            (InputMode::Normal, ViewMode::Results) => {
                "j/k: navigate  Enter: play  Esc: actors  /: search  r: reload  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
            notice: self.notice.clone(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        if self.input_mode == InputMode::Search || !self.view.query.is_empty() {
            Some(SearchBarInfo {
                query: self.view.query.clone(),
                focused: self.input_mode == InputMode::Search,
            })
        } else {
            None
        }
    }

    fn compute_columns(&self) -> TableColumns {
        match self.view.mode {
            ViewMode::Directory => TableColumns::new("ACTOR", "MOVIES"),
            ViewMode::Results => TableColumns::new("TITLE", "DETAILS"),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        match &self.load_status {
            LoadStatus::Loading => {
                return Some(EmptyState {
                    kind: EmptyKind::Loading,
                    message: "Loading catalog".to_string(),
                    subtitle: crate::infrastructure::paths::display_path(&self.settings.catalog_path),
                })
            }
            LoadStatus::Failed(error) => {
                return Some(EmptyState {
                    kind: EmptyKind::LoadFailed,
                    message: "Could not load the catalog".to_string(),
                    subtitle: format!("{error} · press r to retry"),
                })
            }
            LoadStatus::Ready => {}
        }

        match self.view.mode {
            ViewMode::Directory if self.actors().is_empty() => Some(EmptyState {
                kind: EmptyKind::EmptyCorpus,
                message: "Nothing here yet".to_string(),
                subtitle: format!(
                    "Add movies to {} and press r to reload",
                    crate::infrastructure::paths::display_path(&self.settings.catalog_path)
                ),
            }),
            ViewMode::Results if self.view.result_set.is_empty() => Some(EmptyState {
                kind: EmptyKind::NoMatches,
                message: "No results".to_string(),
                subtitle: "Esc: back to actors  /: edit search".to_string(),
            }),
            _ => None,
        }
    }

    /// Rows left for the list after the header, borders, table header,
    /// footer and (when shown) the search bar.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let chrome = if self.compute_search_bar().is_some() { 10 } else { 7 };
        total_rows.saturating_sub(chrome)
    }
}

/// "1 movie", "12 movies".
#[must_use]
pub fn movie_count_label(count: usize) -> String {
    if count == 1 {
        "1 movie".to_string()
    } else {
        format!("{count} movies")
    }
}

fn title_with_year(movie: &MovieRecord) -> String {
    movie.year.map_or_else(
        || movie.display_title().to_string(),
        |year| format!("{} ({year})", movie.display_title()),
    )
}

fn movie_details(movie: &MovieRecord) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(studio) = movie.studio.as_deref().filter(|s| !s.trim().is_empty()) {
        parts.push(studio.to_string());
    }
    if !movie.actor_names.is_empty() {
        parts.push(movie.actor_names.join(", "));
    }
    if !movie.tag_names.is_empty() {
        let tags: Vec<String> = movie.tag_names.iter().map(|t| format!("#{t}")).collect();
        parts.push(tags.join(" "));
    }
    if movie.playable_location().is_none() {
        parts.push("(no file)".to_string());
    }
    parts.join(" · ")
}

/// Truncates to `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let head: String = text.chars().take(keep).collect();
    format!("{head}...")
}

/// Character ranges of every case-insensitive occurrence of the trimmed
/// query in `text`.
///
/// Lowercasing can change the character count for a few scripts; in that
/// case no ranges are produced rather than misaligned ones.
fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let Some(needle) = crate::catalog::normalize_query(query) else {
        return vec![];
    };

    let haystack: Vec<char> = text.to_lowercase().chars().collect();
    let needle: Vec<char> = needle.chars().collect();
    if haystack.len() != text.chars().count() || needle.len() > haystack.len() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(StateSettings::default(), Theme::default());
        state.install_catalog(vec![
            MovieRecord::new("1", "Dune").with_actors(["A", "B"]).with_tags(["scifi"]),
            MovieRecord::new("2", "Heat").with_actors(["A"]).with_tags(["crime"]).with_year(1995),
        ]);
        state
    }

    #[test]
    fn new_state_is_loading() {
        let state = AppState::new(StateSettings::default(), Theme::default());
        assert_eq!(state.load_status, LoadStatus::Loading);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.map(|e| e.kind), Some(EmptyKind::Loading));
    }

    #[test]
    fn selection_wraps_over_visible_list() {
        let mut state = loaded_state();
        assert_eq!(state.visible_len(), 2);
        state.move_selection_up();
        assert_eq!(state.selected_index, 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn directory_cursor_is_restored_after_results() {
        let mut state = loaded_state();
        state.move_selection_down();
        let catalog = state.catalog.clone().unwrap();
        let next = state.view.select_actor(&catalog, "B");
        state.apply_view(next);
        assert_eq!(state.selected_index, 0);

        let back = state.view.back_to_directory(BackPolicy::KeepQuery);
        state.apply_view(back);
        assert_eq!(state.selected_index, 1);
        assert_eq!(state.selected_actor().map(|a| a.name.as_str()), Some("B"));
    }

    #[test]
    fn empty_corpus_and_no_matches_are_distinct() {
        let mut state = AppState::new(StateSettings::default(), Theme::default());
        state.install_catalog(vec![]);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.map(|e| e.kind), Some(EmptyKind::EmptyCorpus));

        let mut state = loaded_state();
        let catalog = state.catalog.clone().unwrap();
        let next = state.view.search(&catalog, "zzz");
        state.apply_view(next);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.map(|e| e.kind), Some(EmptyKind::NoMatches));
    }

    #[test]
    fn failed_load_discards_catalog() {
        let mut state = loaded_state();
        state.fail_load("missing file".to_string());
        assert!(state.catalog.is_none());
        assert!(state.actors().is_empty());
        let vm = state.compute_viewmodel(24, 80);
        let empty = vm.empty_state.unwrap();
        assert_eq!(empty.kind, EmptyKind::LoadFailed);
        assert!(empty.subtitle.contains("missing file"));
    }

    #[test]
    fn directory_rows_show_counts() {
        let state = loaded_state();
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.title, " Actors (2) ");
        assert_eq!(vm.display_items[0].primary, "A");
        assert_eq!(vm.display_items[0].secondary, "2 movies");
        assert_eq!(vm.display_items[1].secondary, "1 movie");
        assert!(vm.display_items[0].is_selected);
    }

    #[test]
    fn search_results_highlight_title_matches() {
        let mut state = loaded_state();
        let catalog = state.catalog.clone().unwrap();
        let next = state.view.search(&catalog, "HEA");
        state.apply_view(next);

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.display_items[0].primary, "Heat (1995)");
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(0, 3)]);
        assert_eq!(vm.header.subtitle, "1 match");
    }

    #[test]
    fn windowing_keeps_selection_visible() {
        let mut state = AppState::new(StateSettings::default(), Theme::default());
        let records = (0..50)
            .map(|i| MovieRecord::new(i.to_string(), "x").with_actors([format!("Actor {i:02}")]))
            .collect();
        state.install_catalog(records);
        state.selected_index = 49;

        let vm = state.compute_viewmodel(20, 80);
        assert_eq!(vm.display_items.len(), 13);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.display_items[vm.selected_index].primary, "Actor 49");
    }

    #[test]
    fn highlight_finds_every_occurrence() {
        assert_eq!(highlight_ranges("Abba Abba", "ab"), vec![(0, 2), (5, 7)]);
        assert!(highlight_ranges("Heat", "   ").is_empty());
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("abc", 6), "abc");
    }
}
