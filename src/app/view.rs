//! The view state machine.
//!
//! A [`ViewState`] is an immutable snapshot of what the list area shows:
//! either the actor directory or a filtered movie list. Every transition is a
//! pure function from the current snapshot (and the catalog) to a new one, so
//! the renderer never observes a half-updated view.
//!
//! # Transitions
//!
//! ```text
//!            select_actor / search(non-empty)
//! Directory ───────────────────────────────────▶ Results
//!     ▲                                             │
//!     └──────── back_to_directory / search("") ─────┘
//! ```

use super::modes::ViewMode;
use crate::catalog::Catalog;
use crate::domain::MovieRecord;
use std::sync::Arc;

/// What `back_to_directory` does with the search text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackPolicy {
    /// Leave the search input as typed.
    #[default]
    KeepQuery,
    /// Empty the search input when returning to the directory.
    ClearQuery,
}

/// The query that produced the current result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultOrigin {
    Actor(String),
    Search(String),
}

/// Snapshot of the list area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub result_title: String,
    pub result_subtitle: String,
    pub result_set: Vec<Arc<MovieRecord>>,
    /// Text held in the search input; independent of `mode`.
    pub query: String,
    /// `None` in the directory.
    pub origin: Option<ResultOrigin>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::initial()
    }
}

impl ViewState {
    /// The landing state: directory, empty query, empty result set.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            mode: ViewMode::Directory,
            result_title: String::new(),
            result_subtitle: String::new(),
            result_set: Vec::new(),
            query: String::new(),
            origin: None,
        }
    }

    /// Shows the movies crediting `name`.
    #[must_use]
    pub fn select_actor(&self, catalog: &Catalog, name: &str) -> Self {
        let result_set = catalog.filter_by_actor(name);

        tracing::debug!(actor = %name, results = result_set.len(), "actor selected");

        Self {
            mode: ViewMode::Results,
            result_title: name.to_string(),
            result_subtitle: actor_subtitle(result_set.len()),
            result_set,
            query: self.query.clone(),
            origin: Some(ResultOrigin::Actor(name.to_string())),
        }
    }

    /// Runs a free-text search, or returns to the directory when `text` is
    /// blank. The header quotes `text` exactly as typed.
    #[must_use]
    pub fn search(&self, catalog: &Catalog, text: &str) -> Self {
        let Some(result_set) = catalog.filter_by_search(text) else {
            tracing::debug!("blank search, returning to directory");
            return Self::initial();
        };

        tracing::debug!(results = result_set.len(), "search applied");

        Self {
            mode: ViewMode::Results,
            result_title: search_title(text),
            result_subtitle: search_subtitle(result_set.len()),
            result_set,
            query: text.to_string(),
            origin: Some(ResultOrigin::Search(text.to_string())),
        }
    }

    /// Returns to the directory. A no-op outside the results view.
    #[must_use]
    pub fn back_to_directory(&self, policy: BackPolicy) -> Self {
        if self.mode != ViewMode::Results {
            return self.clone();
        }

        let query = match policy {
            BackPolicy::KeepQuery => self.query.clone(),
            BackPolicy::ClearQuery => String::new(),
        };

        Self {
            query,
            ..Self::initial()
        }
    }

    /// Replaces the search text without touching the results.
    #[must_use]
    pub fn with_query(&self, query: String) -> Self {
        Self {
            query,
            ..self.clone()
        }
    }

    /// Recomputes this view against a newly loaded catalog.
    ///
    /// The result set is rebuilt from the same origin so no reference into a
    /// discarded corpus survives a reload.
    #[must_use]
    pub fn refreshed(&self, catalog: &Catalog) -> Self {
        match &self.origin {
            None => self.clone(),
            Some(ResultOrigin::Actor(name)) => self.select_actor(catalog, name),
            Some(ResultOrigin::Search(text)) => {
                let next = self.search(catalog, text);
                next.with_query(self.query.clone())
            }
        }
    }

    /// True when the results view holds no movies.
    #[must_use]
    pub fn has_no_matches(&self) -> bool {
        self.mode == ViewMode::Results && self.result_set.is_empty()
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// "1 movie with this actor", "3 movies with this actor".
#[must_use]
pub fn actor_subtitle(count: usize) -> String {
    format!("{} with this actor", plural(count, "movie", "movies"))
}

/// "1 match", "2 matches".
#[must_use]
pub fn search_subtitle(count: usize) -> String {
    plural(count, "match", "matches")
}

#[must_use]
pub fn search_title(text: &str) -> String {
    format!("Search results for \"{text}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CreditCounting;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                MovieRecord::new("1", "Dune").with_actors(["A", "B"]).with_tags(["scifi"]),
                MovieRecord::new("2", "Heat").with_actors(["A"]).with_tags(["crime"]),
            ],
            CreditCounting::EveryCredit,
        )
    }

    fn titles(view: &ViewState) -> Vec<&str> {
        view.result_set.iter().map(|m| m.display_title()).collect()
    }

    #[test]
    fn starts_in_directory() {
        let view = ViewState::initial();
        assert_eq!(view.mode, ViewMode::Directory);
        assert!(view.query.is_empty());
        assert!(view.result_set.is_empty());
    }

    #[test]
    fn selecting_an_actor_shows_their_movies() {
        let view = ViewState::initial().select_actor(&catalog(), "A");
        assert_eq!(view.mode, ViewMode::Results);
        assert_eq!(view.result_title, "A");
        assert_eq!(view.result_subtitle, "2 movies with this actor");
        assert_eq!(titles(&view), vec!["Dune", "Heat"]);

        let view = view.select_actor(&catalog(), "B");
        assert_eq!(view.result_subtitle, "1 movie with this actor");
    }

    #[test]
    fn search_quotes_untrimmed_text() {
        let view = ViewState::initial().search(&catalog(), " Crime ");
        assert_eq!(view.mode, ViewMode::Results);
        assert_eq!(view.result_title, "Search results for \" Crime \"");
        assert_eq!(view.result_subtitle, "1 match");
        assert_eq!(titles(&view), vec!["Heat"]);
    }

    #[test]
    fn search_subtitle_pluralizes() {
        assert_eq!(search_subtitle(0), "0 matches");
        assert_eq!(search_subtitle(1), "1 match");
        assert_eq!(search_subtitle(2), "2 matches");
    }

    #[test]
    fn blank_search_returns_to_directory() {
        let results = ViewState::initial().search(&catalog(), "dune");
        for blank in ["", "   "] {
            let view = results.search(&catalog(), blank);
            assert_eq!(view.mode, ViewMode::Directory);
            assert!(view.result_set.is_empty());
            assert!(view.query.is_empty());
        }
    }

    #[test]
    fn back_policy_controls_query() {
        let results = ViewState::initial().search(&catalog(), "heat");

        let kept = results.back_to_directory(BackPolicy::KeepQuery);
        assert_eq!(kept.mode, ViewMode::Directory);
        assert!(kept.result_set.is_empty());
        assert_eq!(kept.query, "heat");

        let cleared = results.back_to_directory(BackPolicy::ClearQuery);
        assert!(cleared.query.is_empty());
    }

    #[test]
    fn back_outside_results_changes_nothing() {
        let view = ViewState::initial().with_query("du".to_string());
        assert_eq!(view.back_to_directory(BackPolicy::ClearQuery), view);
    }

    #[test]
    fn reselecting_an_actor_is_deterministic() {
        let catalog = catalog();
        let first = ViewState::initial().select_actor(&catalog, "A");
        let back = first.back_to_directory(BackPolicy::KeepQuery);
        let second = back.select_actor(&catalog, "A");
        assert_eq!(first.result_set, second.result_set);
    }

    #[test]
    fn actor_selection_keeps_typed_query() {
        let view = ViewState::initial()
            .with_query("dun".to_string())
            .select_actor(&catalog(), "B");
        assert_eq!(view.query, "dun");
    }

    #[test]
    fn refresh_recomputes_against_new_corpus() {
        let view = ViewState::initial().select_actor(&catalog(), "A");

        let reloaded = Catalog::new(
            vec![MovieRecord::new("9", "Ronin").with_actors(["A"])],
            CreditCounting::EveryCredit,
        );
        let refreshed = view.refreshed(&reloaded);

        assert_eq!(titles(&refreshed), vec!["Ronin"]);
        assert!(Arc::ptr_eq(&refreshed.result_set[0], &reloaded.movies()[0]));
    }

    #[test]
    fn refresh_of_search_keeps_edited_query() {
        let view = ViewState::initial()
            .search(&catalog(), "crime")
            .with_query("crim".to_string());
        let refreshed = view.refreshed(&catalog());
        assert_eq!(refreshed.query, "crim");
        assert_eq!(refreshed.result_title, search_title("crime"));
    }

    #[test]
    fn no_matches_is_reported() {
        let view = ViewState::initial().search(&catalog(), "zzz");
        assert!(view.has_no_matches());
        assert!(!ViewState::initial().has_no_matches());
    }
}
