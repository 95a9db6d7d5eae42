//! In-memory catalog context: the loaded corpus and its derived actor index.
//!
//! A [`Catalog`] is built once per successful load and replaced wholesale on
//! reload. Between reloads it is read-only; view states hold `Arc` references
//! into its corpus rather than copies.
//!
//! # Modules
//!
//! - [`index`]: Actor directory derivation and name ordering
//! - [`query`]: Actor and free-text filters
//!
//! # Example
//!
//! ```
//! use cinedex::catalog::{Catalog, CreditCounting};
//! use cinedex::domain::MovieRecord;
//!
//! let catalog = Catalog::new(
//!     vec![
//!         MovieRecord::new("1", "Dune").with_actors(["A", "B"]),
//!         MovieRecord::new("2", "Heat").with_actors(["A"]),
//!     ],
//!     CreditCounting::EveryCredit,
//! );
//!
//! assert_eq!(catalog.actors().len(), 2);
//! assert_eq!(catalog.filter_by_actor("A").len(), 2);
//! ```

pub mod index;
pub mod query;

pub use index::{build_actor_index, compare_names, sort_key, CreditCounting};
pub use query::{filter_by_actor, filter_by_search, haystack, normalize_query};

use crate::domain::{ActorSummary, MovieRecord};
use std::sync::Arc;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// The corpus for the current session plus its actor directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Arc<MovieRecord>>,
    actors: Vec<ActorSummary>,
    counting: CreditCounting,
    /// Unix timestamp of the load that produced this catalog.
    loaded_at: i64,
}

impl Catalog {
    /// Wraps freshly loaded records and derives the actor index.
    #[must_use]
    pub fn new(records: Vec<MovieRecord>, counting: CreditCounting) -> Self {
        let movies: Vec<Arc<MovieRecord>> = records.into_iter().map(Arc::new).collect();
        let actors = build_actor_index(&movies, counting);

        Self {
            movies,
            actors,
            counting,
            loaded_at: chrono::Utc::now().timestamp(),
        }
    }

    /// All records, in load order.
    #[must_use]
    pub fn movies(&self) -> &[Arc<MovieRecord>] {
        &self.movies
    }

    /// The actor directory, sorted by name.
    #[must_use]
    pub fn actors(&self) -> &[ActorSummary] {
        &self.actors
    }

    #[must_use]
    pub const fn counting(&self) -> CreditCounting {
        self.counting
    }

    /// True when the catalog holds no movies at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    #[must_use]
    pub fn filter_by_actor(&self, actor_name: &str) -> Vec<Arc<MovieRecord>> {
        filter_by_actor(&self.movies, actor_name)
    }

    #[must_use]
    pub fn filter_by_search(&self, raw_query: &str) -> Option<Vec<Arc<MovieRecord>>> {
        filter_by_search(&self.movies, raw_query)
    }

    /// Human-readable age of this catalog ("just now", "5m ago", "3h ago", "2d ago").
    #[must_use]
    pub fn loaded_ago(&self) -> String {
        Self::format_age(chrono::Utc::now().timestamp() - self.loaded_at)
    }

    fn format_age(seconds: i64) -> String {
        if seconds < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if seconds < SECONDS_PER_HOUR {
            format!("{}m ago", seconds / SECONDS_PER_MINUTE)
        } else if seconds < SECONDS_PER_DAY {
            format!("{}h ago", seconds / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", seconds / SECONDS_PER_DAY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_derives_index_on_construction() {
        let catalog = Catalog::new(
            vec![MovieRecord::new("1", "Heat").with_actors(["Val", "Al"])],
            CreditCounting::default(),
        );
        let names: Vec<&str> = catalog.actors().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Al", "Val"]);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn empty_catalog_has_no_actors() {
        let catalog = Catalog::new(vec![], CreditCounting::default());
        assert!(catalog.is_empty());
        assert!(catalog.actors().is_empty());
    }

    #[test]
    fn formats_age_buckets() {
        assert_eq!(Catalog::format_age(5), "just now");
        assert_eq!(Catalog::format_age(300), "5m ago");
        assert_eq!(Catalog::format_age(3 * 3600), "3h ago");
        assert_eq!(Catalog::format_age(2 * 86400), "2d ago");
    }
}
