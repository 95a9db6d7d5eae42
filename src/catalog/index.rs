//! Actor directory derivation.
//!
//! Builds the deduplicated, sorted list of actors with their appearance
//! counts from a corpus of movie records.

use crate::domain::{ActorSummary, MovieRecord};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// How repeated credits of one actor within a single record are counted.
///
/// The catalog data has been observed to credit the same actor twice on one
/// movie. `EveryCredit` counts raw occurrences and is the default;
/// `DistinctMovies` counts each movie at most once per actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreditCounting {
    #[default]
    EveryCredit,
    DistinctMovies,
}

impl FromStr for CreditCounting {
    type Err = crate::CinedexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "every" | "every-credit" | "occurrences" => Ok(Self::EveryCredit),
            "distinct" | "distinct-movies" | "movies" => Ok(Self::DistinctMovies),
            other => Err(crate::CinedexError::Config(format!(
                "unknown credit_counting value: {other}"
            ))),
        }
    }
}

/// Folded form of a name used for ordering: canonical decomposition with
/// combining marks stripped, then lowercased.
///
/// # Examples
///
/// ```
/// use cinedex::catalog::sort_key;
///
/// assert_eq!(sort_key("Émile"), "emile");
/// assert_eq!(sort_key("Zoë Kravitz"), "zoe kravitz");
/// ```
#[must_use]
pub fn sort_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compares two names the way the directory orders them.
///
/// Folded keys first, so "de Niro" sorts next to "De Niro" and "Émile" next
/// to "Emile"; the raw strings break ties so the order stays total.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

/// Derives the actor directory from a corpus.
///
/// Empty names are skipped; whitespace-only names are kept as written. The result is sorted with
/// [`compare_names`] and is identical across calls on the same corpus.
///
/// # Examples
///
/// ```
/// use cinedex::catalog::{build_actor_index, CreditCounting};
/// use cinedex::domain::{ActorSummary, MovieRecord};
/// use std::sync::Arc;
///
/// let corpus = vec![
///     Arc::new(MovieRecord::new("1", "Dune").with_actors(["A", "B"])),
///     Arc::new(MovieRecord::new("2", "Heat").with_actors(["A"])),
/// ];
///
/// let index = build_actor_index(&corpus, CreditCounting::EveryCredit);
/// assert_eq!(index, vec![ActorSummary::new("A", 2), ActorSummary::new("B", 1)]);
/// ```
#[must_use]
pub fn build_actor_index(
    corpus: &[Arc<MovieRecord>],
    counting: CreditCounting,
) -> Vec<ActorSummary> {
    let _span = tracing::debug_span!("build_actor_index",
        movies = corpus.len(),
        counting = ?counting
    ).entered();

    let mut counts: HashMap<&str, usize> = HashMap::new();

    for record in corpus {
        let mut seen_in_record: HashSet<&str> = HashSet::new();

        for name in &record.actor_names {
            if name.is_empty() {
                continue;
            }
            if counting == CreditCounting::DistinctMovies && !seen_in_record.insert(name.as_str()) {
                continue;
            }
            *counts.entry(name.as_str()).or_insert(0) += 1;
        }
    }

    let mut index: Vec<ActorSummary> = counts
        .into_iter()
        .map(|(name, movie_count)| ActorSummary::new(name, movie_count))
        .collect();

    index.sort_by_cached_key(|actor| (sort_key(&actor.name), actor.name.clone()));

    tracing::debug!(actors = index.len(), "actor index built");
    index
}
