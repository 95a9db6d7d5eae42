//! Query engine over the movie corpus.
//!
//! Two pure filters: exact actor membership and free-text substring search
//! over a per-record haystack. Both return shared references into the corpus
//! in original corpus order.

use crate::domain::MovieRecord;
use std::sync::Arc;

/// Normalizes raw search input: trims and lowercases.
///
/// Returns `None` when nothing is left, which callers must treat as a request
/// to leave the results view rather than as a match-everything filter.
///
/// # Examples
///
/// ```
/// use cinedex::catalog::normalize_query;
///
/// assert_eq!(normalize_query("  INTERSTELLAR "), Some("interstellar".to_string()));
/// assert_eq!(normalize_query("   "), None);
/// ```
#[must_use]
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Builds the lowercased search haystack for one record.
///
/// Title, studio, actor names and tag names, joined by single spaces in that
/// order. Missing fields contribute an empty segment.
#[must_use]
pub fn haystack(record: &MovieRecord) -> String {
    let segments = [
        record.title.clone().unwrap_or_default(),
        record.studio.clone().unwrap_or_default(),
        record.actor_names.join(" "),
        record.tag_names.join(" "),
    ];
    segments.join(" ").to_lowercase()
}

/// Returns the records crediting `actor_name` (exact, case-sensitive).
#[must_use]
pub fn filter_by_actor(corpus: &[Arc<MovieRecord>], actor_name: &str) -> Vec<Arc<MovieRecord>> {
    let _span = tracing::debug_span!("filter_by_actor", actor = %actor_name).entered();

    let matches: Vec<Arc<MovieRecord>> = corpus
        .iter()
        .filter(|record| record.credits(actor_name))
        .cloned()
        .collect();

    tracing::debug!(matches = matches.len(), "actor filter applied");
    matches
}

/// Returns the records whose haystack contains the normalized query.
///
/// `None` means the query was empty after trimming and no filtering happened.
///
/// # Examples
///
/// ```
/// use cinedex::catalog::filter_by_search;
/// use cinedex::domain::MovieRecord;
/// use std::sync::Arc;
///
/// let corpus = vec![
///     Arc::new(MovieRecord::new("1", "Dune").with_tags(["scifi"])),
///     Arc::new(MovieRecord::new("2", "Heat").with_tags(["crime"])),
/// ];
///
/// let hits = filter_by_search(&corpus, "CRIME").unwrap();
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].display_title(), "Heat");
/// assert!(filter_by_search(&corpus, "  ").is_none());
/// ```
#[must_use]
pub fn filter_by_search(corpus: &[Arc<MovieRecord>], raw_query: &str) -> Option<Vec<Arc<MovieRecord>>> {
    let needle = normalize_query(raw_query)?;

    let _span = tracing::debug_span!("filter_by_search",
        total = corpus.len(),
        query_len = needle.len()
    ).entered();

    let matches: Vec<Arc<MovieRecord>> = corpus
        .iter()
        .filter(|record| haystack(record).contains(&needle))
        .cloned()
        .collect();

    tracing::debug!(matches = matches.len(), "search filter applied");
    Some(matches)
}
