//! Movie and actor domain models.
//!
//! [`MovieRecord`] is the canonical, schema-agnostic shape every catalog
//! document is normalized into before the rest of the crate sees it.
//! [`ActorSummary`] is derived from a corpus of records by the actor index.

use serde::{Deserialize, Serialize};

/// Title shown for records without a usable title.
pub const UNTITLED: &str = "untitled";

/// A single movie in the catalog.
///
/// Records are immutable once loaded. Every optional field may be absent and
/// is treated as empty by the query engine, never as an error. Duplicate
/// actor credits within one record are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub studio: Option<String>,
    #[serde(default)]
    pub file_location: Option<String>,
    #[serde(default)]
    pub actor_names: Vec<String>,
    #[serde(default)]
    pub tag_names: Vec<String>,
}

impl MovieRecord {
    /// Creates a record with only an id and a title.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinedex::domain::MovieRecord;
    ///
    /// let movie = MovieRecord::new("1", "Dune")
    ///     .with_actors(["A", "B"])
    ///     .with_tags(["scifi"]);
    /// assert_eq!(movie.display_title(), "Dune");
    /// assert_eq!(movie.actor_names, vec!["A", "B"]);
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Replaces the actor credits.
    #[must_use]
    pub fn with_actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actor_names = actors.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_names = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the studio name.
    #[must_use]
    pub fn with_studio(mut self, studio: impl Into<String>) -> Self {
        self.studio = Some(studio.into());
        self
    }

    /// Sets the file location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.file_location = Some(location.into());
        self
    }

    /// Sets the release year.
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Returns the title, or [`UNTITLED`] when it is missing or blank.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNTITLED)
    }

    /// Returns the file location when one is set and non-blank.
    #[must_use]
    pub fn playable_location(&self) -> Option<&str> {
        self.file_location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Returns true if `name` appears in the actor credits (exact, case-sensitive).
    #[must_use]
    pub fn credits(&self, name: &str) -> bool {
        self.actor_names.iter().any(|a| a == name)
    }
}

/// One entry of the actor directory.
///
/// `movie_count` is always at least one: actors only exist in the directory
/// because some record credits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSummary {
    pub name: String,
    pub movie_count: usize,
}

impl ActorSummary {
    #[must_use]
    pub fn new(name: impl Into<String>, movie_count: usize) -> Self {
        Self {
            name: name.into(),
            movie_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_titles_display_as_untitled() {
        let mut movie = MovieRecord::new("1", "   ");
        assert_eq!(movie.display_title(), UNTITLED);

        movie.title = None;
        assert_eq!(movie.display_title(), UNTITLED);
    }

    #[test]
    fn playable_location_ignores_blank_values() {
        let movie = MovieRecord::new("1", "Heat").with_location("  ");
        assert_eq!(movie.playable_location(), None);

        let movie = MovieRecord::new("1", "Heat").with_location("/films/heat.mkv");
        assert_eq!(movie.playable_location(), Some("/films/heat.mkv"));
    }

    #[test]
    fn credits_is_case_sensitive() {
        let movie = MovieRecord::new("1", "Heat").with_actors(["Al Pacino"]);
        assert!(movie.credits("Al Pacino"));
        assert!(!movie.credits("al pacino"));
    }

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let movie: MovieRecord = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        assert_eq!(movie.id, "7");
        assert!(movie.actor_names.is_empty());
        assert!(movie.tag_names.is_empty());
        assert_eq!(movie.studio, None);
    }
}
