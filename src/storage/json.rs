//! JSON file catalog source.
//!
//! Reads a catalog document from disk and normalizes it. The whole file is
//! parsed on every load; a reload simply reads it again.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(n) in the document size, single pass plus one join for the
//!   relational shape
//! - **Best for**: personal catalogs of a few thousand movies
//!
//! # File Format
//!
//! ```json
//! {
//!   "movies": [
//!     {
//!       "id": 1,
//!       "title": "Heat",
//!       "year": 1995,
//!       "studio": "Warner Bros.",
//!       "url": "/media/movies/heat.mkv",
//!       "actors": ["Al Pacino", "Robert De Niro"],
//!       "tags": ["crime"]
//!     }
//!   ]
//! }
//! ```
//!
//! See [`models`](crate::storage::models) for the relational shape.

use crate::domain::{CinedexError, MovieRecord, Result};
use crate::storage::backend::CatalogSource;
use crate::storage::models::CatalogDocument;
use std::path::{Path, PathBuf};

/// Catalog stored as a JSON document on disk.
///
/// # Examples
///
/// ```no_run
/// use cinedex::storage::{CatalogSource, JsonCatalog};
///
/// let catalog = JsonCatalog::new("/host/movies/catalog.json");
/// let movies = catalog.load_corpus()?;
/// println!("{} movies", movies.len());
/// # Ok::<(), cinedex::domain::CinedexError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonCatalog {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonCatalog {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Parses and normalizes a catalog document held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Load`] if the text is not JSON or matches none
    /// of the accepted shapes.
    pub fn parse(contents: &str) -> Result<Vec<MovieRecord>> {
        let document: CatalogDocument = serde_json::from_str(contents).map_err(|e| {
            CinedexError::Load(format!("not a recognized catalog document: {e}"))
        })?;

        let shape = document.shape();
        let records = document.into_records();

        tracing::debug!(shape, records = records.len(), "catalog document normalized");
        Ok(records)
    }
}

impl CatalogSource for JsonCatalog {
    fn load_corpus(&self) -> Result<Vec<MovieRecord>> {
        let _span = tracing::debug_span!("json_load_corpus", path = ?self.file_path).entered();

        let contents = std::fs::read_to_string(&self.file_path).map_err(|e| {
            CinedexError::Load(format!("cannot read {}: {e}", self.file_path.display()))
        })?;

        Self::parse(&contents).map_err(|e| match e {
            CinedexError::Load(reason) => {
                CinedexError::Load(format!("{}: {reason}", self.file_path.display()))
            }
            other => other,
        })
    }

    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_catalog(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_denormalized_file() {
        let file = write_catalog(
            r#"{"movies": [{"id": 1, "title": "Heat", "actors": ["Al Pacino"], "tags": []}]}"#,
        );
        let catalog = JsonCatalog::new(file.path());

        let movies = catalog.load_corpus().unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].actor_names, vec!["Al Pacino"]);
        assert_eq!(catalog.describe(), file.path().display().to_string());
    }

    #[test]
    fn empty_movie_list_is_not_an_error() {
        let file = write_catalog(r#"{"movies": []}"#);
        let movies = JsonCatalog::new(file.path()).load_corpus().unwrap();
        assert!(movies.is_empty());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = JsonCatalog::new(dir.path().join("absent.json"));

        let err = catalog.load_corpus().unwrap_err();
        assert!(matches!(err, CinedexError::Load(ref msg) if msg.contains("absent.json")));
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let file = write_catalog("{\"movies\": [");
        let err = JsonCatalog::new(file.path()).load_corpus().unwrap_err();
        assert!(matches!(err, CinedexError::Load(_)));

        let err = JsonCatalog::parse(r#"{"films": []}"#).unwrap_err();
        assert!(matches!(err, CinedexError::Load(_)));
    }
}
