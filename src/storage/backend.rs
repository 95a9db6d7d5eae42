//! Catalog source abstraction.
//!
//! The core never knows where movies come from. A [`CatalogSource`] hands
//! over a fully normalized corpus, or a [`CinedexError::Load`] explaining why
//! it could not.
//!
//! [`CinedexError::Load`]: crate::domain::CinedexError::Load

use crate::domain::{MovieRecord, Result};

/// Supplier of the movie corpus.
///
/// # Implementations
///
/// - [`JsonCatalog`](crate::storage::JsonCatalog): reads a JSON document from disk
///
/// # Examples
///
/// ```no_run
/// use cinedex::storage::{CatalogSource, JsonCatalog};
///
/// let source = JsonCatalog::new("/host/.local/share/zellij/cinedex/catalog.json");
/// let movies = source.load_corpus()?;
/// # Ok::<(), cinedex::domain::CinedexError>(())
/// ```
pub trait CatalogSource: Send {
    /// Loads the whole corpus, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Load`](crate::domain::CinedexError::Load) when
    /// the source cannot be read or parsed.
    fn load_corpus(&self) -> Result<Vec<MovieRecord>>;

    /// Short description of the source for logs and responses.
    fn describe(&self) -> String;
}
