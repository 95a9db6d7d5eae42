//! Domain layer for the Cinedex plugin.
//!
//! Core types independent of Zellij APIs and of the catalog document format.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie records and actor summaries
//!
//! # Examples
//!
//! ```
//! use cinedex::domain::{MovieRecord, Result};
//!
//! fn first_movie() -> Result<MovieRecord> {
//!     Ok(MovieRecord::new("1", "Heat").with_actors(["Al Pacino"]))
//! }
//! # assert!(first_movie().is_ok());
//! ```

pub mod error;
pub mod movie;

pub use error::{CinedexError, Result};
pub use movie::{ActorSummary, MovieRecord, UNTITLED};
