//! Catalog document models and their normalization.
//!
//! Two document shapes are accepted, plus a bare array:
//!
//! - **Denormalized**: every movie carries its studio, actor and tag names.
//! - **Relational**: movies, actors, tags and studios are separate tables
//!   joined by `movie_actors` / `movie_tags` link rows, the way the catalog's
//!   database exports them.
//!
//! Both are folded into [`MovieRecord`]s by [`CatalogDocument::into_records`]
//! before anything else sees them. Missing or malformed fields are tolerated
//! one by one: `null` names are dropped, a `"2021"` year is parsed, a value of
//! the wrong type counts as absent, and rows that cannot be read at all are
//! skipped. Link rows pointing at unknown movies, actors or tags are skipped.

use crate::domain::MovieRecord;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Identifier as found in catalog documents: integer or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Canonical text form, so `1` and `"1"` refer to the same row.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

/// A value that either parses as `T` or is skipped.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

impl<T> Lenient<T> {
    fn valid(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }
}

/// A `year` as found in the wild: number, numeric string, or junk.
#[derive(Deserialize)]
#[serde(untagged)]
enum YearValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl YearValue {
    fn year(self) -> Option<i32> {
        match self {
            Self::Integer(n) => i32::try_from(n).ok(),
            Self::Float(f) if f.fract() == 0.0 && f.abs() <= f64::from(i32::MAX) => {
                #[allow(clippy::cast_possible_truncation)]
                Some(f as i32)
            }
            Self::Text(text) => text.trim().parse().ok(),
            Self::Float(_) | Self::Other(_) => None,
        }
    }
}

/// Array of rows; entries that do not parse as `T` are skipped.
fn lenient_rows<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let rows = Vec::<Lenient<T>>::deserialize(deserializer)?;
    let total = rows.len();
    let kept: Vec<T> = rows.into_iter().filter_map(Lenient::valid).collect();
    if kept.len() < total {
        tracing::debug!(skipped = total - kept.len(), "skipped malformed rows");
    }
    Ok(kept)
}

/// Like [`lenient_rows`], but a `null` or non-array table counts as empty.
fn lenient_table<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let rows = Lenient::<Vec<Lenient<T>>>::deserialize(deserializer)?
        .valid()
        .unwrap_or_default();
    Ok(rows.into_iter().filter_map(Lenient::valid).collect())
}

/// Name list; `null`, empty and non-string entries are dropped.
fn lenient_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let names: Vec<String> = lenient_table(deserializer)?;
    Ok(names.into_iter().filter(|name| !name.is_empty()).collect())
}

/// Optional text; a value of any other type counts as missing.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Lenient::<String>::deserialize(deserializer)?.valid())
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(YearValue::deserialize(deserializer)?.year())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Lenient::<RecordId>::deserialize(deserializer)?.valid())
}

/// A top-level catalog document in any accepted shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogDocument {
    /// A bare array of denormalized movies. Tried first so an array is never
    /// read as one of the object shapes.
    Listing(#[serde(deserialize_with = "lenient_rows")] Vec<MovieEntry>),
    /// Tables plus link rows. Recognized by the presence of `movie_actors`.
    Relational(RelationalCatalog),
    /// `{"movies": [...]}` with names inline.
    Denormalized(DenormalizedCatalog),
}

impl CatalogDocument {
    /// Normalizes the document into records, in document order.
    #[must_use]
    pub fn into_records(self) -> Vec<MovieRecord> {
        match self {
            Self::Relational(catalog) => catalog.into_records(),
            Self::Denormalized(catalog) => entries_into_records(catalog.movies),
            Self::Listing(entries) => entries_into_records(entries),
        }
    }

    /// Name of the shape, for logging.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Relational(_) => "relational",
            Self::Denormalized(_) => "denormalized",
            Self::Listing(_) => "listing",
        }
    }
}

/// `{"movies": [...]}` with names inline.
#[derive(Debug, Clone, Deserialize)]
pub struct DenormalizedCatalog {
    #[serde(deserialize_with = "lenient_table")]
    pub movies: Vec<MovieEntry>,
}

/// One denormalized movie.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieEntry {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub studio: Option<String>,
    #[serde(default, alias = "url", deserialize_with = "lenient_text")]
    pub file_location: Option<String>,
    #[serde(default, alias = "actor_names", deserialize_with = "lenient_names")]
    pub actors: Vec<String>,
    #[serde(default, alias = "tag_names", deserialize_with = "lenient_names")]
    pub tags: Vec<String>,
}

/// Movies, lookup tables and link rows.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationalCatalog {
    #[serde(deserialize_with = "lenient_table")]
    pub movies: Vec<RelationalMovie>,
    #[serde(default, deserialize_with = "lenient_table")]
    pub actors: Vec<NamedRow>,
    #[serde(default, deserialize_with = "lenient_table")]
    pub tags: Vec<NamedRow>,
    #[serde(default, deserialize_with = "lenient_table")]
    pub studios: Vec<NamedRow>,
    #[serde(deserialize_with = "lenient_table")]
    pub movie_actors: Vec<MovieActorLink>,
    #[serde(default, deserialize_with = "lenient_table")]
    pub movie_tags: Vec<MovieTagLink>,
}

/// A movie row; the studio is a foreign key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelationalMovie {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub studio_id: Option<RecordId>,
    #[serde(default, alias = "file_location", deserialize_with = "lenient_text")]
    pub url: Option<String>,
}

/// A row of the actors, tags or studios table.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRow {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieActorLink {
    pub movie_id: RecordId,
    pub actor_id: RecordId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieTagLink {
    pub movie_id: RecordId,
    pub tag_id: RecordId,
}

/// Id used for records that have none, from their 1-based position.
fn synthesized_id(position: usize) -> String {
    format!("movie-{}", position + 1)
}

fn entries_into_records(entries: Vec<MovieEntry>) -> Vec<MovieRecord> {
    entries
        .into_iter()
        .enumerate()
        .map(|(position, entry)| MovieRecord {
            id: entry
                .id
                .map_or_else(|| synthesized_id(position), |id| id.key()),
            title: entry.title,
            year: entry.year,
            studio: entry.studio,
            file_location: entry.file_location,
            actor_names: entry.actors,
            tag_names: entry.tags,
        })
        .collect()
}

fn name_table(rows: &[NamedRow]) -> HashMap<String, String> {
    rows.iter()
        .filter_map(|row| Some((row.id.key(), row.name.clone()?)))
        .collect()
}

impl RelationalCatalog {
    /// Joins the tables into records. Link rows keep their document order
    /// within each movie.
    #[must_use]
    pub fn into_records(self) -> Vec<MovieRecord> {
        let actors = name_table(&self.actors);
        let tags = name_table(&self.tags);
        let studios = name_table(&self.studios);

        let mut records: Vec<MovieRecord> = Vec::with_capacity(self.movies.len());
        let mut position_by_id: HashMap<String, usize> = HashMap::new();

        for (position, movie) in self.movies.into_iter().enumerate() {
            let id = movie
                .id
                .as_ref()
                .map_or_else(|| synthesized_id(position), RecordId::key);
            position_by_id.entry(id.clone()).or_insert(position);

            records.push(MovieRecord {
                id,
                title: movie.title,
                year: movie.year,
                studio: movie
                    .studio_id
                    .and_then(|studio_id| studios.get(&studio_id.key()).cloned()),
                file_location: movie.url,
                actor_names: Vec::new(),
                tag_names: Vec::new(),
            });
        }

        let mut dangling = 0usize;

        for link in &self.movie_actors {
            let target = position_by_id.get(&link.movie_id.key());
            let name = actors.get(&link.actor_id.key());
            match (target, name) {
                (Some(&position), Some(name)) => records[position].actor_names.push(name.clone()),
                _ => dangling += 1,
            }
        }

        for link in &self.movie_tags {
            let target = position_by_id.get(&link.movie_id.key());
            let name = tags.get(&link.tag_id.key());
            match (target, name) {
                (Some(&position), Some(name)) => records[position].tag_names.push(name.clone()),
                _ => dangling += 1,
            }
        }

        if dangling > 0 {
            tracing::debug!(dangling, "skipped link rows without a matching movie, actor or tag");
        }

        records
    }
}
