//! Catalog documents on disk, loaded the way the worker loads them.

use cinedex::catalog::{Catalog, CreditCounting};
use cinedex::storage::{CatalogSource, JsonCatalog};
use cinedex::worker::{CatalogWorker, WorkerMessage, WorkerResponse};
use cinedex::ActorSummary;
use std::io::Write;

const DENORMALIZED: &str = r#"{
    "movies": [
        {"id": 1, "title": "Dune", "year": 2021, "studio": "Legendary",
         "actors": ["A", "B"], "tags": ["scifi"]},
        {"id": 2, "title": "Heat", "year": 1995, "url": "/media/heat.mkv",
         "actors": ["A"], "tags": ["crime"]}
    ]
}"#;

const RELATIONAL: &str = r#"{
    "movies": [
        {"id": 1, "title": "Dune", "year": 2021, "studio_id": 1},
        {"id": 2, "title": "Heat", "year": 1995, "url": "/media/heat.mkv"}
    ],
    "actors": [{"id": 10, "name": "A"}, {"id": 11, "name": "B"}],
    "tags": [{"id": 20, "name": "scifi"}, {"id": 21, "name": "crime"}],
    "studios": [{"id": 1, "name": "Legendary"}],
    "movie_actors": [
        {"movie_id": 1, "actor_id": 10},
        {"movie_id": 1, "actor_id": 11},
        {"movie_id": 2, "actor_id": 10}
    ],
    "movie_tags": [
        {"movie_id": 1, "tag_id": 20},
        {"movie_id": 2, "tag_id": 21}
    ]
}"#;

fn write_catalog(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn both_shapes_normalize_to_the_same_records() {
    let denormalized = write_catalog(DENORMALIZED);
    let relational = write_catalog(RELATIONAL);

    let from_denormalized = JsonCatalog::new(denormalized.path()).load_corpus().unwrap();
    let from_relational = JsonCatalog::new(relational.path()).load_corpus().unwrap();

    assert_eq!(from_denormalized, from_relational);
    assert_eq!(from_relational[0].studio.as_deref(), Some("Legendary"));
    assert_eq!(from_relational[1].playable_location(), Some("/media/heat.mkv"));
}

#[test]
fn loaded_corpus_builds_actor_directory() {
    let file = write_catalog(RELATIONAL);
    let records = JsonCatalog::new(file.path()).load_corpus().unwrap();
    let catalog = Catalog::new(records, CreditCounting::EveryCredit);

    assert_eq!(
        catalog.actors(),
        &[ActorSummary::new("A", 2), ActorSummary::new("B", 1)]
    );
    let heat: Vec<_> = catalog
        .filter_by_search("  CRIME ")
        .unwrap()
        .iter()
        .map(|movie| movie.id.clone())
        .collect();
    assert_eq!(heat, vec!["2"]);
}

#[test]
fn worker_round_trip_through_payloads() {
    let file = write_catalog(DENORMALIZED);
    let message = WorkerMessage::load_catalog(file.path().display().to_string());
    let payload = message.to_payload().unwrap();

    let mut worker = CatalogWorker::default();
    let response = worker.handle_message(WorkerMessage::from_payload(&payload).unwrap());
    let echoed = WorkerResponse::from_payload(&response.to_payload().unwrap()).unwrap();

    match echoed {
        WorkerResponse::CatalogLoaded { movies, source } => {
            assert_eq!(movies.len(), 2);
            assert_eq!(source, file.path().display().to_string());
        }
        WorkerResponse::LoadFailed { message } => panic!("unexpected failure: {message}"),
    }
}

#[test]
fn missing_catalog_reports_load_failed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");

    let mut worker = CatalogWorker::default();
    let response = worker.handle_message(WorkerMessage::load_catalog(path.display().to_string()));

    assert!(
        matches!(response, WorkerResponse::LoadFailed { ref message } if message.contains("catalog.json"))
    );
}
