//! Worker thread implementation for catalog loading.
//!
//! Reading and normalizing the catalog document happens on a Zellij worker
//! thread so a large file never blocks the plugin's render loop. Requests
//! carry a trace context so the worker's spans join the plugin's trace.

use crate::domain::MovieRecord;
use crate::storage::{CatalogSource, JsonCatalog};
use crate::worker::{TraceContext, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Stateless between messages: every `LoadCatalog` reads the document again,
/// which is what a reload means.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CatalogWorker {
    /// Number of loads served, for logging.
    #[serde(skip)]
    loads: u64,
}

impl CatalogWorker {
    /// Loads a corpus from any source and wraps the outcome in a response.
    pub fn load_from(&mut self, source: &dyn CatalogSource) -> WorkerResponse {
        self.loads += 1;
        let description = source.describe();

        match source.load_corpus() {
            Ok(movies) => {
                tracing::debug!(
                    source = %description,
                    movies = movies.len(),
                    load = self.loads,
                    "catalog loaded"
                );
                WorkerResponse::CatalogLoaded {
                    movies,
                    source: description,
                }
            }
            Err(e) => {
                tracing::warn!(source = %description, error = %e, "catalog load failed");
                WorkerResponse::LoadFailed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(trace_context: Option<&TraceContext>) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = trace_context?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(message.trace_context());

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadCatalog { path, .. } => self.load_from(&JsonCatalog::new(path)),
        }
    }
}

/// Initializes tracing for the worker thread with the default configuration,
/// so worker spans land in the same trace file as the plugin's.
fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    let config = Config::default();
    observability::init_tracing(&config);
}

static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for CatalogWorker {
    /// Handles a message from the plugin thread and posts the response back
    /// under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        let response = match WorkerMessage::from_payload(&payload) {
            Ok(worker_message) => self.handle_message(worker_message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::LoadFailed {
                    message: e.to_string(),
                }
            }
        };

        match response.to_payload() {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
        }
    }
}

/// Records in a response, for callers that only care about success.
#[must_use]
pub fn loaded_movies(response: &WorkerResponse) -> Option<&[MovieRecord]> {
    match response {
        WorkerResponse::CatalogLoaded { movies, .. } => Some(movies),
        WorkerResponse::LoadFailed { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CinedexError, Result};
    use std::io::Write;

    struct FixedSource(Vec<MovieRecord>);

    impl CatalogSource for FixedSource {
        fn load_corpus(&self) -> Result<Vec<MovieRecord>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    struct BrokenSource;

    impl CatalogSource for BrokenSource {
        fn load_corpus(&self) -> Result<Vec<MovieRecord>> {
            Err(CinedexError::Load("disk on fire".to_string()))
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    #[test]
    fn successful_load_carries_movies_and_source() {
        let mut worker = CatalogWorker::default();
        let response = worker.load_from(&FixedSource(vec![MovieRecord::new("1", "Heat")]));

        assert_eq!(loaded_movies(&response).map(<[MovieRecord]>::len), Some(1));
        assert!(matches!(response, WorkerResponse::CatalogLoaded { ref source, .. } if source == "fixed"));
    }

    #[test]
    fn failed_load_becomes_load_failed_response() {
        let mut worker = CatalogWorker::default();
        let response = worker.load_from(&BrokenSource);
        assert_eq!(
            response,
            WorkerResponse::LoadFailed {
                message: "Catalog load error: disk on fire".to_string()
            }
        );
    }

    #[test]
    fn load_catalog_message_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"id": 1, "title": "Dune", "actors": ["A"]}]"#)
            .unwrap();

        let mut worker = CatalogWorker::default();
        let response = worker.handle_message(WorkerMessage::LoadCatalog {
            path: file.path().display().to_string(),
            trace_context: None,
        });

        let movies = loaded_movies(&response).unwrap();
        assert_eq!(movies[0].actor_names, vec!["A"]);
    }

    #[test]
    fn malformed_trace_context_is_ignored() {
        let mut worker = CatalogWorker::default();
        let response = worker.handle_message(WorkerMessage::LoadCatalog {
            path: "/nonexistent/catalog.json".to_string(),
            trace_context: Some(TraceContext {
                trace_id: "not-hex".to_string(),
                parent_span_id: "zz".to_string(),
            }),
        });
        assert!(matches!(response, WorkerResponse::LoadFailed { .. }));
    }
}
