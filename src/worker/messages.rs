//! Worker thread message types for cross-thread communication.
//!
//! Requests go from the plugin to the background worker that reads the
//! catalog; responses come back with the normalized corpus or a load error.
//! Messages carry an optional [`TraceContext`] so worker spans join the
//! plugin's trace.

use crate::domain::{CinedexError, MovieRecord, Result};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the active span.
    ///
    /// Returns `None` when no valid OpenTelemetry context is active (for
    /// example when tracing was never initialized).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Messages sent from the plugin to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read and normalize the catalog document at `path`.
    LoadCatalog {
        /// Sandbox path of the catalog document.
        path: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Creates a `LoadCatalog` message carrying the current trace context.
    pub fn load_catalog(path: impl Into<String>) -> Self {
        Self::LoadCatalog {
            path: path.into(),
            trace_context: TraceContext::from_current(),
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadCatalog { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Serializes the message for `post_message_to`.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Worker`] if serialization fails.
    pub fn to_payload(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| CinedexError::Worker(format!("failed to serialize worker message: {e}")))
    }

    /// Parses a payload received by the worker.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Worker`] if the payload is not a valid message.
    pub fn from_payload(payload: &str) -> Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| CinedexError::Worker(format!("failed to deserialize worker message: {e}")))
    }
}

/// Responses sent from the worker back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The catalog was read and normalized.
    CatalogLoaded {
        /// Normalized records in document order.
        movies: Vec<MovieRecord>,

        /// Path the catalog was read from.
        source: String,
    },

    /// The catalog could not be read or parsed.
    LoadFailed {
        /// Human-readable error message.
        message: String,
    },
}

impl WorkerResponse {
    /// Serializes the response for `post_message_to_plugin`.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Worker`] if serialization fails.
    pub fn to_payload(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| CinedexError::Worker(format!("failed to serialize worker response: {e}")))
    }

    /// Parses a payload received by the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Worker`] if the payload is not a valid response.
    pub fn from_payload(payload: &str) -> Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| CinedexError::Worker(format!("failed to deserialize worker response: {e}")))
    }
}
