//! Background worker thread for catalog loading.
//!
//! Catalog I/O runs on Zellij's worker thread so the plugin UI never blocks.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::CatalogWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
