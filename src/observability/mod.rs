//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → OTLP JSON lines
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: Traces written to `~/.local/share/zellij/cinedex/cinedex-otlp.json`
//! - **Rotation**: The file rotates at 10MB into `.1`, `.2`, `.3` backups
//! - **OTLP Format**: One OpenTelemetry Protocol JSON document per exported batch
//!
//! # Configuration
//!
//! The filter comes from the `trace_level` plugin option (default `"info"`),
//! in `EnvFilter` syntax, so `"cinedex=debug"` works too.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and OTLP JSON formatting
//! - [`rotation`]: Size-rotated trace file

mod exporter;
mod init;
mod rotation;

pub use init::{init_tracing, TRACE_FILE_NAME};
