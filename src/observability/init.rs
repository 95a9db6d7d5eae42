//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "cinedex-otlp.json";

/// Filter used when `trace_level` is unset or unparsable.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Idempotent: only the first call on a thread's process installs a
/// subscriber. Observability is optional, so a data directory that cannot be
/// created leaves tracing disabled instead of failing the plugin.
///
/// # Example
///
/// ```no_run
/// use cinedex::observability::init_tracing;
/// use cinedex::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", "Cinedex")]);
    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);

    let tracer = provider.tracer(exporter::SCOPE_NAME);
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
