//! Observability & Logging Config

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Console logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Base level of the default filter, which holds transport crates such as `sqlx` and
    /// `hyper` at `warn`. A `RUST_LOG` filter replaces it outright.
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// `compact` for terminals, `json` for log shippers.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Trace export and slow-request settings for the JSON API.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export `http.request` spans, with their `request_id` and `tenant_slug` fields and the
    /// per-handler `widgets.*` child spans, to an OTLP collector.
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// Continue the caller's trace when a request carries a `traceparent` header, instead of
    /// starting a new root span per request.
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// Collector the request spans are pushed to over OTLP gRPC.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_exporter_otlp_endpoint: String,

    /// Seconds a span batch export may take before it is dropped.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3u64
    )]
    pub otel_exporter_otlp_timeout_seconds: u64,

    /// `service.name` resource attribute on every exported span.
    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "tessera-json")]
    pub otel_service_name: String,

    /// `service.version` resource attribute, the crate version unless overridden.
    #[arg(
        long,
        env = "OTEL_SERVICE_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub otel_service_version: String,

    /// `deployment.environment.name` resource attribute on every exported span.
    #[arg(
        long,
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub otel_deployment_environment: String,

    /// Share of request traces exported, in range [0.0, 1.0].
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0_f64)]
    pub otel_trace_sample_ratio: f64,

    /// Requests slower than this many milliseconds log a `warn` inside their request span.
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}
