//! Logging and trace export setup

use anyhow::{Context, Result};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{LogExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

const SERVICE_NAME: &str = "travelguide";

/// Flushes and shuts down the exporters when dropped
#[must_use = "dropping the guard stops trace export"]
#[derive(Default)]
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
    logger_provider: Option<SdkLoggerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Failed to shut down tracer provider: {e}");
        }
        if let Some(provider) = self.logger_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Failed to shut down logger provider: {e}");
        }
    }
}

/// Signal URL below an OTLP/HTTP collector base, e.g. `.../v1/traces`
fn signal_endpoint(base: &str, signal: &str) -> String {
    format!("{}/v1/{signal}", base.trim_end_matches('/'))
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level. When an OTLP endpoint is
/// configured, spans and log events are exported there as well.
pub fn init(config: &LoggingConfig) -> Result<TelemetryGuard> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let fmt_layer = match config.format.as_str() {
        "json" => tracing_subscriber::fmt::layer().json().boxed(),
        _ => tracing_subscriber::fmt::layer().pretty().boxed(),
    };

    let mut guard = TelemetryGuard::default();
    let (trace_layer, log_layer) = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => {
            let resource = Resource::builder().with_service_name(SERVICE_NAME).build();

            let span_exporter = SpanExporter::builder()
                .with_http()
                .with_endpoint(signal_endpoint(endpoint, "traces"))
                .build()
                .context("Failed to build OTLP span exporter")?;
            let tracer_provider = SdkTracerProvider::builder()
                .with_batch_exporter(span_exporter)
                .with_resource(resource.clone())
                .build();
            let tracer = tracer_provider.tracer(SERVICE_NAME);
            opentelemetry::global::set_tracer_provider(tracer_provider.clone());

            let log_exporter = LogExporter::builder()
                .with_http()
                .with_endpoint(signal_endpoint(endpoint, "logs"))
                .build()
                .context("Failed to build OTLP log exporter")?;
            let logger_provider = SdkLoggerProvider::builder()
                .with_batch_exporter(log_exporter)
                .with_resource(resource)
                .build();

            // exporter internals would otherwise feed back into the exporter
            let bridge_filter = EnvFilter::new(&config.level)
                .add_directive("opentelemetry=off".parse()?)
                .add_directive("reqwest=off".parse()?)
                .add_directive("hyper=off".parse()?);
            let log_layer =
                OpenTelemetryTracingBridge::new(&logger_provider).with_filter(bridge_filter);

            guard.tracer_provider = Some(tracer_provider);
            guard.logger_provider = Some(logger_provider);
            (
                Some(tracing_opentelemetry::layer().with_tracer(tracer)),
                Some(log_layer),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(trace_layer)
        .with(log_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(endpoint) = &config.otlp_endpoint {
        tracing::info!("Exporting traces and logs to {}", endpoint);
    }

    Ok(guard)
}
