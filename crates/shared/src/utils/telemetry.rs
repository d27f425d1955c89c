use anyhow::{Context, Result};
use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use tracing::info;

pub struct Telemetry {
    service_name: String,
    otlp_endpoint: Option<String>,
    stdout: bool,
}

impl Telemetry {
    pub fn new(service_name: impl Into<String>, otlp_endpoint: Option<String>, stdout: bool) -> Self {
        Self {
            service_name: service_name.into(),
            otlp_endpoint,
            stdout,
        }
    }

    fn resource(&self) -> Resource {
        Resource::builder()
            .with_service_name(self.service_name.clone())
            .build()
    }

    /// Builds and installs the global tracer provider.
    ///
    /// Spans go to the OTLP collector when an endpoint is configured, to
    /// stdout when requested, and are dropped otherwise.
    pub fn init_tracer(&self) -> Result<SdkTracerProvider> {
        let mut builder = SdkTracerProvider::builder().with_resource(self.resource());

        if let Some(endpoint) = &self.otlp_endpoint {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint.clone())
                .build()
                .context("Failed to build OTLP span exporter")?;

            builder = builder.with_batch_exporter(exporter);
            info!("Exporting traces to {endpoint}");
        }

        if self.stdout {
            builder = builder.with_simple_exporter(opentelemetry_stdout::SpanExporter::default());
        }

        let provider = builder.build();
        global::set_tracer_provider(provider.clone());

        Ok(provider)
    }
}
