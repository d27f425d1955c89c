use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

use super::{Method, Metrics, Status};

pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

/// Span and metric bookkeeping shared by every service operation.
#[derive(Clone)]
pub struct OperationTracer {
    tracer_name: String,
    metrics: Arc<Mutex<Metrics>>,
}

impl OperationTracer {
    /// `service` is the snake_case service name, e.g. `deposit_service`. It
    /// prefixes the registered metric names and, dash separated, names the
    /// tracer.
    pub fn register(service: &str, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();

        registry.register(
            format!("{service}_request_counter"),
            format!("Total number of requests to the {service}"),
            metrics.request_counter.clone(),
        );
        registry.register(
            format!("{service}_request_duration"),
            format!("Histogram of request durations for the {service}"),
            metrics.request_duration.clone(),
        );

        Self {
            tracer_name: service.replace('_', "-"),
            metrics: Arc::new(Mutex::new(metrics)),
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer(self.tracer_name.clone())
    }

    pub fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    pub async fn complete_tracing_success(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, true, message)
            .await;
    }

    pub async fn complete_tracing_error(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        error_message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, false, error_message)
            .await;
    }

    async fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            Status::Success
        } else {
            Status::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("Operation completed successfully: {message}");
        } else {
            error!("Operation failed: {message}");
        }

        self.metrics.lock().await.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}
