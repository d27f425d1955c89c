use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber: human readable console output plus a JSON
/// log file under `logs/` that rolls over daily.
///
/// The returned guard flushes the file writer when dropped, so keep it alive
/// for the lifetime of the process.
pub fn init_logger(service_name: &str) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", format!("{service_name}.log"));
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer().with_target(true);

    let file_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_writer(file_writer);

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Logger already initialized: {e}");
    }

    guard
}
