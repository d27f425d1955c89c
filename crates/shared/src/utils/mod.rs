mod di;
mod errors;
mod logger;
mod metrics;
mod reference;
mod telemetry;
mod tracing_ctx;

pub use self::di::{DependenciesInject, Repositories};
pub use self::errors::{AppError, first_validation_message};
pub use self::logger::init_logger;
pub use self::metrics::{Method, MethodLabels, MethodStatusLabels, Metrics, Status};
pub use self::reference::generate_reference;
pub use self::telemetry::Telemetry;
pub use self::tracing_ctx::{OperationTracer, TracingContext};
