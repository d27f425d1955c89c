use prometheus_client::{
    encoding::{EncodeLabelSet, EncodeLabelValue},
    metrics::{
        counter::Counter,
        family::Family,
        histogram::{Histogram, exponential_buckets},
    },
};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct MethodLabels {
    pub method: Method,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct MethodStatusLabels {
    pub method: Method,
    pub status: Status,
}

#[derive(Debug, Clone)]
pub struct Metrics {
    pub request_counter: Family<MethodStatusLabels, Counter>,
    pub request_duration: Family<MethodLabels, Histogram>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.005, 2.0, 12))
            }),
        }
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        self.request_counter
            .get_or_create(&MethodStatusLabels { method, status })
            .inc();
        self.request_duration
            .get_or_create(&MethodLabels { method })
            .observe(duration_secs);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::{encoding::text::encode, registry::Registry};

    #[test]
    fn record_increments_labelled_counter() {
        let metrics = Metrics::new();
        metrics.record(Method::Get, Status::Success, 0.01);
        metrics.record(Method::Get, Status::Success, 0.02);
        metrics.record(Method::Post, Status::Error, 0.5);

        let ok = metrics
            .request_counter
            .get_or_create(&MethodStatusLabels {
                method: Method::Get,
                status: Status::Success,
            })
            .get();
        assert_eq!(ok, 2);

        let mut registry = Registry::default();
        registry.register(
            "test_request_counter",
            "requests",
            metrics.request_counter.clone(),
        );
        let mut buffer = String::new();
        encode(&mut buffer, &registry).unwrap();
        assert!(buffer.contains("method=\"Post\""));
        assert!(buffer.contains("status=\"Error\""));
    }
}
