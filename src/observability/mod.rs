// Observability: metrics counters and the Prometheus exporter

pub mod metrics;
