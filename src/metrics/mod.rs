//! Hit/miss/eviction counters for [`AppCache`](crate::AppCache).
//!
//! Compiled only with the `metrics` feature. Counters are plain `u64`s owned by
//! the cache core and updated while the cache guard is held, so recording needs
//! no atomics. Consumers read them through [`CacheMetricsSnapshot`] and can
//! publish them with [`PrometheusTextExporter`].

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::CacheMetrics;
pub use snapshot::CacheMetricsSnapshot;
pub use traits::{CoreMetricsRecorder, MetricsExporter, MetricsSnapshotProvider};
