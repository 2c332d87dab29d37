//! Feature-gated cache counters (`--features metrics`).
//!
//! Recording, snapshotting and exporting are split into separate traits so
//! policy code only ever writes counters:
//!
//! ```text
//!   LruCache ──record_*──► LruMetrics ──snapshot──► LruMetricsSnapshot ──► MetricsExporter
//! ```

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
