//! Couchbase REST helpers built on the picker
//!
//! Turns the documents returned by a Couchbase cluster's REST API into plain
//! Rust values: bucket names, per-node stats endpoints and averaged stats
//! samples. Fetching the documents is left to the caller.

pub mod discovery;
pub mod stats;

pub use discovery::{bucket_names, explicit_node_endpoints, stats_endpoints, StatsEndpoint};
pub use stats::{sample_averages, MetricKind, MetricSample, KNOWN_METRICS};
