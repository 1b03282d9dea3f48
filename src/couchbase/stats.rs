use crate::couchbase::discovery::StatsEndpoint;
use crate::error::{ErrorKind, Result};
use crate::pick::{build_response, parse_document, Config, Property, Tag};
use serde::Serialize;
use serde_json::Value;

/// Where the per-metric sample arrays live in a node stats document
pub const SAMPLES_PATH: &str = "op/samples";

/// How a metric is meant to be reported downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Gauge,
    Delta,
    Rate,
    Attribute,
}

/// Bucket stats collected from every node, with their reporting kind
pub const KNOWN_METRICS: &[(&str, MetricKind)] = &[
    ("cmd_get", MetricKind::Gauge),
    ("cmd_set", MetricKind::Gauge),
    ("delete_hits", MetricKind::Gauge),
    ("ep_cache_miss_rate", MetricKind::Gauge),
    ("couch_docs_fragmentation", MetricKind::Gauge),
    ("couch_views_fragmentation", MetricKind::Gauge),
    ("curr_connections", MetricKind::Gauge),
    ("ep_dcp_replica_items_remaining", MetricKind::Gauge),
    ("ep_dcp_2i_items_remaining", MetricKind::Gauge),
    ("ep_dcp_views_items_remaining", MetricKind::Gauge),
    ("ep_dcp_replica_backoff", MetricKind::Gauge),
    ("ep_dcp_xdcr_backoff", MetricKind::Gauge),
    ("vb_avg_total_queue_age", MetricKind::Gauge),
    ("ep_oom_errors", MetricKind::Gauge),
    ("ep_tmp_oom_errors", MetricKind::Gauge),
    ("vb_active_resident_items_ratio", MetricKind::Gauge),
    ("vb_replica_resident_items_ratio", MetricKind::Gauge),
    // quota utilization = mem_used / ep_mem_high_wat
    ("mem_used", MetricKind::Gauge),
    ("ep_mem_high_wat", MetricKind::Gauge),
    // metadata utilization = ep_meta_data_memory / ep_mem_high_wat
    ("ep_meta_data_memory", MetricKind::Gauge),
    // disk write queue = ep_queue_size + ep_flusher_todo
    ("ep_queue_size", MetricKind::Gauge),
    ("ep_flusher_todo", MetricKind::Gauge),
    ("incr_misses", MetricKind::Gauge),
    ("incr_hits", MetricKind::Gauge),
    ("decr_misses", MetricKind::Gauge),
    ("decr_hits", MetricKind::Gauge),
    ("delete_misses", MetricKind::Gauge),
];

/// Averaged value of one metric over the samples a node reported for a bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSample {
    pub bucket: String,
    pub node: String,
    pub name: &'static str,
    pub kind: MetricKind,
    pub value: f64,
}

pub fn average(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

fn samples_of(document: &Value, metric: &str) -> Result<Vec<f64>> {
    let config = Config::new(vec![Property::new(
        format!("{}/{}", SAMPLES_PATH, metric),
        Tag::FloatArray,
    )]);
    build_response(document, &config)?.decode(metric)
}

/// Average every [`KNOWN_METRICS`] entry over its samples, in table order
///
/// `document` is the stats document fetched from `endpoint`; each sample is
/// tagged with the endpoint's bucket and node. Metrics the document does not
/// carry, or carries with no samples, are skipped. Any other failure aborts.
pub fn sample_averages(document: &[u8], endpoint: &StatsEndpoint) -> Result<Vec<MetricSample>> {
    let document = parse_document(document)?;
    let mut averages = Vec::with_capacity(KNOWN_METRICS.len());

    for &(name, kind) in KNOWN_METRICS {
        let samples = match samples_of(&document, name) {
            Ok(samples) => samples,
            Err(err) if err.kind() == ErrorKind::PathNotFound => {
                tracing::warn!(
                    bucket = %endpoint.bucket,
                    node = %endpoint.node,
                    metric = name,
                    "metric not present in stats document"
                );
                continue;
            }
            Err(err) => return Err(err),
        };

        match average(&samples) {
            Some(value) => averages.push(MetricSample {
                bucket: endpoint.bucket.clone(),
                node: endpoint.node.clone(),
                name,
                kind,
                value,
            }),
            None => tracing::warn!(
                bucket = %endpoint.bucket,
                node = %endpoint.node,
                metric = name,
                "metric has no samples"
            ),
        }
    }

    Ok(averages)
}
