use crate::error::Result;
use crate::pick::{Config, Property, Tag};
use serde::{Deserialize, Serialize};

/// REST path listing every bucket of the default pool
pub const BUCKETS_URI: &str = "/pools/default/buckets";

/// Stats URI of one bucket on one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsEndpoint {
    pub uri: String,
    pub bucket: String,
    pub node: String,
}

/// REST path listing the nodes serving `bucket`
pub fn bucket_nodes_uri(bucket: &str) -> String {
    format!("{}/{}/nodes", BUCKETS_URI, bucket)
}

/// REST path of the stats of `bucket` on `node`
pub fn node_stats_uri(bucket: &str, node: &str) -> String {
    format!("{}/{}/nodes/{}/stats", BUCKETS_URI, bucket, node)
}

/// Names of all buckets in a [`BUCKETS_URI`] document
pub fn bucket_names(document: &[u8]) -> Result<Vec<String>> {
    let config = Config::new(vec![Property::new("./name", Tag::SliceObjectProperty)]);
    crate::pick_decoded(document, &config, Some("name"))
}

#[derive(Debug, Deserialize)]
struct NodeListing {
    #[serde(rename = "hostNames")]
    host_names: Vec<String>,
    #[serde(rename = "statsUris")]
    stats_uris: Vec<String>,
}

/// Stats endpoints of every node listed in a [`bucket_nodes_uri`] document
///
/// Hostnames and stats URIs are paired by position; servers missing either
/// one are dropped from the end of the shorter list.
pub fn stats_endpoints(document: &[u8], bucket: &str) -> Result<Vec<StatsEndpoint>> {
    let config = Config::new(vec![
        Property::new("servers/hostname", Tag::SliceObject).with_alias("hostNames"),
        Property::new("servers/stats/uri", Tag::SliceObjectProperty).with_alias("statsUris"),
    ]);
    let listing: NodeListing = crate::pick_decoded(document, &config, None)?;

    if listing.host_names.len() != listing.stats_uris.len() {
        tracing::warn!(
            bucket,
            hosts = listing.host_names.len(),
            uris = listing.stats_uris.len(),
            "node listing has unpaired entries"
        );
    }

    Ok(listing
        .host_names
        .into_iter()
        .zip(listing.stats_uris)
        .map(|(node, uri)| StatsEndpoint {
            uri,
            bucket: bucket.to_string(),
            node,
        })
        .collect())
}

/// Stats endpoints for a single, explicitly named node across `buckets`
pub fn explicit_node_endpoints(buckets: &[String], node: &str) -> Vec<StatsEndpoint> {
    buckets
        .iter()
        .map(|bucket| StatsEndpoint {
            uri: node_stats_uri(bucket, node),
            bucket: bucket.clone(),
            node: node.to_string(),
        })
        .collect()
}
