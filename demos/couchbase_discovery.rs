/// Turning Couchbase REST documents into endpoints and averaged stats
use picker::couchbase::{bucket_names, sample_averages, stats_endpoints};

fn main() -> anyhow::Result<()> {
    let buckets_doc = br#"[{"name": "beer-sample"}, {"name": "travel-sample"}]"#;
    let buckets = bucket_names(buckets_doc)?;
    println!("Buckets: {:?}", buckets);

    let nodes_doc = br#"{
        "servers": [
            {"hostname": "10.0.0.1:8091", "stats": {"uri": "/pools/default/buckets/beer-sample/nodes/10.0.0.1%3A8091/stats"}}
        ]
    }"#;
    let endpoints = stats_endpoints(nodes_doc, &buckets[0])?;
    for endpoint in &endpoints {
        println!("{} on {} -> {}", endpoint.bucket, endpoint.node, endpoint.uri);
    }

    let stats_doc = br#"{"op": {"samples": {"cmd_get": [10, 20, 30], "mem_used": [1024, 2048]}}}"#;
    for endpoint in &endpoints {
        for sample in sample_averages(stats_doc, endpoint)? {
            println!(
                "{}@{} {:<10} {:?} {}",
                sample.bucket, sample.node, sample.name, sample.kind, sample.value
            );
        }
    }

    Ok(())
}
