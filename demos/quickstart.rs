/// Quickstart example - the simplest possible usage
use picker::{Config, Picker, Property, Tag};

fn main() -> anyhow::Result<()> {
    println!("=== Picker Quick Start ===\n");

    // Step 1: Your JSON data
    let document = br#"{
        "id": 1,
        "name": "alice",
        "height": 12.8,
        "address": {"country": "india", "pin": 600041},
        "posts": [
            {"id": 100, "title": "My First Post", "meta": {"likes": 3}},
            {"id": 101, "title": "Second Post"}
        ]
    }"#;

    // Step 2: Describe what to pick
    let config = Config::new(vec![
        Property::new("id", Tag::Int),
        Property::new("height", Tag::Float).with_alias("h"),
        Property::new("address", Tag::Object),
        Property::new("posts/title", Tag::SliceObject).with_alias("titles"),
        Property::new("posts/meta/likes", Tag::SliceObjectProperty),
    ]);
    println!("Config:\n{}\n", config.to_json());

    // Step 3: Pick
    let picker = Picker::new(config);
    let response = picker.pick(document)?;
    println!("Response:\n{}\n", response.to_json_pretty());

    // Step 4: Decode a single result into a Rust type
    let titles: Vec<String> = response.decode("titles")?;
    println!("Titles: {:?}", titles);

    Ok(())
}
