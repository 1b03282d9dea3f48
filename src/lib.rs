//! # Picker - declarative value extraction for JSON
//!
//! Describe *what* to pull out of a nested, array-heavy JSON document as a
//! list of path + type rules, and get back a flat set of named results.
//!
//! ## Modules
//!
//! - **pick**: the extraction engine (config model, path resolution,
//!   per-type extraction, response, typed decoding)
//! - **couchbase**: helpers that use the engine on Couchbase REST documents
//!   (bucket and node discovery, stats sample averaging)
//!
//! ## Type tags
//!
//! | Tag | Picks |
//! |---|---|
//! | `i` `f` `b` `s` | a single integer, number, boolean or string |
//! | `[i]` `[f]` `[b]` `[s]` | an array of those |
//! | `o` / `[o]` | an object / an array of objects |
//! | `[]o` | `a/b`: field `b` of every object in array `a` |
//! | `[]op` | `a/b/c`: field `c` of object `b` of every object in array `a` |
//!
//! A path starting with `.` addresses the document root, so `./id` with `[]op`
//! picks `id` out of every element of a top-level array.
//!
//! ## Quick Start
//!
//! ```rust
//! use picker::{Config, Picker, Property, Tag};
//!
//! # fn main() -> picker::Result<()> {
//! let config = Config::new(vec![
//!     Property::new("id", Tag::Int),
//!     Property::new("height", Tag::Float).with_alias("h"),
//!     Property::new("array/test/id", Tag::SliceObjectProperty).with_alias("ids"),
//! ]);
//!
//! let document = br#"{
//!     "id": 1,
//!     "height": 12.8,
//!     "array": [{"test": {"id": 1}}, {"test": {"id": 2}}]
//! }"#;
//!
//! let response = Picker::new(config).pick(document)?;
//! assert_eq!(response.get("id").unwrap(), 1);
//! assert_eq!(response.get("h").unwrap(), 12.8);
//!
//! let ids: Vec<i64> = response.decode("ids")?;
//! assert_eq!(ids, vec![1, 2]);
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;

pub mod couchbase;
pub mod error;
pub mod pick;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, ExtractError, PickError, Result};
pub use pick::{Config, MissingFieldPolicy, Picker, Property, PropertyPath, Response, Tag};

/// Main entry point: evaluate `config` against raw document bytes
pub fn pick(document: &[u8], config: &Config) -> Result<Response> {
    let value = pick::parse_document(document)?;
    pick::build_response(&value, config)
}

/// Like [`pick`], with the config given as JSON text
///
/// The config is parsed and validated before the document is looked at.
pub fn pick_with_json_config(document: &[u8], config_json: &str) -> Result<Response> {
    let config = Config::from_json(config_json)?;
    pick(document, &config)
}

/// Evaluate `config` and decode into `T`
///
/// With a `name`, only that result is decoded; without one the whole
/// response is decoded as a single object.
pub fn pick_decoded<T: DeserializeOwned>(
    document: &[u8],
    config: &Config,
    name: Option<&str>,
) -> Result<T> {
    let response = pick(document, config)?;
    match name {
        Some(name) => response.decode(name),
        None => response.decode_all(),
    }
}

/// Like [`pick_decoded`], with the config given as JSON text
pub fn pick_decoded_with_json_config<T: DeserializeOwned>(
    document: &[u8],
    config_json: &str,
    name: Option<&str>,
) -> Result<T> {
    let config = Config::from_json(config_json)?;
    pick_decoded(document, &config, name)
}
