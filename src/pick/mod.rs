//! Declarative picking of typed values out of JSON documents
//!
//! A [`Config`] is an ordered list of [`Property`] rules, each a path, a type
//! tag and an optional alias. [`Picker`] evaluates a config against a
//! document and returns a flat [`Response`] keyed by property name, which
//! can then be decoded into caller types.

pub mod types;
pub mod path;
pub mod extractor;
pub mod response;
pub mod decode;

pub use types::{Config, MissingFieldPolicy, Property, Tag};
pub use path::{PropertyPath, Segment, PATH_SEPARATOR, ROOT_SENTINEL};
pub use extractor::{build_response, extract, parse_document, Picker};
pub use response::Response;
