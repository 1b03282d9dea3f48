//! Typed decoding of picked values
//!
//! Values are converted straight from the in-memory `serde_json::Value`
//! into the destination type; there is no serialize/parse hop in between.

use crate::error::{PickError, Result};
use crate::pick::extractor::Picker;
use crate::pick::response::Response;
use serde::de::DeserializeOwned;

impl Response {
    /// Decode the result named `name` into `T`
    pub fn decode<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self
            .get(name)
            .ok_or_else(|| PickError::PropertyNotFound(name.to_string()))?;
        T::deserialize(value).map_err(PickError::Decode)
    }

    /// Decode the whole response, treating it as one JSON object, into `T`
    pub fn decode_all<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(self.to_value()).map_err(PickError::Decode)
    }
}

impl Picker {
    /// Pick from `document` and decode the result named `name` into `T`
    pub fn pick_decoded<T: DeserializeOwned>(&self, document: &[u8], name: &str) -> Result<T> {
        self.pick(document)?.decode(name)
    }

    /// Pick from `document` and decode the whole response into `T`
    pub fn pick_decoded_all<T: DeserializeOwned>(&self, document: &[u8]) -> Result<T> {
        self.pick(document)?.decode_all()
    }
}
