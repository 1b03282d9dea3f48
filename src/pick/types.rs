use crate::error::{PickError, Result};
use crate::pick::path::PATH_SEPARATOR;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Type tag selecting the extraction algorithm for a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `i`: a single integer
    Int,
    /// `f`: a single number
    Float,
    /// `b`: a single boolean
    Bool,
    /// `s`: a single string
    String,
    /// `[i]`: array of integers
    IntArray,
    /// `[f]`: array of numbers
    FloatArray,
    /// `[b]`: array of booleans
    BoolArray,
    /// `[s]`: array of strings
    StringArray,
    /// `o`: an object subtree
    Object,
    /// `[o]`: array of objects
    ObjectArray,
    /// `[]o`: one field projected out of every element of an array of objects
    SliceObject,
    /// `[]op`: one field of a nested object projected out of every element
    SliceObjectProperty,
}

impl Tag {
    pub const ALL: [Tag; 12] = [
        Tag::Int,
        Tag::Float,
        Tag::Bool,
        Tag::String,
        Tag::IntArray,
        Tag::FloatArray,
        Tag::BoolArray,
        Tag::StringArray,
        Tag::Object,
        Tag::ObjectArray,
        Tag::SliceObject,
        Tag::SliceObjectProperty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Int => "i",
            Tag::Float => "f",
            Tag::Bool => "b",
            Tag::String => "s",
            Tag::IntArray => "[i]",
            Tag::FloatArray => "[f]",
            Tag::BoolArray => "[b]",
            Tag::StringArray => "[s]",
            Tag::Object => "o",
            Tag::ObjectArray => "[o]",
            Tag::SliceObject => "[]o",
            Tag::SliceObjectProperty => "[]op",
        }
    }
}

impl FromStr for Tag {
    type Err = PickError;

    fn from_str(s: &str) -> Result<Self> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| PickError::UnsupportedType(s.to_string()))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// What slice projections (`[]o`, `[]op`) do with elements lacking the field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    /// Skip the element
    #[default]
    Omit,
    /// Emit `null` in its place
    Null,
    /// Abort the evaluation
    Fail,
}

impl FromStr for MissingFieldPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "omit" => Ok(Self::Omit),
            "null" => Ok(Self::Null),
            "fail" => Ok(Self::Fail),
            _ => Err(format!(
                "Invalid missing field policy '{s}'. Valid policies are: omit, null, fail"
            )),
        }
    }
}

/// A single extraction rule: where to look, what to expect, what to call it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub path: String,

    #[serde(rename = "type")]
    pub tag: Tag,

    #[serde(default)]
    pub alias: Option<String>,
}

impl Property {
    pub fn new(path: impl Into<String>, tag: Tag) -> Self {
        Property {
            path: path.into(),
            tag,
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Key under which the picked value lands in the response
    pub fn name(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => self.path.rsplit(PATH_SEPARATOR).next().unwrap_or(&self.path),
        }
    }
}

/// Property as written in a config document, before the tag is checked
#[derive(Debug, Deserialize)]
struct RawProperty {
    path: String,
    #[serde(rename = "type")]
    tag: String,
    #[serde(default)]
    alias: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    properties: Vec<RawProperty>,
    #[serde(default)]
    missing_slice_field: MissingFieldPolicy,
}

/// Ordered set of properties evaluated against one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct Config {
    pub properties: Vec<Property>,

    /// Applies to every `[]o` and `[]op` property in the config
    pub missing_slice_field: MissingFieldPolicy,
}

impl Config {
    pub fn new(properties: Vec<Property>) -> Self {
        Config {
            properties,
            missing_slice_field: MissingFieldPolicy::default(),
        }
    }

    pub fn with_missing_slice_field(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing_slice_field = policy;
        self
    }

    /// Parse a JSON config, rejecting unknown type tags before any document is read
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawConfig =
            serde_json::from_str(json).map_err(|e| PickError::InvalidConfig(e.to_string()))?;
        Config::try_from(raw)
    }

    pub fn to_json(&self) -> String {
        // Serializing plain strings and enums cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = PickError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let properties = raw
            .properties
            .into_iter()
            .map(|p| {
                if p.path.is_empty() {
                    return Err(PickError::InvalidConfig(
                        "property path must not be empty".to_string(),
                    ));
                }
                Ok(Property {
                    tag: p.tag.parse()?,
                    path: p.path,
                    alias: p.alias,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Config {
            properties,
            missing_slice_field: raw.missing_slice_field,
        })
    }
}
