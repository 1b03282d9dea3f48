//! Property path resolution
//!
//! A path is a `/`-separated list of segments. Each segment is a field name,
//! an array index written as `[N]`, or the sentinel `.` which stays on the
//! current node. A path starting with `.` therefore addresses the document
//! root itself, which is how slice projections over a top-level array are
//! written (`./id`).

use crate::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;

pub const PATH_SEPARATOR: &str = "/";
pub const ROOT_SENTINEL: &str = ".";

static INDEX_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(\d+)\]$").unwrap());

/// One step of a property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `.`: do not descend
    Current,
    /// `[N]`: element N of an array
    Index(usize),
    /// Any other text: field of an object
    Field(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw == ROOT_SENTINEL {
            return Segment::Current;
        }
        INDEX_SEGMENT
            .captures(raw)
            .and_then(|caps| caps[1].parse().ok())
            .map(Segment::Index)
            .unwrap_or_else(|| Segment::Field(raw.to_string()))
    }

    fn step<'a>(&self, node: &'a Value) -> Option<&'a Value> {
        match (self, node) {
            (Segment::Current, _) => Some(node),
            (Segment::Index(i), Value::Array(items)) => items.get(*i),
            // `[N]` is also a legal object key
            (Segment::Index(i), Value::Object(obj)) => obj.get(&format!("[{}]", i)),
            (Segment::Field(name), Value::Object(obj)) => obj.get(name),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Current => f.write_str(ROOT_SENTINEL),
            Segment::Index(i) => write!(f, "[{}]", i),
            Segment::Field(name) => f.write_str(name),
        }
    }
}

/// A parsed property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<Segment>,
}

impl PropertyPath {
    pub fn parse(path: &str) -> Self {
        PropertyPath {
            segments: path.split(PATH_SEPARATOR).map(Segment::parse).collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when the path starts at the document root via the `.` sentinel
    pub fn is_rooted(&self) -> bool {
        matches!(self.segments.first(), Some(Segment::Current))
    }

    /// Split into the first `at` segments and the rest
    pub fn split_at(&self, at: usize) -> (PropertyPath, PropertyPath) {
        let (head, tail) = self.segments.split_at(at.min(self.segments.len()));
        (
            PropertyPath { segments: head.to_vec() },
            PropertyPath { segments: tail.to_vec() },
        )
    }

    /// Walk the path from `node`, returning the value it addresses
    pub fn resolve<'a>(&self, node: &'a Value) -> Result<&'a Value, ExtractError> {
        let mut current = node;
        for (depth, segment) in self.segments.iter().enumerate() {
            current = segment.step(current).ok_or_else(|| ExtractError::PathNotFound {
                path: self.prefix(depth + 1),
            })?;
        }
        tracing::trace!(path = %self, "resolved path");
        Ok(current)
    }

    fn prefix(&self, len: usize) -> String {
        PropertyPath {
            segments: self.segments[..len].to_vec(),
        }
        .to_string()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(PATH_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
