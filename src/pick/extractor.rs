use crate::error::{ExtractError, PickError, Result};
use crate::pick::path::PropertyPath;
use crate::pick::response::Response;
use crate::pick::types::{Config, MissingFieldPolicy, Property, Tag};
use serde_json::{Number, Value};

/// Evaluates a config against JSON documents
///
/// A `Picker` holds no state besides its config, so one instance can be
/// shared across threads and reused for any number of documents.
#[derive(Debug, Clone)]
pub struct Picker {
    config: Config,
}

impl Picker {
    pub fn new(config: Config) -> Self {
        Picker { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse `document` and pick every configured property out of it
    pub fn pick(&self, document: &[u8]) -> Result<Response> {
        let value = parse_document(document)?;
        self.pick_value(&value)
    }

    /// Pick every configured property out of an already parsed document
    pub fn pick_value(&self, document: &Value) -> Result<Response> {
        build_response(document, &self.config)
    }
}

pub fn parse_document(document: &[u8]) -> Result<Value> {
    serde_json::from_slice(document).map_err(PickError::InvalidDocument)
}

/// Run every property in order; the first failure aborts the whole evaluation
pub fn build_response(document: &Value, config: &Config) -> Result<Response> {
    let mut response = Response::new();

    for property in &config.properties {
        let value = extract(document, property, config.missing_slice_field).map_err(|source| {
            PickError::Property {
                name: property.name().to_string(),
                source,
            }
        })?;

        tracing::debug!(
            property = property.name(),
            path = %property.path,
            tag = %property.tag,
            "picked property"
        );
        response.insert(property.name(), value);
    }

    Ok(response)
}

/// Extract a single property's value from `document`
pub fn extract(
    document: &Value,
    property: &Property,
    policy: MissingFieldPolicy,
) -> std::result::Result<Value, ExtractError> {
    let path = PropertyPath::parse(&property.path);

    match property.tag {
        Tag::Int => extract_scalar(document, &path, ScalarKind::Int),
        Tag::Float => extract_scalar(document, &path, ScalarKind::Float),
        Tag::Bool => extract_scalar(document, &path, ScalarKind::Bool),
        Tag::String => extract_scalar(document, &path, ScalarKind::String),
        Tag::IntArray => extract_scalar_array(document, &path, ScalarKind::Int),
        Tag::FloatArray => extract_scalar_array(document, &path, ScalarKind::Float),
        Tag::BoolArray => extract_scalar_array(document, &path, ScalarKind::Bool),
        Tag::StringArray => extract_scalar_array(document, &path, ScalarKind::String),
        Tag::Object => extract_object(document, &path),
        Tag::ObjectArray => extract_object_array(document, &path),
        Tag::SliceObject => extract_slice(document, &path, 1, policy),
        Tag::SliceObjectProperty => extract_slice(document, &path, 2, policy),
    }
}

/// Scalar shapes a value can be converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScalarKind {
    Int,
    Float,
    Bool,
    String,
}

impl ScalarKind {
    fn convert(self, value: &Value) -> Option<Value> {
        match self {
            ScalarKind::Int => value.as_i64().map(Value::from),
            ScalarKind::Float => value
                .as_f64()
                .and_then(Number::from_f64)
                .map(Value::Number),
            ScalarKind::Bool => value.as_bool().map(Value::Bool),
            ScalarKind::String => value.as_str().map(|s| Value::String(s.to_string())),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            ScalarKind::Int => "integer",
            ScalarKind::Float => "number",
            ScalarKind::Bool => "boolean",
            ScalarKind::String => "string",
        }
    }

    fn expected_array(self) -> &'static str {
        match self {
            ScalarKind::Int => "array of integers",
            ScalarKind::Float => "array of numbers",
            ScalarKind::Bool => "array of booleans",
            ScalarKind::String => "array of strings",
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(path: impl ToString, expected: &'static str, found: &Value) -> ExtractError {
    ExtractError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: type_name(found),
    }
}

fn extract_scalar(
    document: &Value,
    path: &PropertyPath,
    kind: ScalarKind,
) -> std::result::Result<Value, ExtractError> {
    let value = path.resolve(document)?;
    kind.convert(value)
        .ok_or_else(|| mismatch(path, kind.expected(), value))
}

fn extract_scalar_array(
    document: &Value,
    path: &PropertyPath,
    kind: ScalarKind,
) -> std::result::Result<Value, ExtractError> {
    let value = path.resolve(document)?;
    let Value::Array(items) = value else {
        return Err(mismatch(path, kind.expected_array(), value));
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            kind.convert(item)
                .ok_or_else(|| mismatch(format!("{}/[{}]", path, idx), kind.expected(), item))
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn extract_object(document: &Value, path: &PropertyPath) -> std::result::Result<Value, ExtractError> {
    let value = path.resolve(document)?;
    match value {
        Value::Object(_) => Ok(value.clone()),
        _ => Err(mismatch(path, "object", value)),
    }
}

fn object_elements<'a>(
    document: &'a Value,
    path: &PropertyPath,
) -> std::result::Result<&'a [Value], ExtractError> {
    let value = path.resolve(document)?;
    let Value::Array(items) = value else {
        return Err(mismatch(path, "array of objects", value));
    };

    if let Some((idx, item)) = items.iter().enumerate().find(|(_, item)| !item.is_object()) {
        return Err(mismatch(format!("{}/[{}]", path, idx), "object", item));
    }

    Ok(items.as_slice())
}

fn extract_object_array(
    document: &Value,
    path: &PropertyPath,
) -> std::result::Result<Value, ExtractError> {
    Ok(Value::Array(object_elements(document, path)?.to_vec()))
}

/// Split a slice path into the array path and the per-element path
///
/// Without the root sentinel the last `depth` segments address the value
/// inside each element (1 for `[]o`, 2 for `[]op`). With it the document
/// itself is the array and everything after the sentinel is per-element.
fn slice_parts(
    path: &PropertyPath,
    depth: usize,
) -> std::result::Result<(PropertyPath, PropertyPath), ExtractError> {
    let invalid = || ExtractError::InvalidSliceKey {
        path: path.to_string(),
    };

    if path.is_rooted() {
        if path.len() < 2 {
            return Err(invalid());
        }
        return Ok(path.split_at(1));
    }

    if path.len() < depth + 1 {
        return Err(invalid());
    }
    Ok(path.split_at(path.len() - depth))
}

fn extract_slice(
    document: &Value,
    path: &PropertyPath,
    depth: usize,
    policy: MissingFieldPolicy,
) -> std::result::Result<Value, ExtractError> {
    let (array_path, element_path) = slice_parts(path, depth)?;
    let elements = object_elements(document, &array_path)?;

    let mut values = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        match element_path.resolve(element) {
            Ok(value) => values.push(value.clone()),
            Err(_) => match policy {
                MissingFieldPolicy::Omit => {}
                MissingFieldPolicy::Null => values.push(Value::Null),
                MissingFieldPolicy::Fail => {
                    return Err(ExtractError::MissingSliceField {
                        path: array_path.to_string(),
                        index,
                        field: element_path.to_string(),
                    });
                }
            },
        }
    }

    Ok(Value::Array(values))
}
