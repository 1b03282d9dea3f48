//! Error types for picking values out of JSON documents
//!
//! Per-property algorithm failures are [`ExtractError`]s. `build_response`
//! wraps them in [`PickError::Property`] together with the display name of
//! the property that failed.

use thiserror::Error;

/// Result type alias for picker operations
pub type Result<T> = std::result::Result<T, PickError>;

/// Main error type returned by the picker
#[derive(Error, Debug)]
pub enum PickError {
    /// The configuration could not be parsed into properties
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A property uses a type tag outside the supported set
    #[error("unsupported property type '{0}'")]
    UnsupportedType(String),

    /// The document bytes are not valid JSON
    #[error("invalid document: {0}")]
    InvalidDocument(#[source] serde_json::Error),

    /// Extracting a single property failed
    #[error("unable to pick the property '{name}': {source}")]
    Property {
        name: String,
        #[source]
        source: ExtractError,
    },

    /// A typed decode asked for a name that is not in the response
    #[error("deserialization failed: property '{0}' not found")]
    PropertyNotFound(String),

    /// The picked value does not fit the requested destination type
    #[error("deserialization failed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Failures of a single extraction algorithm
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// A segment of the path does not exist in the document
    #[error("path '{path}' not found")]
    PathNotFound { path: String },

    /// The value at the path has the wrong shape
    #[error("expected {expected} at '{path}', found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A slice path is too short to derive array, object and field
    #[error("invalid slice object key '{path}'")]
    InvalidSliceKey { path: String },

    /// An element of a sliced array lacks the projected field
    #[error("element {index} of '{path}' has no field '{field}'")]
    MissingSliceField {
        path: String,
        index: usize,
        field: String,
    },
}

/// Flat view over the error taxonomy, handy for matching in callers and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidConfig,
    UnsupportedType,
    InvalidDocument,
    PathNotFound,
    TypeMismatch,
    InvalidSliceKey,
    PropertyNotFound,
    DecodeError,
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // A missing slice field under the strict policy is a missing path
            ExtractError::PathNotFound { .. } | ExtractError::MissingSliceField { .. } => {
                ErrorKind::PathNotFound
            }
            ExtractError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ExtractError::InvalidSliceKey { .. } => ErrorKind::InvalidSliceKey,
        }
    }
}

impl PickError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PickError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            PickError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            PickError::InvalidDocument(_) => ErrorKind::InvalidDocument,
            PickError::Property { source, .. } => source.kind(),
            PickError::PropertyNotFound(_) => ErrorKind::PropertyNotFound,
            PickError::Decode(_) => ErrorKind::DecodeError,
        }
    }

    /// Display name of the property that failed, if the error came from one
    pub fn property_name(&self) -> Option<&str> {
        match self {
            PickError::Property { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_error_message_carries_name() {
        let err = PickError::Property {
            name: "age".to_string(),
            source: ExtractError::PathNotFound {
                path: "person/age".to_string(),
            },
        };

        assert_eq!(err.kind(), ErrorKind::PathNotFound);
        assert_eq!(err.property_name(), Some("age"));
        assert_eq!(
            err.to_string(),
            "unable to pick the property 'age': path 'person/age' not found"
        );
    }

    #[test]
    fn test_missing_slice_field_maps_to_path_not_found() {
        let err = ExtractError::MissingSliceField {
            path: "array/size".to_string(),
            index: 2,
            field: "size".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::PathNotFound);
    }
}
