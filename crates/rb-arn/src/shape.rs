//! The hotel API serializes every collection as a bare object when it holds a
//! single element and as an array otherwise. Everything that walks a response
//! goes through [`normalize`] so the two encodings look the same to callers.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("expected an object or a list of objects, found {0}")]
    Unexpected(&'static str),
    #[error("`{field}` should be an object or a list of objects, found {found}")]
    UnexpectedField {
        field: &'static str,
        found: &'static str,
    },
}

/// A collection as the API encodes it.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    Absent,
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Absent => Vec::new(),
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, OneOrMany::Absent)
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        value.into_vec()
    }
}

impl<'a> OneOrMany<&'a Value> {
    /// Classify a raw node. Scalars are rejected rather than wrapped.
    pub fn classify(node: Option<&'a Value>) -> Result<Self, ShapeError> {
        match node {
            None | Some(Value::Null) => Ok(OneOrMany::Absent),
            Some(Value::Array(items)) => Ok(OneOrMany::Many(items.iter().collect())),
            Some(object @ Value::Object(_)) => Ok(OneOrMany::One(object)),
            Some(other) => Err(ShapeError::Unexpected(json_type(other))),
        }
    }
}

/// Turn an absent node, a bare object or an array into an ordered list.
pub fn normalize(node: Option<&Value>) -> Result<Vec<&Value>, ShapeError> {
    OneOrMany::classify(node).map(OneOrMany::into_vec)
}

/// Same as [`normalize`] but names the offending field on failure.
pub fn normalize_field<'a>(
    node: Option<&'a Value>,
    field: &'static str,
) -> Result<Vec<&'a Value>, ShapeError> {
    normalize(node).map_err(|e| match e {
        ShapeError::Unexpected(found) => ShapeError::UnexpectedField { field, found },
        other => other,
    })
}

/// Read an `@`-prefixed attribute as text. Numbers are accepted since the
/// API is not consistent about quoting identifiers such as gateway ids.
pub fn attribute(node: &Value, key: &str) -> Option<String> {
    match node.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
