//! Schema-checked access to entries of a GeoNames JSON response.
//!
//! The service is loose about scalar types: coordinates and distances come
//! back as numbers from some endpoints and as numeric strings from others.
//! Accessors accept either form and fail with `MalformedResponse` when a
//! field is missing, null, or not convertible.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::error::{GeoNamesError, Result};

/// A JSON number or a string, the two shapes the service uses for scalars.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(Number),
    Text(String),
}

/// One object from a response, tagged with the operation it came from.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    operation: &'static str,
    value: &'a Value,
}

impl<'a> Entry<'a> {
    pub fn new(operation: &'static str, value: &'a Value) -> Self {
        Self { operation, value }
    }

    /// Operation the entry was returned by.
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Error reporting `field` as missing or unusable in this entry.
    pub fn malformed(&self, field: &'static str) -> GeoNamesError {
        GeoNamesError::MalformedResponse {
            operation: self.operation,
            field,
        }
    }

    fn raw(&self, field: &'static str) -> Result<&'a Value> {
        self.value
            .as_object()
            .and_then(|object| object.get(field))
            .ok_or_else(|| self.malformed(field))
    }

    fn scalar(&self, field: &'static str) -> Result<Scalar> {
        Scalar::deserialize(self.raw(field)?).map_err(|_| self.malformed(field))
    }

    pub fn string(&self, field: &'static str) -> Result<String> {
        Ok(match self.scalar(field)? {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
        })
    }

    /// Like [`Entry::string`], but an explicit `null` reads as `None`. The
    /// field itself must still be present.
    pub fn nullable_string(&self, field: &'static str) -> Result<Option<String>> {
        match self.raw(field)? {
            Value::Null => Ok(None),
            Value::String(s) if s.is_empty() => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            _ => Err(self.malformed(field)),
        }
    }

    pub fn f64(&self, field: &'static str) -> Result<f64> {
        let parsed = match self.scalar(field)? {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse::<f64>().ok(),
        };
        parsed.ok_or_else(|| self.malformed(field))
    }

    pub fn i64(&self, field: &'static str) -> Result<i64> {
        let parsed = match self.scalar(field)? {
            Scalar::Number(n) => n.as_i64(),
            Scalar::Text(s) => s.trim().parse::<i64>().ok(),
        };
        parsed.ok_or_else(|| self.malformed(field))
    }
}
