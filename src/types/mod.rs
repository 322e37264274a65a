//! Response types for the Instagram API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dynamically keyed API response.
///
/// The API wraps payloads in an envelope (`meta`, `data`, `pagination`) whose
/// inner shape varies per endpoint. The body is kept as parsed JSON; accessors
/// cover the fields call sites typically read, and the raw value stays
/// reachable for everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse(Value);

impl ApiResponse {
    /// Wraps a JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Gets a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Gets the `data` payload.
    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    /// Gets the `data` payload as an array.
    pub fn data_array(&self) -> Option<&Vec<Value>> {
        self.data().and_then(Value::as_array)
    }

    /// Gets the `meta.code` status reported in the envelope.
    pub fn meta_code(&self) -> Option<u64> {
        self.0.get("meta").and_then(|meta| meta.get("code")).and_then(Value::as_u64)
    }

    /// Gets the pagination cursor for the next page, if any.
    ///
    /// The cursor is opaque; pass it back verbatim via request parameters to
    /// page forward.
    pub fn next_cursor(&self) -> Option<&str> {
        self.0
            .get("pagination")
            .and_then(|pagination| pagination.get("next_cursor"))
            .and_then(Value::as_str)
    }

    /// Borrows the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the response, returning the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ApiResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
