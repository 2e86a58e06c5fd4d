//! Splunk credential extraction
//!
//! Three fields are copied forward from the credentials handoff. Values are
//! carried as raw JSON: a key missing from the source comes through as `Null`
//! and is still written into the response document.

use crate::input::InputError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub const SEARCH_PASSWORD_KEY: &str = "splunk_search_password";
pub const DELETE_PASSWORD_KEY: &str = "splunk_delete_password";
pub const EVENT_COLLECTOR_TOKEN_KEY: &str = "splunk_event_collector_token";

#[derive(Debug, Clone, PartialEq)]
pub struct SplunkCredentials {
    pub search_password: Value,
    pub delete_password: Value,
    pub event_collector_token: Value,
}

impl SplunkCredentials {
    /// Parse `path` as a JSON object and extract the three credential fields.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
        let parsed: Value = serde_json::from_str(&content)
            .map_err(|source| InputError::Parse { path: path.to_path_buf(), source })?;
        let Value::Object(object) = parsed else {
            return Err(InputError::NotAnObject { path: path.to_path_buf() });
        };
        Ok(Self::from_object(&object))
    }

    pub fn from_object(object: &Map<String, Value>) -> Self {
        let field = |key: &str| object.get(key).cloned().unwrap_or(Value::Null);
        Self {
            search_password: field(SEARCH_PASSWORD_KEY),
            delete_password: field(DELETE_PASSWORD_KEY),
            event_collector_token: field(EVENT_COLLECTOR_TOKEN_KEY),
        }
    }
}
