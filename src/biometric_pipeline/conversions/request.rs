//! JSON request and response envelopes.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::biometric_pipeline::common::error::{ConversionError, Result};

/// The conversion request body.
///
/// Every field is optional on the wire so that missing input surfaces as a
/// catalog error rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    #[serde(default, deserialize_with = "string_map")]
    pub values: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub source_format: Option<String>,
    #[serde(default)]
    pub target_format: Option<String>,
    #[serde(default, deserialize_with = "string_map")]
    pub source_parameters: Option<BTreeMap<String, String>>,
    #[serde(default, deserialize_with = "string_map")]
    pub target_parameters: Option<BTreeMap<String, String>>,
}

/// Reads a JSON object of scalars as strings. `null` becomes `""` and
/// numbers keep their JSON text.
fn string_map<'de, D>(deserializer: D) -> std::result::Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|entries| {
        entries
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::Null => String::new(),
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect()
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub requesttime: Option<String>,
    #[serde(default)]
    pub request: Option<ConversionRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    pub error_code: String,
    pub message: String,
}

impl From<&ConversionError> for ServiceError {
    fn from(error: &ConversionError) -> Self {
        Self {
            error_code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub id: Option<String>,
    pub version: Option<String>,
    pub responsetime: String,
    pub response: Option<BTreeMap<String, String>>,
    pub errors: Vec<ServiceError>,
}

impl ResponseEnvelope {
    /// Wraps a conversion outcome, echoing the request's id and version.
    pub fn from_result(request: &RequestEnvelope, result: Result<BTreeMap<String, String>>) -> Self {
        let (response, errors) = match result {
            Ok(values) => (Some(values), Vec::new()),
            Err(error) => (None, vec![ServiceError::from(&error)]),
        };
        Self {
            id: request.id.clone(),
            version: request.version.clone(),
            responsetime: Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            response,
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
