use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{domain::CapabilityName, error::GENERIC_API_ERROR};

/// One entry of `GET /capabilities`. Fields the server sends as `null` decode
/// to their defaults so one sparse record never sinks the whole directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub practice_area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_verticals: Option<Vec<String>>,
    /// Hours per week; any JSON number, fractional values included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<serde_json::Number>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub consultants: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Capability name to record, in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityDirectory(pub IndexMap<CapabilityName, CapabilityRecord>);

impl CapabilityDirectory {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CapabilityName, &CapabilityRecord)> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&CapabilityRecord> {
        self.0.get(&CapabilityName::from(name))
    }
}

impl FromIterator<(CapabilityName, CapabilityRecord)> for CapabilityDirectory {
    fn from_iter<T: IntoIterator<Item = (CapabilityName, CapabilityRecord)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Success body of register/unregister.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Failure body of register/unregister. Validation failures carry a
/// structured `detail` instead of a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl DetailResponse {
    pub fn detail_text(&self) -> String {
        match &self.detail {
            Some(serde_json::Value::String(text)) if !text.trim().is_empty() => text.clone(),
            _ => GENERIC_API_ERROR.to_string(),
        }
    }
}
