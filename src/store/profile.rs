//! The persisted profile document

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::engine::model::{CycleEntry, Settings};

/// Everything stored for one user: the cycle log and settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Cycle entries in insertion order
    #[serde(default, deserialize_with = "null_as_default")]
    pub logs: Vec<CycleEntry>,
    /// User settings
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: Settings,
    /// When the document was last written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// A fresh profile with the given settings and no entries
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            logs: Vec::new(),
            settings: settings.normalized(),
            updated_at: None,
        }
    }

    /// Fix up values an older or hand-edited document may carry
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.settings = self.settings.normalized();
        self
    }

    /// Parse a profile from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Self =
            serde_json::from_str(json).context("Failed to parse profile document")?;
        Ok(profile.normalized())
    }
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
