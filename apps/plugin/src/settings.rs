//! Per-key settings, persisted by the host and echoed inside events.

use serde::{Deserialize, Serialize};

/// What the user typed into the property inspector.
///
/// Everything is free text, including the index, which is parsed at
/// refresh time, not here. All fields default to empty on first use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginSettings {
    #[serde(rename = "steamid", default)]
    pub steam_id: String,
    #[serde(default)]
    pub index: String,
    #[serde(rename = "apitoken", default)]
    pub api_token: String,
}

impl PluginSettings {
    /// Parses settings from the loosely-typed payload the host echoes.
    ///
    /// Anything unusable falls back to defaults so a bad payload can
    /// never take the key down.
    pub fn from_payload(value: &serde_json::Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }

        match serde_json::from_value(value.clone()) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("failed to parse settings, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Serializes for `setSettings` write-back.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}
