//! Outbound commands to the Stream Deck host.

use serde::Serialize;

use crate::constants::TARGET_BOTH;

/// Payload for `setTitle`. Omitting `title` restores the user-set title.
#[derive(Debug, Clone, Serialize)]
pub struct TitlePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub target: u8,
}

/// Payload for `setImage`. `image` is a base64 data URI; omitting it
/// restores the action's default image.
#[derive(Debug, Clone, Serialize)]
pub struct ImagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub target: u8,
}

/// Payload for `logMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct LogPayload {
    pub message: String,
}

/// Commands from the plugin to the host, tagged by the `event` field.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Outbound {
    SetTitle {
        context: String,
        payload: TitlePayload,
    },
    SetImage {
        context: String,
        payload: ImagePayload,
    },
    SetSettings {
        context: String,
        payload: serde_json::Value,
    },
    LogMessage {
        payload: LogPayload,
    },
}

impl Outbound {
    /// Sets the key title on both the hardware key and the software display.
    pub fn set_title(context: impl Into<String>, title: Option<String>) -> Self {
        Outbound::SetTitle {
            context: context.into(),
            payload: TitlePayload {
                title,
                target: TARGET_BOTH,
            },
        }
    }

    /// Sets the key image from a data URI.
    pub fn set_image(context: impl Into<String>, image: Option<String>) -> Self {
        Outbound::SetImage {
            context: context.into(),
            payload: ImagePayload {
                image,
                target: TARGET_BOTH,
            },
        }
    }

    /// Persists settings for a key instance through the host.
    pub fn set_settings(context: impl Into<String>, settings: serde_json::Value) -> Self {
        Outbound::SetSettings {
            context: context.into(),
            payload: settings,
        }
    }

    /// Writes a line into the host's plugin log.
    pub fn log_message(message: impl Into<String>) -> Self {
        Outbound::LogMessage {
            payload: LogPayload {
                message: message.into(),
            },
        }
    }

    /// Serializes the command for the wire.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
