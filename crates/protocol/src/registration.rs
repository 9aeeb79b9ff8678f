//! Registration handshake with the Stream Deck host.
//!
//! The host launches the plugin binary with `-port`, `-pluginUUID` and
//! `-registerEvent` arguments; the plugin opens a WebSocket to the given
//! local port and must send the registration message before anything else.

use serde::Serialize;

/// First message sent on the WebSocket.
///
/// The event name is not fixed by the protocol; the host passes it via
/// `-registerEvent` and expects it echoed back verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub event: String,
    pub uuid: String,
}

impl Registration {
    pub fn new(register_event: impl Into<String>, plugin_uuid: impl Into<String>) -> Self {
        Self {
            event: register_event.into(),
            uuid: plugin_uuid.into(),
        }
    }

    /// Serializes the registration message.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Builds the WebSocket URL for the port the host passed at launch.
pub fn ws_url(port: u16) -> String {
    format!("ws://127.0.0.1:{port}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_json_shape() {
        let reg = Registration::new("registerPlugin", "ABC123");
        let json = reg.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["event"], "registerPlugin");
        assert_eq!(value["uuid"], "ABC123");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn ws_url_is_loopback() {
        assert_eq!(ws_url(28196), "ws://127.0.0.1:28196");
    }
}
