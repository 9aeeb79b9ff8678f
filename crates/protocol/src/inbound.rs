//! Inbound events from the Stream Deck host.

use serde::Deserialize;

use crate::ProtocolError;
use crate::constants::KNOWN_EVENTS;

/// Payload attached to key and appearance events.
///
/// The host persists per-key settings and echoes them inside every event;
/// `settings` stays loosely typed here; the plugin layer decides what to
/// make of it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub settings: serde_json::Value,
}

/// Common shape of the events this plugin consumes: an action UUID, the
/// key instance `context`, the device, and a payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextEvent {
    #[serde(default)]
    pub action: String,
    pub context: String,
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub payload: EventPayload,
}

/// Events from the host, tagged by the `event` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Inbound {
    WillAppear(ContextEvent),
    WillDisappear(ContextEvent),
    KeyDown(ContextEvent),
    KeyUp(ContextEvent),
    DidReceiveSettings(ContextEvent),
}

impl Inbound {
    /// Parses one text frame from the host.
    ///
    /// Returns `Ok(None)` for event types this plugin does not handle;
    /// the host sends plenty (device connects, property inspector
    /// lifecycle, future additions) and none of them are errors.
    pub fn parse(text: &str) -> Result<Option<Self>, ProtocolError> {
        #[derive(Deserialize)]
        struct Probe {
            event: String,
        }

        let probe: Probe = serde_json::from_str(text)?;
        if !KNOWN_EVENTS.contains(&probe.event.as_str()) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(text)?))
    }

    /// The key instance context the event addresses.
    pub fn context(&self) -> &str {
        match self {
            Inbound::WillAppear(e)
            | Inbound::WillDisappear(e)
            | Inbound::KeyDown(e)
            | Inbound::KeyUp(e)
            | Inbound::DidReceiveSettings(e) => &e.context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_will_appear() {
        let json = r#"{
            "event": "willAppear",
            "action": "com.recentdeck.launch",
            "context": "ctx-1",
            "device": "dev-1",
            "payload": {
                "settings": {"steamid": "765", "index": "0", "apitoken": "key"},
                "coordinates": {"column": 2, "row": 1}
            }
        }"#;

        let event = Inbound::parse(json).unwrap().unwrap();
        let Inbound::WillAppear(e) = event else {
            panic!("expected willAppear");
        };
        assert_eq!(e.action, "com.recentdeck.launch");
        assert_eq!(e.context, "ctx-1");
        assert_eq!(e.payload.settings["steamid"], "765");
    }

    #[test]
    fn parse_key_down() {
        let json = r#"{"event":"keyDown","action":"a","context":"c","device":"d","payload":{"settings":{},"state":0}}"#;
        let event = Inbound::parse(json).unwrap().unwrap();
        assert!(matches!(event, Inbound::KeyDown(_)));
        assert_eq!(event.context(), "c");
    }

    #[test]
    fn parse_did_receive_settings() {
        let json = r#"{"event":"didReceiveSettings","action":"a","context":"c","device":"d","payload":{"settings":{"index":"3"}}}"#;
        let event = Inbound::parse(json).unwrap().unwrap();
        let Inbound::DidReceiveSettings(e) = event else {
            panic!("expected didReceiveSettings");
        };
        assert_eq!(e.payload.settings["index"], "3");
    }

    #[test]
    fn unknown_event_is_skipped() {
        let json = r#"{"event":"deviceDidConnect","device":"d","deviceInfo":{}}"#;
        assert!(Inbound::parse(json).unwrap().is_none());
    }

    #[test]
    fn missing_payload_defaults() {
        let json = r#"{"event":"keyUp","action":"a","context":"c"}"#;
        let event = Inbound::parse(json).unwrap().unwrap();
        let Inbound::KeyUp(e) = event else {
            panic!("expected keyUp");
        };
        assert!(e.payload.settings.is_null());
        assert!(e.device.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Inbound::parse("not json {{{").is_err());
    }

    #[test]
    fn missing_event_field_is_an_error() {
        assert!(Inbound::parse(r#"{"context":"c"}"#).is_err());
    }
}
