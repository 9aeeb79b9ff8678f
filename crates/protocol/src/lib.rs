//! Stream Deck plugin wire protocol.
//!
//! The plugin speaks JSON over a local WebSocket the host opens for it:
//! a registration message first, then host events in (`keyDown`,
//! `willAppear`, ...) and plugin commands out (`setTitle`, `setImage`, ...).

pub mod constants;
pub mod inbound;
pub mod outbound;
pub mod registration;

pub use inbound::{ContextEvent, Inbound};
pub use outbound::Outbound;
pub use registration::Registration;

/// Errors from protocol encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
