/// `target` value for `setTitle`/`setImage`: hardware key and software display.
pub const TARGET_BOTH: u8 = 0;

/// `target` value addressing only the physical key.
pub const TARGET_HARDWARE: u8 = 1;

/// `target` value addressing only the on-screen representation.
pub const TARGET_SOFTWARE: u8 = 2;

/// Inbound event names this plugin reacts to. Anything else the host
/// sends (device events, property inspector chatter, future additions)
/// is skipped during parsing.
pub const KNOWN_EVENTS: &[&str] = &[
    "willAppear",
    "willDisappear",
    "keyDown",
    "keyUp",
    "didReceiveSettings",
];
