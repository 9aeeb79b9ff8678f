//! Steam integration for RecentDeck.
//!
//! Fetches the recently played games list from the Steam Web API, picks
//! the entry to display according to the configured index, and hands
//! `steam://run/<appid>` launch URIs to the OS.

pub mod client;
pub mod launch;
pub mod select;
pub mod types;

pub use client::{Client, FetchError};
pub use launch::{LaunchError, launch, launch_uri};
pub use select::{ClampPolicy, Selection, SelectionError, select};
pub use types::{GameEntry, RecentGames};
