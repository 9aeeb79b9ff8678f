//! Picks which recently played game a key shows and launches.
//!
//! The configured index is free text from the settings UI, parsed at
//! refresh time. Upstream history left two index interpretations in the
//! wild; both are kept here as an explicit [`ClampPolicy`] and the plugin
//! runs [`ClampPolicy::ClampToLast`].

use crate::types::{GameEntry, RecentGames};

/// How an out-of-range configured index is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampPolicy {
    /// Use the configured index as-is; out of range is an error.
    Strict,
    /// Clamp the index to the last reported entry (`total_count - 1`).
    #[default]
    ClampToLast,
}

/// Errors from game selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The configured index is empty, non-numeric, negative, or out of
    /// range for the returned list.
    #[error("invalid game index '{0}'")]
    InvalidIndex(String),

    /// The account has no recently played games.
    #[error("no recently played games")]
    EmptyList,
}

/// A resolved selection: which entry is shown, and through which index.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The index as the user configured it.
    pub configured: usize,
    /// The index actually used after policy application.
    pub effective: usize,
    pub game: GameEntry,
}

/// Selects the game to display from a fetched list.
///
/// Pure function: no I/O, no side effects. `total_count` is trusted as
/// the clamping bound, and the empty-list check runs before any parsing
/// or indexing so an inconsistent `total_count: 0` response with a
/// non-empty `games` array can never select anything.
pub fn select(
    games: &RecentGames,
    configured_index: &str,
    policy: ClampPolicy,
) -> Result<Selection, SelectionError> {
    if games.total_count == 0 {
        return Err(SelectionError::EmptyList);
    }

    let configured: usize = configured_index
        .trim()
        .parse()
        .map_err(|_| SelectionError::InvalidIndex(configured_index.to_owned()))?;

    let effective = match policy {
        ClampPolicy::Strict => configured,
        ClampPolicy::ClampToLast => configured.min(games.total_count as usize - 1),
    };

    // `get` also covers responses whose `games` array is shorter than
    // `total_count` claims.
    let game = games
        .games
        .get(effective)
        .cloned()
        .ok_or_else(|| SelectionError::InvalidIndex(configured_index.to_owned()))?;

    Ok(Selection {
        configured,
        effective,
        game,
    })
}
