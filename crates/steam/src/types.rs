//! Response types for the recently-played games endpoint.

use serde::{Deserialize, Deserializer};

/// One game from the recently played list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameEntry {
    pub name: String,
    /// Numeric identifier kept as text: it only ever flows into URLs.
    #[serde(rename = "appid", deserialize_with = "appid_string")]
    pub app_id: String,
    /// Opaque icon version hash; may be empty for games without artwork.
    #[serde(rename = "img_icon_url", default)]
    pub icon_hash: String,
}

/// The recently played list as reported by the API.
///
/// `games.len()` does not have to match `total_count`; `total_count` is
/// the authoritative bound for index clamping. The live API omits the
/// `games` array entirely when the count is zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecentGames {
    pub total_count: u32,
    #[serde(default)]
    pub games: Vec<GameEntry>,
}

/// API response wrapper (internal).
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    pub response: Option<RecentGames>,
}

/// The live API sends `appid` as a JSON number; fixtures and some proxies
/// send it as a string. Accept both.
fn appid_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(u64),
        Str(String),
    }

    Ok(match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => n.to_string(),
        NumOrStr::Str(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_entry_appid_as_number() {
        let json = r#"{"name":"Half-Life","appid":70,"img_icon_url":"abc123"}"#;
        let game: GameEntry = serde_json::from_str(json).unwrap();
        assert_eq!(game.app_id, "70");
        assert_eq!(game.icon_hash, "abc123");
    }

    #[test]
    fn game_entry_appid_as_string() {
        let json = r#"{"name":"Half-Life","appid":"70","img_icon_url":"abc123"}"#;
        let game: GameEntry = serde_json::from_str(json).unwrap();
        assert_eq!(game.app_id, "70");
    }

    #[test]
    fn game_entry_missing_icon_defaults_empty() {
        let json = r#"{"name":"Obscure Game","appid":999}"#;
        let game: GameEntry = serde_json::from_str(json).unwrap();
        assert!(game.icon_hash.is_empty());
    }

    #[test]
    fn recent_games_missing_games_array() {
        // The live API drops `games` when nothing was played recently.
        let json = r#"{"total_count":0}"#;
        let list: RecentGames = serde_json::from_str(json).unwrap();
        assert_eq!(list.total_count, 0);
        assert!(list.games.is_empty());
    }

    #[test]
    fn recent_games_full_parse() {
        let json = r#"{
            "total_count": 2,
            "games": [
                {"name":"A","appid":10,"img_icon_url":"x","playtime_2weeks":120,"playtime_forever":5000},
                {"name":"B","appid":20,"img_icon_url":"y"}
            ]
        }"#;
        let list: RecentGames = serde_json::from_str(json).unwrap();
        assert_eq!(list.total_count, 2);
        assert_eq!(list.games.len(), 2);
        assert_eq!(list.games[1].app_id, "20");
    }

    #[test]
    fn envelope_with_response() {
        let json = r#"{"response":{"total_count":1,"games":[{"name":"A","appid":1,"img_icon_url":""}]}}"#;
        let env: ApiEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.response.unwrap().total_count, 1);
    }

    #[test]
    fn envelope_without_response() {
        let env: ApiEnvelope = serde_json::from_str("{}").unwrap();
        assert!(env.response.is_none());
    }

    #[test]
    fn missing_total_count_is_an_error() {
        let result: Result<RecentGames, _> = serde_json::from_str(r#"{"games":[]}"#);
        assert!(result.is_err());
    }
}
