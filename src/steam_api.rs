use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{self, Credentials};
use crate::library::OwnedGame;
use crate::Result;

pub const DEFAULT_BASE_URL: &str = "http://api.steampowered.com/";

const PLAYER_SUMMARIES_PATH: &str = "ISteamUser/GetPlayerSummaries/v0002/";
const OWNED_GAMES_PATH: &str = "IPlayerService/GetOwnedGames/v0001/";

/// Transport settings. The default has no timeout at all.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct PlayerList {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

// Records stay raw so a malformed game surfaces as a missing field rather
// than a decode failure of the whole body.
#[derive(Debug, Deserialize)]
struct GameList {
    #[serde(default)]
    games: Vec<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlayerSummary {
    pub steamid: Option<String>,
    pub personaname: Option<String>,
    #[serde(flatten)]
    pub properties: HashMap<String, serde_json::Value>,
}

pub struct SteamClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl SteamClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_options(credentials, ClientOptions::default())
    }

    pub fn with_options(credentials: Credentials, options: ClientOptions) -> Result<Self> {
        // reqwest's blocking client applies its own timeout unless told otherwise.
        let http = Client::builder().timeout(options.timeout).build()?;

        let mut base_url = options.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(SteamClient {
            http,
            base_url,
            credentials,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        debug!(endpoint = path, "fetching from Steam API");

        // The query carries the API key, so errors must not echo the URL.
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .map_err(reqwest::Error::without_url)?;
        response
            .error_for_status_ref()
            .map_err(|error| error.without_url())?;

        Ok(response.json().map_err(reqwest::Error::without_url)?)
    }

    /// Returns the first player listed for the configured Steam id, or `None`
    /// when the response lists no players.
    pub fn get_player_summary(&self) -> Result<Option<PlayerSummary>> {
        let body: ApiResponse<PlayerList> = self.get(
            PLAYER_SUMMARIES_PATH,
            &[
                ("key", self.credentials.api_key.as_str()),
                ("steamids", self.credentials.steam_id.as_str()),
            ],
        )?;

        let player = body.response.players.into_iter().next();
        info!(found = player.is_some(), "player summary fetched");
        Ok(player)
    }

    /// Returns every owned game in API order. A private profile or an empty
    /// library yields an empty list.
    pub fn get_owned_games(&self) -> Result<Vec<OwnedGame>> {
        let body: ApiResponse<GameList> = self.get(
            OWNED_GAMES_PATH,
            &[
                ("key", self.credentials.api_key.as_str()),
                ("steamid", self.credentials.steam_id.as_str()),
                ("format", "json"),
                ("include_appinfo", "true"),
            ],
        )?;

        let games = body
            .response
            .games
            .iter()
            .enumerate()
            .map(|(index, record)| OwnedGame::from_record(index, record))
            .collect::<Result<Vec<_>>>()?;

        info!(count = games.len(), "owned games fetched");
        Ok(games)
    }

    /// Checks the credential format, then asks the API whether the Steam id
    /// resolves to a player.
    pub fn validate_credentials(&self) -> Result<bool> {
        config::validate_format(&self.credentials)?;
        Ok(self.get_player_summary()?.is_some())
    }
}
