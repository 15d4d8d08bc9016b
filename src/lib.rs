//! Fetches a Steam user's profile name and owned-games library from the
//! Steam Web API.
//!
//! [`SteamClient`] does the work; the free functions below are thin entry
//! points that take raw credentials.

use std::io::{self, Write};

use thiserror::Error;

pub mod config;
pub mod export;
pub mod launch;
pub mod library;
pub mod steam_api;
mod utils;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, Credentials};
pub use library::{LibraryReport, OwnedGame};
pub use steam_api::{ClientOptions, PlayerSummary, SteamClient};

#[derive(Error, Debug)]
pub enum Error {
    /// Network failure, non-2xx status or an undecodable body.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("game record {index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Looks up the player summary for `steam_id`. `Ok(None)` means the API knows
/// no such player.
pub fn fetch_player_summary(api_key: &str, steam_id: &str) -> Result<Option<PlayerSummary>> {
    fetch_player_summary_with(Credentials::new(api_key, steam_id), ClientOptions::default())
}

/// Returns the names and app ids of every owned game as two parallel
/// sequences, in the order the API listed them.
pub fn fetch_owned_games(api_key: &str, steam_id: &str) -> Result<(Vec<String>, Vec<u64>)> {
    fetch_owned_games_with(Credentials::new(api_key, steam_id), ClientOptions::default())
}

/// Prints the player name followed by every owned game and its playtime.
pub fn print_library(credentials: Credentials) -> Result<()> {
    print_library_with(credentials, ClientOptions::default(), &mut io::stdout().lock())
}

pub(crate) fn fetch_player_summary_with(
    credentials: Credentials,
    options: ClientOptions,
) -> Result<Option<PlayerSummary>> {
    SteamClient::with_options(credentials, options)?.get_player_summary()
}

pub(crate) fn fetch_owned_games_with(
    credentials: Credentials,
    options: ClientOptions,
) -> Result<(Vec<String>, Vec<u64>)> {
    let games = SteamClient::with_options(credentials, options)?.get_owned_games()?;
    Ok(library::names_and_ids(&games))
}

pub(crate) fn print_library_with<W: Write>(
    credentials: Credentials,
    options: ClientOptions,
    out: &mut W,
) -> Result<()> {
    let client = SteamClient::with_options(credentials, options)?;
    library::print_report(&client, out)
}
