//! Projection of owned-game records and the console report.

use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::steam_api::{PlayerSummary, SteamClient};
use crate::{Error, Result};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OwnedGame {
    pub appid: u64,
    pub name: String,
    /// Total minutes played. Absent when the API omits it.
    pub playtime_forever: Option<u64>,
}

impl OwnedGame {
    /// Builds a game from one raw API record. `index` is the record's position
    /// in the response and is only used for error reporting.
    pub fn from_record(index: usize, record: &Value) -> Result<Self> {
        let appid = record
            .get("appid")
            .and_then(Value::as_u64)
            .ok_or(Error::MissingField {
                index,
                field: "appid",
            })?;
        let name = record
            .get("name")
            .and_then(Value::as_str)
            .ok_or(Error::MissingField {
                index,
                field: "name",
            })?;

        Ok(OwnedGame {
            appid,
            name: name.to_string(),
            playtime_forever: record.get("playtime_forever").and_then(Value::as_u64),
        })
    }
}

/// Splits games into parallel name and id sequences, keeping their order.
pub fn names_and_ids(games: &[OwnedGame]) -> (Vec<String>, Vec<u64>) {
    games
        .iter()
        .map(|game| (game.name.clone(), game.appid))
        .unzip()
}

pub struct LibraryReport {
    pub player: Option<PlayerSummary>,
    pub games: Vec<OwnedGame>,
}

impl LibraryReport {
    pub fn new(player: Option<PlayerSummary>, games: Vec<OwnedGame>) -> Self {
        LibraryReport { player, games }
    }

    fn persona_name(&self) -> Option<&str> {
        self.player.as_ref().and_then(|p| p.personaname.as_deref())
    }

    pub fn write_player<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.player {
            Some(_) => writeln!(
                out,
                "Player Name: {}",
                self.persona_name().unwrap_or("Unknown")
            )?,
            None => writeln!(out, "Failed to fetch player information.")?,
        }
        Ok(())
    }

    /// Writes the game list. Every game must carry a playtime.
    pub fn write_games<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.games.is_empty() {
            writeln!(out, "No games found or failed to fetch games.")?;
            return Ok(());
        }

        writeln!(
            out,
            "{} owns {} games.",
            self.persona_name().unwrap_or("The user"),
            self.games.len()
        )?;
        for (index, game) in self.games.iter().enumerate() {
            let playtime = game.playtime_forever.ok_or(Error::MissingField {
                index,
                field: "playtime_forever",
            })?;
            writeln!(out, "{} - Playtime: {} minutes", game.name, playtime)?;
        }
        Ok(())
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        self.write_player(out)?;
        self.write_games(out)
    }
}

/// Fetches the player, prints it, then fetches and prints the games. The
/// player line is written before the second request is made.
pub fn print_report<W: Write>(client: &SteamClient, out: &mut W) -> Result<()> {
    let mut report = LibraryReport::new(client.get_player_summary()?, Vec::new());
    report.write_player(out)?;

    report.games = client.get_owned_games()?;
    report.write_games(out)
}

/// Prints one `ID: .., Name: ..` line per game.
pub fn print_ids<W: Write>(client: &SteamClient, out: &mut W) -> Result<()> {
    let games = client.get_owned_games()?;
    let (names, ids) = names_and_ids(&games);
    for (id, name) in ids.iter().zip(&names) {
        writeln!(out, "ID: {}, Name: {}", id, name)?;
    }
    Ok(())
}
