use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::library::OwnedGame;
use crate::steam_api::PlayerSummary;
use crate::utils;
use crate::Result;

#[derive(Serialize)]
struct LibraryExport<'a> {
    steamid: Option<&'a str>,
    personaname: Option<&'a str>,
    game_count: usize,
    games: &'a [OwnedGame],
}

/// Writes the library to `<persona name>.json` inside `dir`, replacing any
/// file already there, and returns the path written.
pub fn write_library(
    dir: &Path,
    player: Option<&PlayerSummary>,
    games: &[OwnedGame],
) -> Result<PathBuf> {
    let personaname = player.and_then(|p| p.personaname.as_deref());
    let destination = dir.join(utils::export_file_name(personaname));

    let export = LibraryExport {
        steamid: player.and_then(|p| p.steamid.as_deref()),
        personaname,
        game_count: games.len(),
        games,
    };

    let mut file = BufWriter::new(File::create(&destination)?);
    serde_json::to_writer_pretty(&mut file, &export)?;
    file.flush()?;

    info!(path = %destination.display(), games = games.len(), "library exported");
    Ok(destination)
}
