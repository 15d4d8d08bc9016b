use std::ffi::OsStr;
use std::process::{Command, Stdio};

use tracing::info;

use crate::library::OwnedGame;
use crate::Result;

pub const STEAM_PROGRAM: &str = "steam";

/// Builds `<program> -applaunch <appid>`.
pub fn launch_command(program: impl AsRef<OsStr>, appid: u64) -> Command {
    let mut command = Command::new(program);
    command
        .arg("-applaunch")
        .arg(appid.to_string())
        .stdin(Stdio::null());
    command
}

pub fn is_owned(games: &[OwnedGame], appid: u64) -> bool {
    games.iter().any(|game| game.appid == appid)
}

/// Hands the game over to the Steam client. Steam keeps running on its own,
/// so the child is not waited on.
pub fn launch_game(program: impl AsRef<OsStr>, appid: u64) -> Result<()> {
    let child = launch_command(program, appid).spawn()?;
    info!(appid, pid = child.id(), "launch requested");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn command_passes_applaunch_and_id() {
        let command = launch_command(STEAM_PROGRAM, 570);
        assert_eq!(command.get_program(), "steam");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec!["-applaunch", "570"]);
    }

    #[test]
    fn command_uses_custom_program() {
        let command = launch_command("/opt/steam/steam.sh", 10);
        assert_eq!(command.get_program(), "/opt/steam/steam.sh");
    }

    #[test]
    fn ownership_is_checked_by_app_id() {
        let games = vec![OwnedGame {
            appid: 10,
            name: "Counter-Strike".into(),
            playtime_forever: Some(120),
        }];
        assert!(is_owned(&games, 10));
        assert!(!is_owned(&games, 20));
        assert!(!is_owned(&[], 10));
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = launch_game(dir.path().join("no-such-steam"), 570).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
