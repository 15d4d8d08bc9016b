use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use steamlibrary::{export, launch, library, ClientOptions, Credentials, SteamClient};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Steam Web API key. Falls back to STEAM_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// 64-bit Steam ID of the user. Falls back to STEAM_ID.
    #[arg(long)]
    steam_id: Option<String>,

    /// dotenv file holding the credentials. By default a .env in the current directory or one of its parents is read if present.
    #[arg(long, value_parser = validate_file)]
    env_file: Option<PathBuf>,

    /// Request timeout in seconds. Requests never time out unless this is set.
    #[arg(long)]
    timeout: Option<u64>,

    /// Verbose mode
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the player name and every owned game with its playtime (default)
    Summary,
    /// Print the app id and name of every owned game
    Ids,
    /// Check that the credentials are well formed and belong to a player
    Validate,
    /// Save the library as JSON
    Export {
        /// Directory where the exported library will end up
        #[arg(short, long, value_parser = validate_directory)]
        output: PathBuf,
    },
    /// Start an owned game through the Steam client
    Launch {
        /// App id of the game to start
        appid: u64,

        /// Steam client executable
        #[arg(long, default_value = launch::STEAM_PROGRAM)]
        steam: PathBuf,

        /// Launch without checking that the game is in the library
        #[arg(long, default_value_t = false)]
        skip_check: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let credentials = match Credentials::resolve(
        args.api_key.clone(),
        args.steam_id.clone(),
        args.env_file.as_deref(),
    ) {
        Ok(credentials) => credentials,
        Err(error) => {
            eprintln!("Failed to load credentials: {}", error);
            return ExitCode::from(1);
        }
    };

    match run(&args, credentials) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "steamlibrary=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args, credentials: Credentials) -> steamlibrary::Result<ExitCode> {
    let options = ClientOptions {
        timeout: args.timeout.map(Duration::from_secs),
        ..Default::default()
    };
    let client = SteamClient::with_options(credentials, options)?;
    let mut stdout = io::stdout().lock();

    match &args.command {
        None | Some(Commands::Summary) => library::print_report(&client, &mut stdout)?,
        Some(Commands::Ids) => library::print_ids(&client, &mut stdout)?,
        Some(Commands::Validate) => {
            if !client.validate_credentials()? {
                writeln!(
                    stdout,
                    "No player found for Steam ID {}.",
                    client.credentials().steam_id
                )?;
                return Ok(ExitCode::FAILURE);
            }
            writeln!(stdout, "Credentials are valid.")?;
        }
        Some(Commands::Export { output }) => {
            let player = client.get_player_summary()?;
            let games = client.get_owned_games()?;
            let path = export::write_library(output, player.as_ref(), &games)?;
            writeln!(
                stdout,
                "Done! {} games have been saved in {}",
                games.len(),
                path.display()
            )?;
        }
        Some(Commands::Launch {
            appid,
            steam,
            skip_check,
        }) => {
            if !skip_check && !launch::is_owned(&client.get_owned_games()?, *appid) {
                writeln!(stdout, "App {} is not in the library.", appid)?;
                return Ok(ExitCode::FAILURE);
            }
            launch::launch_game(steam, *appid)?;
            writeln!(stdout, "Launching app {}...", appid)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn validate_directory(path: &str) -> Result<PathBuf, String> {
    if Path::new(path).is_dir() {
        Ok(PathBuf::from(path))
    } else {
        Err(format!("'{}' is not a valid directory path", path))
    }
}

fn validate_file(path: &str) -> Result<PathBuf, String> {
    if Path::new(path).is_file() {
        Ok(PathBuf::from(path))
    } else {
        Err(format!("'{}' is not a readable file", path))
    }
}
