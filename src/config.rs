//! Credential resolution.
//!
//! Credentials come from explicit values, the process environment or a
//! `.env` file, in that order. The fetch code only ever sees the resolved
//! [`Credentials`].

use std::collections::HashMap;
use std::env;
use std::path::Path;

use thiserror::Error;

use crate::utils;

pub const API_KEY_VAR: &str = "STEAM_API_KEY";
pub const STEAM_ID_VAR: &str = "STEAM_ID";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("failed to load .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
    #[error("API key must be {} characters long", utils::API_KEY_LEN)]
    InvalidApiKey,
    #[error("Steam ID must be a 17 or 18 digit number")]
    InvalidSteamId,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub steam_id: String,
}

// Keep the key out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("steam_id", &self.steam_id)
            .finish()
    }
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, steam_id: impl Into<String>) -> Self {
        Credentials {
            api_key: api_key.into(),
            steam_id: steam_id.into(),
        }
    }

    /// Resolves credentials for the CLI.
    ///
    /// `env_file` names a dotenv file to read; without it a `.env` in the
    /// working directory or one of its parents is used if present. Variables
    /// already set in the process environment win over the file, and the
    /// environment itself is never modified.
    pub fn resolve(
        api_key: Option<String>,
        steam_id: Option<String>,
        env_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        if let (Some(api_key), Some(steam_id)) = (&api_key, &steam_id) {
            return Ok(Credentials::new(api_key.clone(), steam_id.clone()));
        }

        let file_vars = read_env_file(env_file)?;
        Self::resolve_with(api_key, steam_id, |name| {
            env::var(name).ok().or_else(|| file_vars.get(name).cloned())
        })
    }

    /// Fills whichever of `api_key`/`steam_id` is `None` through `lookup`.
    pub fn resolve_with<F>(
        api_key: Option<String>,
        steam_id: Option<String>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = match api_key {
            Some(key) => key,
            None => lookup(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?,
        };
        let steam_id = match steam_id {
            Some(id) => id,
            None => lookup(STEAM_ID_VAR).ok_or(ConfigError::MissingVar(STEAM_ID_VAR))?,
        };

        Ok(Credentials { api_key, steam_id })
    }
}

fn read_env_file(path: Option<&Path>) -> Result<HashMap<String, String>, ConfigError> {
    let iter = match path {
        Some(path) => dotenvy::from_path_iter(path)?,
        None => match dotenvy::dotenv_iter() {
            Ok(iter) => iter,
            Err(error) if error.not_found() => return Ok(HashMap::new()),
            Err(error) => return Err(error.into()),
        },
    };

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item?;
        vars.insert(key, value);
    }
    Ok(vars)
}

/// Checks the shape of the credentials without touching the network.
pub fn validate_format(credentials: &Credentials) -> Result<(), ConfigError> {
    if !utils::is_valid_api_key(&credentials.api_key) {
        return Err(ConfigError::InvalidApiKey);
    }
    if !utils::is_valid_steam_id(&credentials.steam_id) {
        return Err(ConfigError::InvalidSteamId);
    }
    Ok(())
}
