use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DEFAULT_CONFIG: &str = include_str!("../config/config.toml");
const CONFIG_PATH_VAR: &str = "POKEDEX_CONFIG";

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub pokemon: PokemonConfig,
    pub cdn: CdnConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PokemonConfig {
    pub api_url: String,
    /// Request timeout in seconds, 0 means requests never time out.
    pub timeout: u32,
    pub page_size: u32,
    pub max_id: u32,
}

/// URL templates for assets served straight from the sprite/cry CDN.
/// `{id}` is replaced with the numeric Pokémon id.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CdnConfig {
    pub artwork_template: String,
    pub cry_template: String,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        toml::from_str(source).map_err(|e| {
            tracing::error!("Failed to parse configuration: {}", e);
            AppError::from(e)
        })
    }

    /// Reads the file named by `POKEDEX_CONFIG` if set, otherwise the
    /// configuration bundled with the binary.
    pub fn load() -> Result<Self, AppError> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                tracing::info!("Loading configuration from {}", path);
                let source = std::fs::read_to_string(&path).map_err(|e| {
                    AppError::ConfigError(format!("failed to read {}: {}", path, e))
                })?;
                Self::from_toml(&source)
            }
            Err(_) => {
                tracing::debug!("Loading bundled configuration");
                Self::from_toml(DEFAULT_CONFIG)
            }
        }
    }
}
