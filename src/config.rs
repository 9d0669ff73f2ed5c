use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use thiserror::Error;
use tracing::info;

use crate::catalog::{Catalog, CatalogError};
use crate::identity::FirebaseConfig;
use crate::session::DEFAULT_SESSION_TTL;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// JSON course collection replacing the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    /// Sign-in goes to Firebase when set, otherwise to the local demo accounts.
    pub firebase: Option<FirebaseConfig>,
    /// Lifetime of a login token.
    pub session_ttl: Duration,
}

impl Config {
    /// Reads the environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = match env::var("BIND_ADDR") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDR",
                value: raw,
            })?,
            Err(_) => {
                info!("BIND_ADDR not set, using default: {}", DEFAULT_BIND_ADDR);
                default_bind_addr()
            }
        };

        let catalog_path = env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty()).map(PathBuf::from);
        if catalog_path.is_none() {
            info!("CATALOG_PATH not set, using built-in catalog");
        }

        let session_ttl = match env::var("SESSION_TTL_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    key: "SESSION_TTL_SECS",
                    value: raw,
                })?,
            Err(_) => {
                info!("SESSION_TTL_SECS not set, using default: {}", DEFAULT_SESSION_TTL.as_secs());
                DEFAULT_SESSION_TTL
            }
        };

        let firebase = FirebaseConfig::from_env();
        if firebase.is_none() {
            info!("FIREBASE_API_KEY not set, using local demo accounts");
        }

        Ok(Self {
            bind_addr,
            catalog_path,
            firebase,
            session_ttl,
        })
    }

    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => Catalog::from_json_file(path),
            None => Catalog::new(crate::catalog::sample::sample_courses()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            catalog_path: None,
            firebase: None,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads_builtin_catalog() {
        let config = Config::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.session_ttl, DEFAULT_SESSION_TTL);
        assert_eq!(config.load_catalog().unwrap().len(), 6);
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let config = Config {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.json")),
            ..Config::default()
        };
        assert!(matches!(config.load_catalog(), Err(CatalogError::Io(_))));
    }
}
