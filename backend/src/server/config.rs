//! Service settings loaded via OrthoConfig and the validated server config.

use std::ffi::OsString;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use users_backend::outbound::seed::{DEFAULT_SEED_TIMEOUT, DEFAULT_SEED_URL};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATA_PATH: &str = "Data/users.json";

/// Errors raised while turning raw settings into a [`ServerConfig`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// CLI, environment or file layers could not be merged.
    #[error("failed to load settings: {message}")]
    Load { message: String },
    /// The listen address is not a socket address.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The seed endpoint is not an absolute URL.
    #[error("invalid seed URL `{value}`: {source}")]
    SeedUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

impl From<SettingsError> for std::io::Error {
    fn from(err: SettingsError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}

/// Raw settings layered from CLI flags, `USERS_API_*` variables and files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Location of the persisted user snapshot.
    pub data_path: Option<PathBuf>,
    /// Endpoint queried for seed users when no snapshot exists.
    pub seed_url: Option<String>,
    /// Seed request timeout in seconds.
    pub seed_timeout_secs: Option<u64>,
    /// Start with an empty list instead of fetching seed users.
    #[ortho_config(default = false)]
    pub skip_seed: bool,
}

impl AppSettings {
    /// Load settings from the process arguments and environment.
    pub fn load_from_process() -> Result<Self, SettingsError> {
        Self::load().map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// Load settings from an explicit argument list.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Used by tests to bypass process arguments")
    )]
    pub fn load_from_args<I, T>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// Configured listen address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured snapshot path, falling back to the default.
    pub fn data_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
    }

    /// Configured seed endpoint, falling back to the default.
    pub fn seed_url(&self) -> &str {
        self.seed_url.as_deref().unwrap_or(DEFAULT_SEED_URL)
    }

    /// Configured seed timeout, falling back to the default.
    pub fn seed_timeout(&self) -> Duration {
        self.seed_timeout_secs
            .map_or(DEFAULT_SEED_TIMEOUT, Duration::from_secs)
    }

    /// Validate raw values into a [`ServerConfig`].
    pub fn into_server_config(self) -> Result<ServerConfig, SettingsError> {
        let bind_addr = self
            .bind_addr()
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: self.bind_addr().to_owned(),
                source,
            })?;
        let seed = if self.skip_seed {
            None
        } else {
            let endpoint = Url::parse(self.seed_url()).map_err(|source| SettingsError::SeedUrl {
                value: self.seed_url().to_owned(),
                source,
            })?;
            Some(SeedSettings {
                endpoint,
                timeout: self.seed_timeout(),
            })
        };

        Ok(ServerConfig {
            bind_addr,
            data_path: self.data_path(),
            seed,
        })
    }
}

/// Remote seed endpoint and its request timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSettings {
    pub endpoint: Url,
    pub timeout: Duration,
}

/// Validated configuration for creating the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) data_path: PathBuf,
    pub(crate) seed: Option<SeedSettings>,
}

impl ServerConfig {
    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Snapshot file backing the user store.
    #[must_use]
    pub fn data_path(&self) -> &PathBuf {
        &self.data_path
    }

    /// Seed endpoint, or `None` when seeding is switched off.
    #[must_use]
    pub fn seed(&self) -> Option<&SeedSettings> {
        self.seed.as_ref()
    }
}
