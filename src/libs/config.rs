//! Application configuration.
//!
//! Settings live in `config.json` inside the per-user data directory and are
//! edited with `cmetrack init`. Any of the server settings can be overridden
//! from the environment (or a `.env` file loaded at startup):
//!
//! | Variable | Setting |
//! |---|---|
//! | `CMETRACK_HOST` | `server.host` |
//! | `CMETRACK_PORT` | `server.port` |
//! | `CMETRACK_DB` | `server.database_path` |
//! | `CMETRACK_JWT_SECRET` | `server.jwt_secret` |
//!
//! ```json
//! {
//!   "server": { "host": "127.0.0.1", "port": 3000 },
//!   "certificate": {
//!     "parent_organization": "Department of Health",
//!     "organization": "General Hospital",
//!     "city": "Springfield",
//!     "signatory": "Director"
//!   }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::{msg_error_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_HOST: &str = "CMETRACK_HOST";
pub const ENV_PORT: &str = "CMETRACK_PORT";
pub const ENV_DB: &str = "CMETRACK_DB";
pub const ENV_JWT_SECRET: &str = "CMETRACK_JWT_SECRET";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt_secret: Option<String>,
}

/// Header and signature lines printed on certificates.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CertificateConfig {
    pub parent_organization: String,
    pub organization: String,
    pub city: String,
    pub signatory: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_path: None,
            jwt_secret: None,
        }
    }
}

impl Default for CertificateConfig {
    fn default() -> Self {
        CertificateConfig {
            parent_organization: "DEPARTMENT OF HEALTH".to_string(),
            organization: "GENERAL HOSPITAL".to_string(),
            city: "City".to_string(),
            signatory: "DIRECTOR".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The configured database file, or `cmetrack.db` in the data directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }
}

impl Config {
    /// Reads `config.json`, falling back to defaults when it does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config =
            serde_json::from_str(&config_str).map_err(|e| msg_error_anyhow!(Message::ConfigParseError(e.to_string())))?;
        Ok(config)
    }

    /// [`Config::read`] with environment overrides applied.
    pub fn load() -> Result<Config> {
        Ok(Self::read()?.with_env())
    }

    pub fn with_env(mut self) -> Self {
        let mut server = self.server.take().unwrap_or_default();
        if let Ok(host) = env::var(ENV_HOST) {
            server.host = host;
        }
        if let Some(port) = env::var(ENV_PORT).ok().and_then(|port| port.parse().ok()) {
            server.port = port;
        }
        if let Ok(path) = env::var(ENV_DB) {
            server.database_path = Some(PathBuf::from(path));
        }
        if let Ok(secret) = env::var(ENV_JWT_SECRET) {
            if !secret.is_empty() {
                server.jwt_secret = Some(secret);
            }
        }
        self.server = Some(server);
        self
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn certificate(&self) -> CertificateConfig {
        self.certificate.clone().unwrap_or_default()
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive wizard. Current values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let theme = ColorfulTheme::default();

        let server = config.server();
        let database_default = server.database_path()?.display().to_string();
        let host: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptServerHost.to_string())
            .default(server.host.clone())
            .interact_text()?;
        let port: u16 = Input::with_theme(&theme)
            .with_prompt(Message::PromptServerPort.to_string())
            .default(server.port)
            .interact_text()?;
        let database: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptDatabasePath.to_string())
            .default(database_default)
            .interact_text()?;
        config.server = Some(ServerConfig {
            host,
            port,
            database_path: Some(PathBuf::from(database)),
            jwt_secret: server.jwt_secret,
        });

        msg_print!(Message::CertificateSettingsHeader, true);
        let certificate = config.certificate();
        config.certificate = Some(CertificateConfig {
            parent_organization: Input::with_theme(&theme)
                .with_prompt(Message::PromptParentOrganization.to_string())
                .default(certificate.parent_organization)
                .interact_text()?,
            organization: Input::with_theme(&theme)
                .with_prompt(Message::PromptOrganization.to_string())
                .default(certificate.organization)
                .interact_text()?,
            city: Input::with_theme(&theme)
                .with_prompt(Message::PromptCity.to_string())
                .default(certificate.city)
                .interact_text()?,
            signatory: Input::with_theme(&theme)
                .with_prompt(Message::PromptSignatory.to_string())
                .default(certificate.signatory)
                .interact_text()?,
        });

        Ok(config)
    }
}
