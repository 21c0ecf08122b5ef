use crate::error::{ReadinessError, Result};
use crate::graph::auth::REQUIRED_SCOPES;
use crate::readiness::ReadinessPolicy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

pub const ENV_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";

const DEFAULT_BIND: &str = "127.0.0.1:7071";

/// Main configuration structure (`config.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub graph: GraphConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub policy: ReadinessPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Graph root, defaults to the public cloud v1.0 endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Login authority, defaults to login.microsoftonline.com
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// App registration used for the client credentials flow
#[derive(Clone, PartialEq, Eq)]
pub struct GraphCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for GraphCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphCredentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Configuration manager
#[derive(Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("com", "pwready", "pwready").ok_or_else(|| {
            ReadinessError::ConfigError("Failed to determine config directory".into())
        })?;

        let config_dir = project_dirs.config_dir().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(Self { config_dir })
    }

    /// Manager rooted at an explicit directory
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn env_file(&self) -> PathBuf {
        self.config_dir.join(".env")
    }

    /// Load main config; a missing file yields the defaults
    pub fn load_config(&self) -> Result<Config> {
        let config_path = self.config_file();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)?;
        Config::from_toml_str(&contents)
    }

    /// Resolve Graph credentials.
    ///
    /// Lookup order per value: process environment, `.env` in the config
    /// directory, then the `[graph]` table of `config.toml`.
    pub fn resolve_credentials(&self, config: &Config) -> Result<GraphCredentials> {
        let env_path = self.env_file();
        let dotenv = if env_path.exists() {
            Self::parse_env_file(&fs::read_to_string(&env_path)?)
        } else {
            HashMap::new()
        };

        resolve_credentials_from(|key| std::env::var(key).ok(), &dotenv, &config.graph)
    }

    /// Parse simple .env file format
    pub fn parse_env_file(contents: &str) -> HashMap<String, String> {
        let mut vars = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            if let Some(pos) = line.find('=') {
                let key = line[..pos].trim().to_string();
                let value = line[pos + 1..].trim();

                // Remove surrounding quotes if present
                let value = if value.len() >= 2
                    && ((value.starts_with('"') && value.ends_with('"'))
                        || (value.starts_with('\'') && value.ends_with('\'')))
                {
                    value[1..value.len() - 1].to_string()
                } else {
                    value.to_string()
                };

                vars.insert(key, value);
            }
        }

        vars
    }
}

fn resolve_credentials_from(
    env: impl Fn(&str) -> Option<String>,
    dotenv: &HashMap<String, String>,
    graph: &GraphConfig,
) -> Result<GraphCredentials> {
    let lookup = |key: &str, configured: &Option<String>| {
        env(key)
            .or_else(|| dotenv.get(key).cloned())
            .or_else(|| configured.clone())
            .filter(|v| !v.trim().is_empty())
    };

    let tenant_id = lookup(ENV_TENANT_ID, &graph.tenant_id);
    let client_id = lookup(ENV_CLIENT_ID, &graph.client_id);
    let client_secret = lookup(ENV_CLIENT_SECRET, &graph.client_secret);

    match (tenant_id, client_id, client_secret) {
        (Some(tenant_id), Some(client_id), Some(client_secret)) => Ok(GraphCredentials {
            tenant_id,
            client_id,
            client_secret,
        }),
        (tenant_id, client_id, client_secret) => {
            let missing: Vec<&str> = [
                (ENV_TENANT_ID, tenant_id.is_none()),
                (ENV_CLIENT_ID, client_id.is_none()),
                (ENV_CLIENT_SECRET, client_secret.is_none()),
            ]
            .into_iter()
            .filter(|(_, absent)| *absent)
            .map(|(key, _)| key)
            .collect();

            Err(ReadinessError::ConfigError(format!(
                "Missing Graph credentials: {}.\n\n\
                Set them in the environment, in a .env file in the config directory,\n\
                or under [graph] in config.toml (tenant_id, client_id, client_secret).\n\
                Alternatively pass a pre-acquired token with --access-token.\n\n\
                The app registration needs the application permissions {}.",
                missing.join(", "),
                REQUIRED_SCOPES.join(", ")
            )))
        }
    }
}
