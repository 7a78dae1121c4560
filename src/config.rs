use std::fs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub poller: PollerConfig,
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub steam: SteamConfig,
    #[serde(default)]
    pub updown: UpdownConfig,
    #[serde(default)]
    pub valorant: ValorantConfig,
    #[serde(default)]
    pub workstation: WorkstationConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    // listen address: eg: 0.0.0.0:8080
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollerConfig {
    // seconds between two poll ticks
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    // timeout of one outbound request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    300
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiscordConfig {
    // bot token used to identify on the gateway
    #[serde(default)]
    pub token: String,

    // id of the user whose presence is tracked
    #[serde(default)]
    pub user_id: String,

    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            user_id: String::new(),
            gateway_url: default_gateway_url(),
        }
    }
}

fn default_gateway_url() -> String {
    "wss://gateway.discord.gg/?v=10&encoding=json".to_string()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SteamConfig {
    // player summaries url, api key and steam id included
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdownConfig {
    // checks url, api key included
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValorantConfig {
    #[serde(default)]
    pub mmr_url: String,

    // sent as the Authorization header
    #[serde(default)]
    pub key: String,

    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for ValorantConfig {
    fn default() -> Self {
        Self {
            mmr_url: String::new(),
            key: String::new(),
            region: default_region(),
        }
    }
}

fn default_region() -> String {
    "na".to_string()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkstationConfig {
    // shared secret for POST /workstation, empty rejects every push
    #[serde(default)]
    pub key: String,
}

pub fn load(path: &str) -> anyhow::Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Loads the config, falling back to empty values when it cannot be read.
///
/// Every dependent poller and the gateway will then fail on their own until
/// the file is fixed; startup itself never aborts on configuration.
pub fn load_or_default(path: &str) -> Config {
    match load(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Could not load config {}: {:#}", path, e);
            Config::default()
        }
    }
}
