use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_token() -> String {
    "ETH".to_string()
}

/// One entry of `chain.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    pub name: String,
    #[serde(rename = "rpc")]
    pub rpc_endpoint: String,
    #[serde(rename = "scan", default)]
    pub explorer_url_prefix: String,
    #[serde(rename = "token", default = "default_token")]
    pub token_symbol: String,
}

impl NetworkDescriptor {
    /// Explorer page for a submitted transaction hash.
    pub fn explorer_link(&self, tx_hash: &str) -> String {
        format!("{}/{}", self.explorer_url_prefix, tx_hash)
    }
}

/// Ordered list of selectable networks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkList {
    pub networks: Vec<NetworkDescriptor>,
}

impl NetworkList {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::FileNotFound { path: display });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: display.clone(),
            msg: e.to_string(),
        })?;
        Self::from_json(&content, &display)
    }

    pub fn from_json(content: &str, source: &str) -> Result<Self, ConfigError> {
        let list: NetworkList =
            serde_json::from_str(content).map_err(|e| ConfigError::Malformed {
                path: source.to_string(),
                msg: e.to_string(),
            })?;

        if list.networks.is_empty() {
            return Err(ConfigError::NoNetworks {
                path: source.to_string(),
            });
        }

        for network in &list.networks {
            if !network.rpc_endpoint.starts_with("http://")
                && !network.rpc_endpoint.starts_with("https://")
            {
                return Err(ConfigError::InvalidRpcUrl {
                    url: network.rpc_endpoint.clone(),
                });
            }
        }

        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.networks.iter().map(|n| n.name.as_str()).collect()
    }

    /// Picks a network by its 1-based position, as shown to the user.
    pub fn select(&self, selected: usize) -> Result<&NetworkDescriptor, ConfigError> {
        selected
            .checked_sub(1)
            .and_then(|idx| self.networks.get(idx))
            .ok_or(ConfigError::InvalidSelection {
                selected,
                total: self.networks.len(),
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}
