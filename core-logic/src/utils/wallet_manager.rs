use crate::error::{ConfigError, WalletError};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A single signing key. The key never appears in `Debug` output and is
/// wiped from memory when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletCredential {
    private_key: String,
}

impl WalletCredential {
    /// Trims and validates a raw key; `index` is 1-based and only used for
    /// error messages.
    pub fn parse(raw: &str, index: usize) -> Result<Self, WalletError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WalletError::EmptyKey { index });
        }

        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WalletError::InvalidKeyFormat { index });
        }
        if hex_part.len() != 64 {
            return Err(WalletError::InvalidKeyLength {
                index,
                length: hex_part.len(),
            });
        }

        Ok(Self {
            private_key: trimmed.to_string(),
        })
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for WalletCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletCredential")
            .field("private_key", &"***REDACTED***")
            .finish()
    }
}

#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
struct WalletEntry {
    #[serde(rename = "privateKey")]
    private_key: String,
}

#[derive(Deserialize)]
struct WalletFile {
    wallets: Vec<WalletEntry>,
}

/// Ordered set of wallets for a run, loaded once at startup.
#[derive(Debug)]
pub struct WalletManager {
    credentials: Vec<WalletCredential>,
}

impl WalletManager {
    /// Loads `json_path`; when it does not exist and a plain key file is
    /// given, falls back to that file.
    pub fn load(json_path: impl AsRef<Path>, key_file: Option<&Path>) -> Result<Self> {
        let json_path = json_path.as_ref();
        if json_path.exists() {
            return Self::from_json_file(json_path);
        }

        match key_file {
            Some(path) if path.exists() => {
                warn!(
                    "{} not found, loading raw keys from {}",
                    json_path.display(),
                    path.display()
                );
                Self::from_key_file(path)
            }
            _ => Err(ConfigError::FileNotFound {
                path: json_path.display().to_string(),
            }
            .into()),
        }
    }

    /// `{ "wallets": [ { "privateKey": "..." } ] }`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read wallet file {}", path.display()))?;
        let manager = Self::from_json_str(&content, &path.display().to_string())?;
        info!(
            "Loaded {} wallets from {}",
            manager.count(),
            path.display()
        );
        Ok(manager)
    }

    pub fn from_json_str(content: &str, source: &str) -> Result<Self> {
        let file: WalletFile = serde_json::from_str(content).map_err(|e| ConfigError::Malformed {
            path: source.to_string(),
            msg: e.to_string(),
        })?;

        let credentials = file
            .wallets
            .iter()
            .enumerate()
            .map(|(i, entry)| WalletCredential::parse(&entry.private_key, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Self::non_empty(credentials, source)
    }

    /// One key per line; blank lines and `#` comments are ignored.
    pub fn from_key_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read key file {}", path.display()))?;

        let credentials = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .enumerate()
            .map(|(i, line)| WalletCredential::parse(line, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Self::non_empty(credentials, &path.display().to_string())
    }

    fn non_empty(credentials: Vec<WalletCredential>, source: &str) -> Result<Self> {
        if credentials.is_empty() {
            return Err(WalletError::Empty {
                path: source.to_string(),
            }
            .into());
        }
        Ok(Self { credentials })
    }

    /// Returns the number of available wallets
    pub fn count(&self) -> usize {
        self.credentials.len()
    }

    pub fn credentials(&self) -> &[WalletCredential] {
        &self.credentials
    }

    /// Labels suitable for logs, never the key itself.
    pub fn list_wallets(&self) -> Vec<String> {
        (1..=self.credentials.len())
            .map(|i| format!("Wallet {:03}", i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_parse_trims_whitespace() {
        let cred = WalletCredential::parse(&format!("  0x{}\n", KEY), 1).unwrap();
        assert_eq!(cred.private_key(), format!("0x{}", KEY));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            WalletCredential::parse("   ", 3),
            Err(WalletError::EmptyKey { index: 3 })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        let bad = "zz".repeat(32);
        assert!(matches!(
            WalletCredential::parse(&bad, 1),
            Err(WalletError::InvalidKeyFormat { .. })
        ));
        assert!(matches!(
            WalletCredential::parse("abcd", 1),
            Err(WalletError::InvalidKeyLength { length: 4, .. })
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let cred = WalletCredential::parse(KEY, 1).unwrap();
        let out = format!("{:?}", cred);
        assert!(!out.contains(KEY));
        assert!(out.contains("REDACTED"));
    }

    #[test]
    fn test_from_json_str_keeps_order() {
        let json = format!(
            r#"{{"wallets":[{{"privateKey":" {k} "}},{{"privateKey":"0x{k}"}}]}}"#,
            k = KEY
        );
        let manager = WalletManager::from_json_str(&json, "wallet.json").unwrap();
        assert_eq!(manager.count(), 2);
        assert_eq!(manager.credentials()[0].private_key(), KEY);
        assert_eq!(manager.list_wallets(), vec!["Wallet 001", "Wallet 002"]);
    }

    #[test]
    fn test_from_json_str_rejects_missing_wallets() {
        let err = WalletManager::from_json_str(r#"{"accounts":[]}"#, "wallet.json").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());

        let err = WalletManager::from_json_str(r#"{"wallets":[]}"#, "wallet.json").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WalletError>(),
            Some(WalletError::Empty { .. })
        ));
    }
}
