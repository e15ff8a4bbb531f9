use crate::encoding::PayloadEncoding;
use crate::nonce::NoncePolicy;
use anyhow::Result;
use config::{Config, Environment, File};
use core_logic::{GasConfig, DEFAULT_PACING};
use serde::Deserialize;
use std::time::Duration;

fn default_chain_file() -> String {
    "chain.json".to_string()
}

fn default_wallet_file() -> String {
    "wallet.json".to_string()
}

fn default_multiplier() -> u64 {
    100
}

fn default_pacing_ms() -> u64 {
    DEFAULT_PACING.as_millis() as u64
}

/// Operator settings: `config.toml` (optional) overlaid with `INSCRIBER_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct InscriberConfig {
    #[serde(default = "default_chain_file")]
    pub chain_file: String,
    #[serde(default = "default_wallet_file")]
    pub wallet_file: String,
    /// Plain key list used when `wallet_file` is absent.
    #[serde(default)]
    pub key_file: Option<String>,
    #[serde(default)]
    pub proxy_file: Option<String>,
    #[serde(default = "default_multiplier")]
    pub gas_multiplier_percent: u64,
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    #[serde(default)]
    pub nonce_policy: NoncePolicy,
    #[serde(default)]
    pub payload_encoding: PayloadEncoding,
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for InscriberConfig {
    fn default() -> Self {
        Self {
            chain_file: default_chain_file(),
            wallet_file: default_wallet_file(),
            key_file: None,
            proxy_file: None,
            gas_multiplier_percent: default_multiplier(),
            pacing_ms: default_pacing_ms(),
            nonce_policy: NoncePolicy::default(),
            payload_encoding: PayloadEncoding::default(),
            log_dir: None,
        }
    }
}

impl InscriberConfig {
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("INSCRIBER"))
            .build()?;

        let config: Self = settings.try_deserialize().map_err(|e| anyhow::anyhow!(e))?;
        config.gas().validate()?;
        Ok(config)
    }

    pub fn gas(&self) -> GasConfig {
        GasConfig::new().with_multiplier(self.gas_multiplier_percent)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = InscriberConfig::load("definitely-not-here.toml").unwrap();
        assert_eq!(config.chain_file, "chain.json");
        assert_eq!(config.wallet_file, "wallet.json");
        assert_eq!(config.gas_multiplier_percent, 100);
        assert_eq!(config.pacing(), Duration::from_millis(5_000));
        assert_eq!(config.nonce_policy, NoncePolicy::Contiguous);
        assert_eq!(config.payload_encoding, PayloadEncoding::CodePoint);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_load_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
chain_file = "networks.json"
gas_multiplier_percent = 110
pacing_ms = 250
nonce_policy = "resync"
payload_encoding = "utf8"
"#
        )
        .unwrap();

        let config = InscriberConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.chain_file, "networks.json");
        assert_eq!(config.gas().multiplier_percent(), 110);
        assert_eq!(config.pacing(), Duration::from_millis(250));
        assert_eq!(config.nonce_policy, NoncePolicy::Resync);
        assert_eq!(config.payload_encoding, PayloadEncoding::Utf8);
    }

    #[test]
    fn test_rejects_excessive_multiplier() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "gas_multiplier_percent = 5000").unwrap();
        assert!(InscriberConfig::load(file.path().to_str().unwrap()).is_err());
    }
}
