//! # Core Logic - Gas Configuration
//!
//! Chain-agnostic gas settings. The multiplier is an integer percentage
//! applied on top of the live network price; chain crates perform the
//! arithmetic on their own integer types.

/// Upper bound accepted for the multiplier (10x the market price).
pub const MAX_MULTIPLIER_PERCENT: u64 = 1_000;

/// Configuration for gas pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasConfig {
    /// Percent of the market gas price to pay (100 = unchanged).
    pub multiplier_percent: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            multiplier_percent: 100,
        }
    }
}

impl GasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_multiplier(mut self, multiplier_percent: u64) -> Self {
        self.multiplier_percent = multiplier_percent;
        self
    }

    pub fn multiplier_percent(&self) -> u64 {
        self.multiplier_percent
    }

    /// Rejects multipliers that would almost certainly drain a wallet.
    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        if self.multiplier_percent > MAX_MULTIPLIER_PERCENT {
            return Err(crate::ConfigError::InvalidValue {
                field: "gas_multiplier_percent".to_string(),
                reason: format!(
                    "{} exceeds the maximum of {}",
                    self.multiplier_percent, MAX_MULTIPLIER_PERCENT
                ),
            });
        }
        Ok(())
    }
}
