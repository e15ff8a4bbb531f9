use core_logic::GasConfig;
use ethers::types::U256;

/// Live network price plus the configured percentage on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasQuote {
    pub base_gas_price: U256,
    pub multiplier: u64,
}

impl GasQuote {
    pub fn new(base_gas_price: U256, config: &GasConfig) -> Self {
        Self {
            base_gas_price,
            multiplier: config.multiplier_percent(),
        }
    }

    /// `floor(base * multiplier / 100)`, saturating on overflow.
    pub fn adjusted(&self) -> U256 {
        self.base_gas_price.saturating_mul(U256::from(self.multiplier)) / U256::from(100u64)
    }

    /// Worst-case fee for `gas_limit` units at the adjusted price.
    pub fn total_cost(&self, gas_limit: U256) -> U256 {
        self.adjusted().saturating_mul(gas_limit)
    }
}

/// Gas price as gwei text, e.g. `"1.5"`.
pub fn format_gwei(wei: U256) -> String {
    ethers::utils::format_units(wei, "gwei").unwrap_or_else(|_| wei.to_string())
}

/// Balance as ether text.
pub fn format_ether(wei: U256) -> String {
    ethers::utils::format_units(wei, "ether").unwrap_or_else(|_| wei.to_string())
}
