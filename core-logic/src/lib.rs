//! # Core Logic - Shared Utilities
//!
//! Chain-independent plumbing shared by the chain crates: network list and
//! wallet loading, logging, gas settings and sequential pacing.
//!
//! ## Modules
//!
//! - [`config`] - Network descriptors and proxy settings
//! - [`error`] - Typed error handling with thiserror
//! - [`traits`] - Shared result counters
//! - `utils` - Wallet, proxy, gas, logger and runner utilities

pub mod config;
pub mod error;
pub mod traits;
pub(crate) mod utils;

pub use config::{NetworkDescriptor, NetworkList, ProxyConfig};
pub use error::{ConfigError, CoreError, NetworkError, WalletError};
pub use traits::BatchStats;

pub use utils::{
    setup_logger, GasConfig, PacedQueue, ProxyManager, RunTimer, WalletCredential, WalletManager,
    DEFAULT_PACING, MAX_MULTIPLIER_PERCENT, REPORT_TARGET,
};
