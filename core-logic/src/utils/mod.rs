//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod gas;
pub(crate) mod logger;
pub(crate) mod proxy_manager;
pub(crate) mod runner;
pub(crate) mod wallet_manager;

// Selective exports - only public utilities
pub use gas::{GasConfig, MAX_MULTIPLIER_PERCENT};
pub use logger::{setup_logger, REPORT_TARGET};
pub use proxy_manager::ProxyManager;
pub use runner::{PacedQueue, RunTimer, DEFAULT_PACING};
pub use wallet_manager::{WalletCredential, WalletManager};
