//! # EVM Inscriber
//!
//! Sends repeated data-only self-transactions ("inscriptions") from a list
//! of wallets, one transaction at a time.
//!
//! - [`encoding`] - payload to hex transaction data
//! - [`client`] - node access and error classification
//! - [`builder`] - transaction assembly
//! - [`dispatcher`] - the per-transaction pipeline
//! - [`runner`] - wallet-by-wallet batch execution

pub mod builder;
pub mod client;
pub mod config;
pub mod dispatcher;
pub mod encoding;
pub mod gas;
pub mod nonce;
pub mod runner;

pub use builder::TransactionBuilder;
pub use client::{ChainClient, ClientError, EthersClient};
pub use config::InscriberConfig;
pub use dispatcher::{DispatchError, DispatchOutcome, ErrorKind, TransactionDispatcher};
pub use encoding::{HexEncoder, PayloadEncoding, DEFAULT_PAYLOAD};
pub use gas::GasQuote;
pub use nonce::{NoncePolicy, NonceTracker};
pub use runner::{Attempt, BatchConfig, BatchReport, BatchRunner, WalletReport};
