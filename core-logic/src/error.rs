//! # Core Error Types
//!
//! Centralized error definitions for the core-logic crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Unified error type for core-logic operations.
///
/// This enum wraps all specific error types and provides a unified
/// error interface for the application layer.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Network(NetworkError),
}

impl From<ConfigError> for CoreError {
    fn from(e: ConfigError) -> Self {
        CoreError::Config(e)
    }
}

impl From<NetworkError> for CoreError {
    fn from(e: NetworkError) -> Self {
        CoreError::Network(e)
    }
}

/// Configuration-related errors
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Invalid RPC URL format: '{url}'")]
    InvalidRpcUrl { url: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Invalid network selection {selected} (available: 1-{total})")]
    InvalidSelection { selected: usize, total: usize },

    #[error("No networks defined in {path}")]
    NoNetworks { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O error reading {path}: {msg}")]
    IoError { path: String, msg: String },

    #[error("Malformed JSON in {path}: {msg}")]
    Malformed { path: String, msg: String },
}

/// Wallet loading errors
#[derive(Error, Debug, Clone)]
pub enum WalletError {
    #[error("Wallet file {path} contains no wallets")]
    Empty { path: String },

    #[error("Wallet #{index} has an empty private key")]
    EmptyKey { index: usize },

    #[error("Wallet #{index} has an invalid private key format: expected hex string")]
    InvalidKeyFormat { index: usize },

    #[error("Wallet #{index} key has wrong length: expected 64 hex chars, got {length}")]
    InvalidKeyLength { index: usize, length: usize },
}

/// Network and RPC-related errors
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Connection refused to {endpoint}: {reason}")]
    ConnectionRefused { endpoint: String, reason: String },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },

    #[error("Invalid proxy '{url}': {reason}")]
    InvalidProxy { url: String, reason: String },
}
