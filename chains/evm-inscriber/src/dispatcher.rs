//! Single-transaction pipeline: encode, price, estimate, check funds, send.

use crate::builder::TransactionBuilder;
use crate::client::{ChainClient, ClientError};
use crate::encoding::{EncodeError, HexEncoder};
use crate::gas::{format_ether, format_gwei, GasQuote};
use core_logic::{GasConfig, NetworkDescriptor, REPORT_TARGET};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Bytes, TxHash, U256};
use ethers::utils::to_checksum;
use thiserror::Error;
use tracing::info;

/// Coarse classification of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidData,
    Estimation,
    InsufficientBalance,
    NonceAlreadyUsed,
    Submission,
}

/// Why a single attempt did not produce a transaction. None of these stop
/// the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("payload cannot be sent as transaction data: {0}")]
    InvalidData(#[from] EncodeError),

    #[error("gas estimation failed: {0}")]
    Estimation(String),

    #[error("insufficient balance: cost {required} wei exceeds balance {available} wei")]
    InsufficientBalance { required: U256, available: U256 },

    #[error("nonce {nonce} has already been used")]
    NonceAlreadyUsed { nonce: U256 },

    #[error("submission failed: {0}")]
    Submission(String),
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::InvalidData(_) => ErrorKind::InvalidData,
            DispatchError::Estimation(_) => ErrorKind::Estimation,
            DispatchError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            DispatchError::NonceAlreadyUsed { .. } => ErrorKind::NonceAlreadyUsed,
            DispatchError::Submission(_) => ErrorKind::Submission,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent {
        tx_hash: TxHash,
        explorer_link: String,
    },
    Failed(DispatchError),
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Sent { .. })
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            DispatchOutcome::Sent { tx_hash, .. } => Some(*tx_hash),
            DispatchOutcome::Failed(_) => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            DispatchOutcome::Sent { .. } => None,
            DispatchOutcome::Failed(e) => Some(e.kind()),
        }
    }
}

pub struct TransactionDispatcher<'a, C: ?Sized> {
    client: &'a C,
    network: &'a NetworkDescriptor,
    gas: GasConfig,
    encoder: HexEncoder,
}

impl<'a, C: ChainClient + ?Sized> TransactionDispatcher<'a, C> {
    pub fn new(
        client: &'a C,
        network: &'a NetworkDescriptor,
        gas: GasConfig,
        encoder: HexEncoder,
    ) -> Self {
        Self {
            client,
            network,
            gas,
            encoder,
        }
    }

    /// Runs one attempt at `nonce`.
    ///
    /// Per-transaction problems come back as `Ok(DispatchOutcome::Failed)`.
    /// `Err` means the node could not be reached for a read, which the
    /// caller treats as fatal for the current wallet.
    ///
    /// `sequence_index == 1` also reports the starting balance, so every
    /// wallet gets its own balance line at the start of its loop.
    pub async fn dispatch(
        &self,
        nonce: U256,
        payload: &str,
        wallet: &LocalWallet,
        sequence_index: usize,
    ) -> Result<DispatchOutcome, ClientError> {
        let address = wallet.address();
        let payload = payload.trim();

        let hex_data = self.encoder.encode(payload);
        let data = match self.encoder.to_bytes(payload) {
            Ok(bytes) => Bytes::from(bytes),
            Err(e) => return Ok(self.fail(sequence_index, nonce, e.into())),
        };

        let quote = GasQuote::new(self.client.gas_price().await?, &self.gas);
        let gas_price = quote.adjusted();

        let gas_limit = match self.client.estimate_gas_limit(&data, address).await {
            Ok(limit) => limit,
            Err(ClientError::Estimation(reason)) => {
                return Ok(self.fail(sequence_index, nonce, DispatchError::Estimation(reason)))
            }
            Err(e) => return Err(e),
        };

        let total_cost = quote.total_cost(gas_limit);
        let balance = self.client.balance(address).await?;

        if total_cost > balance {
            return Ok(self.fail(
                sequence_index,
                nonce,
                DispatchError::InsufficientBalance {
                    required: total_cost,
                    available: balance,
                },
            ));
        }

        if sequence_index == 1 {
            info!(
                target: REPORT_TARGET,
                "Starting balance ({}): {} {}",
                to_checksum(&address, None),
                format_ether(balance),
                self.network.token_symbol
            );
        }

        info!(target: REPORT_TARGET, "{}", "-".repeat(72));
        info!(target: REPORT_TARGET, "Transaction #{}", sequence_index);
        info!(target: REPORT_TARGET, "Nonce    : {}", nonce);
        info!(target: REPORT_TARGET, "Gas Price: {} gwei", format_gwei(gas_price));
        info!(target: REPORT_TARGET, "Hex Data : {}", hex_data);

        let tx = TransactionBuilder::build(nonce, gas_price, gas_limit, data, address);

        match self.client.submit(wallet, tx).await {
            Ok(tx_hash) => {
                let explorer_link = self.network.explorer_link(&format!("{:?}", tx_hash));
                info!(
                    target: REPORT_TARGET,
                    "[{}] SUCCESS Explorer Link: {}", sequence_index, explorer_link
                );
                Ok(DispatchOutcome::Sent {
                    tx_hash,
                    explorer_link,
                })
            }
            Err(ClientError::NonceAlreadyUsed(_)) => Ok(self.fail(
                sequence_index,
                nonce,
                DispatchError::NonceAlreadyUsed { nonce },
            )),
            Err(e) => Ok(self.fail(
                sequence_index,
                nonce,
                DispatchError::Submission(e.to_string()),
            )),
        }
    }

    fn fail(&self, sequence_index: usize, nonce: U256, error: DispatchError) -> DispatchOutcome {
        match &error {
            DispatchError::InsufficientBalance { available, .. } => info!(
                target: REPORT_TARGET,
                "[{}] SKIPPED nonce {}: insufficient balance for transaction cost. Balance: {} {}",
                sequence_index,
                nonce,
                format_ether(*available),
                self.network.token_symbol
            ),
            DispatchError::NonceAlreadyUsed { .. } => info!(
                target: REPORT_TARGET,
                "[{}] NONCE USED nonce {} has already been used",
                sequence_index,
                nonce
            ),
            other => info!(
                target: REPORT_TARGET,
                "[{}] FAILED nonce {}: {}", sequence_index, nonce, other
            ),
        }
        DispatchOutcome::Failed(error)
    }
}
