//! Wallet-by-wallet batch execution.
//!
//! Wallets run strictly one after another and each wallet's attempts are
//! drained from a [`PacedQueue`], so at most one transaction is ever in
//! flight.

use crate::client::{ChainClient, ClientError};
use crate::dispatcher::{DispatchOutcome, ErrorKind, TransactionDispatcher};
use crate::encoding::{HexEncoder, PayloadEncoding};
use crate::nonce::{NoncePolicy, NonceTracker};
use core_logic::{BatchStats, GasConfig, NetworkDescriptor, PacedQueue, REPORT_TARGET};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, U256};
use ethers::utils::to_checksum;
use std::time::Duration;
use tracing::{error, info, warn};

/// Everything a run needs, fixed before the first wallet starts.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub network: NetworkDescriptor,
    pub payload: String,
    pub repeat_count: u32,
    pub gas: GasConfig,
    pub pacing: Duration,
    pub nonce_policy: NoncePolicy,
    pub encoding: PayloadEncoding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub sequence_index: usize,
    pub nonce: U256,
    pub outcome: DispatchOutcome,
}

#[derive(Debug, Clone)]
pub struct WalletReport {
    pub address: Address,
    pub start_nonce: Option<U256>,
    pub attempts: Vec<Attempt>,
    /// Set when a network failure stopped this wallet early.
    pub aborted: Option<ClientError>,
}

impl WalletReport {
    fn new(address: Address) -> Self {
        Self {
            address,
            start_nonce: None,
            attempts: Vec::new(),
            aborted: None,
        }
    }

    pub fn nonces(&self) -> Vec<U256> {
        self.attempts.iter().map(|a| a.nonce).collect()
    }

    pub fn stats(&self) -> BatchStats {
        let mut stats = BatchStats::default();
        for attempt in &self.attempts {
            stats.record(attempt.outcome.is_success());
        }
        stats
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub wallets: Vec<WalletReport>,
}

impl BatchReport {
    pub fn stats(&self) -> BatchStats {
        let mut total = BatchStats::default();
        for wallet in &self.wallets {
            total += wallet.stats();
        }
        total
    }

    pub fn aborted_wallets(&self) -> usize {
        self.wallets.iter().filter(|w| w.aborted.is_some()).count()
    }
}

pub struct BatchRunner<'a, C: ?Sized> {
    client: &'a C,
    config: &'a BatchConfig,
}

impl<'a, C: ChainClient + ?Sized> BatchRunner<'a, C> {
    pub fn new(client: &'a C, config: &'a BatchConfig) -> Self {
        Self { client, config }
    }

    /// Sends `repeat_count` inscriptions from every wallet, in order.
    pub async fn run_all(&self, wallets: &[LocalWallet]) -> BatchReport {
        let dispatcher = TransactionDispatcher::new(
            self.client,
            &self.config.network,
            self.config.gas,
            HexEncoder::new(self.config.encoding),
        );

        let mut report = BatchReport::default();
        for (idx, wallet) in wallets.iter().enumerate() {
            let wallet_report = self.run_wallet(&dispatcher, idx + 1, wallet).await;
            report.wallets.push(wallet_report);
        }
        report
    }

    async fn run_wallet(
        &self,
        dispatcher: &TransactionDispatcher<'_, C>,
        wallet_no: usize,
        wallet: &LocalWallet,
    ) -> WalletReport {
        let address = wallet.address();
        let mut report = WalletReport::new(address);

        info!(
            target: REPORT_TARGET,
            "Wallet {:03} ({})",
            wallet_no,
            to_checksum(&address, None)
        );

        let mut tracker = match NonceTracker::snapshot(self.client, address).await {
            Ok(tracker) => tracker,
            Err(e) => {
                error!("Wallet {:03}: failed to fetch nonce: {}", wallet_no, e);
                report.aborted = Some(e);
                return report;
            }
        };
        report.start_nonce = Some(tracker.start());
        info!(target: REPORT_TARGET, "Nonce: {}", tracker.start());

        let mut queue = PacedQueue::new(
            1..=self.config.repeat_count as usize,
            self.config.pacing,
        );

        while let Some(sequence_index) = queue.pop() {
            let nonce = tracker.next();

            let outcome = match dispatcher
                .dispatch(nonce, &self.config.payload, wallet, sequence_index)
                .await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(
                        "Wallet {:03}: aborted at nonce {} ({} left): {}",
                        wallet_no,
                        nonce,
                        queue.remaining(),
                        e
                    );
                    report.aborted = Some(e);
                    break;
                }
            };

            let conflict = outcome.error_kind() == Some(ErrorKind::NonceAlreadyUsed);
            report.attempts.push(Attempt {
                sequence_index,
                nonce,
                outcome,
            });

            if conflict && self.config.nonce_policy == NoncePolicy::Resync {
                match tracker.resync(self.client).await {
                    Ok(fresh) => warn!("Wallet {:03}: nonce resynced to {}", wallet_no, fresh),
                    Err(e) => {
                        error!("Wallet {:03}: nonce resync failed: {}", wallet_no, e);
                        report.aborted = Some(e);
                        break;
                    }
                }
            }

            queue.pace().await;
        }

        report
    }
}
