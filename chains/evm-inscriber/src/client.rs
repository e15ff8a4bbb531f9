//! Network-facing reads and submission.
//!
//! Every call goes to the node; nothing is cached. Provider failures are
//! classified here, once, into [`ClientError`] kinds so callers never look
//! at error text.

use async_trait::async_trait;
use core_logic::{ConfigError, CoreError, NetworkDescriptor, NetworkError, ProxyConfig};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, JsonRpcError, Middleware, MiddlewareError, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, BlockNumber, Bytes, TransactionRequest, TxHash, U256};
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The node could not be reached or returned garbage.
    #[error("network error: {0}")]
    Network(String),

    /// The node simulated the transaction and refused it.
    #[error("gas estimation failed: {0}")]
    Estimation(String),

    /// The node already has a transaction at this nonce.
    #[error("nonce has already been used: {0}")]
    NonceAlreadyUsed(String),

    /// Any other rejection of a submitted transaction.
    #[error("transaction rejected: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Transaction count including pending transactions.
    async fn pending_nonce(&self, address: Address) -> Result<U256, ClientError>;

    /// Current gas price in wei.
    async fn gas_price(&self) -> Result<U256, ClientError>;

    /// Gas used by a zero-value transaction carrying `data` to `to`.
    async fn estimate_gas_limit(&self, data: &Bytes, to: Address) -> Result<U256, ClientError>;

    async fn balance(&self, address: Address) -> Result<U256, ClientError>;

    /// Signs and broadcasts `tx`, returning as soon as the node accepts it.
    async fn submit(&self, signer: &LocalWallet, tx: TransactionRequest)
        -> Result<TxHash, ClientError>;
}

/// Messages meaning another transaction already took the nonce. A resend of
/// the identical transaction ("already known") is not one of them.
const NONCE_CONFLICT_PATTERNS: [&str; 4] = [
    "nonce too low",
    "nonce is too low",
    "nonce has already been used",
    "oldnonce",
];

/// Maps a node's JSON-RPC rejection of `eth_sendRawTransaction`.
pub fn classify_rejection(response: &JsonRpcError) -> ClientError {
    let message = response.message.to_lowercase();
    if NONCE_CONFLICT_PATTERNS
        .iter()
        .any(|pattern| message.contains(pattern))
    {
        ClientError::NonceAlreadyUsed(response.message.clone())
    } else {
        ClientError::Rejected(response.message.clone())
    }
}

fn classify_read<E: MiddlewareError>(err: E) -> ClientError {
    ClientError::Network(err.to_string())
}

fn classify_estimate<E: MiddlewareError>(err: E) -> ClientError {
    match MiddlewareError::as_error_response(&err) {
        Some(response) => ClientError::Estimation(response.message.clone()),
        None => ClientError::Network(err.to_string()),
    }
}

fn classify_send<E: MiddlewareError>(err: E) -> ClientError {
    match MiddlewareError::as_error_response(&err) {
        Some(response) => classify_rejection(response),
        None => ClientError::Network(err.to_string()),
    }
}

/// [`ChainClient`] over an ethers HTTP provider.
#[derive(Debug, Clone)]
pub struct EthersClient {
    provider: Arc<Provider<Http>>,
    chain_id: u64,
}

impl EthersClient {
    /// Builds the HTTP transport (optionally through a proxy) and learns the
    /// chain id.
    pub async fn connect(
        network: &NetworkDescriptor,
        proxy_config: Option<&ProxyConfig>,
    ) -> Result<Self, CoreError> {
        let endpoint = network.rpc_endpoint.clone();
        let url = reqwest::Url::parse(&endpoint).map_err(|_| ConfigError::InvalidRpcUrl {
            url: endpoint.clone(),
        })?;

        let mut client_builder = Client::builder();

        if let Some(proxy_conf) = proxy_config {
            let mut proxy =
                reqwest::Proxy::all(&proxy_conf.url).map_err(|e| NetworkError::InvalidProxy {
                    url: proxy_conf.url.clone(),
                    reason: e.to_string(),
                })?;
            if let (Some(u), Some(p)) = (&proxy_conf.username, &proxy_conf.password) {
                proxy = proxy.basic_auth(u, p);
            }
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder
            .build()
            .map_err(|e| NetworkError::ConnectionRefused {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        let provider = Provider::new(Http::new_with_client(url, client));

        let chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| NetworkError::ConnectionRefused {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;
        if chain_id > U256::from(u64::MAX) {
            return Err(NetworkError::InvalidResponse {
                endpoint,
                reason: format!("chain id {} does not fit in u64", chain_id),
            }
            .into());
        }

        debug!("Connected to {} (chain id {})", endpoint, chain_id);

        Ok(Self {
            provider: Arc::new(provider),
            chain_id: chain_id.as_u64(),
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

#[async_trait]
impl ChainClient for EthersClient {
    async fn pending_nonce(&self, address: Address) -> Result<U256, ClientError> {
        self.provider
            .get_transaction_count(address, Some(BlockNumber::Pending.into()))
            .await
            .map_err(classify_read)
    }

    async fn gas_price(&self) -> Result<U256, ClientError> {
        self.provider.get_gas_price().await.map_err(classify_read)
    }

    async fn estimate_gas_limit(&self, data: &Bytes, to: Address) -> Result<U256, ClientError> {
        let tx: TypedTransaction = TransactionRequest::new()
            .from(to)
            .to(to)
            .value(U256::zero())
            .data(data.clone())
            .into();

        self.provider
            .estimate_gas(&tx, None)
            .await
            .map_err(classify_estimate)
    }

    async fn balance(&self, address: Address) -> Result<U256, ClientError> {
        self.provider
            .get_balance(address, None)
            .await
            .map_err(classify_read)
    }

    async fn submit(
        &self,
        signer: &LocalWallet,
        tx: TransactionRequest,
    ) -> Result<TxHash, ClientError> {
        let client = SignerMiddleware::new(
            self.provider.clone(),
            signer.clone().with_chain_id(self.chain_id),
        );
        let pending = client
            .send_transaction(tx, None)
            .await
            .map_err(classify_send)?;
        Ok(pending.tx_hash())
    }
}
