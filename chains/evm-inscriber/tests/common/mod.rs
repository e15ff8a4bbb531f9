#![allow(dead_code)]

use async_trait::async_trait;
use core_logic::{GasConfig, NetworkDescriptor};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, Bytes, TransactionRequest, TxHash, H256, U256};
use evm_inscriber::{
    BatchConfig, ChainClient, ClientError, NoncePolicy, PayloadEncoding,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

pub const KEY_A: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const KEY_B: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub fn wallet(key: &str) -> LocalWallet {
    key.parse().unwrap()
}

pub fn network() -> NetworkDescriptor {
    NetworkDescriptor {
        name: "Testnet".to_string(),
        rpc_endpoint: "http://127.0.0.1:8545".to_string(),
        explorer_url_prefix: "https://explorer.test/tx".to_string(),
        token_symbol: "TST".to_string(),
    }
}

pub fn batch_config(payload: &str, repeat_count: u32) -> BatchConfig {
    BatchConfig {
        network: network(),
        payload: payload.to_string(),
        repeat_count,
        gas: GasConfig::default(),
        pacing: Duration::from_millis(5_000),
        nonce_policy: NoncePolicy::Contiguous,
        encoding: PayloadEncoding::CodePoint,
    }
}

pub fn eth(n: u64) -> U256 {
    U256::exp10(18) * U256::from(n)
}

/// Values handed out in order; the last one repeats forever.
#[derive(Debug, Clone)]
pub struct Script<T: Clone> {
    steps: VecDeque<T>,
}

impl<T: Clone> Script<T> {
    pub fn new(steps: impl IntoIterator<Item = T>) -> Self {
        let steps: VecDeque<T> = steps.into_iter().collect();
        assert!(!steps.is_empty(), "script needs at least one step");
        Self { steps }
    }

    fn next(&mut self) -> T {
        if self.steps.len() > 1 {
            self.steps.pop_front().unwrap()
        } else {
            self.steps[0].clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Submitted {
    pub from: Address,
    pub tx: TransactionRequest,
}

#[derive(Default)]
struct State {
    nonces: HashMap<Address, Script<Result<U256, ClientError>>>,
    balances: HashMap<Address, Script<U256>>,
    gas_price: Option<Script<Result<U256, ClientError>>>,
    estimate: Option<Script<Result<U256, ClientError>>>,
    submit: Option<Script<Result<(), ClientError>>>,
    submitted: Vec<Submitted>,
    calls: Vec<String>,
    in_flight: usize,
    max_in_flight: usize,
}

/// Scripted in-memory chain.
#[derive(Default)]
pub struct MockChain {
    state: Mutex<State>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nonce(self, address: Address, nonce: u64) -> Self {
        self.with_nonce_script(address, vec![Ok(U256::from(nonce))])
    }

    pub fn with_nonce_script(
        self,
        address: Address,
        steps: Vec<Result<U256, ClientError>>,
    ) -> Self {
        self.state
            .lock()
            .unwrap()
            .nonces
            .insert(address, Script::new(steps));
        self
    }

    pub fn with_balance(self, address: Address, steps: Vec<U256>) -> Self {
        self.state
            .lock()
            .unwrap()
            .balances
            .insert(address, Script::new(steps));
        self
    }

    pub fn with_gas_price(self, steps: Vec<Result<U256, ClientError>>) -> Self {
        self.state.lock().unwrap().gas_price = Some(Script::new(steps));
        self
    }

    pub fn with_estimate(self, steps: Vec<Result<U256, ClientError>>) -> Self {
        self.state.lock().unwrap().estimate = Some(Script::new(steps));
        self
    }

    pub fn with_submit(self, steps: Vec<Result<(), ClientError>>) -> Self {
        self.state.lock().unwrap().submit = Some(Script::new(steps));
        self
    }

    pub fn submitted(&self) -> Vec<Submitted> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn submitted_nonces(&self, from: Address) -> Vec<U256> {
        self.submitted()
            .into_iter()
            .filter(|s| s.from == from)
            .filter_map(|s| s.tx.nonce)
            .collect()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.lock().unwrap().max_in_flight
    }

    fn enter(&self, call: String) {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.in_flight += 1;
        state.max_in_flight = state.max_in_flight.max(state.in_flight);
    }

    fn exit(&self) {
        self.state.lock().unwrap().in_flight -= 1;
    }

    async fn call<T>(&self, name: String, f: impl FnOnce(&mut State) -> T) -> T {
        self.enter(name);
        tokio::task::yield_now().await;
        let out = {
            let mut state = self.state.lock().unwrap();
            f(&mut state)
        };
        self.exit();
        out
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn pending_nonce(&self, address: Address) -> Result<U256, ClientError> {
        self.call(format!("nonce:{:?}", address), |s| {
            s.nonces
                .get_mut(&address)
                .map(|script| script.next())
                .unwrap_or(Ok(U256::zero()))
        })
        .await
    }

    async fn gas_price(&self) -> Result<U256, ClientError> {
        self.call("gas_price".to_string(), |s| {
            s.gas_price
                .as_mut()
                .map(|script| script.next())
                .unwrap_or(Ok(U256::from(1_000_000_000u64)))
        })
        .await
    }

    async fn estimate_gas_limit(&self, _data: &Bytes, to: Address) -> Result<U256, ClientError> {
        self.call(format!("estimate:{:?}", to), |s| {
            s.estimate
                .as_mut()
                .map(|script| script.next())
                .unwrap_or(Ok(U256::from(21_000u64)))
        })
        .await
    }

    async fn balance(&self, address: Address) -> Result<U256, ClientError> {
        self.call(format!("balance:{:?}", address), |s| {
            Ok(s.balances
                .get_mut(&address)
                .map(|script| script.next())
                .unwrap_or_else(|| eth(1)))
        })
        .await
    }

    async fn submit(
        &self,
        signer: &LocalWallet,
        tx: TransactionRequest,
    ) -> Result<TxHash, ClientError> {
        let from = signer.address();
        self.call(format!("submit:{:?}", from), |s| {
            let result = s
                .submit
                .as_mut()
                .map(|script| script.next())
                .unwrap_or(Ok(()));
            result.map(|()| {
                s.submitted.push(Submitted { from, tx });
                H256::from_low_u64_be(s.submitted.len() as u64)
            })
        })
        .await
    }
}
