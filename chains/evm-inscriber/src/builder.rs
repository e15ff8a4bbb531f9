use ethers::types::{Address, Bytes, TransactionRequest, U256};

/// Assembles the self-send that carries the inscription.
pub struct TransactionBuilder;

impl TransactionBuilder {
    /// Legacy (gas price) transaction from `self_address` to itself with
    /// zero value. No I/O.
    pub fn build(
        nonce: U256,
        gas_price: U256,
        gas_limit: U256,
        data: Bytes,
        self_address: Address,
    ) -> TransactionRequest {
        TransactionRequest::new()
            .from(self_address)
            .to(self_address)
            .value(U256::zero())
            .data(data)
            .nonce(nonce)
            .gas_price(gas_price)
            .gas(gas_limit)
    }
}
