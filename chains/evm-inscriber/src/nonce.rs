use crate::client::{ChainClient, ClientError};
use ethers::types::{Address, U256};
use serde::Deserialize;

/// What to do with the local counter after the node reports a nonce
/// conflict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoncePolicy {
    /// Keep counting from the snapshot: nonce_i = nonce_0 + i.
    #[default]
    Contiguous,
    /// Re-read the pending nonce from the node and continue from there.
    Resync,
}

/// Local nonce counter for one wallet, seeded from a single chain snapshot.
#[derive(Debug, Clone)]
pub struct NonceTracker {
    address: Address,
    start: U256,
    next: U256,
}

impl NonceTracker {
    /// Fetches the pending nonce once.
    pub async fn snapshot<C: ChainClient + ?Sized>(
        client: &C,
        address: Address,
    ) -> Result<Self, ClientError> {
        let start = client.pending_nonce(address).await?;
        Ok(Self::starting_at(address, start))
    }

    pub fn starting_at(address: Address, start: U256) -> Self {
        Self {
            address,
            start,
            next: start,
        }
    }

    /// Returns the nonce to use and advances the counter.
    pub fn next(&mut self) -> U256 {
        let nonce = self.next;
        self.next = nonce + 1;
        nonce
    }

    /// Reset the local nonce to the pending count on chain.
    pub async fn resync<C: ChainClient + ?Sized>(&mut self, client: &C) -> Result<U256, ClientError> {
        let nonce = client.pending_nonce(self.address).await?;
        self.next = nonce;
        Ok(nonce)
    }

    pub fn start(&self) -> U256 {
        self.start
    }

    pub fn peek(&self) -> U256 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_contiguous() {
        let mut tracker = NonceTracker::starting_at(Address::zero(), U256::from(41u64));
        let used: Vec<U256> = (0..4).map(|_| tracker.next()).collect();
        assert_eq!(
            used,
            vec![41u64, 42, 43, 44]
                .into_iter()
                .map(U256::from)
                .collect::<Vec<_>>()
        );
        assert_eq!(tracker.start(), U256::from(41u64));
        assert_eq!(tracker.peek(), U256::from(45u64));
    }
}
