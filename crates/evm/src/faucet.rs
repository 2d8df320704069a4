// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{TxError, WalletClient};
use alloy::{
    network::TransactionBuilder,
    primitives::{utils::format_ether, Address, U256},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tokio::sync::Mutex;
use tracing::info;

// Every faucet in the process shares the rich account
static FAUCET_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub async fn next_pending_nonce<P: Provider>(provider: &P, from: Address) -> Result<u64> {
    provider
        .get_transaction_count(from)
        .pending()
        .await
        .with_context(|| format!("Failed to read the pending nonce of {from}"))
}

/// Amount needed to bring `balance` up to `min_balance`, if any
pub fn top_up_amount(balance: U256, min_balance: U256) -> Option<U256> {
    (balance < min_balance).then(|| min_balance - balance)
}

/// Sends native tokens from the rich account
#[derive(Clone)]
pub struct Faucet {
    client: WalletClient,
}

impl Faucet {
    pub fn new(client: WalletClient) -> Self {
        Self { client }
    }

    pub fn address(&self) -> Address {
        self.client.address()
    }

    pub async fn fund(&self, to: Address, amount: U256) -> Result<TransactionReceipt> {
        let _guard = FAUCET_LOCK.lock().await;
        self.fund_locked(to, amount).await
    }

    /// Caller holds `FAUCET_LOCK`
    async fn fund_locked(&self, to: Address, amount: U256) -> Result<TransactionReceipt> {
        let provider = self.client.provider();
        let nonce = next_pending_nonce(provider, self.address()).await?;

        let tx = TransactionRequest::default()
            .with_from(self.address())
            .with_to(to)
            .with_value(amount)
            .with_nonce(nonce);

        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(|e| TxError::submission("fund", e))?;
        let tx_hash = *pending.tx_hash();
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| TxError::confirmation(tx_hash, e))?;
        if !receipt.status() {
            return Err(TxError::Reverted {
                tx: tx_hash,
                block: receipt.block_number,
            }
            .into());
        }

        info!(
            to = %to,
            amount = %format_ether(amount),
            tx = %self.client.chain().tx_url(tx_hash),
            "Funded account"
        );
        Ok(receipt)
    }

    /// Tops `to` up to `min_balance`. Returns `None` when it already has
    /// enough. Balance read and send happen under one hold of the faucet lock.
    pub async fn top_up(
        &self,
        to: Address,
        min_balance: U256,
    ) -> Result<Option<TransactionReceipt>> {
        let _guard = FAUCET_LOCK.lock().await;
        let balance = self.client.get_balance(to).await?;
        match top_up_amount(balance, min_balance) {
            Some(amount) => Ok(Some(self.fund_locked(to, amount).await?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::parse_ether;

    #[test]
    fn tops_up_only_the_difference() {
        let min = parse_ether("0.001").unwrap();
        let balance = parse_ether("0.0004").unwrap();
        assert_eq!(
            top_up_amount(balance, min),
            Some(parse_ether("0.0006").unwrap())
        );
        assert_eq!(top_up_amount(U256::ZERO, min), Some(min));
    }

    #[test]
    fn funded_accounts_are_left_alone() {
        let min = parse_ether("0.001").unwrap();
        assert_eq!(top_up_amount(min, min), None);
        assert_eq!(top_up_amount(parse_ether("2").unwrap(), min), None);
    }
}
