// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::Account;
use alloy::{
    primitives::{Address, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
};
use anyhow::{bail, Context, Result};
use lightning_config::{ChainInfo, RPC};
use tracing::debug;

/// Marker for clients that only read chain state
#[derive(Clone, Debug)]
pub struct ReadOnly;

/// Clients that sign carry the account they sign with
#[derive(Clone, Debug)]
pub struct ReadWrite {
    account: Account,
}

/// A provider bound to one chain and RPC endpoint
#[derive(Clone)]
pub struct ChainClient<T> {
    provider: DynProvider,
    chain: ChainInfo,
    mode: T,
}

pub type PublicClient = ChainClient<ReadOnly>;
pub type WalletClient = ChainClient<ReadWrite>;

impl<T> ChainClient<T> {
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    pub fn chain(&self) -> &ChainInfo {
        &self.chain
    }

    pub fn chain_id(&self) -> u64 {
        self.chain.id
    }

    pub async fn get_balance(&self, address: Address) -> Result<U256> {
        self.provider
            .get_balance(address)
            .await
            .with_context(|| format!("Failed to read the balance of {address}"))
    }

    pub async fn get_block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    /// Read only view of the same connection
    pub fn public(&self) -> PublicClient {
        ChainClient {
            provider: self.provider.clone(),
            chain: self.chain.clone(),
            mode: ReadOnly,
        }
    }
}

impl ChainClient<ReadWrite> {
    pub fn account(&self) -> &Account {
        &self.mode.account
    }

    pub fn address(&self) -> Address {
        self.mode.account.address()
    }
}

pub struct ChainClientFactory;

impl ChainClientFactory {
    pub async fn create_read(rpc: &RPC, chain: &ChainInfo) -> Result<PublicClient> {
        let provider = ProviderBuilder::new()
            .connect(rpc.as_str())
            .await
            .with_context(|| format!("Failed to connect to {}", rpc.as_str()))?
            .erased();
        check_chain_id(&provider, chain).await?;

        Ok(ChainClient {
            provider,
            chain: chain.clone(),
            mode: ReadOnly,
        })
    }

    pub async fn create_write(
        rpc: &RPC,
        chain: &ChainInfo,
        account: &Account,
    ) -> Result<WalletClient> {
        let provider = ProviderBuilder::new()
            .wallet(account.wallet())
            .connect(rpc.as_str())
            .await
            .with_context(|| format!("Failed to connect to {}", rpc.as_str()))?
            .erased();
        check_chain_id(&provider, chain).await?;

        Ok(ChainClient {
            provider,
            chain: chain.clone(),
            mode: ReadWrite {
                account: account.clone(),
            },
        })
    }
}

async fn check_chain_id(provider: &DynProvider, chain: &ChainInfo) -> Result<()> {
    let remote = provider
        .get_chain_id()
        .await
        .context("Failed to read the chain id. Check if the node is running and the URL is correct.")?;
    if remote != chain.id {
        bail!(
            "RPC reports chain id {remote} but {} is configured with {}",
            chain.name,
            chain.id
        );
    }
    debug!(chain = %chain.name, id = remote, "Connected");
    Ok(())
}
