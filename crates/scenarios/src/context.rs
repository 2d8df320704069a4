// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::ScenarioReport;
use alloy::primitives::{Address, U256};
use anyhow::{anyhow, Context, Result};
use lightning_config::AppConfig;
use lightning_crypto::{EncryptionContext, Handle};
use lightning_evm::{
    deploy_with_funding, Account, Artifact, ChainClientFactory, Faucet, WalletClient,
};
use lightning_sdk::{Lightning, Reencryptor};
use std::{
    future::Future,
    path::Path,
    time::{Duration, Instant},
};
use tracing::{error, info, info_span, Instrument};

/// Fails the step when `fut` does not finish in time. The chain call itself
/// is not cancelled server side.
pub async fn with_timeout<T>(
    step: &str,
    timeout_ms: u64,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(Duration::from_millis(timeout_ms), fut)
        .await
        .map_err(|_| anyhow!("{step} timed out after {timeout_ms}ms"))?
}

/// Setup shared by every case of a scenario. Building it is the part of a
/// run whose failure aborts the whole suite.
pub struct ScenarioContext {
    pub config: AppConfig,
    pub lightning: Lightning,
    pub sender: WalletClient,
    pub faucet: Faucet,
}

impl ScenarioContext {
    pub async fn connect(config: AppConfig) -> Result<Self> {
        let e2e = config.e2e()?;
        let sender_account = Account::from_private_key(&e2e.sender_private_key)?;
        let sender =
            ChainClientFactory::create_write(&e2e.host_chain_rpc_url, &e2e.chain, &sender_account)
                .await?;

        let rich = Account::from_private_key(&config.faucet_private_key()?)?;
        let faucet = Faucet::new(
            ChainClientFactory::create_write(&e2e.host_chain_rpc_url, &e2e.chain, &rich).await?,
        );
        let lightning = Lightning::connect(&config).await?;

        info!(
            sender = %sender.address(),
            chain = %e2e.chain.name,
            executor = %lightning.executor_address(),
            "Scenario context ready"
        );
        Ok(Self {
            config,
            lightning,
            sender,
            faucet,
        })
    }

    pub fn sender_account(&self) -> &Account {
        self.sender.account()
    }

    /// Input context for the sender calling `contract`
    pub fn input_context(&self, contract: Address) -> EncryptionContext {
        EncryptionContext {
            account_address: self.sender.address(),
            dapp_address: contract,
        }
    }

    pub fn reencryptor(&self) -> Result<Reencryptor> {
        Ok(self.lightning.get_reencryptor(self.sender_account())?)
    }

    /// Funds the sender and deploys the artifact at `path`
    pub async fn deploy(&self, path: &Path) -> Result<Address> {
        let path = self.config.resolve_path(path);
        let artifact = Artifact::load(&path)
            .with_context(|| format!("Could not load artifact {}", path.display()))?;
        let funding = self.config.funding.deploy_funding_wei()?;
        with_timeout(
            &format!("deploy {}", artifact.name),
            self.config.timeouts.deploy_ms,
            deploy_with_funding(&self.faucet, &self.sender, &artifact, &[], funding),
        )
        .await
    }

    /// Decrypts `handle` twice through attested decryption and requires both
    /// reads to agree
    pub async fn decrypt_idempotent(&self, handle: Handle) -> Result<U256> {
        let account = self.sender_account();
        let first = self.lightning.attested_decrypt(account, &[handle]).await?;
        let second = self.lightning.attested_decrypt(account, &[handle]).await?;
        let (first, second) = (first[0].value, second[0].value);
        if first != second {
            return Err(anyhow!(
                "handle {handle} decrypted to {first}, then to {second}"
            ));
        }
        Ok(first)
    }

    /// Runs one case under the operation timeout and records its outcome
    pub async fn run_case<F>(&self, report: &mut ScenarioReport, name: &str, case: F)
    where
        F: Future<Output = Result<String>>,
    {
        let started = Instant::now();
        let result = with_timeout(name, self.config.timeouts.operation_ms, case)
            .instrument(info_span!("case", name))
            .await;
        if let Err(e) = &result {
            error!(case = name, "Case failed: {e:#}");
        }
        report.record(name, started.elapsed(), result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_steps_time_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        };
        let err = with_timeout("deploy AddTwo", 20_000, slow)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "deploy AddTwo timed out after 20000ms");
    }

    #[tokio::test]
    async fn step_errors_pass_through() {
        let failing = async { Err::<(), _>(anyhow!("reverted")) };
        let err = with_timeout("submit", 1_000, failing).await.unwrap_err();
        assert_eq!(err.to_string(), "reverted");
    }
}
