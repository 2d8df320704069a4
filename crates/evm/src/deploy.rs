// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Artifact, Faucet, TxError, TxOptions, WalletClient};
use alloy::{
    network::TransactionBuilder,
    primitives::{utils::format_ether, Address, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use anyhow::Result;
use tracing::info;

/// Deploys `artifact` and blocks until it is mined. Not retried.
pub async fn deploy(
    client: &WalletClient,
    artifact: &Artifact,
    constructor_args: &[u8],
) -> Result<Address, TxError> {
    deploy_with_options(client, artifact, constructor_args, &TxOptions::default()).await
}

/// Like [`deploy`], with an endowment and an optional pinned gas limit
pub async fn deploy_with_options(
    client: &WalletClient,
    artifact: &Artifact,
    constructor_args: &[u8],
    opts: &TxOptions,
) -> Result<Address, TxError> {
    info!(contract = %artifact.name, "Deploying contract");
    let mut tx = TransactionRequest::default()
        .with_from(client.address())
        .with_deploy_code(artifact.deploy_code(constructor_args))
        .with_value(opts.value);
    if let Some(gas_limit) = opts.gas_limit {
        tx = tx.with_gas_limit(gas_limit);
    }

    let pending = client
        .provider()
        .send_transaction(tx)
        .await
        .map_err(|e| TxError::submission("deploy", e))?;
    let tx_hash = *pending.tx_hash();
    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| TxError::confirmation(tx_hash, e))?;

    if !receipt.status() {
        return Err(TxError::Reverted {
            tx: tx_hash,
            block: receipt.block_number,
        });
    }
    let address = receipt
        .contract_address
        .ok_or(TxError::MissingContractAddress { tx: tx_hash })?;

    info!(contract = %artifact.name, address = %address, "Deployed contract");
    Ok(address)
}

/// Funds the deployer from the faucet, then deploys
pub async fn deploy_with_funding(
    faucet: &Faucet,
    client: &WalletClient,
    artifact: &Artifact,
    constructor_args: &[u8],
    funding: U256,
) -> Result<Address> {
    info!(
        deployer = %client.address(),
        amount = %format_ether(funding),
        "Funding deployer"
    );
    faucet.fund(client.address(), funding).await?;
    Ok(deploy(client, artifact, constructor_args).await?)
}
