// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{Expectation, ScenarioContext, ScenarioReport};
use alloy::primitives::{utils::parse_ether, Address, U256};
use anyhow::{anyhow, Result};
use lightning_evm::{bindings::AddTwo, execute, Execution, TxOptions, WalletClient};
use lightning_sdk::{EncryptionContext, Lightning};
use std::time::Duration;
use tracing::info;

/// Fee addTwoEOA charges, in ether
pub const ADD_TWO_FEE_ETHER: &str = "0.01";
/// Gas estimation fails for addTwoEOA on the local node, so the limit is
/// pinned
pub const ADD_TWO_GAS_LIMIT: u64 = 300_000;

pub fn add_two_options() -> Result<TxOptions> {
    Ok(TxOptions::default()
        .with_value(parse_ether(ADD_TWO_FEE_ETHER)?)
        .with_gas_limit(ADD_TWO_GAS_LIMIT))
}

/// Encrypts `value` for the sender and runs it through `addTwoEOA`
pub async fn send_add_two(
    lightning: &Lightning,
    sender: &WalletClient,
    contract: Address,
    value: U256,
) -> Result<Execution> {
    let context = EncryptionContext {
        account_address: sender.address(),
        dapp_address: contract,
    };
    let ciphertext = lightning.encrypt(value, context, None).await?;
    info!(input = %ciphertext.prettify(), "Calling addTwoEOA");
    let call = AddTwo::addTwoEOACall {
        uint256EInput: ciphertext.into_bytes(),
    };
    Ok(execute(sender, contract, call, &add_two_options()?).await?)
}

/// Deploys AddTwo, sends `value` and expects `value + 2` back, both from
/// attested decryption and from the reencryptor
pub async fn run_add_two_e2e(ctx: &ScenarioContext, value: u64) -> Result<ScenarioReport> {
    let contract = ctx.deploy(&ctx.config.artifacts.add_two).await?;
    let reencryptor = ctx.reencryptor()?;
    let expected = Expectation::Equals(U256::from(value).wrapping_add(U256::from(2u64)));

    let mut report = ScenarioReport::new("AddTwo");
    let mut handle = None;
    ctx.run_case(&mut report, "addTwoEOA", async {
        let execution =
            send_add_two(&ctx.lightning, &ctx.sender, contract, U256::from(value)).await?;
        handle = Some(execution.handle);
        let result = ctx.decrypt_idempotent(execution.handle).await?;
        expected.check(result).map_err(anyhow::Error::msg)?;
        anyhow::Ok(format!("{value} + 2 = {result}"))
    })
    .await;

    let name = "reencryptor agrees";
    match handle {
        Some(handle) => {
            ctx.run_case(&mut report, name, async {
                let result = reencryptor.reencrypt(handle).await?.value;
                expected.check(result).map_err(anyhow::Error::msg)?;
                anyhow::Ok(format!("{result}"))
            })
            .await
        }
        None => report.record(name, Duration::ZERO, Err(anyhow!("no handle from addTwoEOA"))),
    }
    Ok(report)
}
