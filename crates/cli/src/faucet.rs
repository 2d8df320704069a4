// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::{sender_account, wallet_client};
use alloy::primitives::{utils::format_ether, Address, U256};
use anyhow::Result;
use lightning_config::AppConfig;
use lightning_evm::{Account, Faucet};

pub async fn execute(config: &AppConfig, to: Option<Address>, amount: Option<U256>) -> Result<()> {
    let e2e = config.e2e()?;
    let to = match to {
        Some(to) => to,
        None => sender_account(config)?.address(),
    };
    let amount = match amount {
        Some(amount) => amount,
        None => config.funding.deploy_funding_wei()?,
    };

    let rich = Account::from_private_key(&config.faucet_private_key()?)?;
    let faucet = Faucet::new(wallet_client(config, &rich).await?);
    let receipt = faucet.fund(to, amount).await?;

    println!("Sent {} ETH to {}", format_ether(amount), to);
    println!("{}", e2e.chain.tx_url(receipt.transaction_hash));
    Ok(())
}
