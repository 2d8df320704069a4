// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! The confidential token flow: mint in the clear, transfer an encrypted
//! amount, read balances back through the owner's reencryptor.

use crate::{Expectation, ScenarioContext, ScenarioReport};
use alloy::{
    primitives::{Address, U256},
    rpc::types::TransactionReceipt,
};
use anyhow::{anyhow, Result};
use lightning_crypto::Handle;
use lightning_evm::{
    bindings::ConfidentialERC20, read, submit, NamedWallets, TxOptions, WalletClient,
};
use lightning_sdk::{EncryptionContext, Lightning, Reencryptor};
use lightning_utils::format_whole_units;
use tracing::info;

pub const TOKEN_DECIMALS: u8 = 18;

/// `whole` tokens in base units
pub fn token_amount(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}

pub fn format_tokens(amount: U256) -> String {
    format_whole_units(amount, TOKEN_DECIMALS)
}

pub async fn mint(
    client: &WalletClient,
    token: Address,
    amount: U256,
) -> Result<TransactionReceipt> {
    let call = ConfidentialERC20::mintCall {
        mintedAmount: amount,
    };
    Ok(submit(client, token, &call, &TxOptions::default()).await?)
}

/// Encrypts `amount` for the sender and transfers it to `to`
pub async fn transfer_encrypted(
    lightning: &Lightning,
    client: &WalletClient,
    token: Address,
    to: Address,
    amount: U256,
) -> Result<TransactionReceipt> {
    let context = EncryptionContext {
        account_address: client.address(),
        dapp_address: token,
    };
    let ciphertext = lightning.encrypt(amount, context, None).await?;
    let call = ConfidentialERC20::transferCall {
        to,
        encryptedAmount: ciphertext.into_bytes(),
    };
    Ok(submit(client, token, &call, &TxOptions::default()).await?)
}

pub async fn balance_handle(
    client: &WalletClient,
    token: Address,
    owner: Address,
) -> Result<Handle> {
    let raw = read(client, token, ConfidentialERC20::balanceOfCall { wallet: owner }).await?;
    Handle::non_zero(raw).ok_or_else(|| anyhow!("{owner} has no balance handle"))
}

/// Balance of the reencryptor's own wallet
pub async fn read_balance(
    reencryptor: &Reencryptor,
    client: &WalletClient,
    token: Address,
) -> Result<U256> {
    let handle = balance_handle(client, token, reencryptor.user()).await?;
    Ok(reencryptor.reencrypt(handle).await?.value)
}

async fn expect_balance(
    reencryptor: &Reencryptor,
    client: &WalletClient,
    token: Address,
    whole: u64,
) -> Result<String> {
    let balance = read_balance(reencryptor, client, token).await?;
    Expectation::Equals(token_amount(whole))
        .check(balance)
        .map_err(anyhow::Error::msg)?;
    Ok(format!("{} tokens", format_tokens(balance)))
}

/// Mints 5000 to the sender, sends 1000 of it to alice and checks both
/// balances
pub async fn run_confidential_token_e2e(ctx: &ScenarioContext) -> Result<ScenarioReport> {
    let wallets = NamedWallets::from_mnemonic(ctx.config.seed_phrase()?)?;
    let alice = wallets
        .get("alice")
        .ok_or_else(|| anyhow!("alice is not a named wallet"))?;
    let token = ctx.deploy(&ctx.config.artifacts.confidential_erc20).await?;

    let min_balance = ctx.config.funding.min_balance_wei()?;
    for (name, account) in wallets.iter() {
        if ctx.faucet.top_up(account.address(), min_balance).await?.is_some() {
            info!(wallet = name, address = %account.address(), "Topped up");
        }
    }
    let owner = ctx.reencryptor()?;
    let recipient = ctx.lightning.get_reencryptor(alice)?;

    let mut report = ScenarioReport::new("ConfidentialERC20");
    ctx.run_case(&mut report, "mint 5000", async {
        mint(&ctx.sender, token, token_amount(5000)).await?;
        expect_balance(&owner, &ctx.sender, token, 5000).await
    })
    .await;

    ctx.run_case(&mut report, "transfer 1000 to alice", async {
        transfer_encrypted(
            &ctx.lightning,
            &ctx.sender,
            token,
            alice.address(),
            token_amount(1000),
        )
        .await?;
        expect_balance(&owner, &ctx.sender, token, 4000).await
    })
    .await;

    ctx.run_case(
        &mut report,
        "alice holds 1000",
        expect_balance(&recipient, &ctx.sender, token, 1000),
    )
    .await;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_eighteen_decimals() {
        assert_eq!(
            token_amount(5000),
            U256::from(5_000_000_000_000_000_000_000u128)
        );
        assert_eq!(format_tokens(token_amount(4000)), "4000");
        // Rounded to the nearest whole token
        assert_eq!(format_tokens(token_amount(1) / U256::from(2u64)), "1");
    }
}
