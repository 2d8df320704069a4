// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::sender_account;
use alloy::primitives::Address;
use anyhow::Result;
use lightning_config::AppConfig;
use lightning_sdk::{EncryptionContext, Lightning, Plaintext};
use tracing::info;

pub async fn execute(
    config: &AppConfig,
    value: Plaintext,
    contract: Address,
    user: Option<Address>,
) -> Result<()> {
    let user = match user {
        Some(user) => user,
        None => sender_account(config)?.address(),
    };
    let lightning = Lightning::connect(config).await?;
    let context = EncryptionContext {
        account_address: user,
        dapp_address: contract,
    };
    let ciphertext = lightning.encrypt(value, context, None).await?;
    info!(user = %user, contract = %contract, "Encrypted {}", ciphertext.prettify());

    println!("{}", ciphertext.into_bytes());
    Ok(())
}
