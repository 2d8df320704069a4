// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::sender_account;
use anyhow::Result;
use lightning_config::AppConfig;
use lightning_evm::NamedWallets;
use tracing::warn;

pub fn execute(config: &AppConfig) -> Result<()> {
    let sender = sender_account(config)?;
    println!("{:<8} {}", "sender", sender.address());

    match config.seed_phrase() {
        Ok(phrase) => {
            for (name, account) in NamedWallets::from_mnemonic(phrase)?.iter() {
                println!("{:<8} {}", name, account.address());
            }
        }
        Err(e) => warn!("Skipping named wallets: {e}"),
    }

    Ok(())
}
