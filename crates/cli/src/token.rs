// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::{parse_address, parse_amount, sender_account, wallet_client};
use alloy::primitives::{Address, U256};
use anyhow::{anyhow, Result};
use clap::Subcommand;
use lightning_config::AppConfig;
use lightning_evm::{Account, NamedWallets};
use lightning_scenarios::{format_tokens, mint, read_balance, transfer_encrypted, ScenarioContext};
use lightning_sdk::Lightning;

#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Deploy a fresh ConfidentialERC20
    Deploy,
    /// Mint tokens to the sender in the clear
    Mint {
        #[arg(long, value_parser = parse_address)]
        contract: Address,
        /// Whole tokens, fractions allowed down to 18 decimals
        #[arg(long, value_parser = parse_amount)]
        amount: U256,
    },
    /// Transfer an encrypted amount from the sender
    Transfer {
        #[arg(long, value_parser = parse_address)]
        contract: Address,
        #[arg(long, value_parser = parse_address)]
        to: Address,
        #[arg(long, value_parser = parse_amount)]
        amount: U256,
    },
    /// Decrypt a balance through the owner's reencryptor
    Balance {
        #[arg(long, value_parser = parse_address)]
        contract: Address,
        /// Named wallet to read. Defaults to the sender
        #[arg(long)]
        wallet: Option<String>,
    },
}

fn wallet_account(config: &AppConfig, wallet: Option<&str>) -> Result<Account> {
    match wallet {
        Some(name) => NamedWallets::from_mnemonic(config.seed_phrase()?)?
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("unknown wallet '{name}'")),
        None => sender_account(config),
    }
}

pub async fn execute(command: TokenCommands, config: AppConfig) -> Result<()> {
    match command {
        TokenCommands::Deploy => {
            let ctx = ScenarioContext::connect(config).await?;
            let address = ctx.deploy(&ctx.config.artifacts.confidential_erc20).await?;
            println!("{address}");
        }
        TokenCommands::Mint { contract, amount } => {
            let sender = wallet_client(&config, &sender_account(&config)?).await?;
            let receipt = mint(&sender, contract, amount).await?;
            println!("Minted {} tokens", format_tokens(amount));
            println!("{}", sender.chain().tx_url(receipt.transaction_hash));
        }
        TokenCommands::Transfer {
            contract,
            to,
            amount,
        } => {
            let sender = wallet_client(&config, &sender_account(&config)?).await?;
            let lightning = Lightning::connect(&config).await?;
            let receipt = transfer_encrypted(&lightning, &sender, contract, to, amount).await?;
            println!("Sent {} tokens to {to}", format_tokens(amount));
            println!("{}", sender.chain().tx_url(receipt.transaction_hash));
        }
        TokenCommands::Balance { contract, wallet } => {
            let account = wallet_account(&config, wallet.as_deref())?;
            let client = wallet_client(&config, &account).await?;
            let reencryptor = Lightning::connect(&config)
                .await?
                .get_reencryptor(&account)?;
            let balance = read_balance(&reencryptor, &client, contract).await?;
            println!("{} tokens", format_tokens(balance));
        }
    }

    Ok(())
}
