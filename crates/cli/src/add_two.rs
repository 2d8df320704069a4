// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::{parse_address, sender_account, wallet_client};
use alloy::primitives::{Address, U256};
use anyhow::Result;
use clap::Subcommand;
use lightning_config::AppConfig;
use lightning_evm::{bindings::AddTwo, read};
use lightning_scenarios::{send_add_two, ScenarioContext};
use lightning_sdk::Lightning;

#[derive(Subcommand, Debug)]
pub enum AddTwoCommands {
    /// Deploy a fresh AddTwo contract
    Deploy,
    /// Encrypt a value and send it through addTwoEOA
    Send {
        #[arg(long, value_parser = parse_address)]
        contract: Address,
        #[arg(long)]
        value: u64,
    },
    /// Print the last plaintext result stored by the contract
    LastResult {
        #[arg(long, value_parser = parse_address)]
        contract: Address,
    },
}

pub async fn execute(command: AddTwoCommands, config: AppConfig) -> Result<()> {
    match command {
        AddTwoCommands::Deploy => {
            let ctx = ScenarioContext::connect(config).await?;
            let address = ctx.deploy(&ctx.config.artifacts.add_two).await?;
            println!("{address}");
        }
        AddTwoCommands::Send { contract, value } => {
            let sender = wallet_client(&config, &sender_account(&config)?).await?;
            let lightning = Lightning::connect(&config).await?;
            let execution = send_add_two(&lightning, &sender, contract, U256::from(value)).await?;
            println!("handle {}", execution.handle);
            println!("{}", sender.chain().tx_url(execution.tx_hash()));
        }
        AddTwoCommands::LastResult { contract } => {
            let sender = wallet_client(&config, &sender_account(&config)?).await?;
            let result = read(&sender, contract, AddTwo::lastResultCall {}).await?;
            println!("{result}");
        }
    }

    Ok(())
}
