// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::add_two::{self, AddTwoCommands};
use crate::e2e::{self, E2eCommands};
use crate::helpers::telemetry::setup_simple_tracing;
use crate::helpers::{parse_address, parse_amount, parse_plaintext};
use crate::token::{self, TokenCommands};
use crate::{encrypt, faucet, wallets};
use alloy::primitives::{Address, U256};
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use lightning_config::{load_config, AppConfig};
use lightning_sdk::Plaintext;
use tracing::{info, instrument, Level};

#[derive(Parser, Debug)]
#[command(name = "lightning")]
#[command(about = "Encrypt inputs, drive confidential contracts and run end to end checks against a Lightning deployment", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `lightning -vvv` will give
    /// you trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    #[instrument(skip_all)]
    pub async fn execute(self) -> Result<()> {
        setup_simple_tracing(self.log_level());
        let config = self.load_config()?;
        info!("Config loaded for chain {}", config.chain_name);

        match self.command {
            Commands::Wallets => wallets::execute(&config)?,
            Commands::Faucet { to, amount } => faucet::execute(&config, to, amount).await?,
            Commands::Encrypt {
                value,
                contract,
                user,
            } => encrypt::execute(&config, value, contract, user).await?,
            Commands::AddTwo { command } => add_two::execute(command, config).await?,
            Commands::Token { command } => token::execute(command, config).await?,
            Commands::E2e { command } => e2e::execute(command, config).await?,
        }

        Ok(())
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        load_config(self.config.clone())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the sender and the named wallets
    Wallets,

    /// Send ether from the faucet account
    Faucet {
        /// Recipient. Defaults to the sender
        #[arg(long, value_parser = parse_address)]
        to: Option<Address>,

        /// Amount in ether. Defaults to the configured deploy funding
        #[arg(long, value_parser = parse_amount)]
        amount: Option<U256>,
    },

    /// Encrypt a value for a contract and print the ciphertext
    Encrypt {
        /// A number, `true`, `false` or a 0x address
        #[arg(long, value_parser = parse_plaintext)]
        value: Plaintext,

        /// Contract that will consume the input
        #[arg(long, value_parser = parse_address)]
        contract: Address,

        /// Account the input is bound to. Defaults to the sender
        #[arg(long, value_parser = parse_address)]
        user: Option<Address>,
    },

    /// Interact with the AddTwo contract
    AddTwo {
        #[command(subcommand)]
        command: AddTwoCommands,
    },

    /// Interact with the confidential token
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Run an end to end scenario and print its report
    E2e {
        #[command(subcommand)]
        command: E2eCommands,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_maps_to_levels() {
        let cli = Cli::try_parse_from(["lightning", "wallets"]).unwrap();
        assert_eq!(cli.log_level(), Level::WARN);

        let cli = Cli::try_parse_from(["lightning", "-vv", "wallets"]).unwrap();
        assert_eq!(cli.log_level(), Level::DEBUG);

        let cli = Cli::try_parse_from(["lightning", "wallets", "-q"]).unwrap();
        assert_eq!(cli.log_level(), Level::ERROR);

        assert!(Cli::try_parse_from(["lightning", "-v", "-q", "wallets"]).is_err());
    }

    #[test]
    fn faucet_rejects_bad_input() {
        assert!(Cli::try_parse_from(["lightning", "faucet", "--amount", "0"]).is_err());
        assert!(Cli::try_parse_from(["lightning", "faucet", "--to", "1234"]).is_err());

        let cli = Cli::try_parse_from(["lightning", "faucet", "--amount", "0.5"]).unwrap();
        match cli.command {
            Commands::Faucet { to, amount } => {
                assert_eq!(to, None);
                assert_eq!(amount, Some(U256::from(500_000_000_000_000_000u64)));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn encrypt_requires_a_contract() {
        assert!(Cli::try_parse_from(["lightning", "encrypt", "--value", "7"]).is_err());

        let cli = Cli::try_parse_from([
            "lightning",
            "encrypt",
            "--value",
            "true",
            "--contract",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        ])
        .unwrap();
        match cli.command {
            Commands::Encrypt { value, user, .. } => {
                assert_eq!(value, Plaintext::Bool(true));
                assert_eq!(user, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn token_transfer_validates_receiver_and_amount() {
        let contract = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
        let alice = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
        let transfer = |to: &str, amount: &str| {
            Cli::try_parse_from([
                "lightning",
                "token",
                "transfer",
                "--contract",
                contract,
                "--to",
                to,
                "--amount",
                amount,
            ])
        };

        assert!(transfer(alice, "1000").is_ok());
        assert!(transfer("alice", "1000").is_err());
        assert!(transfer(alice, "0").is_err());
        assert!(transfer(alice, "-5").is_err());
    }

    #[test]
    fn e2e_add_two_defaults_its_value() {
        let cli = Cli::try_parse_from(["lightning", "e2e", "add-two"]).unwrap();
        match cli.command {
            Commands::E2e {
                command: E2eCommands::AddTwo { value },
            } => assert_eq!(value, 10),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
