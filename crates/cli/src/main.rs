// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use clap::Parser;
use cli::Cli;

mod add_two;
mod cli;
mod e2e;
mod encrypt;
mod faucet;
pub mod helpers;
mod token;
mod wallets;

#[tokio::main]
pub async fn main() {
    // A missing .env is fine, the config file and real env still apply
    dotenvy::dotenv().ok();

    if let Err(err) = Cli::parse().execute().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
