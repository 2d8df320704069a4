// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{bail, Result};
use clap::Subcommand;
use lightning_config::AppConfig;
use lightning_scenarios::{
    run_add_two_e2e, run_confidential_token_e2e, run_lib_test_e2e, ScenarioContext,
};

#[derive(Subcommand, Debug)]
pub enum E2eCommands {
    /// Encrypt a value, add two on chain and decrypt the result
    AddTwo {
        #[arg(long, default_value_t = 10)]
        value: u64,
    },
    /// Every LibTest operation
    LibTest,
    /// Mint, transfer and balance checks on a ConfidentialERC20
    Token,
}

pub async fn execute(command: E2eCommands, config: AppConfig) -> Result<()> {
    let ctx = ScenarioContext::connect(config).await?;
    let report = match command {
        E2eCommands::AddTwo { value } => run_add_two_e2e(&ctx, value).await?,
        E2eCommands::LibTest => run_lib_test_e2e(&ctx).await?,
        E2eCommands::Token => run_confidential_token_e2e(&ctx).await?,
    };

    print!("{report}");
    let failed = report.failures().count();
    if failed > 0 {
        bail!("{} of {} cases failed", failed, report.cases.len());
    }
    Ok(())
}
