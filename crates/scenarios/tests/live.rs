// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Scenarios against a running local Lightning node. Configure with
//! `ANVIL_PRIVATE_KEY`, `SEED_PHRASE` and `LIGHTNING_EXECUTOR_ADDRESS`, then
//! run with `--ignored`.

use anyhow::Result;
use lightning_config::load_config;
use lightning_scenarios::{
    run_add_two_e2e, run_confidential_token_e2e, run_lib_test_e2e, ScenarioContext,
    ScenarioReport,
};

async fn context() -> Result<ScenarioContext> {
    ScenarioContext::connect(load_config(None)?).await
}

fn assert_passed(report: &ScenarioReport) {
    assert!(report.passed(), "{report}");
}

#[tokio::test]
#[ignore = "needs a local Lightning node"]
async fn add_two_round_trip() -> Result<()> {
    let ctx = context().await?;
    let report = run_add_two_e2e(&ctx, 10).await?;
    assert_passed(&report);
    Ok(())
}

#[tokio::test]
#[ignore = "needs a local Lightning node"]
async fn lib_test_suite() -> Result<()> {
    let ctx = context().await?;
    let report = run_lib_test_e2e(&ctx).await?;
    assert_passed(&report);
    Ok(())
}

#[tokio::test]
#[ignore = "needs a local Lightning node"]
async fn confidential_token_transfer() -> Result<()> {
    let ctx = context().await?;
    let report = run_confidential_token_e2e(&ctx).await?;
    assert_passed(&report);
    Ok(())
}
