// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    node_bindings::{Anvil, AnvilInstance},
    primitives::{utils::parse_ether, Address, B256, U256},
};
use anyhow::Result;
use lightning_config::{ChainInfo, ANVIL_RICH_PRIVATE_KEY, RPC};
use lightning_evm::{
    bindings::{AddTwo, LibTest},
    deploy, deploy_with_funding, deploy_with_options, execute, read, submit, Account, Artifact,
    ChainClientFactory, Faucet, TxError, TxOptions, WalletClient,
};

// Init code that copies a 10 byte runtime returning uint256(42) for any call
const ANSWER_BYTECODE: &str = "0x600a600c600039600a6000f3602a60005260206000f3";
// Runtime returns 32 zero bytes
const ZERO_BYTECODE: &str = "0x6005600c60003960056000f360206000f3";
// Runtime reverts
const REVERT_BYTECODE: &str = "0x6005600c60003960056000f360006000fd";
// Init code reverts, so CREATE fails
const REVERTING_CONSTRUCTOR: &str = "0x60006000fd";
// Skips gas estimation, which would reject a reverting call up front
const PINNED_GAS: u64 = 100_000;

fn artifact(name: &str, bytecode: &str) -> Result<Artifact> {
    Ok(Artifact::from_json(
        name,
        &format!(r#"{{"abi":[],"bytecode":"{bytecode}"}}"#),
    )?)
}

struct Setup {
    _anvil: AnvilInstance,
    faucet: Faucet,
    sender: WalletClient,
}

async fn setup() -> Result<Setup> {
    let anvil = Anvil::new().try_spawn()?;
    let rpc = RPC::from_url(&anvil.endpoint())?;
    let chain = ChainInfo {
        id: anvil.chain_id(),
        ..ChainInfo::anvil()
    };
    let rich = Account::from_private_key(ANVIL_RICH_PRIVATE_KEY)?;
    let faucet = Faucet::new(ChainClientFactory::create_write(&rpc, &chain, &rich).await?);
    // Not one of the pre-funded anvil accounts
    let fresh = Account::from_private_key(&format!("0x{}", "11".repeat(32)))?;
    let sender = ChainClientFactory::create_write(&rpc, &chain, &fresh).await?;
    Ok(Setup {
        _anvil: anvil,
        faucet,
        sender,
    })
}

#[tokio::test]
#[ignore = "needs the anvil binary"]
async fn faucet_tops_up_once() -> Result<()> {
    let s = setup().await?;
    let min = parse_ether("0.001")?;
    let target = s.sender.address();

    assert!(s.faucet.top_up(target, min).await?.is_some());
    assert_eq!(s.sender.get_balance(target).await?, min);
    assert!(s.faucet.top_up(target, min).await?.is_none());
    Ok(())
}

#[tokio::test]
#[ignore = "needs the anvil binary"]
async fn concurrent_top_ups_send_the_shortfall_once() -> Result<()> {
    let s = setup().await?;
    let min = parse_ether("0.001")?;
    let target = Address::repeat_byte(0x42);

    let (first, second) = futures::join!(
        s.faucet.top_up(target, min),
        s.faucet.top_up(target, min)
    );
    let sent = [first?, second?].iter().filter(|r| r.is_some()).count();
    assert_eq!(sent, 1);
    assert_eq!(s.sender.get_balance(target).await?, min);
    Ok(())
}

#[tokio::test]
#[ignore = "needs the anvil binary"]
async fn concurrent_funding_does_not_collide() -> Result<()> {
    let s = setup().await?;
    let amount = parse_ether("0.5")?;
    let targets: Vec<Address> = (1..=4u8).map(Address::repeat_byte).collect();

    let sends = targets.iter().map(|to| s.faucet.fund(*to, amount));
    for receipt in futures::future::join_all(sends).await {
        assert!(receipt?.status());
    }
    for to in targets {
        assert_eq!(s.sender.get_balance(to).await?, amount);
    }
    Ok(())
}

#[tokio::test]
#[ignore = "needs the anvil binary"]
async fn execute_returns_simulated_handle() -> Result<()> {
    let s = setup().await?;
    let contract = deploy_with_funding(
        &s.faucet,
        &s.sender,
        &artifact("Answer", ANSWER_BYTECODE)?,
        &[],
        parse_ether("1")?,
    )
    .await?;

    let execution = execute(
        &s.sender,
        contract,
        LibTest::testRandCall {},
        &TxOptions::default(),
    )
    .await?;
    assert_eq!(execution.handle.as_b256(), B256::from(U256::from(42u64)));
    assert!(execution.receipt.status());
    assert!(execution.block_number().is_some());

    let last = read(&s.sender, contract, AddTwo::lastResultCall {}).await?;
    assert_eq!(last, U256::from(42u64));
    Ok(())
}

#[tokio::test]
#[ignore = "needs the anvil binary"]
async fn zero_handle_stops_before_submit() -> Result<()> {
    let s = setup().await?;
    s.faucet.fund(s.sender.address(), parse_ether("1")?).await?;
    let contract = deploy(&s.sender, &artifact("Zero", ZERO_BYTECODE)?, &[]).await?;
    let block_before = s.sender.get_block_number().await?;

    let err = execute(&s.sender, contract, LibTest::testRandCall {}, &TxOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TxError::MissingHandle { .. }));
    assert_eq!(s.sender.get_block_number().await?, block_before);
    Ok(())
}

#[tokio::test]
#[ignore = "needs the anvil binary"]
async fn reverting_simulation_is_an_error() -> Result<()> {
    let s = setup().await?;
    s.faucet.fund(s.sender.address(), parse_ether("1")?).await?;
    let contract = deploy(&s.sender, &artifact("Revert", REVERT_BYTECODE)?, &[]).await?;

    let err = execute(&s.sender, contract, LibTest::testRandCall {}, &TxOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TxError::Simulation { .. }));
    Ok(())
}

#[tokio::test]
#[ignore = "needs the anvil binary"]
async fn short_return_data_fails_to_decode() -> Result<()> {
    let s = setup().await?;
    s.faucet.fund(s.sender.address(), parse_ether("1")?).await?;
    let contract = deploy(&s.sender, &artifact("Answer", ANSWER_BYTECODE)?, &[]).await?;

    // addTwoEOA returns two words, the stub only one
    let call = AddTwo::addTwoEOACall {
        uint256EInput: vec![1u8, 2, 3].into(),
    };
    let err = execute(&s.sender, contract, call, &TxOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TxError::Decode { .. }));
    Ok(())
}

#[tokio::test]
#[ignore = "needs the anvil binary"]
async fn reverted_deployment_is_an_error() -> Result<()> {
    let s = setup().await?;
    s.faucet.fund(s.sender.address(), parse_ether("1")?).await?;

    let opts = TxOptions::default().with_gas_limit(PINNED_GAS);
    let err = deploy_with_options(
        &s.sender,
        &artifact("Broken", REVERTING_CONSTRUCTOR)?,
        &[],
        &opts,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TxError::Reverted { block: Some(_), .. }));
    Ok(())
}

#[tokio::test]
#[ignore = "needs the anvil binary"]
async fn reverted_receipt_is_not_a_success() -> Result<()> {
    let s = setup().await?;
    s.faucet.fund(s.sender.address(), parse_ether("1")?).await?;
    let contract = deploy(&s.sender, &artifact("Revert", REVERT_BYTECODE)?, &[]).await?;

    let opts = TxOptions::default().with_gas_limit(PINNED_GAS);
    let err = submit(&s.sender, contract, &LibTest::testRandCall {}, &opts)
        .await
        .unwrap_err();
    assert!(matches!(err, TxError::Reverted { block: Some(_), .. }));
    Ok(())
}
