// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    primitives::{address, Address},
    signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
};
use lightning_utils::BackoffConfig;

/// Mnemonic anvil funds by default
pub const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";
pub const TEST_CHAIN_ID: u64 = 31337;
pub const TEST_EXECUTOR: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
pub const TEST_DAPP: Address = address!("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512");

/// Account `index` of [`TEST_MNEMONIC`]
pub fn test_signer(index: u32) -> anyhow::Result<PrivateKeySigner> {
    Ok(MnemonicBuilder::<English>::default()
        .phrase(TEST_MNEMONIC)
        .derivation_path(format!("m/44'/60'/0'/0/{index}"))?
        .build()?)
}

/// Retries without real waiting, for tests on a paused clock
pub fn fast_backoff(max_retries: u32) -> BackoffConfig {
    BackoffConfig {
        max_retries,
        base_delay_ms: 10,
        backoff_factor: 1.5,
    }
}
