// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{utils::parse_ether, Address, U256};
use anyhow::{bail, Result};
use lightning_config::AppConfig;
use lightning_evm::{Account, ChainClientFactory, WalletClient};
use lightning_sdk::Plaintext;

pub mod telemetry;

/// Ensure hex is of the form 0x12435687abcdef...
fn ensure_hex(s: &str) -> Result<&str> {
    if !s.starts_with("0x") {
        bail!("hex value must start with '0x'")
    }
    if !s[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("hex value must only contain hex characters [0-9a-fA-F]");
    }
    hex::decode(&s[2..])?;
    Ok(s)
}

/// A `0x` prefixed 20 byte address
pub fn parse_address(s: &str) -> Result<Address> {
    let s = ensure_hex(s)?;
    if s.len() != 42 {
        bail!("address must be 20 bytes, got {} hex characters", s.len() - 2);
    }
    Ok(s.parse()?)
}

/// A strictly positive ether denominated amount, returned in wei
pub fn parse_amount(s: &str) -> Result<U256> {
    let amount = parse_ether(s.trim())?;
    if amount.is_zero() {
        bail!("amount must be greater than 0");
    }
    Ok(amount)
}

/// `true`, `false`, a `0x` address or a decimal number
pub fn parse_plaintext(s: &str) -> Result<Plaintext> {
    Ok(match s {
        "true" => Plaintext::Bool(true),
        "false" => Plaintext::Bool(false),
        _ if s.starts_with("0x") => Plaintext::Address(parse_address(s)?),
        _ => Plaintext::Uint256(U256::from_str_radix(s, 10)?),
    })
}

pub fn sender_account(config: &AppConfig) -> Result<Account> {
    Account::from_private_key(&config.e2e()?.sender_private_key)
}

/// Wallet client for `account` on the configured chain
pub async fn wallet_client(config: &AppConfig, account: &Account) -> Result<WalletClient> {
    let e2e = config.e2e()?;
    ChainClientFactory::create_write(&e2e.host_chain_rpc_url, &e2e.chain, account).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_need_the_prefix_and_twenty_bytes() {
        let alice = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
        assert_eq!(parse_address(alice).unwrap().to_checksum(None), alice);
        assert!(parse_address("70997970C51812dc3A010C7d01b50e0d17dc79C8").is_err());
        assert!(parse_address("0x70997970").is_err());
        assert!(parse_address("0xzz997970C51812dc3A010C7d01b50e0d17dc79C8").is_err());
    }

    #[test]
    fn amounts_are_positive_ether() {
        assert_eq!(
            parse_amount("1000").unwrap(),
            U256::from(1000u64) * U256::from(10u64).pow(U256::from(18u64))
        );
        assert_eq!(
            parse_amount("0.01").unwrap(),
            U256::from(10_000_000_000_000_000u64)
        );
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("0.0").is_err());
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn plaintexts_by_shape() {
        assert_eq!(
            parse_plaintext("42").unwrap(),
            Plaintext::Uint256(U256::from(42u64))
        );
        assert_eq!(parse_plaintext("false").unwrap(), Plaintext::Bool(false));
        assert!(matches!(
            parse_plaintext("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").unwrap(),
            Plaintext::Address(_)
        ));
        assert!(parse_plaintext("-1").is_err());
        assert!(parse_plaintext("yes").is_err());
    }
}
