// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
};
use anyhow::{Context, Result};
use std::fmt;
use zeroize::Zeroizing;

/// Wallets the token demo derives from `SEED_PHRASE`, in derivation order
pub const NAMED_WALLETS: [&str; 5] = ["alice", "bob", "dave", "carol", "john"];

pub fn named_wallet_path(index: usize) -> String {
    format!("m/44'/60'/0'/0/{index}")
}

/// A signing key and its address. Never persisted.
#[derive(Clone)]
pub struct Account {
    signer: PrivateKeySigner,
}

impl Account {
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let key = Zeroizing::new(private_key.trim().to_string());
        let signer: PrivateKeySigner = key.parse().context("Invalid private key")?;
        Ok(Self { signer })
    }

    pub fn from_mnemonic(phrase: &str, derivation_path: &str) -> Result<Self> {
        let phrase = Zeroizing::new(phrase.trim().to_string());
        let signer = MnemonicBuilder::<English>::default()
            .phrase(phrase.as_str())
            .derivation_path(derivation_path)
            .with_context(|| format!("Invalid derivation path {derivation_path}"))?
            .build()
            .context("Could not derive a key from the mnemonic")?;
        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    pub fn wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub struct NamedWallets {
    wallets: Vec<(&'static str, Account)>,
}

impl NamedWallets {
    pub fn from_mnemonic(phrase: &str) -> Result<Self> {
        let mut wallets = Vec::with_capacity(NAMED_WALLETS.len());
        for (i, name) in NAMED_WALLETS.iter().enumerate() {
            wallets.push((*name, Account::from_mnemonic(phrase, &named_wallet_path(i))?));
        }
        Ok(Self { wallets })
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.wallets
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, account)| account)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Account)> {
        self.wallets.iter().map(|(n, a)| (*n, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

    #[test]
    fn private_key_with_or_without_prefix() -> Result<()> {
        let with = Account::from_private_key(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )?;
        let without = Account::from_private_key(
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )?;
        assert_eq!(
            with.address(),
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
        assert_eq!(with.address(), without.address());
        assert!(Account::from_private_key("0x1234").is_err());
        Ok(())
    }

    #[test]
    fn named_wallets_follow_derivation_order() -> Result<()> {
        let wallets = NamedWallets::from_mnemonic(TEST_MNEMONIC)?;
        assert_eq!(
            wallets.get("alice").map(Account::address),
            Some(address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"))
        );
        assert_eq!(
            wallets.get("Bob").map(Account::address),
            Some(address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"))
        );
        assert!(wallets.get("mallory").is_none());
        assert_eq!(
            wallets.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            NAMED_WALLETS
        );
        Ok(())
    }

    #[test]
    fn debug_hides_key() -> Result<()> {
        let account = Account::from_mnemonic(TEST_MNEMONIC, &named_wallet_path(0))?;
        let shown = format!("{account:?}");
        assert!(shown.contains("address"));
        assert!(!shown.contains("ac0974bec"));
        Ok(())
    }
}
