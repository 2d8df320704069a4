// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::rpc::RPC;
use std::fmt;

/// The host chain a run targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainInfo {
    pub id: u64,
    pub name: String,
    pub block_explorer_url: Option<String>,
}

impl ChainInfo {
    pub fn anvil() -> Self {
        Self {
            id: 31337,
            name: "anvil".to_string(),
            block_explorer_url: None,
        }
    }

    /// Link to a transaction for log lines
    pub fn tx_url(&self, tx_hash: impl fmt::Display) -> String {
        let explorer = self
            .block_explorer_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or("no-explorer");
        format!("{explorer}/tx/{tx_hash}")
    }
}

/// Everything a scenario needs to reach the chain as the sender.
#[derive(Clone)]
pub struct E2EConfig {
    /// `0x` prefixed, 32 byte hex key of the account sending transactions and
    /// requesting decryptions. It needs some native tokens on the chain.
    pub sender_private_key: String,
    pub chain: ChainInfo,
    /// RPC of the host chain.
    pub host_chain_rpc_url: RPC,
}

impl fmt::Debug for E2EConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("E2EConfig")
            .field("sender_private_key", &"<redacted>")
            .field("chain", &self.chain)
            .field("host_chain_rpc_url", &self.host_chain_rpc_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_url_falls_back_without_explorer() {
        assert_eq!(ChainInfo::anvil().tx_url("0xabc"), "no-explorer/tx/0xabc");
        let chain = ChainInfo {
            id: 84532,
            name: "baseSepolia".into(),
            block_explorer_url: Some("https://sepolia.basescan.org/".into()),
        };
        assert_eq!(chain.tx_url("0xabc"), "https://sepolia.basescan.org/tx/0xabc");
    }
}
