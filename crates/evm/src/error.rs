// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

/// Failures while talking to a contract. Any of these is fatal to the
/// scenario that hit it.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("Simulating {function} failed: {reason}")]
    Simulation {
        function: &'static str,
        reason: String,
    },

    #[error("Could not decode the return value of {function}: {reason}")]
    Decode {
        function: &'static str,
        reason: String,
    },

    #[error("Failed to get a result handle from simulating {function}")]
    MissingHandle { function: &'static str },

    #[error("Submitting {function} failed: {reason}")]
    Submission {
        function: &'static str,
        reason: String,
    },

    #[error("Waiting for the receipt of {tx} failed: {reason}")]
    Confirmation { tx: TxHash, reason: String },

    #[error("Transaction {tx} reverted in block {block:?}")]
    Reverted { tx: TxHash, block: Option<u64> },

    #[error("Contract address not found in the receipt of {tx}")]
    MissingContractAddress { tx: TxHash },

    #[error("Reading {function} from {contract} failed: {reason}")]
    Read {
        function: &'static str,
        contract: Address,
        reason: String,
    },
}

impl TxError {
    pub(crate) fn simulation(function: &'static str, e: impl ToString) -> Self {
        TxError::Simulation {
            function,
            reason: e.to_string(),
        }
    }

    pub(crate) fn submission(function: &'static str, e: impl ToString) -> Self {
        TxError::Submission {
            function,
            reason: e.to_string(),
        }
    }

    pub(crate) fn confirmation(tx: TxHash, e: impl ToString) -> Self {
        TxError::Confirmation {
            tx,
            reason: e.to_string(),
        }
    }
}
