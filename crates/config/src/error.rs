// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;

/// Errors raised before any chain interaction. These are fatal to a whole run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("Missing {0} in environment or configuration")]
    MissingEnv(&'static str),

    #[error("Missing `{0}` in configuration")]
    MissingConfig(&'static str),

    #[error("Invalid private key in {0}: expected 32 bytes of hex")]
    InvalidPrivateKey(&'static str),

    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("Invalid amount for {field}: '{value}'")]
    InvalidAmount { field: &'static str, value: String },
}
