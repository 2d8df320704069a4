// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use lightning_crypto::{CryptoError, Handle};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KmsError {
    #[error("Missing required parameters for creating reencryptor: {0}")]
    MissingParameter(&'static str),

    #[error("Covalidator request failed: {0}")]
    Transport(String),

    #[error("Covalidator responded with {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Malformed covalidator response: {0}")]
    MalformedResponse(String),

    #[error("Expected {expected} decryptions, got {got}")]
    CountMismatch { expected: usize, got: usize },

    #[error("Decryption {index} is for {got}, requested {expected}")]
    OrderMismatch {
        index: usize,
        expected: Handle,
        got: Handle,
    },

    #[error("Could not sign the request: {0}")]
    Signing(String),

    #[error("Request rejected: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    RetriesExhausted(anyhow::Error),
}

impl From<reqwest::Error> for KmsError {
    fn from(e: reqwest::Error) -> Self {
        KmsError::Transport(e.to_string())
    }
}
