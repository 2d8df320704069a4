// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid secp256k1 public key")]
    InvalidPublicKey,

    #[error("Invalid encrypted data length")]
    InvalidLength,

    #[error("Could not AES encrypt given plaintext")]
    Seal,

    #[error("Could not decrypt data")]
    Open,

    #[error("Unsupported encryption scheme {0}")]
    UnsupportedScheme(u8),

    #[error("Unknown handle type {0}")]
    UnknownHandleType(u8),

    #[error("Malformed plaintext: {0}")]
    Malformed(String),
}
