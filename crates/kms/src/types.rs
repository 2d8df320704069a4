// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{Address, Bytes, U256};
use lightning_crypto::Handle;
use serde::{Deserialize, Serialize};

/// Plaintext behind a handle. Booleans decrypt to 0 or 1, addresses to their
/// 160 bit integer value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecryptedValue {
    pub handle: Handle,
    pub value: U256,
}

impl DecryptedValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            v if v.is_zero() => Some(false),
            v if v == U256::from(1u8) => Some(true),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        (self.value.bit_len() <= 160).then(|| {
            let bytes = self.value.to_be_bytes::<32>();
            Address::from_slice(&bytes[12..])
        })
    }
}

/// Attested decryption with the covalidator signatures over it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttestedDecryption {
    pub handle: Handle,
    pub value: U256,
    pub signatures: Vec<Bytes>,
}

impl AttestedDecryption {
    pub fn decrypted(&self) -> DecryptedValue {
        DecryptedValue {
            handle: self.handle,
            value: self.value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReencryptRequest {
    pub handle: Handle,
    /// Compressed secp256k1 key the value is reencrypted to
    pub public_key: Bytes,
    pub signature: Bytes,
    pub chain_id: u64,
    pub user: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReencryptResponse {
    pub ciphertext: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestedDecryptRequest {
    pub handles: Vec<Handle>,
    pub signature: Bytes,
    pub chain_id: u64,
    pub user: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestedDecryptResponse {
    pub decryptions: Vec<WireDecryption>,
}

/// Only the fields consumed here. Anything else the service sends is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDecryption {
    pub handle: Handle,
    pub plaintext: WirePlaintext,
    #[serde(default)]
    pub signatures: Vec<Bytes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePlaintext {
    pub value: U256,
}

impl From<WireDecryption> for AttestedDecryption {
    fn from(wire: WireDecryption) -> Self {
        AttestedDecryption {
            handle: wire.handle,
            value: wire.plaintext.value,
            signatures: wire.signatures,
        }
    }
}
