// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{Bytes, B256};
use lightning_utils::prettify_ciphertext;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque on-chain reference to an encrypted value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(pub B256);

impl Handle {
    pub const ZERO: Handle = Handle(B256::ZERO);

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `None` for the zero handle, which contracts return when nothing was
    /// produced
    pub fn non_zero(value: B256) -> Option<Handle> {
        let handle = Handle(value);
        (!handle.is_zero()).then_some(handle)
    }

    pub fn as_b256(&self) -> B256 {
        self.0
    }
}

impl From<B256> for Handle {
    fn from(value: B256) -> Self {
        Handle(value)
    }
}

impl From<Handle> for B256 {
    fn from(value: Handle) -> Self {
        value.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input ciphertext, bound to one (user, contract) context and used once as
/// a transaction argument
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ciphertext(pub Bytes);

impl Ciphertext {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn prettify(&self) -> String {
        prettify_ciphertext(&self.0)
    }
}

impl From<Vec<u8>> for Ciphertext {
    fn from(value: Vec<u8>) -> Self {
        Ciphertext(Bytes::from(value))
    }
}

impl From<Ciphertext> for Bytes {
    fn from(value: Ciphertext) -> Self {
        value.0
    }
}

impl fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ciphertext({})", self.prettify())
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
