// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Client entry point to a Lightning deployment.
//!
//! [`Lightning`] encrypts inputs to the covalidator network key and resolves
//! result handles back to plaintext, either as attested decryptions or
//! through a per wallet [`Reencryptor`](lightning_kms::Reencryptor).

mod error;
mod key_source;
mod lightning;

pub use error::*;
pub use key_source::*;
pub use lightning::*;

pub use lightning_crypto::{Ciphertext, EncryptionContext, Handle, Plaintext};
pub use lightning_kms::{AttestedDecryption, DecryptedValue, Reencryptor};
