// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! secp256k1 ECIES envelope.
//!
//! Layout: `ephemeral compressed public key (33) || nonce (12) || AES-256-GCM ciphertext`.
//! The symmetric key is `SHA-256(ephemeral_pubkey || shared_x)`. Callers pass
//! associated data so an envelope only opens under the context it was sealed for.

use crate::CryptoError;
use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use k256::{
    ecdh::{diffie_hellman, EphemeralSecret},
    elliptic_curve::sec1::ToEncodedPoint,
    PublicKey, SecretKey,
};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

pub const PUBKEY_LEN: usize = 33;
pub const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Parse a SEC1 encoded public key, compressed or not
pub fn parse_public_key(bytes: &[u8]) -> Result<PublicKey, CryptoError> {
    PublicKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)
}

fn derive_key(ephemeral: &[u8], shared_x: &[u8]) -> Zeroizing<[u8; 32]> {
    let mut hasher = Sha256::new();
    hasher.update(ephemeral);
    hasher.update(shared_x);
    Zeroizing::new(hasher.finalize().into())
}

pub fn seal(recipient: &PublicKey, msg: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let ephemeral = EphemeralSecret::random(&mut OsRng);
    let ephemeral_pub = ephemeral.public_key().to_encoded_point(true);
    let shared = ephemeral.diffie_hellman(recipient);
    let key = derive_key(ephemeral_pub.as_bytes(), shared.raw_secret_bytes());

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.as_ref()).map_err(|_| CryptoError::Seal)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), Payload { msg, aad })
        .map_err(|_| CryptoError::Seal)?;

    let mut out = Vec::with_capacity(PUBKEY_LEN + NONCE_LEN + ciphertext.len());
    out.extend_from_slice(ephemeral_pub.as_bytes());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

pub fn open(secret: &SecretKey, envelope: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if envelope.len() < PUBKEY_LEN + NONCE_LEN + TAG_LEN {
        return Err(CryptoError::InvalidLength);
    }
    let (ephemeral_bytes, rest) = envelope.split_at(PUBKEY_LEN);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

    let ephemeral = parse_public_key(ephemeral_bytes)?;
    let shared = diffie_hellman(secret.to_nonzero_scalar(), ephemeral.as_affine());
    let key = derive_key(ephemeral_bytes, shared.raw_secret_bytes());

    let cipher = Aes256Gcm::new_from_slice(key.as_ref()).map_err(|_| CryptoError::Open)?;
    cipher
        .decrypt(
            Nonce::from_slice(nonce_bytes),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| CryptoError::Open)
}

/// Keypair held by whoever needs to open envelopes: the covalidator for
/// inputs, or a user for reencrypted results.
#[derive(Clone)]
pub struct EciesKeypair {
    secret: SecretKey,
}

impl EciesKeypair {
    pub fn generate() -> Self {
        Self {
            secret: SecretKey::random(&mut OsRng),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.secret.public_key()
    }

    /// Compressed SEC1 encoding
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.public_key().to_encoded_point(true).as_bytes().to_vec()
    }

    pub fn seal_to_self(&self, msg: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        seal(&self.public_key(), msg, aad)
    }

    pub fn open(&self, envelope: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        open(&self.secret, envelope, aad)
    }
}

impl std::fmt::Debug for EciesKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EciesKeypair")
            .field("public_key", &hex::encode(self.public_key_bytes()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_with_matching_key_and_aad() {
        let kp = EciesKeypair::generate();
        let sealed = seal(&kp.public_key(), b"secret", b"ctx").unwrap();
        assert_eq!(sealed.len(), PUBKEY_LEN + NONCE_LEN + 6 + TAG_LEN);
        assert_eq!(kp.open(&sealed, b"ctx").unwrap(), b"secret");
    }

    #[test]
    fn wrong_aad_fails() {
        let kp = EciesKeypair::generate();
        let sealed = kp.seal_to_self(b"secret", b"ctx-a").unwrap();
        assert!(matches!(kp.open(&sealed, b"ctx-b"), Err(CryptoError::Open)));
    }

    #[test]
    fn wrong_key_fails() {
        let kp = EciesKeypair::generate();
        let other = EciesKeypair::generate();
        let sealed = kp.seal_to_self(b"secret", b"").unwrap();
        assert!(other.open(&sealed, b"").is_err());
    }

    #[test]
    fn seal_is_randomized() {
        let kp = EciesKeypair::generate();
        let a = kp.seal_to_self(b"same", b"").unwrap();
        let b = kp.seal_to_self(b"same", b"").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn truncated_envelope_is_rejected() {
        let kp = EciesKeypair::generate();
        assert!(matches!(
            kp.open(&[0u8; 20], b""),
            Err(CryptoError::InvalidLength)
        ));
    }

    #[test]
    fn accepts_uncompressed_public_key() {
        let kp = EciesKeypair::generate();
        let uncompressed = kp.public_key().to_encoded_point(false);
        let parsed = parse_public_key(uncompressed.as_bytes()).unwrap();
        assert_eq!(parsed, kp.public_key());
        assert!(parse_public_key(&[1, 2, 3]).is_err());
    }
}
