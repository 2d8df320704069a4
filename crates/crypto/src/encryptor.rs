// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    ecies::{self, parse_public_key},
    Ciphertext, CryptoError, EncryptionScheme, PlaintextWithContext,
};
use k256::PublicKey;

/// Turns a plaintext bound to its context into an input ciphertext
pub trait Encryptor: Send + Sync {
    fn scheme(&self) -> EncryptionScheme;
    fn encrypt(&self, input: &PlaintextWithContext) -> Result<Ciphertext, CryptoError>;
}

/// Encrypts to the covalidator's network key
#[derive(Clone, Debug)]
pub struct EciesEncryptor {
    network_key: PublicKey,
}

impl EciesEncryptor {
    pub fn new(network_key: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            network_key: parse_public_key(network_key)?,
        })
    }
}

impl Encryptor for EciesEncryptor {
    fn scheme(&self) -> EncryptionScheme {
        EncryptionScheme::Ecies
    }

    fn encrypt(&self, input: &PlaintextWithContext) -> Result<Ciphertext, CryptoError> {
        if input.scheme != EncryptionScheme::Ecies {
            return Err(CryptoError::UnsupportedScheme(input.scheme as u8));
        }
        let sealed = ecies::seal(
            &self.network_key,
            &input.abi_encode(),
            &input.context.abi_encode(),
        )?;
        Ok(Ciphertext::from(sealed))
    }
}

/// Recover the plaintext on the key holder side, checking it was sealed for
/// the given context
pub fn decrypt_input(
    keypair: &ecies::EciesKeypair,
    ciphertext: &Ciphertext,
    expected: &crate::PlaintextContext,
) -> Result<PlaintextWithContext, CryptoError> {
    let opened = keypair.open(ciphertext.as_bytes(), &expected.abi_encode())?;
    let decoded = PlaintextWithContext::abi_decode(&opened)?;
    if decoded.context != *expected {
        return Err(CryptoError::Malformed("context mismatch".into()));
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EciesKeypair, EncryptionContext, Plaintext, PlaintextContext};
    use alloy::primitives::{address, U256};

    fn ctx(user: alloy::primitives::Address) -> PlaintextContext {
        PlaintextContext::new(
            31337,
            address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            EncryptionContext {
                account_address: user,
                dapp_address: address!("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
            },
        )
    }

    #[test]
    fn network_key_holder_recovers_input() {
        let network = EciesKeypair::generate();
        let encryptor = EciesEncryptor::new(&network.public_key_bytes()).unwrap();
        let input = PlaintextWithContext {
            scheme: EncryptionScheme::Ecies,
            plaintext: Plaintext::Uint256(U256::from(3)),
            context: ctx(address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")),
        };
        let ct = encryptor.encrypt(&input).unwrap();
        assert_eq!(decrypt_input(&network, &ct, &input.context).unwrap(), input);
    }

    #[test]
    fn ciphertext_is_bound_to_user() {
        let network = EciesKeypair::generate();
        let encryptor = EciesEncryptor::new(&network.public_key_bytes()).unwrap();
        let input = PlaintextWithContext {
            scheme: EncryptionScheme::Ecies,
            plaintext: Plaintext::Bool(true),
            context: ctx(address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")),
        };
        let ct = encryptor.encrypt(&input).unwrap();
        let other = ctx(address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"));
        assert!(decrypt_input(&network, &ct, &other).is_err());
    }

    #[test]
    fn rejects_other_schemes() {
        let network = EciesKeypair::generate();
        let encryptor = EciesEncryptor::new(&network.public_key_bytes()).unwrap();
        let input = PlaintextWithContext {
            scheme: EncryptionScheme::Tfhe,
            plaintext: Plaintext::Bool(false),
            context: ctx(alloy::primitives::Address::ZERO),
        };
        assert!(matches!(
            encryptor.encrypt(&input),
            Err(CryptoError::UnsupportedScheme(0))
        ));
    }
}
