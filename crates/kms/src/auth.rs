// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! EIP-712 authorization of covalidator requests.
//!
//! The domain is bound to the host chain and the executor contract so a
//! signature cannot be replayed against another deployment.

use crate::KmsError;
use alloy::{
    primitives::{Address, Bytes, Signature, B256},
    signers::Signer,
    sol,
    sol_types::{eip712_domain, Eip712Domain, SolStruct},
};
use lightning_crypto::Handle;

pub const DOMAIN_NAME: &str = "IncoLightning";
pub const DOMAIN_VERSION: &str = "1";

sol! {
    struct Reencrypt {
        bytes32 handle;
        bytes publicKey;
    }

    struct AttestedDecrypt {
        bytes32[] handles;
    }
}

pub fn domain(chain_id: u64, executor: Address) -> Eip712Domain {
    eip712_domain! {
        name: DOMAIN_NAME,
        version: DOMAIN_VERSION,
        chain_id: chain_id,
        verifying_contract: executor,
    }
}

pub fn reencrypt_hash(domain: &Eip712Domain, handle: Handle, public_key: &Bytes) -> B256 {
    Reencrypt {
        handle: handle.as_b256(),
        publicKey: public_key.clone(),
    }
    .eip712_signing_hash(domain)
}

pub fn attested_decrypt_hash(domain: &Eip712Domain, handles: &[Handle]) -> B256 {
    AttestedDecrypt {
        handles: handles.iter().map(Handle::as_b256).collect(),
    }
    .eip712_signing_hash(domain)
}

pub async fn sign<S>(signer: &S, hash: B256) -> Result<Bytes, KmsError>
where
    S: Signer + Send + Sync,
{
    let signature = signer
        .sign_hash(&hash)
        .await
        .map_err(|e| KmsError::Signing(e.to_string()))?;
    Ok(Bytes::copy_from_slice(&signature.as_bytes()))
}

/// Address that produced `signature` over `hash`
pub fn recover(hash: B256, signature: &[u8]) -> Result<Address, KmsError> {
    let signature = Signature::try_from(signature)
        .map_err(|e| KmsError::Unauthorized(format!("invalid signature: {e}")))?;
    signature
        .recover_address_from_prehash(&hash)
        .map_err(|e| KmsError::Unauthorized(format!("unrecoverable signature: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::signers::local::PrivateKeySigner;

    #[tokio::test]
    async fn signature_recovers_to_signer() -> anyhow::Result<()> {
        let signer = PrivateKeySigner::random();
        let domain = domain(31337, Address::repeat_byte(7));
        let handles = [Handle(B256::repeat_byte(1)), Handle(B256::repeat_byte(2))];

        let hash = attested_decrypt_hash(&domain, &handles);
        let signature = sign(&signer, hash).await?;
        assert_eq!(signature.len(), 65);
        assert_eq!(recover(hash, &signature)?, signer.address());
        Ok(())
    }

    #[test]
    fn domain_separates_chains_and_executors() {
        let handle = Handle(B256::repeat_byte(1));
        let key = Bytes::from_static(&[2; 33]);
        let base = reencrypt_hash(&domain(1, Address::repeat_byte(7)), handle, &key);
        assert_ne!(
            base,
            reencrypt_hash(&domain(2, Address::repeat_byte(7)), handle, &key)
        );
        assert_ne!(
            base,
            reencrypt_hash(&domain(1, Address::repeat_byte(8)), handle, &key)
        );
    }

    #[test]
    fn order_of_handles_matters() {
        let d = domain(1, Address::ZERO);
        let a = Handle(B256::repeat_byte(1));
        let b = Handle(B256::repeat_byte(2));
        assert_ne!(attested_decrypt_hash(&d, &[a, b]), attested_decrypt_hash(&d, &[b, a]));
    }
}
