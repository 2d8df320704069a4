// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{auth, Covalidator, DecryptedValue, KmsContext, KmsError, ReencryptRequest};
use alloy::{
    primitives::{Address, Bytes, U256},
    signers::local::PrivateKeySigner,
};
use lightning_crypto::{EciesKeypair, Handle};
use lightning_utils::{retry_any_error, BackoffConfig};
use std::sync::Arc;
use tracing::debug;

/// Resolves handles to plaintext for one wallet.
///
/// Every call reencrypts to a fresh ephemeral key, so the reencryptor can be
/// reused across handles without authenticating again.
#[derive(Clone)]
pub struct Reencryptor {
    covalidator: Arc<dyn Covalidator>,
    context: KmsContext,
    signer: PrivateKeySigner,
    backoff: Option<BackoffConfig>,
}

impl Reencryptor {
    pub fn builder() -> ReencryptorBuilder {
        ReencryptorBuilder::default()
    }

    pub fn user(&self) -> Address {
        self.signer.address()
    }

    pub async fn reencrypt(&self, handle: Handle) -> Result<DecryptedValue, KmsError> {
        if handle.is_zero() {
            return Err(KmsError::MissingParameter("handle"));
        }
        match &self.backoff {
            None => self.reencrypt_once(handle).await,
            Some(config) => retry_any_error("reencrypt", config, || async move {
                self.reencrypt_once(handle)
                    .await
                    .map_err(anyhow::Error::from)
            })
            .await
            .map_err(KmsError::RetriesExhausted),
        }
    }

    async fn reencrypt_once(&self, handle: Handle) -> Result<DecryptedValue, KmsError> {
        let ephemeral = EciesKeypair::generate();
        let public_key = Bytes::from(ephemeral.public_key_bytes());
        let hash = auth::reencrypt_hash(&self.context.domain(), handle, &public_key);

        let request = ReencryptRequest {
            handle,
            public_key,
            signature: auth::sign(&self.signer, hash).await?,
            chain_id: self.context.chain_id,
            user: self.signer.address(),
        };
        let response = self.covalidator.reencrypt(request).await?;

        let plaintext = ephemeral.open(&response.ciphertext, handle.as_b256().as_slice())?;
        if plaintext.len() != 32 {
            return Err(KmsError::MalformedResponse(format!(
                "expected a 32 byte plaintext, got {}",
                plaintext.len()
            )));
        }
        debug!(handle = %handle, "Reencrypted");
        Ok(DecryptedValue {
            handle,
            value: U256::from_be_slice(&plaintext),
        })
    }
}

#[derive(Default)]
pub struct ReencryptorBuilder {
    covalidator: Option<Arc<dyn Covalidator>>,
    chain_id: Option<u64>,
    executor: Option<Address>,
    signer: Option<PrivateKeySigner>,
    backoff: Option<BackoffConfig>,
}

impl ReencryptorBuilder {
    pub fn covalidator(mut self, covalidator: Arc<dyn Covalidator>) -> Self {
        self.covalidator = Some(covalidator);
        self
    }

    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn executor(mut self, executor: Address) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn signer(mut self, signer: PrivateKeySigner) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Retry failed reencryptions with this policy
    pub fn backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = Some(backoff);
        self
    }

    pub fn build(self) -> Result<Reencryptor, KmsError> {
        let context = KmsContext {
            chain_id: self
                .chain_id
                .filter(|id| *id != 0)
                .ok_or(KmsError::MissingParameter("chain id"))?,
            executor: self
                .executor
                .ok_or(KmsError::MissingParameter("executor address"))?,
        };
        context.check()?;

        Ok(Reencryptor {
            covalidator: self
                .covalidator
                .ok_or(KmsError::MissingParameter("covalidator"))?,
            signer: self.signer.ok_or(KmsError::MissingParameter("wallet"))?,
            context,
            backoff: self.backoff,
        })
    }
}
