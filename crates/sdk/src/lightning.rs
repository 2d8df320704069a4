// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{PublicKeySource, SdkError, VerifierKeySource};
use alloy::primitives::Address;
use lightning_config::AppConfig;
use lightning_crypto::{
    Ciphertext, EciesEncryptor, EncryptionContext, EncryptionScheme, Encryptor, Handle,
    Plaintext, PlaintextContext, PlaintextWithContext,
};
use lightning_evm::{Account, ChainClientFactory};
use lightning_kms::{
    attested_decrypt, attested_decrypt_with_backoff, AttestedDecryption, Covalidator,
    HttpCovalidator, KmsContext, Reencryptor,
};
use lightning_utils::BackoffConfig;
use std::sync::Arc;
use tracing::{debug, info};

/// A Lightning deployment: the executor on one host chain and the
/// covalidator serving it.
#[derive(Clone)]
pub struct Lightning {
    chain_id: u64,
    executor: Address,
    key_source: Arc<dyn PublicKeySource>,
    covalidator: Arc<dyn Covalidator>,
    backoff: Option<BackoffConfig>,
}

impl Lightning {
    pub fn new(
        chain_id: u64,
        executor: Address,
        key_source: Arc<dyn PublicKeySource>,
        covalidator: Arc<dyn Covalidator>,
    ) -> Self {
        Self {
            chain_id,
            executor,
            key_source,
            covalidator,
            backoff: None,
        }
    }

    /// Deployment described by the configuration. Decryptions retry with the
    /// configured backoff.
    pub async fn connect(config: &AppConfig) -> Result<Self, SdkError> {
        let executor = config.executor_address()?;
        let client = ChainClientFactory::create_read(&config.rpc()?, &config.chain())
            .await
            .map_err(SdkError::Connect)?;
        let covalidator = HttpCovalidator::new(&config.kms_endpoint)?;
        info!(
            chain_id = config.chain_id,
            executor = %executor,
            kms = %config.kms_endpoint,
            "Connected to Lightning"
        );
        Ok(Self::new(
            config.chain_id,
            executor,
            Arc::new(VerifierKeySource::new(client, executor)),
            Arc::new(covalidator),
        )
        .with_backoff(Some(config.backoff)))
    }

    pub fn with_backoff(mut self, backoff: Option<BackoffConfig>) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn executor_address(&self) -> Address {
        self.executor
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn kms_context(&self) -> KmsContext {
        KmsContext {
            chain_id: self.chain_id,
            executor: self.executor,
        }
    }

    pub async fn ecies_public_key(&self) -> Result<Vec<u8>, SdkError> {
        self.key_source.ecies_public_key().await
    }

    /// Encryptor bound to the current network key. Reuse it to encrypt many
    /// inputs without resolving the key each time.
    pub async fn get_encryptor(&self) -> Result<EciesEncryptor, SdkError> {
        Ok(EciesEncryptor::new(&self.ecies_public_key().await?)?)
    }

    /// Full context for an input. The executor doubles as the ACL contract.
    pub fn plaintext_context(&self, context: EncryptionContext) -> PlaintextContext {
        PlaintextContext::new(self.chain_id, self.executor, context)
    }

    /// Encrypts `value` for use by `context.account_address` in a call to
    /// `context.dapp_address`. A ciphertext submitted by another account or
    /// to another contract is rejected on chain.
    pub async fn encrypt(
        &self,
        value: impl Into<Plaintext>,
        context: EncryptionContext,
        encryptor: Option<&dyn Encryptor>,
    ) -> Result<Ciphertext, SdkError> {
        let input = PlaintextWithContext {
            scheme: EncryptionScheme::Ecies,
            plaintext: value.into(),
            context: self.plaintext_context(context),
        };
        let ciphertext = match encryptor {
            Some(encryptor) => encryptor.encrypt(&input)?,
            None => self.get_encryptor().await?.encrypt(&input)?,
        };
        debug!(
            plaintext = %input.plaintext,
            ciphertext = %ciphertext.prettify(),
            "Encrypted input"
        );
        Ok(ciphertext)
    }

    /// Decrypts `handles` as `account`, in request order
    pub async fn attested_decrypt(
        &self,
        account: &Account,
        handles: &[Handle],
    ) -> Result<Vec<AttestedDecryption>, SdkError> {
        let context = self.kms_context();
        let decryptions = match &self.backoff {
            Some(backoff) => {
                attested_decrypt_with_backoff(
                    self.covalidator.as_ref(),
                    &context,
                    account.signer(),
                    handles,
                    backoff,
                )
                .await?
            }
            None => {
                attested_decrypt(self.covalidator.as_ref(), &context, account.signer(), handles)
                    .await?
            }
        };
        Ok(decryptions)
    }

    /// Reencryptor authenticated as `account`
    pub fn get_reencryptor(&self, account: &Account) -> Result<Reencryptor, SdkError> {
        let mut builder = Reencryptor::builder()
            .covalidator(self.covalidator.clone())
            .chain_id(self.chain_id)
            .executor(self.executor)
            .signer(account.signer().clone());
        if let Some(backoff) = self.backoff {
            builder = builder.backoff(backoff);
        }
        Ok(builder.build()?)
    }
}
