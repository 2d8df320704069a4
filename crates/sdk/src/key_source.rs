// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::SdkError;
use alloy::primitives::Address;
use async_trait::async_trait;
use lightning_evm::{
    bindings::{IncoLightning, IncoVerifier},
    read, PublicClient,
};
use tracing::debug;

/// Where the network ECIES public key comes from
#[async_trait]
pub trait PublicKeySource: Send + Sync {
    /// Compressed SEC1 key inputs are encrypted to
    async fn ecies_public_key(&self) -> Result<Vec<u8>, SdkError>;
}

/// Reads the current key on chain: the executor names its verifier and the
/// verifier publishes the key. Resolved on every call so a rotated key is
/// picked up.
#[derive(Clone)]
pub struct VerifierKeySource {
    client: PublicClient,
    executor: Address,
}

impl VerifierKeySource {
    pub fn new(client: PublicClient, executor: Address) -> Self {
        Self { client, executor }
    }
}

#[async_trait]
impl PublicKeySource for VerifierKeySource {
    async fn ecies_public_key(&self) -> Result<Vec<u8>, SdkError> {
        let verifier = read(&self.client, self.executor, IncoLightning::incoVerifierCall {})
            .await
            .map_err(SdkError::PublicKey)?;
        let key = read(&self.client, verifier, IncoVerifier::eciesPubkeyCall {})
            .await
            .map_err(SdkError::PublicKey)?;
        debug!(verifier = %verifier, "Resolved network public key");
        Ok(key.to_vec())
    }
}

/// A key known up front
#[derive(Clone, Debug)]
pub struct StaticKey(Vec<u8>);

impl StaticKey {
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self(key.into())
    }
}

#[async_trait]
impl PublicKeySource for StaticKey {
    async fn ecies_public_key(&self) -> Result<Vec<u8>, SdkError> {
        Ok(self.0.clone())
    }
}
