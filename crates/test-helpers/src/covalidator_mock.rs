// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    primitives::{keccak256, Address, Bytes, B256, U256},
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use lightning_crypto::{
    decrypt_input, ecies, Ciphertext, CryptoError, EciesKeypair, Handle, PlaintextContext,
};
use lightning_kms::{
    auth, AttestedDecryptRequest, AttestedDecryptResponse, Covalidator, KmsContext, KmsError,
    ReencryptRequest, ReencryptResponse, WireDecryption, WirePlaintext,
};
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering},
        Arc,
    },
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct StoredValue {
    value: U256,
    allowed: HashSet<Address>,
}

/// In memory covalidator. Holds the network key, so it can take inputs
/// encrypted with its public key, and enforces the same request
/// authorization as the real service.
#[derive(Clone)]
pub struct MockCovalidator {
    network_key: Arc<EciesKeypair>,
    attester: PrivateKeySigner,
    context: KmsContext,
    values: Arc<RwLock<HashMap<Handle, StoredValue>>>,
    next_handle: Arc<AtomicU64>,
    pending_failures: Arc<AtomicU32>,
    calls: Arc<AtomicU32>,
    reverse_results: Arc<AtomicBool>,
}

impl MockCovalidator {
    pub fn new(chain_id: u64, executor: Address) -> Self {
        Self {
            network_key: Arc::new(EciesKeypair::generate()),
            attester: PrivateKeySigner::random(),
            context: KmsContext { chain_id, executor },
            values: Arc::new(RwLock::new(HashMap::new())),
            next_handle: Arc::new(AtomicU64::new(1)),
            pending_failures: Arc::new(AtomicU32::new(0)),
            calls: Arc::new(AtomicU32::new(0)),
            reverse_results: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn context(&self) -> KmsContext {
        self.context
    }

    /// Compressed network key inputs are encrypted to
    pub fn network_public_key(&self) -> Vec<u8> {
        self.network_key.public_key_bytes()
    }

    /// Address signing attested decryptions
    pub fn attester(&self) -> Address {
        self.attester.address()
    }

    /// Stores a value under a fresh handle readable by `allowed`
    pub async fn store(&self, value: U256, allowed: &[Address]) -> Handle {
        let seq = self.next_handle.fetch_add(1, Ordering::SeqCst);
        let handle = Handle(keccak256(seq.to_be_bytes()));
        self.values.write().await.insert(
            handle,
            StoredValue {
                value,
                allowed: allowed.iter().copied().collect(),
            },
        );
        handle
    }

    pub async fn allow(&self, handle: Handle, user: Address) {
        if let Some(stored) = self.values.write().await.get_mut(&handle) {
            stored.allowed.insert(user);
        }
    }

    /// Accepts a client encrypted input the way the executor would. The
    /// submitting user and the target contract may read it.
    pub async fn ingest_input(
        &self,
        ciphertext: &Ciphertext,
        context: &PlaintextContext,
    ) -> Result<Handle, CryptoError> {
        let input = decrypt_input(&self.network_key, ciphertext, context)?;
        Ok(self
            .store(
                input.plaintext.as_u256(),
                &[context.user_address, context.contract_address],
            )
            .await)
    }

    /// The next `n` requests fail with a 503
    pub fn fail_next(&self, n: u32) {
        self.pending_failures.store(n, Ordering::SeqCst);
    }

    /// Answer attested decryptions in reverse order
    pub fn reverse_results(&self, reverse: bool) {
        self.reverse_results.store(reverse, Ordering::SeqCst);
    }

    /// Requests received, failed ones included
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn injected_failure(&self) -> Result<(), KmsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let taken = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if taken.is_ok() {
            warn!("MockCovalidator: injected failure");
            return Err(KmsError::Service {
                status: 503,
                body: "covalidator unavailable".into(),
            });
        }
        Ok(())
    }

    fn authorize(
        &self,
        chain_id: u64,
        user: Address,
        hash: B256,
        signature: &[u8],
    ) -> Result<(), KmsError> {
        if chain_id != self.context.chain_id {
            return Err(KmsError::Unauthorized(format!("wrong chain id {chain_id}")));
        }
        let signer = auth::recover(hash, signature)?;
        if signer != user {
            return Err(KmsError::Unauthorized(format!(
                "signed by {signer}, claimed {user}"
            )));
        }
        Ok(())
    }

    async fn readable(&self, handle: Handle, user: Address) -> Result<U256, KmsError> {
        let values = self.values.read().await;
        let stored = values.get(&handle).ok_or_else(|| KmsError::Service {
            status: 404,
            body: format!("unknown handle {handle}"),
        })?;
        if !stored.allowed.contains(&user) {
            return Err(KmsError::Unauthorized(format!(
                "{user} may not decrypt {handle}"
            )));
        }
        Ok(stored.value)
    }
}

#[async_trait]
impl Covalidator for MockCovalidator {
    async fn reencrypt(&self, request: ReencryptRequest) -> Result<ReencryptResponse, KmsError> {
        self.injected_failure()?;
        let hash =
            auth::reencrypt_hash(&self.context.domain(), request.handle, &request.public_key);
        self.authorize(request.chain_id, request.user, hash, &request.signature)?;
        let value = self.readable(request.handle, request.user).await?;

        let recipient = ecies::parse_public_key(&request.public_key)?;
        let sealed = ecies::seal(
            &recipient,
            &value.to_be_bytes::<32>(),
            request.handle.as_b256().as_slice(),
        )?;
        debug!(handle = %request.handle, "MockCovalidator: reencrypted");
        Ok(ReencryptResponse {
            ciphertext: Bytes::from(sealed),
        })
    }

    async fn attested_decrypt(
        &self,
        request: AttestedDecryptRequest,
    ) -> Result<AttestedDecryptResponse, KmsError> {
        self.injected_failure()?;
        let hash = auth::attested_decrypt_hash(&self.context.domain(), &request.handles);
        self.authorize(request.chain_id, request.user, hash, &request.signature)?;

        let mut decryptions = Vec::with_capacity(request.handles.len());
        for handle in &request.handles {
            let value = self.readable(*handle, request.user).await?;
            let digest =
                keccak256([handle.as_b256().as_slice(), &value.to_be_bytes::<32>()].concat());
            decryptions.push(WireDecryption {
                handle: *handle,
                plaintext: WirePlaintext { value },
                signatures: vec![auth::sign(&self.attester, digest).await?],
            });
        }
        if self.reverse_results.load(Ordering::SeqCst) {
            decryptions.reverse();
        }
        Ok(AttestedDecryptResponse { decryptions })
    }
}
