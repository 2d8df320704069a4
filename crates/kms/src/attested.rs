// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    auth, AttestedDecryptRequest, AttestedDecryption, Covalidator, KmsError, WireDecryption,
};
use alloy::{primitives::Address, signers::Signer, sol_types::Eip712Domain};
use lightning_crypto::Handle;
use lightning_utils::{retry_any_error, BackoffConfig};
use tracing::info;

/// Deployment a request is authorized against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KmsContext {
    pub chain_id: u64,
    /// Lightning executor, the verifying contract of every request
    pub executor: Address,
}

impl KmsContext {
    pub fn domain(&self) -> Eip712Domain {
        auth::domain(self.chain_id, self.executor)
    }

    pub(crate) fn check(&self) -> Result<(), KmsError> {
        if self.chain_id == 0 {
            return Err(KmsError::MissingParameter("chain id"));
        }
        if self.executor.is_zero() {
            return Err(KmsError::MissingParameter("executor address"));
        }
        Ok(())
    }
}

/// Decrypts `handles` for the signer. Results come back in request order;
/// a response that does not line up with the request is rejected.
pub async fn attested_decrypt<S>(
    covalidator: &dyn Covalidator,
    context: &KmsContext,
    signer: &S,
    handles: &[Handle],
) -> Result<Vec<AttestedDecryption>, KmsError>
where
    S: Signer + Send + Sync,
{
    check_request(context, handles)?;

    let hash = auth::attested_decrypt_hash(&context.domain(), handles);
    let request = AttestedDecryptRequest {
        handles: handles.to_vec(),
        signature: auth::sign(signer, hash).await?,
        chain_id: context.chain_id,
        user: signer.address(),
    };
    let response = covalidator.attested_decrypt(request).await?;
    let decryptions = in_request_order(handles, response.decryptions)?;
    info!(count = decryptions.len(), "Attested decryption");
    Ok(decryptions)
}

/// [`attested_decrypt`] retried under `backoff`. Bad parameters fail at once.
pub async fn attested_decrypt_with_backoff<S>(
    covalidator: &dyn Covalidator,
    context: &KmsContext,
    signer: &S,
    handles: &[Handle],
    backoff: &BackoffConfig,
) -> Result<Vec<AttestedDecryption>, KmsError>
where
    S: Signer + Send + Sync,
{
    check_request(context, handles)?;
    retry_any_error("attested decrypt", backoff, || async move {
        attested_decrypt(covalidator, context, signer, handles)
            .await
            .map_err(anyhow::Error::from)
    })
    .await
    .map_err(KmsError::RetriesExhausted)
}

fn check_request(context: &KmsContext, handles: &[Handle]) -> Result<(), KmsError> {
    context.check()?;
    if handles.is_empty() || handles.iter().any(Handle::is_zero) {
        return Err(KmsError::MissingParameter("handle"));
    }
    Ok(())
}

fn in_request_order(
    handles: &[Handle],
    decryptions: Vec<WireDecryption>,
) -> Result<Vec<AttestedDecryption>, KmsError> {
    if decryptions.len() != handles.len() {
        return Err(KmsError::CountMismatch {
            expected: handles.len(),
            got: decryptions.len(),
        });
    }
    handles
        .iter()
        .zip(decryptions)
        .enumerate()
        .map(|(index, (expected, wire))| {
            if wire.handle != *expected {
                return Err(KmsError::OrderMismatch {
                    index,
                    expected: *expected,
                    got: wire.handle,
                });
            }
            Ok(wire.into())
        })
        .collect()
}
