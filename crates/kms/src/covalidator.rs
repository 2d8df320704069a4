// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    AttestedDecryptRequest, AttestedDecryptResponse, KmsError, ReencryptRequest,
    ReencryptResponse,
};
use async_trait::async_trait;

/// The key management service that decrypts handles for authorized users
#[async_trait]
pub trait Covalidator: Send + Sync {
    /// Reencrypt one handle to the public key in the request
    async fn reencrypt(&self, request: ReencryptRequest) -> Result<ReencryptResponse, KmsError>;

    /// Decrypt a batch of handles with attestations
    async fn attested_decrypt(
        &self,
        request: AttestedDecryptRequest,
    ) -> Result<AttestedDecryptResponse, KmsError>;
}
