// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{
    AttestedDecryptRequest, AttestedDecryptResponse, Covalidator, KmsError, ReencryptRequest,
    ReencryptResponse,
};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Covalidator reached over HTTP with JSON bodies
#[derive(Clone, Debug)]
pub struct HttpCovalidator {
    client: reqwest::Client,
    base: Url,
}

impl HttpCovalidator {
    pub fn new(endpoint: &str) -> Result<Self, KmsError> {
        let mut base = Url::parse(endpoint)
            .map_err(|e| KmsError::Transport(format!("invalid endpoint {endpoint}: {e}")))?;
        // Keep any path prefix when joining
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, base })
    }

    pub fn endpoint(&self, route: &str) -> Result<Url, KmsError> {
        self.base
            .join(route)
            .map_err(|e| KmsError::Transport(e.to_string()))
    }

    async fn post<Req, Resp>(&self, route: &str, body: &Req) -> Result<Resp, KmsError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(route)?;
        debug!(url = %url, "POST");
        let response = self.client.post(url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KmsError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| KmsError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl Covalidator for HttpCovalidator {
    async fn reencrypt(&self, request: ReencryptRequest) -> Result<ReencryptResponse, KmsError> {
        self.post("reencrypt", &request).await
    }

    async fn attested_decrypt(
        &self,
        request: AttestedDecryptRequest,
    ) -> Result<AttestedDecryptResponse, KmsError> {
        self.post("attested-decrypt", &request).await
    }
}
