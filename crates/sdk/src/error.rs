// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use lightning_config::SetupError;
use lightning_crypto::CryptoError;
use lightning_evm::TxError;
use lightning_kms::KmsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("Could not connect to the host chain: {0}")]
    Connect(anyhow::Error),

    #[error("Could not read the network public key: {0}")]
    PublicKey(TxError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Kms(#[from] KmsError),
}
