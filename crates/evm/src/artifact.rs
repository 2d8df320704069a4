// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{hex, json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Could not read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact {name} is not valid JSON: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Artifact {name} has invalid bytecode: {reason}")]
    Bytecode { name: String, reason: String },

    #[error("Artifact {name} has no bytecode. Is it an interface or abstract contract?")]
    EmptyBytecode { name: String },
}

#[derive(Deserialize)]
struct RawArtifact {
    abi: JsonAbi,
    bytecode: RawBytecode,
}

/// Foundry nests the creation code under `object`, Hardhat stores it inline
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Inline(String),
    Foundry { object: String },
}

impl RawBytecode {
    fn as_str(&self) -> &str {
        match self {
            RawBytecode::Inline(s) => s,
            RawBytecode::Foundry { object } => object,
        }
    }
}

/// Compiled contract: ABI plus creation bytecode
#[derive(Clone, Debug)]
pub struct Artifact {
    pub name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn from_json(name: &str, json: &str) -> Result<Self, ArtifactError> {
        let raw: RawArtifact =
            serde_json::from_str(json).map_err(|source| ArtifactError::Json {
                name: name.to_string(),
                source,
            })?;

        let bytecode = hex::decode(raw.bytecode.as_str().trim()).map_err(|e| {
            ArtifactError::Bytecode {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;
        if bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode {
                name: name.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            abi: raw.abi,
            bytecode: bytecode.into(),
        })
    }

    /// Loads an artifact named after its file stem
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let json = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_json(&name, &json)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.abi.functions.contains_key(name)
    }

    /// Creation code followed by the ABI encoded constructor arguments
    pub fn deploy_code(&self, constructor_args: &[u8]) -> Bytes {
        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(constructor_args);
        code.into()
    }
}
