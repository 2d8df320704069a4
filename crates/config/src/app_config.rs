// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::chain_config::{ChainInfo, E2EConfig};
use crate::rpc::RPC;
use crate::validation::normalize_private_key;
use crate::SetupError;
use alloy_primitives::{utils::parse_ether, Address, U256};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use lightning_utils::BackoffConfig;
use path_clean::clean;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// First well-known anvil account. It is pre-funded on every local node.
pub const ANVIL_RICH_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545/";
pub const DEFAULT_KMS_ENDPOINT: &str = "http://localhost:50055";

/// Environment variables read verbatim, without the `LIGHTNING_` prefix
const RAW_ENV_KEYS: [&str; 3] = ["ANVIL_PRIVATE_KEY", "SEED_PHRASE", "LOCAL_RPC_URL"];

/// Where the compiled contract JSON lives
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ArtifactPaths {
    pub add_two: PathBuf,
    pub lib_test: PathBuf,
    pub confidential_erc20: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            add_two: PathBuf::from("contracts/out/AddTwo.sol/AddTwo.json"),
            lib_test: PathBuf::from("contracts/out/LibTest.sol/LibTest.json"),
            confidential_erc20: PathBuf::from(
                "artifacts/contracts/ConfidentialERC20.sol/ConfidentialERC20.json",
            ),
        }
    }
}

/// Wall clock limits for scenario steps
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Timeouts {
    pub deploy_ms: u64,
    pub operation_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            deploy_ms: 100_000,
            operation_ms: 20_000,
        }
    }
}

/// Amounts are in ether
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FundingConfig {
    /// Accounts below this balance are topped up to it
    pub min_balance: String,
    /// Sent to the deployer before each contract deployment
    pub deploy_funding: String,
}

impl Default for FundingConfig {
    fn default() -> Self {
        Self {
            min_balance: "0.001".to_string(),
            deploy_funding: "1".to_string(),
        }
    }
}

impl FundingConfig {
    pub fn min_balance_wei(&self) -> Result<U256, SetupError> {
        parse_amount("funding.min_balance", &self.min_balance)
    }

    pub fn deploy_funding_wei(&self) -> Result<U256, SetupError> {
        parse_amount("funding.deploy_funding", &self.deploy_funding)
    }
}

fn parse_amount(field: &'static str, value: &str) -> Result<U256, SetupError> {
    parse_ether(value).map_err(|_| SetupError::InvalidAmount {
        field,
        value: value.to_string(),
    })
}

/// Application configuration.
///
/// Layered as defaults, then the YAML file, then the environment:
/// `ANVIL_PRIVATE_KEY`, `SEED_PHRASE` and `LOCAL_RPC_URL` are read as is and
/// every other field can be set with a `LIGHTNING_` prefix, eg.
/// `LIGHTNING_EXECUTOR_ADDRESS` or `LIGHTNING_BACKOFF__MAX_RETRIES`.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Key of the sender account
    pub anvil_private_key: Option<String>,
    /// Mnemonic for the named wallets
    pub seed_phrase: Option<String>,
    pub local_rpc_url: String,
    pub chain_id: u64,
    pub chain_name: String,
    pub block_explorer_url: Option<String>,
    /// Lightning executor. Its address is also the ACL address bound into
    /// every plaintext context.
    pub executor_address: Option<Address>,
    /// Covalidator / KMS endpoint
    pub kms_endpoint: String,
    /// Rich account used by the faucet
    pub faucet_private_key: String,
    pub backoff: BackoffConfig,
    pub artifacts: ArtifactPaths,
    pub timeouts: Timeouts,
    pub funding: FundingConfig,
    /// Directory of the loaded config file. Relative artifact paths resolve
    /// against it.
    #[serde(skip)]
    config_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            anvil_private_key: None,
            seed_phrase: None,
            local_rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: ChainInfo::anvil().id,
            chain_name: ChainInfo::anvil().name,
            block_explorer_url: None,
            executor_address: None,
            kms_endpoint: DEFAULT_KMS_ENDPOINT.to_string(),
            faucet_private_key: ANVIL_RICH_PRIVATE_KEY.to_string(),
            backoff: BackoffConfig::default(),
            artifacts: ArtifactPaths::default(),
            timeouts: Timeouts::default(),
            funding: FundingConfig::default(),
            config_dir: None,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("AppConfig")
            .field("anvil_private_key", &redact(&self.anvil_private_key))
            .field("seed_phrase", &redact(&self.seed_phrase))
            .field("local_rpc_url", &self.local_rpc_url)
            .field("chain_id", &self.chain_id)
            .field("chain_name", &self.chain_name)
            .field("executor_address", &self.executor_address)
            .field("kms_endpoint", &self.kms_endpoint)
            .field("backoff", &self.backoff)
            .field("artifacts", &self.artifacts)
            .field("timeouts", &self.timeouts)
            .field("funding", &self.funding)
            .finish()
    }
}

impl AppConfig {
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(file) = config_file {
            figment = figment.merge(Yaml::file(file));
        }
        figment
            .merge(Env::raw().only(&RAW_ENV_KEYS))
            .merge(Env::prefixed("LIGHTNING_").split("__"))
    }

    pub fn load(config_file: Option<&Path>) -> Result<Self, figment::Error> {
        let mut config: AppConfig = Self::figment(config_file).extract()?;
        config.config_dir = config_file.and_then(|f| f.parent().map(Path::to_path_buf));
        Ok(config)
    }

    pub fn chain(&self) -> ChainInfo {
        ChainInfo {
            id: self.chain_id,
            name: self.chain_name.clone(),
            block_explorer_url: self.block_explorer_url.clone(),
        }
    }

    pub fn rpc(&self) -> Result<RPC, SetupError> {
        RPC::from_url(&self.local_rpc_url)
    }

    /// Sender configuration for scenarios. Fails when `ANVIL_PRIVATE_KEY` is
    /// missing or malformed.
    pub fn e2e(&self) -> Result<E2EConfig, SetupError> {
        let key = self
            .anvil_private_key
            .as_deref()
            .ok_or(SetupError::MissingEnv("ANVIL_PRIVATE_KEY"))?;
        Ok(E2EConfig {
            sender_private_key: normalize_private_key(key, "ANVIL_PRIVATE_KEY")?,
            chain: self.chain(),
            host_chain_rpc_url: self.rpc()?,
        })
    }

    pub fn seed_phrase(&self) -> Result<&str, SetupError> {
        self.seed_phrase
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(SetupError::MissingEnv("SEED_PHRASE"))
    }

    pub fn executor_address(&self) -> Result<Address, SetupError> {
        self.executor_address
            .ok_or(SetupError::MissingConfig("executor_address"))
    }

    pub fn faucet_private_key(&self) -> Result<String, SetupError> {
        normalize_private_key(&self.faucet_private_key, "faucet_private_key")
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// Resolves an artifact path against the config file directory
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match (&self.config_dir, path.is_absolute()) {
            (Some(dir), false) => clean(dir.join(path)),
            _ => path.to_path_buf(),
        }
    }
}
