// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::CryptoError;
use alloy::{
    primitives::{Address, U256},
    sol,
    sol_types::SolValue,
};
use serde::{Deserialize, Serialize};
use std::fmt;

sol! {
    struct EncodedContext {
        uint256 hostChainId;
        address aclAddress;
        address userAddress;
        address contractAddress;
    }

    struct EncodedPlaintext {
        uint8 scheme;
        uint8 handleType;
        uint256 value;
        EncodedContext context;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum EncryptionScheme {
    Tfhe = 0,
    Ecies = 1,
    Cryptobox = 2,
}

impl TryFrom<u8> for EncryptionScheme {
    type Error = CryptoError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EncryptionScheme::Tfhe),
            1 => Ok(EncryptionScheme::Ecies),
            2 => Ok(EncryptionScheme::Cryptobox),
            other => Err(CryptoError::UnsupportedScheme(other)),
        }
    }
}

/// Encrypted types as the executor numbers them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HandleType {
    Ebool = 0,
    Euint4 = 1,
    Euint8 = 2,
    Euint16 = 3,
    Euint32 = 4,
    Euint64 = 5,
    Euint128 = 6,
    Euint160 = 7,
    Euint256 = 8,
    Ebytes64 = 9,
    Ebytes128 = 10,
    Ebytes256 = 11,
}

impl TryFrom<u8> for HandleType {
    type Error = CryptoError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use HandleType::*;
        Ok(match value {
            0 => Ebool,
            1 => Euint4,
            2 => Euint8,
            3 => Euint16,
            4 => Euint32,
            5 => Euint64,
            6 => Euint128,
            7 => Euint160,
            8 => Euint256,
            9 => Ebytes64,
            10 => Ebytes128,
            11 => Ebytes256,
            other => return Err(CryptoError::UnknownHandleType(other)),
        })
    }
}

/// A value that can be encrypted as an input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plaintext {
    Uint256(U256),
    Bool(bool),
    Address(Address),
}

impl Plaintext {
    pub fn handle_type(&self) -> HandleType {
        match self {
            Plaintext::Uint256(_) => HandleType::Euint256,
            Plaintext::Bool(_) => HandleType::Ebool,
            Plaintext::Address(_) => HandleType::Euint160,
        }
    }

    /// The value as the executor stores it
    pub fn as_u256(&self) -> U256 {
        match self {
            Plaintext::Uint256(v) => *v,
            Plaintext::Bool(b) => U256::from(*b as u8),
            Plaintext::Address(a) => U256::from_be_slice(a.as_slice()),
        }
    }

    fn from_parts(handle_type: HandleType, value: U256) -> Result<Self, CryptoError> {
        match handle_type {
            HandleType::Euint256 => Ok(Plaintext::Uint256(value)),
            HandleType::Ebool if value <= U256::from(1u8) => {
                Ok(Plaintext::Bool(value == U256::from(1u8)))
            }
            HandleType::Ebool => Err(CryptoError::Malformed(format!(
                "boolean out of range: {value}"
            ))),
            HandleType::Euint160 if value.bit_len() <= 160 => {
                let bytes = value.to_be_bytes::<32>();
                Ok(Plaintext::Address(Address::from_slice(&bytes[12..])))
            }
            HandleType::Euint160 => Err(CryptoError::Malformed(format!(
                "address out of range: {value}"
            ))),
            other => Err(CryptoError::Malformed(format!(
                "unsupported input type {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plaintext::Uint256(v) => write!(f, "{v}"),
            Plaintext::Bool(b) => write!(f, "{b}"),
            Plaintext::Address(a) => write!(f, "{a}"),
        }
    }
}

impl From<U256> for Plaintext {
    fn from(value: U256) -> Self {
        Plaintext::Uint256(value)
    }
}

impl From<u64> for Plaintext {
    fn from(value: u64) -> Self {
        Plaintext::Uint256(U256::from(value))
    }
}

impl From<bool> for Plaintext {
    fn from(value: bool) -> Self {
        Plaintext::Bool(value)
    }
}

impl From<Address> for Plaintext {
    fn from(value: Address) -> Self {
        Plaintext::Address(value)
    }
}

/// Who may use a ciphertext: the user submitting it and the contract it is
/// submitted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncryptionContext {
    pub account_address: Address,
    pub dapp_address: Address,
}

/// Full context bound into a ciphertext. It must match what the contract
/// authorizes on chain or the input is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaintextContext {
    pub host_chain_id: u64,
    pub acl_address: Address,
    pub user_address: Address,
    pub contract_address: Address,
}

impl PlaintextContext {
    pub fn new(host_chain_id: u64, acl_address: Address, ctx: EncryptionContext) -> Self {
        Self {
            host_chain_id,
            acl_address,
            user_address: ctx.account_address,
            contract_address: ctx.dapp_address,
        }
    }

    fn encoded(&self) -> EncodedContext {
        EncodedContext {
            hostChainId: U256::from(self.host_chain_id),
            aclAddress: self.acl_address,
            userAddress: self.user_address,
            contractAddress: self.contract_address,
        }
    }

    /// Bytes used as associated data when sealing
    pub fn abi_encode(&self) -> Vec<u8> {
        self.encoded().abi_encode()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaintextWithContext {
    pub scheme: EncryptionScheme,
    pub plaintext: Plaintext,
    pub context: PlaintextContext,
}

impl PlaintextWithContext {
    pub fn abi_encode(&self) -> Vec<u8> {
        EncodedPlaintext {
            scheme: self.scheme as u8,
            handleType: self.plaintext.handle_type() as u8,
            value: self.plaintext.as_u256(),
            context: self.context.encoded(),
        }
        .abi_encode()
    }

    pub fn abi_decode(data: &[u8]) -> Result<Self, CryptoError> {
        let decoded = EncodedPlaintext::abi_decode(data)
            .map_err(|e| CryptoError::Malformed(e.to_string()))?;
        let host_chain_id = u64::try_from(decoded.context.hostChainId)
            .map_err(|_| CryptoError::Malformed("host chain id exceeds u64".into()))?;
        Ok(Self {
            scheme: EncryptionScheme::try_from(decoded.scheme)?,
            plaintext: Plaintext::from_parts(
                HandleType::try_from(decoded.handleType)?,
                decoded.value,
            )?,
            context: PlaintextContext {
                host_chain_id,
                acl_address: decoded.context.aclAddress,
                user_address: decoded.context.userAddress,
                contract_address: decoded.context.contractAddress,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn context() -> PlaintextContext {
        PlaintextContext::new(
            31337,
            address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            EncryptionContext {
                account_address: address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
                dapp_address: address!("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
            },
        )
    }

    #[test]
    fn values_map_to_executor_types() {
        assert_eq!(Plaintext::from(42u64).handle_type(), HandleType::Euint256);
        assert_eq!(Plaintext::from(true).handle_type(), HandleType::Ebool);
        assert_eq!(
            Plaintext::from(Address::ZERO).handle_type(),
            HandleType::Euint160
        );
        assert_eq!(HandleType::Euint256 as u8, 8);
        assert_eq!(EncryptionScheme::Ecies as u8, 1);
        assert_eq!(Plaintext::from(true).as_u256(), U256::from(1u8));
    }

    #[test]
    fn address_survives_encoding() {
        let user = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let pt = PlaintextWithContext {
            scheme: EncryptionScheme::Ecies,
            plaintext: Plaintext::Address(user),
            context: context(),
        };
        assert_eq!(PlaintextWithContext::abi_decode(&pt.abi_encode()).unwrap(), pt);
    }

    #[test]
    fn out_of_range_boolean_is_rejected() {
        let bogus = EncodedPlaintext {
            scheme: 1,
            handleType: HandleType::Ebool as u8,
            value: U256::from(2u8),
            context: context().encoded(),
        }
        .abi_encode();
        assert!(matches!(
            PlaintextWithContext::abi_decode(&bogus),
            Err(CryptoError::Malformed(_))
        ));
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let bogus = EncodedPlaintext {
            scheme: 1,
            handleType: 42,
            value: U256::ZERO,
            context: context().encoded(),
        }
        .abi_encode();
        assert!(matches!(
            PlaintextWithContext::abi_decode(&bogus),
            Err(CryptoError::UnknownHandleType(42))
        ));
    }
}
