// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed arguments for attribute calls

use std::str::FromStr;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, B256, I256, U256};
use serde::{Deserialize, Serialize};

use super::SolidityType;
use crate::errors::DescriptorError;

/// One positional argument of an attribute call.
///
/// Arguments are part of a [`CallDescriptor`](crate::CallDescriptor) key, so
/// unlike [`DynSolValue`] they are `Eq + Hash`. Each argument knows its own
/// Solidity type, which is how the function fragment learns its input types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CallArgument {
    Address(Address),
    Bool(bool),
    Bytes(Bytes),
    /// Left-aligned word and its size in bytes
    FixedBytes(B256, usize),
    String(String),
    /// Value and its width in bits
    Uint(U256, usize),
    /// Value and its width in bits
    Int(I256, usize),
}

impl CallArgument {
    /// A `uint256` argument, the common case for token ids.
    pub fn uint256(value: impl Into<U256>) -> Self {
        Self::Uint(value.into(), 256)
    }

    /// Parses a textual argument (as attribute definitions carry them) into
    /// an argument of type `ty`.
    ///
    /// Integers accept decimal or `0x`-prefixed hex, byte arrays accept hex.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::InvalidArgument`] if the text does not fit
    /// the type, and [`DescriptorError::UnsupportedType`] for `void`.
    pub fn parse(ty: SolidityType, raw: &str) -> Result<Self, DescriptorError> {
        let raw = raw.trim();
        let invalid = |reason: String| DescriptorError::InvalidArgument {
            ty: ty.to_string(),
            reason,
        };

        if !ty.has_valid_width() {
            return Err(DescriptorError::UnsupportedType(ty.to_string()));
        }

        match ty {
            SolidityType::Address => Address::from_str(raw)
                .map(Self::Address)
                .map_err(|e| invalid(e.to_string())),
            SolidityType::Bool => match raw {
                "true" => Ok(Self::Bool(true)),
                "false" => Ok(Self::Bool(false)),
                other => Err(invalid(format!("expected true or false, got {other:?}"))),
            },
            SolidityType::Bytes => Bytes::from_str(raw)
                .map(Self::Bytes)
                .map_err(|e| invalid(e.to_string())),
            SolidityType::FixedBytes(size) => {
                let bytes = Bytes::from_str(raw).map_err(|e| invalid(e.to_string()))?;
                if bytes.len() > size {
                    return Err(invalid(format!("{} bytes do not fit", bytes.len())));
                }
                let mut word = B256::ZERO;
                word[..bytes.len()].copy_from_slice(&bytes);
                Ok(Self::FixedBytes(word, size))
            }
            SolidityType::String => Ok(Self::String(raw.to_string())),
            SolidityType::Uint(bits) => {
                let value = U256::from_str(raw).map_err(|e| invalid(e.to_string()))?;
                if value.bit_len() > bits {
                    return Err(invalid(format!("{value} overflows {bits} bits")));
                }
                Ok(Self::Uint(value, bits))
            }
            SolidityType::Int(bits) => {
                let value = I256::from_str(raw).map_err(|e| invalid(e.to_string()))?;
                // Two's complement range: magnitude below 2^(bits-1), or equal to it when negative
                let magnitude = value.unsigned_abs();
                let needed = if value.is_negative() {
                    (magnitude - U256::from(1)).bit_len()
                } else {
                    magnitude.bit_len()
                };
                if needed >= bits {
                    return Err(invalid(format!("{value} overflows {bits} bits")));
                }
                Ok(Self::Int(value, bits))
            }
            SolidityType::Void => Err(DescriptorError::UnsupportedType(ty.to_string())),
        }
    }

    /// The Solidity type of this argument.
    #[must_use]
    pub fn sol_type(&self) -> SolidityType {
        match self {
            Self::Address(_) => SolidityType::Address,
            Self::Bool(_) => SolidityType::Bool,
            Self::Bytes(_) => SolidityType::Bytes,
            Self::FixedBytes(_, size) => SolidityType::FixedBytes(*size),
            Self::String(_) => SolidityType::String,
            Self::Uint(_, bits) => SolidityType::Uint(*bits),
            Self::Int(_, bits) => SolidityType::Int(*bits),
        }
    }

    /// Converts to the ABI encoder's value type.
    #[must_use]
    pub fn to_sol_value(&self) -> DynSolValue {
        match self {
            Self::Address(address) => DynSolValue::Address(*address),
            Self::Bool(value) => DynSolValue::Bool(*value),
            Self::Bytes(bytes) => DynSolValue::Bytes(bytes.to_vec()),
            Self::FixedBytes(word, size) => DynSolValue::FixedBytes(*word, *size),
            Self::String(value) => DynSolValue::String(value.clone()),
            Self::Uint(value, bits) => DynSolValue::Uint(*value, *bits),
            Self::Int(value, bits) => DynSolValue::Int(*value, *bits),
        }
    }
}

impl From<Address> for CallArgument {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<bool> for CallArgument {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for CallArgument {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<U256> for CallArgument {
    fn from(value: U256) -> Self {
        Self::uint256(value)
    }
}
