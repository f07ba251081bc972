// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The decoded value of a token attribute

use std::fmt;

use alloy_primitives::{Address, Bytes, I256, U256};
use serde::{Deserialize, Serialize};

/// Decoded result of a contract function call backing a token attribute.
///
/// Values are only produced by the result decoder, so every variant corresponds
/// to an elementary Solidity type. Integers of any width up to 256 bits are
/// widened to [`U256`]/[`I256`].
///
/// # Examples
///
/// ```rust
/// use alloy_primitives::U256;
/// use tokenattr::AttributeValue;
///
/// let value = AttributeValue::Uint(U256::from(42));
/// assert_eq!(value.as_uint(), Some(U256::from(42)));
/// assert_eq!(value.to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AttributeValue {
    Address(Address),
    Bool(bool),
    Bytes(Bytes),
    String(String),
    Uint(U256),
    Int(I256),
}

impl AttributeValue {
    #[must_use]
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(address) => Some(*address),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<I256> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{address}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Bytes(bytes) => write!(f, "{bytes}"),
            Self::String(value) => f.write_str(value),
            Self::Uint(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
        }
    }
}
