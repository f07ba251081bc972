// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Return-type tags for attribute calls

use std::fmt;
use std::str::FromStr;

use alloy_dyn_abi::DynSolType;
use serde::{Deserialize, Serialize};

use crate::errors::DescriptorError;

/// Elementary Solidity type an attribute call returns or takes.
///
/// Widths are in bits for integers and in bytes for fixed byte arrays,
/// mirroring the Solidity type names (`uint8`, `bytes32`). `Void` marks a
/// function with no return value.
///
/// # Examples
///
/// ```rust
/// use tokenattr::SolidityType;
///
/// let ty: SolidityType = "uint".parse().unwrap();
/// assert_eq!(ty, SolidityType::Uint(256));
/// assert_eq!(ty.to_string(), "uint256");
/// assert!("void".parse::<SolidityType>().unwrap().is_void());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SolidityType {
    Address,
    Bool,
    Bytes,
    FixedBytes(usize),
    String,
    Uint(usize),
    Int(usize),
    Void,
}

impl SolidityType {
    /// `uint256`
    pub const UINT256: Self = Self::Uint(256);
    /// `int256`
    pub const INT256: Self = Self::Int(256);

    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Whether the width is one Solidity allows: a multiple of 8 from 8 to
    /// 256 bits for integers, 1 to 32 bytes for fixed byte arrays.
    ///
    /// The variants are public, so a type built by hand can carry any width;
    /// parsed types are always valid.
    #[must_use]
    pub fn has_valid_width(&self) -> bool {
        match *self {
            Self::Uint(bits) | Self::Int(bits) => bits % 8 == 0 && (8..=256).contains(&bits),
            Self::FixedBytes(size) => (1..=32).contains(&size),
            _ => true,
        }
    }

    /// The ABI decoder type, or `None` for `void`.
    #[must_use]
    pub fn to_dyn(&self) -> Option<DynSolType> {
        match *self {
            Self::Address => Some(DynSolType::Address),
            Self::Bool => Some(DynSolType::Bool),
            Self::Bytes => Some(DynSolType::Bytes),
            Self::FixedBytes(size) => Some(DynSolType::FixedBytes(size)),
            Self::String => Some(DynSolType::String),
            Self::Uint(bits) => Some(DynSolType::Uint(bits)),
            Self::Int(bits) => Some(DynSolType::Int(bits)),
            Self::Void => None,
        }
    }

    fn from_dyn(ty: DynSolType, name: &str) -> Result<Self, DescriptorError> {
        match ty {
            DynSolType::Address => Ok(Self::Address),
            DynSolType::Bool => Ok(Self::Bool),
            DynSolType::Bytes => Ok(Self::Bytes),
            DynSolType::FixedBytes(size) => Ok(Self::FixedBytes(size)),
            DynSolType::String => Ok(Self::String),
            DynSolType::Uint(bits) => Ok(Self::Uint(bits)),
            DynSolType::Int(bits) => Ok(Self::Int(bits)),
            _ => Err(DescriptorError::UnsupportedType(name.to_string())),
        }
    }
}

impl FromStr for SolidityType {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name {
            "void" => Ok(Self::Void),
            "uint" => Ok(Self::UINT256),
            "int" => Ok(Self::INT256),
            _ => {
                let ty = DynSolType::parse(name)
                    .map_err(|_| DescriptorError::UnsupportedType(name.to_string()))?;
                Self::from_dyn(ty, name)
            }
        }
    }
}

impl TryFrom<String> for SolidityType {
    type Error = DescriptorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SolidityType> for String {
    fn from(ty: SolidityType) -> Self {
        ty.to_string()
    }
}

impl fmt::Display for SolidityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => f.write_str("address"),
            Self::Bool => f.write_str("bool"),
            Self::Bytes => f.write_str("bytes"),
            Self::FixedBytes(size) => write!(f, "bytes{size}"),
            Self::String => f.write_str("string"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::Void => f.write_str("void"),
        }
    }
}
