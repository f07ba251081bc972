// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use alloy_chains::Chain;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::FunctionFragment;
use crate::errors::CallError;
use crate::types::{CallArgument, SolidityType};

/// Identifier of the attribute a value is requested for (e.g. `"balance"`).
///
/// Only used for logging: two attributes backed by the same call share one
/// network round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeId(String);

impl AttributeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttributeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AttributeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key identifying one unique contract function call.
///
/// Equality and hashing are structural over every field, including argument
/// order, so two descriptors coalesce in the
/// [`AttributeCache`](crate::AttributeCache) iff they would issue the exact
/// same call on the same network. Fields are private: a descriptor cannot
/// change while it is used as a key.
///
/// # Examples
///
/// ```rust
/// use alloy_chains::NamedChain;
/// use alloy_primitives::address;
/// use tokenattr::{CallArgument, CallDescriptor, SolidityType};
///
/// let descriptor = CallDescriptor::new(
///     NamedChain::Mainnet,
///     address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
///     "balanceOf",
///     vec![CallArgument::Address(address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"))],
///     SolidityType::UINT256,
/// );
/// assert_eq!(descriptor.network().id(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDescriptor {
    network: Chain,
    contract: Address,
    function_name: String,
    arguments: Vec<CallArgument>,
    return_type: SolidityType,
}

impl CallDescriptor {
    pub fn new(
        network: impl Into<Chain>,
        contract: Address,
        function_name: impl Into<String>,
        arguments: Vec<CallArgument>,
        return_type: SolidityType,
    ) -> Self {
        Self {
            network: network.into(),
            contract,
            function_name: function_name.into(),
            arguments,
            return_type,
        }
    }

    #[must_use]
    pub fn network(&self) -> Chain {
        self.network
    }

    #[must_use]
    pub fn contract(&self) -> Address {
        self.contract
    }

    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    #[must_use]
    pub fn arguments(&self) -> &[CallArgument] {
        &self.arguments
    }

    #[must_use]
    pub fn return_type(&self) -> SolidityType {
        self.return_type
    }

    /// Synthesizes the ABI fragment for exactly this one function.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::InvalidFunction`] if the function name is not a
    /// valid Solidity identifier.
    pub fn fragment(&self) -> Result<FunctionFragment, CallError> {
        FunctionFragment::new(
            &self.function_name,
            self.arguments.iter().map(CallArgument::sol_type).collect(),
            self.return_type,
        )
    }
}

impl fmt::Display for CallDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}(", self.network.id(), self.contract, self.function_name)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", arg.sol_type())?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}
