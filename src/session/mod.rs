// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Network sessions that perform contract calls
//!
//! The [`CallExecutor`](crate::CallExecutor) never talks to an RPC node
//! directly. It asks a [`SessionProvider`] for the [`Session`] of a network and
//! hands it one [`ContractCall`].
//!
//! - [`ProviderSession`] - a session over an alloy HTTP provider
//! - [`SessionPool`] - a thread-safe registry of sessions indexed by chain
//!
//! Tests and embedders can implement both traits directly.

mod pool;
mod provider;

pub use pool::SessionPool;
pub use provider::ProviderSession;

use std::collections::HashMap;
use std::sync::Arc;

use alloy_chains::Chain;
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;

use crate::call::FunctionFragment;
use crate::errors::TransportError;

/// One contract function call, ready to be sent.
#[derive(Debug, Clone)]
pub struct ContractCall {
    /// The contract to call
    pub contract: Address,
    /// ABI fragment describing exactly the called function
    pub fragment: FunctionFragment,
    /// Ordered arguments
    pub arguments: Vec<DynSolValue>,
}

impl ContractCall {
    #[must_use]
    pub fn function_name(&self) -> &str {
        self.fragment.name()
    }

    /// Selector and ABI-encoded arguments.
    #[must_use]
    pub fn calldata(&self) -> Bytes {
        self.fragment.encode_input(&self.arguments).into()
    }
}

/// Structured result of a call, keyed by positional output index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOutput {
    values: Vec<DynSolValue>,
}

impl CallOutput {
    #[must_use]
    pub fn new(values: Vec<DynSolValue>) -> Self {
        Self { values }
    }

    /// An output without any positional field.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The value at output position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DynSolValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<DynSolValue>> for CallOutput {
    fn from(values: Vec<DynSolValue>) -> Self {
        Self::new(values)
    }
}

/// A connection to one network that can execute contract calls.
///
/// Implementations may be single-threaded or pool-backed; callers make no
/// assumption about where the future is driven.
#[async_trait]
pub trait Session: Send + Sync {
    /// Performs exactly one call and returns its positional outputs.
    async fn call(&self, call: ContractCall) -> Result<CallOutput, TransportError>;
}

/// Looks up the active session of a network.
pub trait SessionProvider: Send + Sync {
    /// Returns `None` if no session exists for `network`.
    fn session_for(&self, network: Chain) -> Option<Arc<dyn Session>>;
}

impl SessionProvider for HashMap<Chain, Arc<dyn Session>> {
    fn session_for(&self, network: Chain) -> Option<Arc<dyn Session>> {
        self.get(&network).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SolidityType;
    use alloy_primitives::U256;

    #[test]
    fn test_calldata_starts_with_selector() {
        let call = ContractCall {
            contract: Address::ZERO,
            fragment: FunctionFragment::new(
                "tokenURI",
                vec![SolidityType::UINT256],
                SolidityType::String,
            )
            .unwrap(),
            arguments: vec![DynSolValue::Uint(U256::from(1), 256)],
        };

        let calldata = call.calldata();
        assert_eq!(call.function_name(), "tokenURI");
        assert_eq!(&calldata[..4], call.fragment.selector().as_slice());
        assert_eq!(calldata.len(), 36);
    }

    #[test]
    fn test_output_positions() {
        let output = CallOutput::from(vec![DynSolValue::Bool(true)]);
        assert_eq!(output.get(0), Some(&DynSolValue::Bool(true)));
        assert_eq!(output.get(1), None);
        assert!(CallOutput::empty().get(0).is_none());
    }

    #[test]
    fn test_hash_map_provider() {
        let sessions: HashMap<Chain, Arc<dyn Session>> = HashMap::new();
        assert!(sessions.session_for(Chain::from_id(1)).is_none());
    }
}
