// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use alloy_chains::Chain;
use alloy_primitives::Address;

use super::TransportError;

/// Errors that can occur while executing one contract function call.
///
/// Every variant carries enough context (function name, contract, network) to
/// identify the failing attribute call in logs.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// No active session is registered for the descriptor's network.
    #[error("No session available on chain {network} for function: {function}")]
    SessionUnavailable {
        /// The network that has no session
        network: Chain,
        /// The function that was going to be called
        function: String,
    },

    /// The session failed to perform the call.
    ///
    /// Covers connectivity issues, node errors, and responses that could not
    /// be decoded at the transport layer. Never retried.
    #[error("Call to {function}() on contract {contract} failed")]
    Transport {
        /// The function that was called
        function: String,
        /// The contract that was called
        contract: Address,
        /// The underlying transport failure
        #[source]
        source: TransportError,
    },

    /// A non-void return type was expected but the response carried no value.
    #[error("nil result from calling: {function}() on contract: {contract}")]
    EmptyResult {
        /// The function that was called
        function: String,
        /// The contract that was called
        contract: Address,
    },

    /// The call could not be turned into a function fragment.
    #[error("Failed to build function fragment for {function}: {reason}")]
    InvalidFunction {
        /// The offending function name
        function: String,
        /// Why the fragment could not be built
        reason: String,
    },
}

impl CallError {
    /// Helper to create a `Transport` error for a failed call.
    pub fn transport(function: impl Into<String>, contract: Address, source: TransportError) -> Self {
        CallError::Transport {
            function: function.into(),
            contract,
            source,
        }
    }

    /// Helper to create an `EmptyResult` error.
    pub fn empty_result(function: impl Into<String>, contract: Address) -> Self {
        CallError::EmptyResult {
            function: function.into(),
            contract,
        }
    }

    /// Returns `true` if the error came from the network round trip itself.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, CallError::Transport { .. })
    }
}
