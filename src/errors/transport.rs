// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

/// A failure reported by a [`Session`](crate::Session) while performing a call.
///
/// Sessions wrap whatever their transport produces (alloy RPC errors, ABI
/// decoding failures, custom client errors) together with a short description
/// of the operation that failed.
#[derive(Debug, thiserror::Error)]
#[error("Transport failure during {operation}")]
pub struct TransportError {
    /// Description of the operation that failed (e.g., "eth_call balanceOf(address)")
    pub operation: String,
    /// The underlying error
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    /// Wraps any error type.
    pub fn new(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Builds a transport error from a plain message, for sessions whose
    /// client only reports strings.
    pub fn message(operation: impl Into<String>, message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self {
            operation: operation.into(),
            source: message.into(),
        }
    }
}
