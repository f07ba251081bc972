// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use alloy_chains::Chain;

/// Errors that can occur when configuring sessions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Invalid RPC URL format
    #[error("Invalid URL {0}: {1}")]
    InvalidUrl(String, #[source] url::ParseError),

    /// Required environment variable is missing
    #[error("Missing environment variable {var} for chain {chain}")]
    MissingEnvVar {
        /// The chain whose endpoint was being loaded
        chain: Chain,
        /// The variable that was looked up
        var: String,
        /// The underlying lookup error
        #[source]
        source: dotenvy::Error,
    },

    /// The session pool lock was poisoned by a panicking writer
    #[error("Session pool lock poisoned")]
    LockPoisoned,
}
