// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

/// Errors that can occur when building call descriptors.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// The type name is not one an attribute call can use.
    ///
    /// Only elementary Solidity types are supported: `address`, `bool`,
    /// `string`, `bytes`, `bytesN`, `uintN`, `intN` and `void`.
    #[error("Unsupported Solidity type: {0}")]
    UnsupportedType(String),

    /// An argument value does not fit its declared type.
    #[error("Invalid argument for {ty}: {reason}")]
    InvalidArgument {
        /// The declared type of the argument
        ty: String,
        /// Why the value was rejected
        reason: String,
    },
}
