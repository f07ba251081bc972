// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strongly typed building blocks shared by descriptors, sessions and the cache
//!
//! - [`AttributeValue`] - the decoded result of an attribute call
//! - [`SolidityType`] - the return-type tag a call expects
//! - [`CallArgument`] - one typed, hashable argument of a call

mod argument;
mod solidity;
mod value;

pub use argument::CallArgument;
pub use solidity::SolidityType;
pub use value::AttributeValue;
